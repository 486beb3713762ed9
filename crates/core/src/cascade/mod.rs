//! Discount/charge calculation over nested adjustment trees.
//!
//! A money type or amount type may carry a list of adjustment definitions.
//! Each discount definition may itself carry nested charge definitions that
//! tax the discount's own computed amount, recursively.
//!
//! # Modules
//!
//! - `types` - Adjustment definitions and computed cascade lines
//! - `service` - Single-node computation and cascade expansion

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::{compute, compute_cascade};
pub use types::{AdjustmentDef, AdjustmentKind, CascadeLine};
