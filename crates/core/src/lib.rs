//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, derived-total calculations, and lifecycle rules live here.
//!
//! # Modules
//!
//! - `cascade` - Discount/charge calculation over nested adjustment trees
//! - `config` - Station, terminal and payment-instrument configuration
//! - `close` - The register-shift close aggregate and its derived totals
//! - `posting` - Translation of a close into ledger line items and transfers
//! - `workflow` - Close lifecycle state machine and collaborator contracts

pub mod cascade;
pub mod close;
pub mod config;
pub mod posting;
pub mod workflow;
