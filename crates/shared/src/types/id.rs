//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TerminalId` where an
//! `AccountId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(CompanyId, "Unique identifier for a company.");
typed_id!(CloseId, "Unique identifier for a register-shift close.");
typed_id!(StationId, "Unique identifier for a cashier station.");
typed_id!(TerminalId, "Unique identifier for a collection terminal.");
typed_id!(MoneyTypeId, "Unique identifier for a money type.");
typed_id!(AmountTypeId, "Unique identifier for an amount type.");
typed_id!(AdjustmentId, "Unique identifier for a discount/charge definition.");
typed_id!(AccountId, "Unique identifier for a ledger account.");
typed_id!(PartyId, "Unique identifier for a party (customer, vendor).");
typed_id!(SaleId, "Unique identifier for a sale order.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(ShipmentId, "Unique identifier for a shipment.");
typed_id!(AdvanceId, "Unique identifier for an advance collection.");
typed_id!(ReceiptId, "Unique identifier for a posted ledger receipt.");
typed_id!(TransferId, "Unique identifier for a ledger transfer.");
typed_id!(SequenceId, "Unique identifier for a numbering sequence.");
