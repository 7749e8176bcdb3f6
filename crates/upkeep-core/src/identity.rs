//! # Identifier Newtypes
//!
//! Newtype wrappers for every identifier in Upkeep. These prevent
//! accidental identifier confusion: you cannot pass a `PersonnelId` where a
//! `WorkOrderId` is expected.
//!
//! Identifiers are opaque strings. The stores mint them from UUID v4, but
//! records imported from older data may carry any non-empty string, so no
//! format is enforced on deserialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if f.alternate() {
                    write!(f, "{}:{}", $prefix, self.0)
                } else {
                    f.write_str(&self.0)
                }
            }
        }
    };
}

opaque_id!(
    /// Unique identifier for a property.
    PropertyId,
    "property"
);

opaque_id!(
    /// Unique identifier for a member of personnel.
    PersonnelId,
    "personnel"
);

opaque_id!(
    /// Unique identifier for a work order.
    WorkOrderId,
    "work-order"
);

opaque_id!(
    /// Unique identifier for a note on a work order.
    NoteId,
    "note"
);

opaque_id!(
    /// Unique identifier for an entry in a property's maintenance history.
    RecordId,
    "record"
);

opaque_id!(
    /// Unique identifier for a work-order attachment.
    AttachmentId,
    "attachment"
);
