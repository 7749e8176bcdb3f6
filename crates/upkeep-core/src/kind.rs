//! # Entity Kinds
//!
//! The three collections Upkeep persists. Each kind owns exactly one
//! persisted key; the key names are part of the on-disk layout and must
//! not change.

use serde::{Deserialize, Serialize};

/// One of the three entity kinds held by the entity stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Property,
    Personnel,
    WorkOrder,
}

impl EntityKind {
    /// All kinds, in the order the workspace opens them.
    pub const ALL: [EntityKind; 3] = [Self::Property, Self::Personnel, Self::WorkOrder];

    /// The fixed key the kind's collection is persisted under.
    pub fn collection_key(&self) -> &'static str {
        match self {
            Self::Property => "properties",
            Self::Personnel => "personnel",
            Self::WorkOrder => "workOrders",
        }
    }

    /// Human-facing label used in user-visible messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Personnel => "Personnel",
            Self::WorkOrder => "Work order",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_key())
    }
}
