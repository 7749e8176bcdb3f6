//! # Snapshots
//!
//! A [`Snapshot`] is a point-in-time copy of all three collections. It is
//! what the aggregation layer reads; it never writes back.
//!
//! [`Snapshot::load`] reads straight from a backend and is total: an absent
//! or unreadable collection becomes an empty one, with a warning logged.
//! Stores are stricter and refuse to open over unreadable data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;
use upkeep_core::{EntityKind, Personnel, Property, WorkOrder};

use crate::backend::CollectionBackend;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub properties: Vec<Property>,
    pub personnel: Vec<Personnel>,
    pub work_orders: Vec<WorkOrder>,
}

impl Snapshot {
    pub fn new(
        properties: Vec<Property>,
        personnel: Vec<Personnel>,
        work_orders: Vec<WorkOrder>,
    ) -> Self {
        Self {
            properties,
            personnel,
            work_orders,
        }
    }

    /// Read all three collections from `backend`, treating anything
    /// missing or malformed as empty.
    pub fn load(backend: &dyn CollectionBackend) -> Self {
        Self {
            properties: load_collection(backend, EntityKind::Property),
            personnel: load_collection(backend, EntityKind::Personnel),
            work_orders: load_collection(backend, EntityKind::WorkOrder),
        }
    }
}

fn load_collection<E: DeserializeOwned>(backend: &dyn CollectionBackend, kind: EntityKind) -> Vec<E> {
    let key = kind.collection_key();
    let text = match backend.load(key) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(%kind, error = %e, "collection unavailable, treating as empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(records) => records,
        Err(e) => {
            warn!(%kind, error = %e, "collection malformed, treating as empty");
            Vec::new()
        }
    }
}
