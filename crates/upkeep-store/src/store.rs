//! # Entity Store
//!
//! Authoritative, schema-validated collection for one entity kind.
//!
//! ## Lock Discipline
//!
//! The collection sits behind a `parking_lot::RwLock`. Reads clone out
//! under the read lock. A mutation takes the write lock and holds it for
//! the whole read-modify-persist cycle, so two mutations on one kind never
//! interleave.
//!
//! ## All-or-Nothing Mutations
//!
//! Every mutation works on a copy of the collection, persists the copy as
//! one value, and only then publishes it. If validation or the backend
//! fails, neither the persisted value nor the in-memory collection changes.
//!
//! Kind-specific operations (`create`, `update_status`, `add_note`, ...)
//! live in `property.rs`, `personnel.rs` and `work_order.rs`.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use upkeep_core::{Clock, UpkeepError};
use upkeep_schema::{SchemaId, SchemaValidator};

use crate::backend::CollectionBackend;
use crate::entity::Entity;

/// Store for one entity kind. Clones are handles onto the same collection.
pub struct EntityStore<E: Entity> {
    records: Arc<RwLock<Vec<E>>>,
    backend: Arc<dyn CollectionBackend>,
    validator: Arc<SchemaValidator>,
    clock: Arc<dyn Clock>,
}

impl<E: Entity> Clone for EntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            backend: Arc::clone(&self.backend),
            validator: Arc::clone(&self.validator),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<E: Entity> fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("kind", &E::KIND)
            .field("len", &self.len())
            .finish()
    }
}

impl<E: Entity> EntityStore<E> {
    /// Load the kind's collection from `backend`.
    ///
    /// An absent key opens an empty store.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::Storage` if the persisted text cannot be read
    /// as a collection of this kind. The store refuses to start over data it
    /// would later overwrite.
    pub fn open(
        backend: Arc<dyn CollectionBackend>,
        validator: Arc<SchemaValidator>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, UpkeepError> {
        let key = E::KIND.collection_key();
        let records: Vec<E> = match backend.load(key)? {
            None => Vec::new(),
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                UpkeepError::Storage(format!("{key} collection is unreadable: {e}"))
            })?,
        };
        debug!(kind = %E::KIND, count = records.len(), "collection loaded");
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            backend,
            validator,
            clock,
        })
    }

    /// The whole collection in insertion order.
    pub fn list_all(&self) -> Vec<E> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// `UpkeepError::NotFound` if no record has this id.
    pub fn get_by_id(&self, id: &E::Id) -> Result<E, UpkeepError> {
        self.records
            .read()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(UpkeepError::NotFound(E::KIND))
    }

    /// Merge a partial payload onto an existing record.
    ///
    /// Checks existence first, then the kind's partial schema. Payload
    /// fields win; absent fields keep their values; protected fields are
    /// skipped. Fields the schema does not describe (`status`,
    /// `actualCost`, `owner`, ...) are merged as given and must survive
    /// typed deserialization.
    pub fn update(&self, id: &E::Id, payload: &Value) -> Result<E, UpkeepError> {
        self.update_with(id, payload, |_| Ok(()))
    }

    /// [`update`](Self::update) with a hook that sees the merged record
    /// before it is committed.
    pub fn update_with(
        &self,
        id: &E::Id,
        payload: &Value,
        finish: impl FnOnce(&mut E) -> Result<(), UpkeepError>,
    ) -> Result<E, UpkeepError> {
        let updated = self.modify(id, |record| {
            self.validator.validate(SchemaId::partial(E::SCHEMA), payload)?;
            let mut merged = serde_json::to_value(&*record)?;
            if let (Some(target), Some(changes)) = (merged.as_object_mut(), payload.as_object()) {
                for (field, value) in changes {
                    if E::PROTECTED_FIELDS.contains(&field.as_str()) {
                        continue;
                    }
                    target.insert(field.clone(), value.clone());
                }
            }
            let mut next: E =
                serde_json::from_value(merged).map_err(|e| rejected_update::<E>(payload, &e))?;
            finish(&mut next)?;
            *record = next;
            Ok(record.clone())
        })?;
        info!(kind = %E::KIND, id = %updated.id(), "updated");
        Ok(updated)
    }

    /// Remove a record by id.
    ///
    /// # Errors
    ///
    /// `UpkeepError::NotFound` if nothing was removed.
    pub fn delete(&self, id: &E::Id) -> Result<(), UpkeepError> {
        self.commit(|records| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            if records.len() == before {
                return Err(UpkeepError::NotFound(E::KIND));
            }
            Ok(())
        })?;
        info!(kind = %E::KIND, %id, "deleted");
        Ok(())
    }

    /// Drop every record and the persisted key.
    pub fn reset(&self) -> Result<(), UpkeepError> {
        let mut guard = self.records.write();
        self.backend.remove(E::KIND.collection_key())?;
        guard.clear();
        info!(kind = %E::KIND, "reset");
        Ok(())
    }

    // ─── Helpers for kind-specific operations ────────────────────────

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Validate `payload` against `schema` and read it as `D`.
    pub(crate) fn parse_payload<D: DeserializeOwned>(
        &self,
        schema: SchemaId,
        payload: &Value,
    ) -> Result<D, UpkeepError> {
        let narrowed = self.validator.validate(schema, payload)?;
        serde_json::from_value(narrowed).map_err(|e| {
            debug!(schema = schema.name.as_str(), error = %e, "payload rejected");
            UpkeepError::validation(format!("Invalid {} payload", schema.name.as_str()))
        })
    }

    /// Append a new record.
    pub(crate) fn insert(&self, record: E) -> Result<E, UpkeepError> {
        let created = self.commit(|records| {
            records.push(record.clone());
            Ok(record)
        })?;
        info!(kind = %E::KIND, id = %created.id(), "created");
        Ok(created)
    }

    /// Mutate one record in place under the write lock.
    pub(crate) fn modify<R>(
        &self,
        id: &E::Id,
        f: impl FnOnce(&mut E) -> Result<R, UpkeepError>,
    ) -> Result<R, UpkeepError> {
        self.commit(|records| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(UpkeepError::NotFound(E::KIND))?;
            f(record)
        })
    }

    /// Build the next collection on a copy, persist it, then publish it.
    fn commit<R>(
        &self,
        f: impl FnOnce(&mut Vec<E>) -> Result<R, UpkeepError>,
    ) -> Result<R, UpkeepError> {
        let mut guard = self.records.write();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        let text = serde_json::to_string(&next)?;
        self.backend.save(E::KIND.collection_key(), &text)?;
        debug!(kind = %E::KIND, count = next.len(), bytes = text.len(), "collection persisted");
        *guard = next;
        Ok(out)
    }
}

/// The error a merged update that no longer deserializes is reported as.
/// An unknown status token gets the kind's corrective hint; anything else
/// a generic message. The serde detail goes to the debug log only.
fn rejected_update<E: Entity>(payload: &Value, err: &serde_json::Error) -> UpkeepError {
    debug!(kind = %E::KIND, error = %err, "merged update rejected");
    let bad_status = payload
        .get("status")
        .is_some_and(|status| serde_json::from_value::<E::Status>(status.clone()).is_err());
    if bad_status {
        UpkeepError::validation(E::STATUS_HINT)
    } else {
        UpkeepError::validation(format!("Invalid {} update", E::KIND.label().to_lowercase()))
    }
}
