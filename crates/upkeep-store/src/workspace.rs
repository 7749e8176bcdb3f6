//! # Workspace
//!
//! Owns the three entity stores over one backend and one clock, and is
//! the object callers are handed instead of reaching for global state.
//!
//! ## Assignment by Id
//!
//! Work orders point at personnel through `assigneeId`. Whenever one is
//! written, the workspace checks it against the personnel store and copies
//! that person's full name into `assignedTo`, so older readers that only
//! know the name still see the right person. Setting `assignedTo` alone
//! clears `assigneeId`: the free-text name becomes the only link.
//!
//! Lock order is work orders, then personnel. Nothing takes them the other
//! way round.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use upkeep_core::{Clock, PersonnelId, SystemClock, UpkeepError, WorkOrder, WorkOrderId};
use upkeep_schema::SchemaValidator;

use crate::backend::{CollectionBackend, MemoryBackend};
use crate::kinds::{PersonnelStore, PropertyStore, WorkOrderStore};
use crate::snapshot::Snapshot;
use crate::store::EntityStore;

#[derive(Debug, Clone)]
pub struct Workspace {
    properties: PropertyStore,
    personnel: PersonnelStore,
    work_orders: WorkOrderStore,
    clock: Arc<dyn Clock>,
}

impl Workspace {
    /// Open every store over `backend`.
    ///
    /// # Errors
    ///
    /// Fails if a persisted collection is unreadable or an embedded schema
    /// does not compile.
    pub fn open(
        backend: Arc<dyn CollectionBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, UpkeepError> {
        let validator = Arc::new(
            SchemaValidator::new().map_err(|e| UpkeepError::Internal(e.to_string()))?,
        );
        let properties: PropertyStore =
            EntityStore::open(Arc::clone(&backend), Arc::clone(&validator), Arc::clone(&clock))?;
        let personnel: PersonnelStore =
            EntityStore::open(Arc::clone(&backend), Arc::clone(&validator), Arc::clone(&clock))?;
        let work_orders: WorkOrderStore =
            EntityStore::open(Arc::clone(&backend), Arc::clone(&validator), Arc::clone(&clock))?;
        info!(
            properties = properties.len(),
            personnel = personnel.len(),
            work_orders = work_orders.len(),
            "workspace opened"
        );
        Ok(Self {
            properties,
            personnel,
            work_orders,
            clock,
        })
    }

    /// A fresh workspace over an empty [`MemoryBackend`] and the system clock.
    pub fn in_memory() -> Result<Self, UpkeepError> {
        Self::open(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    pub fn personnel(&self) -> &PersonnelStore {
        &self.personnel
    }

    pub fn work_orders(&self) -> &WorkOrderStore {
        &self.work_orders
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Create a work order, resolving a present `assigneeId`.
    pub fn create_work_order(&self, payload: &Value) -> Result<WorkOrder, UpkeepError> {
        self.work_orders.create_with(payload, |draft| {
            if let Some(id) = &draft.assignee_id {
                draft.assigned_to = Some(self.personnel.get_by_id(id)?.full_name());
            }
            Ok(())
        })
    }

    /// Partially update a work order, resolving a changed assignment.
    pub fn update_work_order(
        &self,
        id: &WorkOrderId,
        payload: &Value,
    ) -> Result<WorkOrder, UpkeepError> {
        let sets_id = payload.get("assigneeId").is_some();
        let sets_name = payload.get("assignedTo").is_some();
        self.work_orders.update_with(id, payload, |order| {
            if sets_id {
                if let Some(pid) = &order.assignee_id {
                    order.assigned_to = Some(self.personnel.get_by_id(pid)?.full_name());
                }
            } else if sets_name {
                order.assignee_id = None;
            }
            Ok(())
        })
    }

    /// Assign an existing work order to a member of personnel.
    pub fn assign_work_order(
        &self,
        id: &WorkOrderId,
        personnel_id: &PersonnelId,
    ) -> Result<WorkOrder, UpkeepError> {
        self.work_orders.get_by_id(id)?;
        let person = self.personnel.get_by_id(personnel_id)?;
        let order = self.work_orders.modify(id, |order| {
            order.assignee_id = Some(person.id.clone());
            order.assigned_to = Some(person.full_name());
            Ok(order.clone())
        })?;
        info!(%id, assignee = %personnel_id, "work order assigned");
        Ok(order)
    }

    /// Copy all three collections.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.properties.list_all(),
            self.personnel.list_all(),
            self.work_orders.list_all(),
        )
    }

    /// Empty every store and remove its persisted key.
    pub fn reset(&self) -> Result<(), UpkeepError> {
        self.properties.reset()?;
        self.personnel.reset()?;
        self.work_orders.reset()?;
        Ok(())
    }
}
