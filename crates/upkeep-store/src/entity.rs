//! # Stored Entity Kinds
//!
//! The [`Entity`] trait tells the generic store what it needs to know about
//! a kind: its id, where it is persisted, which schema guards it, and which
//! fields only the store may write.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use upkeep_core::{
    EntityKind, Personnel, PersonnelId, PersonnelStatus, Property, PropertyId, PropertyStatus,
    WorkOrder, WorkOrderId, WorkOrderStatus,
};
use upkeep_schema::SchemaName;

pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + PartialEq + fmt::Display + fmt::Debug + Send + Sync;
    type Status: DeserializeOwned;

    const KIND: EntityKind;
    const SCHEMA: SchemaName;
    /// Fields a partial update may never overwrite.
    const PROTECTED_FIELDS: &'static [&'static str];
    /// Shown when an update carries a status token this kind does not know.
    const STATUS_HINT: &'static str;

    fn id(&self) -> &Self::Id;
}

impl Entity for Property {
    type Id = PropertyId;
    type Status = PropertyStatus;

    const KIND: EntityKind = EntityKind::Property;
    const SCHEMA: SchemaName = SchemaName::Property;
    const PROTECTED_FIELDS: &'static [&'static str] = &["id", "maintenanceHistory"];
    const STATUS_HINT: &'static str = "Status must be active or inactive";

    fn id(&self) -> &PropertyId {
        &self.id
    }
}

impl Entity for Personnel {
    type Id = PersonnelId;
    type Status = PersonnelStatus;

    const KIND: EntityKind = EntityKind::Personnel;
    const SCHEMA: SchemaName = SchemaName::Personnel;
    const PROTECTED_FIELDS: &'static [&'static str] = &["id"];
    const STATUS_HINT: &'static str = "Status must be active, inactive, or on-leave";

    fn id(&self) -> &PersonnelId {
        &self.id
    }
}

impl Entity for WorkOrder {
    type Id = WorkOrderId;
    type Status = WorkOrderStatus;

    const KIND: EntityKind = EntityKind::WorkOrder;
    const SCHEMA: SchemaName = SchemaName::WorkOrder;
    const PROTECTED_FIELDS: &'static [&'static str] = &["id", "createdAt", "notes", "attachments"];
    const STATUS_HINT: &'static str =
        "Status must be pending, in-progress, completed, or cancelled";

    fn id(&self) -> &WorkOrderId {
        &self.id
    }
}
