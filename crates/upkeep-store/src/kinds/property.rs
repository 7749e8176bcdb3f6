//! Property store operations.

use serde_json::Value;
use tracing::info;
use upkeep_core::{
    MaintenanceRecord, MaintenanceRecordDraft, Property, PropertyDraft, PropertyId,
    PropertyStatus, RecordId, UpkeepError,
};
use upkeep_schema::{SchemaId, SchemaName};

use crate::store::EntityStore;

pub type PropertyStore = EntityStore<Property>;

impl EntityStore<Property> {
    /// Validate `payload` against `property` and append a new property:
    /// active, zero counters, inspected today, placeholder owner, no history.
    pub fn create(&self, payload: &Value) -> Result<Property, UpkeepError> {
        let draft: PropertyDraft =
            self.parse_payload(SchemaId::full(SchemaName::Property), payload)?;
        let property = Property::create(PropertyId::generate(), draft, self.clock().today());
        self.insert(property)
    }

    /// Set the status without touching anything else.
    pub fn update_status(
        &self,
        id: &PropertyId,
        status: PropertyStatus,
    ) -> Result<Property, UpkeepError> {
        let property = self.modify(id, |p| {
            p.status = status;
            Ok(p.clone())
        })?;
        info!(%id, %status, "property status changed");
        Ok(property)
    }

    /// Append a maintenance record, keeping insertion order.
    pub fn add_maintenance_record(
        &self,
        id: &PropertyId,
        payload: &Value,
    ) -> Result<Property, UpkeepError> {
        let property = self.modify(id, |p| {
            let draft: MaintenanceRecordDraft =
                self.parse_payload(SchemaId::full(SchemaName::MaintenanceRecord), payload)?;
            p.maintenance_history
                .push(MaintenanceRecord::from_draft(RecordId::generate(), draft));
            Ok(p.clone())
        })?;
        info!(%id, records = property.maintenance_history.len(), "maintenance record added");
        Ok(property)
    }
}
