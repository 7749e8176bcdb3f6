//! Work order store operations.

use serde_json::Value;
use tracing::info;
use upkeep_core::{
    Attachment, AttachmentDraft, AttachmentId, NoteDraft, NoteId, UpkeepError, WorkOrder,
    WorkOrderDraft, WorkOrderId, WorkOrderNote,
};
use upkeep_schema::{SchemaId, SchemaName};

use crate::store::EntityStore;

pub type WorkOrderStore = EntityStore<WorkOrder>;

impl EntityStore<WorkOrder> {
    /// Validate `payload` against `workOrder` and append a new order:
    /// pending, created now, no notes or attachments.
    pub fn create(&self, payload: &Value) -> Result<WorkOrder, UpkeepError> {
        self.create_with(payload, |_| Ok(()))
    }

    /// [`create`](Self::create) with a hook that may adjust or reject the
    /// validated draft before the order is built.
    pub fn create_with(
        &self,
        payload: &Value,
        resolve: impl FnOnce(&mut WorkOrderDraft) -> Result<(), UpkeepError>,
    ) -> Result<WorkOrder, UpkeepError> {
        let mut draft: WorkOrderDraft =
            self.parse_payload(SchemaId::full(SchemaName::WorkOrder), payload)?;
        resolve(&mut draft)?;
        let order = WorkOrder::create(WorkOrderId::generate(), draft, self.clock().now());
        self.insert(order)
    }

    /// Add a note at the front of `notes`, stamped now.
    pub fn add_note(&self, id: &WorkOrderId, payload: &Value) -> Result<WorkOrder, UpkeepError> {
        let order = self.modify(id, |wo| {
            let draft: NoteDraft = self.parse_payload(SchemaId::full(SchemaName::Note), payload)?;
            wo.push_note(WorkOrderNote::from_draft(
                NoteId::generate(),
                draft,
                self.clock().now(),
            ));
            Ok(wo.clone())
        })?;
        info!(%id, notes = order.notes.len(), "note added");
        Ok(order)
    }

    /// Append an attachment, stamped now.
    pub fn add_attachment(
        &self,
        id: &WorkOrderId,
        payload: &Value,
    ) -> Result<WorkOrder, UpkeepError> {
        let order = self.modify(id, |wo| {
            let draft: AttachmentDraft =
                self.parse_payload(SchemaId::full(SchemaName::Attachment), payload)?;
            wo.attachments.push(Attachment::from_draft(
                AttachmentId::generate(),
                draft,
                self.clock().now(),
            ));
            Ok(wo.clone())
        })?;
        info!(%id, attachments = order.attachments.len(), "attachment added");
        Ok(order)
    }
}
