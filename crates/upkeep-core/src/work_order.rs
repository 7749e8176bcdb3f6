//! # Work Order
//!
//! A unit of maintenance work against a property, with its notes and
//! attachments.
//!
//! ## Invariants
//!
//! - `createdAt` is stamped by the store and never changes.
//! - `notes` are newest-first: a new note always lands at index 0.
//! - `propertyId` is not checked against the property collection.
//!
//! ## Assignment
//!
//! A work order is assigned either by id (`assigneeId`, checked against
//! the personnel store when written) or, for data that predates ids, by the
//! free-text `assignedTo` name. See [`WorkOrder::is_assigned_to`].

use serde::{Deserialize, Serialize};

use crate::identity::{AttachmentId, NoteId, PersonnelId, PropertyId, WorkOrderId};
use crate::personnel::Personnel;
use crate::temporal::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl WorkOrderPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for WorkOrderPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Pending or in progress.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown work order status: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderNote {
    pub id: NoteId,
    pub content: String,
    pub created_at: Timestamp,
    pub created_by: String,
}

/// Validated payload for a new note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub content: String,
    pub created_by: String,
}

impl WorkOrderNote {
    pub fn from_draft(id: NoteId, draft: NoteDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            content: draft.content,
            created_at,
            created_by: draft.created_by,
        }
    }

    /// Whether this note records the start of work.
    pub fn marks_start(&self) -> bool {
        let content = self.content.to_lowercase();
        content.contains("started") || content.contains("began")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub uploaded_at: Timestamp,
}

/// Validated payload for a new attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDraft {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

impl Attachment {
    pub fn from_draft(id: AttachmentId, draft: AttachmentDraft, uploaded_at: Timestamp) -> Self {
        Self {
            id,
            name: draft.name,
            url: draft.url,
            media_type: draft.media_type,
            uploaded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub property_id: PropertyId,
    pub title: String,
    pub description: String,
    pub priority: WorkOrderPriority,
    pub status: WorkOrderStatus,
    pub created_at: Timestamp,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<PersonnelId>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    /// Newest first.
    #[serde(default)]
    pub notes: Vec<WorkOrderNote>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Validated payload for a new work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDraft {
    pub property_id: PropertyId,
    pub title: String,
    pub description: String,
    pub priority: WorkOrderPriority,
    pub due_date: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<PersonnelId>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    pub category: String,
}

impl WorkOrder {
    /// Build a new work order: pending, created `now`, no notes or attachments.
    pub fn create(id: WorkOrderId, draft: WorkOrderDraft, now: Timestamp) -> Self {
        Self {
            id,
            property_id: draft.property_id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: WorkOrderStatus::Pending,
            created_at: now,
            due_date: draft.due_date,
            assigned_to: draft.assigned_to,
            assignee_id: draft.assignee_id,
            category: draft.category,
            estimated_cost: draft.estimated_cost,
            actual_cost: None,
            notes: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == WorkOrderStatus::Completed
    }

    /// Estimated cost, absent treated as zero.
    pub fn estimated(&self) -> f64 {
        self.estimated_cost.unwrap_or(0.0)
    }

    /// Actual cost, absent treated as zero.
    pub fn actual(&self) -> f64 {
        self.actual_cost.unwrap_or(0.0)
    }

    /// Whether this order belongs to `person`.
    ///
    /// An explicit `assigneeId` decides on its own. Without one, the order
    /// matches every person whose full name equals `assignedTo` exactly, so
    /// two people sharing a name both receive it.
    pub fn is_assigned_to(&self, person: &Personnel) -> bool {
        match &self.assignee_id {
            Some(id) => *id == person.id,
            None => self
                .assigned_to
                .as_deref()
                .is_some_and(|name| name == person.full_name()),
        }
    }

    /// The first note, in stored order, that marks the start of work.
    pub fn start_note(&self) -> Option<&WorkOrderNote> {
        self.notes.iter().find(|n| n.marks_start())
    }

    /// Hours from creation to the start-of-work note, or zero when no note
    /// marks the start.
    pub fn response_hours(&self) -> f64 {
        match self.start_note() {
            Some(note) => note.created_at.hours_since(&self.created_at),
            None => 0.0,
        }
    }

    /// Insert a note at the front, preserving newest-first order.
    pub fn push_note(&mut self, note: WorkOrderNote) {
        self.notes.insert(0, note);
    }
}
