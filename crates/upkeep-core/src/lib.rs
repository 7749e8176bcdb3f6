//! # upkeep-core — Foundational Types for Upkeep
//!
//! This crate is the leaf of the Upkeep workspace. It defines the three
//! entity kinds the rest of the system stores and aggregates, plus the
//! primitives every other crate shares. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `PropertyId`, `PersonnelId`, `WorkOrderId` and
//!    the child-record ids are distinct types. A work order's `propertyId`
//!    cannot be handed to a personnel lookup by accident.
//!
//! 2. **Role-conditional personnel.** Contractor-only fields (`license`,
//!    `insurance`) live inside [`Engagement::Contractor`]. An employee record
//!    cannot carry them.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] is always UTC, seconds precision.
//!
//! 4. **Injected time.** Stores and aggregations ask a [`Clock`] for "now";
//!    nothing reads the wall clock directly.
//!
//! 5. **One error taxonomy.** [`UpkeepError`] is classified into
//!    bad-request, not-found, and internal faults via [`ErrorClass`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `upkeep-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Entity types serialize with camelCase field names; that JSON is the
//!   persisted layout.

pub mod clock;
pub mod error;
pub mod identity;
pub mod kind;
pub mod personnel;
pub mod property;
pub mod temporal;
pub mod work_order;

// Re-export primary types for ergonomic imports.
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ErrorClass, UpkeepError, ValidationError};
pub use identity::{AttachmentId, NoteId, PersonnelId, PropertyId, RecordId, WorkOrderId};
pub use kind::EntityKind;
pub use personnel::{
    Availability, Engagement, Insurance, Personnel, PersonnelDraft, PersonnelRole,
    PersonnelStatus,
};
pub use property::{
    MaintenanceRecord, MaintenanceRecordDraft, MaintenanceStatus, Owner, Property, PropertyDraft,
    PropertyStatus,
};
pub use temporal::Timestamp;
pub use work_order::{
    Attachment, AttachmentDraft, NoteDraft, WorkOrder, WorkOrderDraft, WorkOrderNote,
    WorkOrderPriority, WorkOrderStatus,
};
