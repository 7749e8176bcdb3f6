//! # upkeep-schema — Validation Contract
//!
//! Checks untyped payloads against named JSON Schema documents before they
//! reach an entity store.
//!
//! ## Schemas
//!
//! Six documents are embedded at compile time from `schemas/`:
//! `property`, `workOrder`, `personnel`, `maintenanceRecord`, `note`, and
//! `attachment`. Each compiles into a full variant for creation and a
//! `.partial` variant for updates.
//!
//! ## Error Surface
//!
//! A failed payload yields [`upkeep_core::ValidationError`] holding the
//! first violated rule's corrective message. [`SchemaError`] is reserved for
//! broken schema documents and unknown schema names.
//!
//! ## Crate Policy
//!
//! - Depends only on `upkeep-core` internally.
//! - Messages live in the schema documents (`x-message`), not in code.

pub mod validate;

pub use validate::{
    SchemaError, SchemaId, SchemaMode, SchemaName, SchemaValidator, Violation,
    NOT_AN_OBJECT_MESSAGE,
};
