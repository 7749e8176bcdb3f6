//! # upkeep-store — Entity Stores
//!
//! Schema-validated, collection-oriented persistence for the three entity
//! kinds.
//!
//! ## Layers
//!
//! - [`backend`]: where whole collections are kept ([`MemoryBackend`],
//!   [`FileBackend`]), behind the [`CollectionBackend`] trait.
//! - [`store`]: the generic [`EntityStore`] with list, get, update, delete
//!   and reset; [`kinds`] adds each kind's create and extra operations.
//! - [`workspace`]: the three stores wired to one backend and clock, with
//!   assignment resolution across work orders and personnel.
//! - [`snapshot`]: read-only copies handed to aggregation.
//! - [`query`]: list-screen filters.
//!
//! ## Failure Kinds
//!
//! Store operations raise `Validation` and `NotFound` for caller mistakes.
//! Backend failures surface as internal faults and leave state unchanged.

pub mod backend;
pub mod entity;
pub mod kinds;
pub mod query;
pub mod snapshot;
pub mod store;
pub mod workspace;

pub use backend::{CollectionBackend, FileBackend, MemoryBackend};
pub use entity::Entity;
pub use kinds::{PersonnelStore, PropertyStore, WorkOrderStore};
pub use query::{group_by_status, PersonnelQuery, PropertyQuery, WorkOrderQuery};
pub use snapshot::Snapshot;
pub use store::EntityStore;
pub use workspace::Workspace;
