//! Operations specific to one entity kind.

pub mod personnel;
pub mod property;
pub mod work_order;

pub use personnel::PersonnelStore;
pub use property::PropertyStore;
pub use work_order::WorkOrderStore;
