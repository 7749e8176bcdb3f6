//! Personnel store operations.

use serde_json::Value;
use tracing::info;
use upkeep_core::{Personnel, PersonnelDraft, PersonnelId, PersonnelStatus, UpkeepError};
use upkeep_schema::{SchemaId, SchemaName};

use crate::store::EntityStore;

pub type PersonnelStore = EntityStore<Personnel>;

impl EntityStore<Personnel> {
    /// Validate `payload` against `personnel` and append a new member:
    /// active, hired today, zero counters, zero rating, available.
    ///
    /// `license` and `insurance` are kept only for contractors.
    pub fn create(&self, payload: &Value) -> Result<Personnel, UpkeepError> {
        let draft: PersonnelDraft =
            self.parse_payload(SchemaId::full(SchemaName::Personnel), payload)?;
        let person = Personnel::create(PersonnelId::generate(), draft, self.clock().today());
        self.insert(person)
    }

    /// Set the status without touching anything else.
    pub fn update_status(
        &self,
        id: &PersonnelId,
        status: PersonnelStatus,
    ) -> Result<Personnel, UpkeepError> {
        let person = self.modify(id, |p| {
            p.status = status;
            Ok(p.clone())
        })?;
        info!(%id, %status, "personnel status changed");
        Ok(person)
    }
}
