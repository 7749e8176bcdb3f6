//! # Property
//!
//! A managed property: its address, lifecycle status, counters, owner, and
//! an append-only maintenance history. The history has no lifecycle of its
//! own; it is created, extended, and removed with its property.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{PropertyId, RecordId};

/// Owner assigned to every new property until someone edits it.
pub const PLACEHOLDER_OWNER_NAME: &str = "Default Owner";
const PLACEHOLDER_OWNER_EMAIL: &str = "owner@example.com";
const PLACEHOLDER_OWNER_PHONE: &str = "(555) 000-0000";
const PLACEHOLDER_OWNER_WALLET: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Active,
    Inactive,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The owner embedded in a property record.
///
/// `wallet` is an opaque identifier string; it is displayed, never checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub wallet: String,
}

impl Owner {
    /// The owner stamped onto a freshly created property.
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_OWNER_NAME.to_string(),
            email: PLACEHOLDER_OWNER_EMAIL.to_string(),
            phone: PLACEHOLDER_OWNER_PHONE.to_string(),
            wallet: PLACEHOLDER_OWNER_WALLET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Completed,
    Pending,
    InProgress,
}

/// One entry in a property's maintenance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    /// Non-negative; enforced by the `maintenanceRecord` schema.
    pub cost: f64,
    pub status: MaintenanceStatus,
    pub contractor: String,
}

/// Validated payload for a new maintenance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecordDraft {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub cost: f64,
    pub status: MaintenanceStatus,
    pub contractor: String,
}

impl MaintenanceRecord {
    pub fn from_draft(id: RecordId, draft: MaintenanceRecordDraft) -> Self {
        Self {
            id,
            date: draft.date,
            kind: draft.kind,
            description: draft.description,
            cost: draft.cost,
            status: draft.status,
            contractor: draft.contractor,
        }
    }
}

/// A property under management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub maintenance_tasks: u32,
    pub warranties: u32,
    pub last_inspection: NaiveDate,
    pub status: PropertyStatus,
    /// Deployment address supplied by an optional wallet layer. Carried, never checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub owner: Owner,
    /// Insertion-ordered; entries are only ever appended.
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceRecord>,
}

/// Validated payload for a new property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub address: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub contract_address: Option<String>,
}

impl Property {
    /// Build a new property with the creation defaults: active, zero
    /// counters, inspected `today`, placeholder owner, empty history.
    pub fn create(id: PropertyId, draft: PropertyDraft, today: NaiveDate) -> Self {
        Self {
            id,
            address: draft.address,
            unit: draft.unit,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            maintenance_tasks: 0,
            warranties: 0,
            last_inspection: today,
            status: PropertyStatus::Active,
            contract_address: draft.contract_address,
            owner: Owner::placeholder(),
            maintenance_history: Vec::new(),
        }
    }

    /// Sum of recorded maintenance costs.
    pub fn maintenance_spend(&self) -> f64 {
        self.maintenance_history.iter().map(|r| r.cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> PropertyDraft {
        PropertyDraft {
            address: "12 Harbor Way".to_string(),
            unit: Some("4B".to_string()),
            city: "Portland".to_string(),
            state: "ME".to_string(),
            zip_code: "04101".to_string(),
            contract_address: None,
        }
    }

    #[test]
    fn test_create_defaults() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let p = Property::create(PropertyId::from("p1"), draft(), today);
        assert_eq!(p.status, PropertyStatus::Active);
        assert_eq!(p.maintenance_tasks, 0);
        assert_eq!(p.warranties, 0);
        assert_eq!(p.last_inspection, today);
        assert_eq!(p.owner.name, PLACEHOLDER_OWNER_NAME);
        assert!(p.maintenance_history.is_empty());
    }

    #[test]
    fn test_persisted_layout_is_camel_case() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let p = Property::create(PropertyId::from("p1"), draft(), today);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["zipCode"], "04101");
        assert_eq!(v["lastInspection"], "2026-10-19");
        assert_eq!(v["maintenanceTasks"], 0);
        assert_eq!(v["status"], "active");
        assert!(v.get("contractAddress").is_none());
        assert_eq!(v["maintenanceHistory"], json!([]));
    }

    #[test]
    fn test_maintenance_record_type_field() {
        let v = json!({
            "id": "r1",
            "date": "2024-01-15",
            "type": "HVAC",
            "description": "Annual inspection and filter replacement",
            "cost": 150.0,
            "status": "completed",
            "contractor": "CoolAir Services"
        });
        let r: MaintenanceRecord = serde_json::from_value(v).unwrap();
        assert_eq!(r.kind, "HVAC");
        assert_eq!(r.status, MaintenanceStatus::Completed);
    }

    #[test]
    fn test_maintenance_spend() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut p = Property::create(PropertyId::from("p1"), draft(), today);
        for cost in [100.0, 50.5] {
            p.maintenance_history.push(MaintenanceRecord {
                id: RecordId::generate(),
                date: today,
                kind: "Plumbing".to_string(),
                description: "Leak".to_string(),
                cost,
                status: MaintenanceStatus::Completed,
                contractor: "Pipe Pros".to_string(),
            });
        }
        assert_eq!(p.maintenance_spend(), 150.5);
    }
}
