//! # Personnel
//!
//! Employees and contractors who carry out work orders.
//!
//! ## Role-Conditional Fields
//!
//! A contractor may hold a `license` and an `insurance` policy; an employee
//! never does. The role is modelled as the [`Engagement`] variant rather
//! than a flag beside optional fields, so the relationship is a type-level
//! invariant. On the wire the variant flattens back into the familiar
//! layout: a `role` string next to top-level `license` / `insurance` keys.
//!
//! Contractor-only keys sent for an employee are dropped on deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::PersonnelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonnelRole {
    Employee,
    Contractor,
}

impl PersonnelRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Contractor => "contractor",
        }
    }
}

impl std::fmt::Display for PersonnelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonnelStatus {
    Active,
    Inactive,
    OnLeave,
}

impl PersonnelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on-leave",
        }
    }
}

impl std::fmt::Display for PersonnelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
}

/// A contractor's liability insurance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub provider: String,
    pub policy_number: String,
    pub expiration_date: NaiveDate,
}

/// How a person is engaged, with the fields that only make sense for that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Engagement {
    Employee,
    Contractor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        license: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        insurance: Option<Insurance>,
    },
}

impl Engagement {
    /// Build the engagement for `role`, discarding contractor fields for employees.
    pub fn for_role(
        role: PersonnelRole,
        license: Option<String>,
        insurance: Option<Insurance>,
    ) -> Self {
        match role {
            PersonnelRole::Employee => Self::Employee,
            PersonnelRole::Contractor => Self::Contractor { license, insurance },
        }
    }

    pub fn role(&self) -> PersonnelRole {
        match self {
            Self::Employee => PersonnelRole::Employee,
            Self::Contractor { .. } => PersonnelRole::Contractor,
        }
    }
}

/// A member of personnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub id: PersonnelId,
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub engagement: Engagement,
    pub email: String,
    pub phone: String,
    pub specialties: Vec<String>,
    /// Hourly rate, never negative.
    pub rate: f64,
    pub status: PersonnelStatus,
    pub hire_date: NaiveDate,
    pub active_work_orders: u32,
    pub completed_work_orders: u32,
    /// 0 to 5.
    pub rating: f64,
    pub availability: Availability,
}

/// Validated payload for a new member of personnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelDraft {
    pub first_name: String,
    pub last_name: String,
    pub role: PersonnelRole,
    pub email: String,
    pub phone: String,
    pub specialties: Vec<String>,
    pub rate: f64,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub insurance: Option<Insurance>,
}

impl Personnel {
    /// Build a new record with the creation defaults: active, hired `today`,
    /// zero counters, zero rating, available.
    ///
    /// Specialties keep their first-seen order with duplicates removed.
    pub fn create(id: PersonnelId, draft: PersonnelDraft, today: NaiveDate) -> Self {
        let mut specialties: Vec<String> = Vec::with_capacity(draft.specialties.len());
        for s in draft.specialties {
            if !specialties.contains(&s) {
                specialties.push(s);
            }
        }
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            engagement: Engagement::for_role(draft.role, draft.license, draft.insurance),
            email: draft.email,
            phone: draft.phone,
            specialties,
            rate: draft.rate,
            status: PersonnelStatus::Active,
            hire_date: today,
            active_work_orders: 0,
            completed_work_orders: 0,
            rating: 0.0,
            availability: Availability::Available,
        }
    }

    /// `"{firstName} {lastName}"`, the string work orders are assigned by.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn role(&self) -> PersonnelRole {
        self.engagement.role()
    }

    pub fn is_contractor(&self) -> bool {
        self.role() == PersonnelRole::Contractor
    }
}
