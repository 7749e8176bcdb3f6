//! Fixture builders shared by the unit tests.

use chrono::NaiveDate;
use upkeep_core::{
    NoteId, Personnel, PersonnelDraft, PersonnelId, PersonnelRole, Property, PropertyDraft,
    PropertyId, Timestamp, WorkOrder, WorkOrderDraft, WorkOrderId, WorkOrderNote,
    WorkOrderPriority, WorkOrderStatus,
};

pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

pub fn order(created: &str) -> WorkOrder {
    WorkOrder::create(
        WorkOrderId::generate(),
        WorkOrderDraft {
            property_id: PropertyId::from("p1"),
            title: "Fix".to_string(),
            description: "Something broke".to_string(),
            priority: WorkOrderPriority::Medium,
            due_date: "2024-12-31".to_string(),
            assigned_to: None,
            assignee_id: None,
            estimated_cost: None,
            category: "General".to_string(),
        },
        ts(created),
    )
}

pub fn completed(mut wo: WorkOrder, actual: f64) -> WorkOrder {
    wo.status = WorkOrderStatus::Completed;
    wo.actual_cost = Some(actual);
    wo
}

pub fn note(content: &str, at: &str) -> WorkOrderNote {
    WorkOrderNote {
        id: NoteId::generate(),
        content: content.to_string(),
        created_at: ts(at),
        created_by: "crew".to_string(),
    }
}

fn person(first: &str, last: &str, role: PersonnelRole) -> Personnel {
    Personnel::create(
        PersonnelId::generate(),
        PersonnelDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
            email: "crew@example.com".to_string(),
            phone: "555".to_string(),
            specialties: vec!["General".to_string()],
            rate: 50.0,
            license: None,
            insurance: None,
        },
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
    )
}

pub fn contractor(first: &str, last: &str) -> Personnel {
    person(first, last, PersonnelRole::Contractor)
}

pub fn employee(first: &str, last: &str) -> Personnel {
    person(first, last, PersonnelRole::Employee)
}

pub fn property(address: &str) -> Property {
    Property::create(
        PropertyId::generate(),
        PropertyDraft {
            address: address.to_string(),
            unit: None,
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "78701".to_string(),
            contract_address: None,
        },
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
}
