//! # List Queries
//!
//! Filters behind the list screens: a status or role filter plus a
//! case-insensitive substring search. An empty or blank search matches
//! everything.

use std::collections::BTreeMap;

use upkeep_core::{Personnel, PersonnelRole, Property, WorkOrder, WorkOrderStatus};

fn needle(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Work orders by status and title/description text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkOrderQuery {
    pub status: Option<WorkOrderStatus>,
    pub search: Option<String>,
}

impl WorkOrderQuery {
    pub fn matches(&self, order: &WorkOrder) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        match needle(&self.search) {
            Some(n) => contains(&order.title, &n) || contains(&order.description, &n),
            None => true,
        }
    }

    pub fn apply(&self, orders: &[WorkOrder]) -> Vec<WorkOrder> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}

/// Bucket orders by status. Every status has an entry, possibly empty.
pub fn group_by_status(orders: &[WorkOrder]) -> BTreeMap<WorkOrderStatus, Vec<WorkOrder>> {
    let mut groups: BTreeMap<WorkOrderStatus, Vec<WorkOrder>> = WorkOrderStatus::ALL
        .into_iter()
        .map(|s| (s, Vec::new()))
        .collect();
    for order in orders {
        groups.entry(order.status).or_default().push(order.clone());
    }
    groups
}

/// Personnel by role and name/email/specialty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonnelQuery {
    pub role: Option<PersonnelRole>,
    pub search: Option<String>,
}

impl PersonnelQuery {
    pub fn matches(&self, person: &Personnel) -> bool {
        if self.role.is_some_and(|r| r != person.role()) {
            return false;
        }
        match needle(&self.search) {
            Some(n) => {
                contains(&person.full_name(), &n)
                    || contains(&person.email, &n)
                    || person.specialties.iter().any(|s| contains(s, &n))
            }
            None => true,
        }
    }

    pub fn apply(&self, people: &[Personnel]) -> Vec<Personnel> {
        people.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Properties by address/city/state text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyQuery {
    pub search: Option<String>,
}

impl PropertyQuery {
    pub fn matches(&self, property: &Property) -> bool {
        match needle(&self.search) {
            Some(n) => {
                contains(&property.address, &n)
                    || contains(&property.city, &n)
                    || contains(&property.state, &n)
            }
            None => true,
        }
    }

    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use upkeep_core::{
        PersonnelDraft, PersonnelId, PropertyDraft, PropertyId, Timestamp, WorkOrderDraft,
        WorkOrderId, WorkOrderPriority,
    };

    fn order(title: &str, description: &str, status: WorkOrderStatus) -> WorkOrder {
        let mut wo = WorkOrder::create(
            WorkOrderId::generate(),
            WorkOrderDraft {
                property_id: PropertyId::from("p1"),
                title: title.to_string(),
                description: description.to_string(),
                priority: WorkOrderPriority::Low,
                due_date: "2024-03-01".to_string(),
                assigned_to: None,
                assignee_id: None,
                estimated_cost: None,
                category: "General".to_string(),
            },
            Timestamp::parse("2024-02-01T00:00:00Z").unwrap(),
        );
        wo.status = status;
        wo
    }

    fn person(first: &str, role: PersonnelRole, specialty: &str) -> Personnel {
        Personnel::create(
            PersonnelId::generate(),
            PersonnelDraft {
                first_name: first.to_string(),
                last_name: "Smith".to_string(),
                role,
                email: format!("{}@example.com", first.to_lowercase()),
                phone: "555".to_string(),
                specialties: vec![specialty.to_string()],
                rate: 10.0,
                license: None,
                insurance: None,
            },
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_work_order_search_and_status() {
        let orders = vec![
            order("Leaking faucet", "Kitchen", WorkOrderStatus::Pending),
            order("Paint hallway", "Faucet-adjacent wall", WorkOrderStatus::Completed),
            order("Replace bulb", "Porch", WorkOrderStatus::Pending),
        ];
        let q = WorkOrderQuery {
            status: None,
            search: Some("FAUCET".to_string()),
        };
        assert_eq!(q.apply(&orders).len(), 2);

        let q = WorkOrderQuery {
            status: Some(WorkOrderStatus::Pending),
            search: Some("faucet".to_string()),
        };
        let hits = q.apply(&orders);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Leaking faucet");

        assert_eq!(WorkOrderQuery::default().apply(&orders).len(), 3);
    }

    #[test]
    fn test_blank_search_matches_all() {
        let orders = vec![order("A", "B", WorkOrderStatus::Pending)];
        let q = WorkOrderQuery {
            status: None,
            search: Some("   ".to_string()),
        };
        assert_eq!(q.apply(&orders).len(), 1);
    }

    #[test]
    fn test_group_by_status_has_every_bucket() {
        let orders = vec![
            order("A", "a", WorkOrderStatus::Pending),
            order("B", "b", WorkOrderStatus::Pending),
            order("C", "c", WorkOrderStatus::Cancelled),
        ];
        let groups = group_by_status(&orders);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[&WorkOrderStatus::Pending].len(), 2);
        assert!(groups[&WorkOrderStatus::InProgress].is_empty());
        assert_eq!(groups[&WorkOrderStatus::Cancelled].len(), 1);
    }

    #[test]
    fn test_personnel_role_and_specialty_search() {
        let people = vec![
            person("Ana", PersonnelRole::Contractor, "Plumbing"),
            person("Ben", PersonnelRole::Employee, "Plumbing"),
            person("Cal", PersonnelRole::Contractor, "Electrical"),
        ];
        let q = PersonnelQuery {
            role: Some(PersonnelRole::Contractor),
            search: Some("plumb".to_string()),
        };
        let hits = q.apply(&people);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Ana");

        let q = PersonnelQuery {
            role: None,
            search: Some("ben@".to_string()),
        };
        assert_eq!(q.apply(&people).len(), 1);
    }

    #[test]
    fn test_property_search() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let make = |address: &str, city: &str, state: &str| {
            Property::create(
                PropertyId::generate(),
                PropertyDraft {
                    address: address.to_string(),
                    unit: None,
                    city: city.to_string(),
                    state: state.to_string(),
                    zip_code: "00000".to_string(),
                    contract_address: None,
                },
                today,
            )
        };
        let properties = vec![
            make("1 Main St", "Austin", "TX"),
            make("9 Elm Rd", "Boston", "MA"),
        ];
        let q = PropertyQuery {
            search: Some("boston".to_string()),
        };
        assert_eq!(q.apply(&properties).len(), 1);
        let q = PropertyQuery {
            search: Some("tx".to_string()),
        };
        assert_eq!(q.apply(&properties)[0].city, "Austin");
    }
}
