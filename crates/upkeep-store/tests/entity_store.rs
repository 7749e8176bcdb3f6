//! Integration tests for the entity stores and the workspace facade.

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::{json, Value};
use upkeep_core::{
    Clock, EntityKind, FixedClock, PersonnelId, PersonnelStatus, PropertyId, PropertyStatus,
    Timestamp, UpkeepError, WorkOrderId, WorkOrderStatus,
};
use upkeep_store::{CollectionBackend, FileBackend, MemoryBackend, Workspace};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Timestamp::parse("2024-02-05T08:00:00Z").unwrap()))
}

fn workspace_over(backend: Arc<dyn CollectionBackend>) -> Workspace {
    let clock: Arc<dyn Clock> = clock();
    Workspace::open(backend, clock).unwrap()
}

fn workspace() -> Workspace {
    workspace_over(Arc::new(MemoryBackend::new()))
}

fn property_payload() -> Value {
    json!({
        "address": "123 Main St",
        "unit": "4B",
        "city": "San Francisco",
        "state": "CA",
        "zipCode": "94105"
    })
}

fn personnel_payload(first: &str, last: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "role": "contractor",
        "email": "crew@example.com",
        "phone": "(555) 234-5678",
        "specialties": ["Plumbing", "HVAC"],
        "rate": 75,
        "license": "PL-123456"
    })
}

fn work_order_payload() -> Value {
    json!({
        "propertyId": "1",
        "title": "Leaking faucet",
        "description": "Kitchen faucet drips constantly",
        "priority": "high",
        "dueDate": "2024-02-10",
        "category": "Plumbing",
        "estimatedCost": 120
    })
}

fn assert_validation(err: UpkeepError, message: &str) {
    match err {
        UpkeepError::Validation(v) => assert_eq!(v.message(), message),
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn assert_not_found(err: UpkeepError, kind: EntityKind) {
    match err {
        UpkeepError::NotFound(k) => assert_eq!(k, kind),
        other => panic!("expected not found, got {other:?}"),
    }
}

/// Backend whose writes can be switched off, for failed-persist tests.
#[derive(Debug, Default)]
struct FlakyBackend {
    inner: MemoryBackend,
    failing: Mutex<bool>,
}

impl CollectionBackend for FlakyBackend {
    fn load(&self, key: &str) -> Result<Option<String>, UpkeepError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), UpkeepError> {
        if *self.failing.lock() {
            return Err(UpkeepError::Storage("disk full".to_string()));
        }
        self.inner.save(key, contents)
    }

    fn remove(&self, key: &str) -> Result<(), UpkeepError> {
        self.inner.remove(key)
    }
}

// ─── Property ────────────────────────────────────────────────────────

#[test]
fn test_property_create_defaults_and_fetch() {
    let ws = workspace();
    let p = ws.properties().create(&property_payload()).unwrap();
    assert_eq!(p.status, PropertyStatus::Active);
    assert_eq!(p.maintenance_tasks, 0);
    assert_eq!(p.warranties, 0);
    assert_eq!(p.last_inspection.to_string(), "2024-02-05");
    assert_eq!(p.owner.name, "Default Owner");
    assert!(p.maintenance_history.is_empty());
    assert_eq!(ws.properties().get_by_id(&p.id).unwrap(), p);
}

#[test]
fn test_property_create_reports_first_violation() {
    let ws = workspace();
    let err = ws
        .properties()
        .create(&json!({"address": "", "city": ""}))
        .unwrap_err();
    assert_validation(err, "Address is required");
    assert!(ws.properties().is_empty());
}

#[test]
fn test_property_update_status_and_record() {
    let ws = workspace();
    let p = ws.properties().create(&property_payload()).unwrap();
    let p = ws
        .properties()
        .update_status(&p.id, PropertyStatus::Inactive)
        .unwrap();
    assert_eq!(p.status, PropertyStatus::Inactive);

    for (kind, cost) in [("HVAC", 150), ("Plumbing", 80)] {
        ws.properties()
            .add_maintenance_record(
                &p.id,
                &json!({
                    "date": "2024-01-15",
                    "type": kind,
                    "description": "Service",
                    "cost": cost,
                    "status": "completed",
                    "contractor": "CoolAir Services"
                }),
            )
            .unwrap();
    }
    let p = ws.properties().get_by_id(&p.id).unwrap();
    let kinds: Vec<&str> = p.maintenance_history.iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(kinds, vec!["HVAC", "Plumbing"]);
    assert_eq!(p.maintenance_spend(), 230.0);
}

#[test]
fn test_property_update_cannot_replace_history() {
    let ws = workspace();
    let p = ws.properties().create(&property_payload()).unwrap();
    ws.properties()
        .add_maintenance_record(
            &p.id,
            &json!({
                "date": "2024-01-15",
                "type": "HVAC",
                "description": "Filter",
                "cost": 10,
                "status": "completed",
                "contractor": "CoolAir"
            }),
        )
        .unwrap();
    let updated = ws
        .properties()
        .update(
            &p.id,
            &json!({"city": "Oakland", "maintenanceHistory": [], "id": "hijack", "warranties": 3}),
        )
        .unwrap();
    assert_eq!(updated.id, p.id);
    assert_eq!(updated.city, "Oakland");
    assert_eq!(updated.warranties, 3);
    assert_eq!(updated.maintenance_history.len(), 1);
}

#[test]
fn test_update_status_unknown_id() {
    let ws = workspace();
    let err = ws
        .properties()
        .update_status(&PropertyId::from("missing"), PropertyStatus::Inactive)
        .unwrap_err();
    assert_not_found(err, EntityKind::Property);
    let err = ws
        .personnel()
        .update_status(&PersonnelId::from("missing"), PersonnelStatus::OnLeave)
        .unwrap_err();
    assert_not_found(err, EntityKind::Personnel);
}

// ─── Personnel ───────────────────────────────────────────────────────

#[test]
fn test_personnel_create_defaults() {
    let ws = workspace();
    let p = ws
        .personnel()
        .create(&personnel_payload("Mike", "Johnson"))
        .unwrap();
    assert_eq!(p.status, PersonnelStatus::Active);
    assert_eq!(p.rating, 0.0);
    assert_eq!(p.hire_date.to_string(), "2024-02-05");
    assert_eq!(p.completed_work_orders, 0);
    assert!(p.is_contractor());
}

#[test]
fn test_personnel_employee_drops_license() {
    let ws = workspace();
    let mut payload = personnel_payload("Lee", "Park");
    payload["role"] = json!("employee");
    let p = ws.personnel().create(&payload).unwrap();
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["role"], "employee");
    assert!(v.get("license").is_none());
}

#[test]
fn test_personnel_update_rating_bounds() {
    let ws = workspace();
    let p = ws
        .personnel()
        .create(&personnel_payload("Mike", "Johnson"))
        .unwrap();
    let err = ws.personnel().update(&p.id, &json!({"rating": 9})).unwrap_err();
    assert_validation(err, "Rating must be between 0 and 5");
    let p = ws.personnel().update(&p.id, &json!({"rating": 4.8})).unwrap();
    assert_eq!(p.rating, 4.8);
}

// ─── Work orders ─────────────────────────────────────────────────────

#[test]
fn test_work_order_create_defaults() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    assert_eq!(wo.status, WorkOrderStatus::Pending);
    assert_eq!(wo.created_at.to_iso8601(), "2024-02-05T08:00:00Z");
    assert!(wo.notes.is_empty());
    assert!(wo.attachments.is_empty());
}

#[test]
fn test_work_order_property_reference_not_enforced() {
    let ws = workspace();
    let mut payload = work_order_payload();
    payload["propertyId"] = json!("no-such-property");
    assert!(ws.work_orders().create(&payload).is_ok());
}

#[test]
fn test_update_empty_payload_is_identity() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let same = ws.work_orders().update(&wo.id, &json!({})).unwrap();
    assert_eq!(same, wo);
    assert_eq!(ws.work_orders().get_by_id(&wo.id).unwrap(), wo);
}

#[test]
fn test_update_merges_and_protects_created_at() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let updated = ws
        .work_orders()
        .update(
            &wo.id,
            &json!({
                "status": "completed",
                "actualCost": 150,
                "createdAt": "1999-01-01T00:00:00Z",
                "notes": []
            }),
        )
        .unwrap();
    assert_eq!(updated.status, WorkOrderStatus::Completed);
    assert_eq!(updated.actual_cost, Some(150.0));
    assert_eq!(updated.created_at, wo.created_at);
    assert_eq!(updated.title, wo.title);
}

#[test]
fn test_update_rejects_unknown_status() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let err = ws
        .work_orders()
        .update(&wo.id, &json!({"status": "bogus"}))
        .unwrap_err();
    assert!(matches!(err, UpkeepError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "Status must be pending, in-progress, completed, or cancelled"
    );
    assert_eq!(ws.work_orders().get_by_id(&wo.id).unwrap(), wo);
}

#[test]
fn test_update_rejection_messages_stay_short() {
    let ws = workspace();
    let person = ws
        .personnel()
        .create(&personnel_payload("Ann", "Lee"))
        .unwrap();
    let err = ws
        .personnel()
        .update(&person.id, &json!({"status": "retired"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "Status must be active, inactive, or on-leave");

    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let err = ws
        .work_orders()
        .update(&wo.id, &json!({"status": "completed", "actualCost": "lots"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid work order update");
}

#[test]
fn test_update_missing_id_is_not_found_before_validation() {
    let ws = workspace();
    let err = ws
        .work_orders()
        .update(&WorkOrderId::from("nope"), &json!({"title": ""}))
        .unwrap_err();
    assert_not_found(err, EntityKind::WorkOrder);
}

#[test]
fn test_delete_then_get_is_not_found() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    ws.work_orders().delete(&wo.id).unwrap();
    assert_not_found(ws.work_orders().get_by_id(&wo.id).unwrap_err(), EntityKind::WorkOrder);
    assert_not_found(ws.work_orders().delete(&wo.id).unwrap_err(), EntityKind::WorkOrder);
}

#[test]
fn test_add_note_goes_to_front() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let first = ws
        .work_orders()
        .add_note(&wo.id, &json!({"content": "Parts ordered", "createdBy": "Ops"}))
        .unwrap();
    assert_eq!(first.notes.len(), 1);
    let second = ws
        .work_orders()
        .add_note(&wo.id, &json!({"content": "Started work", "createdBy": "Mike"}))
        .unwrap();
    assert_eq!(second.notes.len(), first.notes.len() + 1);
    assert_eq!(second.notes[0].content, "Started work");
    assert_eq!(second.notes[1].content, "Parts ordered");
}

#[test]
fn test_add_note_validates_and_checks_existence() {
    let ws = workspace();
    let err = ws
        .work_orders()
        .add_note(&WorkOrderId::from("nope"), &json!({"content": "x", "createdBy": "y"}))
        .unwrap_err();
    assert_not_found(err, EntityKind::WorkOrder);

    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let err = ws
        .work_orders()
        .add_note(&wo.id, &json!({"content": "", "createdBy": "y"}))
        .unwrap_err();
    assert_validation(err, "Note content is required");
}

#[test]
fn test_add_attachment_appends() {
    let ws = workspace();
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    for name in ["before.jpg", "after.jpg"] {
        ws.work_orders()
            .add_attachment(
                &wo.id,
                &json!({"name": name, "url": format!("https://files/{name}"), "type": "image/jpeg"}),
            )
            .unwrap();
    }
    let wo = ws.work_orders().get_by_id(&wo.id).unwrap();
    assert_eq!(wo.attachments[0].name, "before.jpg");
    assert_eq!(wo.attachments[1].name, "after.jpg");
}

// ─── Assignment ──────────────────────────────────────────────────────

#[test]
fn test_create_with_assignee_id_fills_name() {
    let ws = workspace();
    let mike = ws
        .personnel()
        .create(&personnel_payload("Mike", "Johnson"))
        .unwrap();
    let mut payload = work_order_payload();
    payload["assigneeId"] = json!(mike.id.as_str());
    let wo = ws.create_work_order(&payload).unwrap();
    assert_eq!(wo.assignee_id.as_ref(), Some(&mike.id));
    assert_eq!(wo.assigned_to.as_deref(), Some("Mike Johnson"));
}

#[test]
fn test_create_with_unknown_assignee_fails() {
    let ws = workspace();
    let mut payload = work_order_payload();
    payload["assigneeId"] = json!("ghost");
    assert_not_found(
        ws.create_work_order(&payload).unwrap_err(),
        EntityKind::Personnel,
    );
    assert!(ws.work_orders().is_empty());
}

#[test]
fn test_assign_and_reassign_by_name() {
    let ws = workspace();
    let mike = ws
        .personnel()
        .create(&personnel_payload("Mike", "Johnson"))
        .unwrap();
    let wo = ws.create_work_order(&work_order_payload()).unwrap();
    let wo = ws.assign_work_order(&wo.id, &mike.id).unwrap();
    assert_eq!(wo.assigned_to.as_deref(), Some("Mike Johnson"));

    let wo = ws
        .update_work_order(&wo.id, &json!({"assignedTo": "Sarah Wilson"}))
        .unwrap();
    assert_eq!(wo.assignee_id, None);
    assert_eq!(wo.assigned_to.as_deref(), Some("Sarah Wilson"));

    assert_not_found(
        ws.assign_work_order(&wo.id, &PersonnelId::from("ghost"))
            .unwrap_err(),
        EntityKind::Personnel,
    );
    assert_not_found(
        ws.assign_work_order(&WorkOrderId::from("ghost"), &mike.id)
            .unwrap_err(),
        EntityKind::WorkOrder,
    );
}

// ─── Persistence ─────────────────────────────────────────────────────

#[test]
fn test_every_mutation_persists_whole_collection() {
    let backend = MemoryBackend::new();
    let ws = workspace_over(Arc::new(backend.clone()));
    let a = ws.properties().create(&property_payload()).unwrap();
    let b = ws.properties().create(&property_payload()).unwrap();
    let stored: Vec<Value> =
        serde_json::from_str(&backend.get("properties").unwrap()).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["id"], a.id.as_str());
    assert_eq!(stored[1]["id"], b.id.as_str());
}

#[test]
fn test_failed_persist_changes_nothing() {
    let backend = Arc::new(FlakyBackend::default());
    let ws = workspace_over(backend.clone());
    let wo = ws.work_orders().create(&work_order_payload()).unwrap();
    let persisted = backend.inner.get("workOrders");

    *backend.failing.lock() = true;
    let err = ws
        .work_orders()
        .add_note(&wo.id, &json!({"content": "x", "createdBy": "y"}))
        .unwrap_err();
    assert_eq!(err.user_message(), "An unknown error occurred");
    assert!(ws.work_orders().create(&work_order_payload()).is_err());

    assert_eq!(ws.work_orders().len(), 1);
    assert!(ws.work_orders().get_by_id(&wo.id).unwrap().notes.is_empty());
    assert_eq!(backend.inner.get("workOrders"), persisted);
}

#[test]
fn test_file_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let ws = workspace_over(Arc::new(FileBackend::open(dir.path()).unwrap()));
        ws.personnel()
            .create(&personnel_payload("Mike", "Johnson"))
            .unwrap()
            .id
    };
    let ws = workspace_over(Arc::new(FileBackend::open(dir.path()).unwrap()));
    assert_eq!(ws.personnel().get_by_id(&id).unwrap().full_name(), "Mike Johnson");
}

#[test]
fn test_open_refuses_malformed_collection() {
    let backend = MemoryBackend::new();
    backend.insert("workOrders", "[{\"id\": 1}");
    let clock: Arc<dyn Clock> = clock();
    let err = Workspace::open(Arc::new(backend), clock).unwrap_err();
    assert!(matches!(err, UpkeepError::Storage(_)));
}

#[test]
fn test_reset_clears_store_and_key() {
    let backend = MemoryBackend::new();
    let ws = workspace_over(Arc::new(backend.clone()));
    ws.properties().create(&property_payload()).unwrap();
    ws.work_orders().create(&work_order_payload()).unwrap();
    ws.reset().unwrap();
    assert!(ws.properties().list_all().is_empty());
    assert!(ws.work_orders().list_all().is_empty());
    assert!(!backend.contains("properties"));
    assert!(!backend.contains("workOrders"));
}

#[test]
fn test_snapshot_matches_stores() {
    let ws = workspace();
    ws.properties().create(&property_payload()).unwrap();
    ws.work_orders().create(&work_order_payload()).unwrap();
    let snap = ws.snapshot();
    assert_eq!(snap.properties, ws.properties().list_all());
    assert_eq!(snap.work_orders.len(), 1);
    assert!(snap.personnel.is_empty());
}

// ─── Properties over generated payloads ──────────────────────────────

fn non_empty() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,20}"
}

proptest! {
    #[test]
    fn prop_created_ids_are_unique_and_fetchable(
        titles in proptest::collection::vec(non_empty(), 1..12),
    ) {
        let ws = workspace();
        let mut ids = std::collections::HashSet::new();
        for title in &titles {
            let mut payload = work_order_payload();
            payload["title"] = json!(title);
            let wo = ws.work_orders().create(&payload).unwrap();
            prop_assert_eq!(wo.status, WorkOrderStatus::Pending);
            prop_assert!(ids.insert(wo.id.clone()));
            prop_assert_eq!(ws.work_orders().get_by_id(&wo.id).unwrap(), wo);
        }
        prop_assert_eq!(ws.work_orders().len(), titles.len());
    }

    #[test]
    fn prop_personnel_defaults_hold(
        first in non_empty(),
        last in non_empty(),
        rate in 0.0f64..500.0,
    ) {
        let ws = workspace();
        let mut payload = personnel_payload(&first, &last);
        payload["rate"] = json!(rate);
        let p = ws.personnel().create(&payload).unwrap();
        prop_assert_eq!(p.rating, 0.0);
        prop_assert_eq!(p.status, PersonnelStatus::Active);
        prop_assert_eq!(p.full_name(), format!("{first} {last}"));
    }
}
