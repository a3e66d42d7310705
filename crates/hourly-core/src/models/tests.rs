use super::*;
use serde_json::json;

#[test]
fn timesheet_entry_accepts_decimal_strings() {
    let entry: TimesheetEntry = serde_json::from_value(json!({
        "id": 7,
        "project": 3,
        "project_name": "Apollo",
        "activity": 11,
        "date": "2026-10-12",
        "hours": "7.50",
        "status": "draft"
    }))
    .expect("entry");
    assert_eq!(entry.hours, 7.5);
    assert_eq!(entry.project_label(), "Apollo");
    assert!(!entry.is_submitted());

    let entry: TimesheetEntry = serde_json::from_value(json!({
        "id": 8,
        "project": 4,
        "date": "2026-10-13",
        "hours": 2,
        "status": "submitted"
    }))
    .expect("entry");
    assert_eq!(entry.hours, 2.0);
    assert_eq!(entry.project_label(), "project #4");
    assert!(entry.is_submitted());
}

#[test]
fn timesheet_entry_rejects_garbage_hours() {
    let result = serde_json::from_value::<TimesheetEntry>(json!({
        "id": 1,
        "project": 1,
        "date": "2026-10-12",
        "hours": "lots"
    }));
    assert!(result.is_err());
}

#[test]
fn listing_accepts_pages_and_arrays() {
    let page: Listing<Activity> = serde_json::from_value(json!({
        "count": 1,
        "results": [{"id": 1, "name": "Design"}]
    }))
    .expect("page");
    assert_eq!(page.into_vec().len(), 1);

    let plain: Listing<Activity> =
        serde_json::from_value(json!([{"id": 1, "name": "Design"}, {"id": 2, "name": "Build"}]))
            .expect("plain");
    assert_eq!(plain.into_vec().len(), 2);
}

#[test]
fn user_admin_flag() {
    let user: User = serde_json::from_value(json!({
        "id": 1,
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "role": "admin"
    }))
    .expect("user");
    assert!(user.is_admin());
    assert_eq!(user.full_name(), "Ada Lovelace");
}

#[test]
fn update_requests_skip_unset_fields() {
    let body = serde_json::to_value(UpdateUserRequest {
        first_name: Some("Grace".to_string()),
        ..UpdateUserRequest::default()
    })
    .expect("serialize");
    assert_eq!(body, json!({"first_name": "Grace"}));
}
