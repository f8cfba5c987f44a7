use todopad_core::{validate_name, Priority, Todo};
use uuid::Uuid;

#[test]
fn validate_name_boundaries() {
    assert!(validate_name("a").is_err());
    assert!(validate_name("ab").is_ok());
    assert!(validate_name(&"a".repeat(32)).is_ok());
    assert!(validate_name(&"a".repeat(33)).is_err());
    assert!(validate_name("").is_err());
}

#[test]
fn validate_name_counts_characters_not_bytes() {
    // Two CJK characters are six bytes but still a valid two-char name.
    assert!(validate_name("予定").is_ok());
    assert!(validate_name(&"予".repeat(33)).is_err());
}

#[test]
fn validation_error_message_is_fixed() {
    let err = validate_name("x").unwrap_err();
    assert_eq!(err.to_string(), "task name must be 2 to 32 characters long");
    assert_eq!(err, validate_name(&"x".repeat(40)).unwrap_err());
}

#[test]
fn new_todo_sets_defaults() {
    let todo = Todo::new("Buy milk", Priority::Medium, None).unwrap();

    assert!(!todo.id.is_nil());
    assert_eq!(todo.name, "Buy milk");
    assert!(!todo.is_done);
    assert_eq!(todo.priority, Priority::Medium);
    assert_eq!(todo.deadline, None);
}

#[test]
fn new_todo_rejects_out_of_bounds_names() {
    assert!(Todo::new("a", Priority::default(), None).is_err());
    assert!(Todo::new("a".repeat(33), Priority::default(), None).is_err());
}

#[test]
fn identical_names_get_distinct_ids() {
    let first = Todo::new("Buy milk", Priority::High, None).unwrap();
    let second = Todo::new("Buy milk", Priority::High, None).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn priority_maps_to_wire_integers() {
    assert_eq!(u8::from(Priority::Low), 1);
    assert_eq!(u8::from(Priority::Medium), 2);
    assert_eq!(u8::from(Priority::High), 3);

    assert_eq!(Priority::try_from(1).unwrap(), Priority::Low);
    assert_eq!(Priority::try_from(3).unwrap(), Priority::High);
    assert!(Priority::try_from(0).is_err());
    assert!(Priority::try_from(4).is_err());
}

#[test]
fn priority_orders_high_above_low() {
    assert!(Priority::High > Priority::Medium);
    assert!(Priority::Medium > Priority::Low);
    assert_eq!(Priority::default(), Priority::High);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let deadline = "2026-08-31T12:00:00Z".parse().unwrap();
    let mut todo = Todo::with_id(id, "Pay the rent", Priority::High, Some(deadline)).unwrap();
    todo.is_done = true;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["name"], "Pay the rent");
    assert_eq!(json["isDone"], true);
    assert_eq!(json["priority"], 3);
    assert_eq!(json["deadline"], "2026-08-31T12:00:00Z");

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn todo_without_deadline_serializes_null() {
    let todo = Todo::new("Water the plants", Priority::Low, None).unwrap();

    let json = serde_json::to_value(&todo).unwrap();
    assert!(json["deadline"].is_null());

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.deadline, None);
}

#[test]
fn deserialize_rejects_out_of_range_priority() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "bad priority",
        "isDone": false,
        "priority": 5,
        "deadline": null
    });

    let err = serde_json::from_value::<Todo>(value).unwrap_err();
    assert!(
        err.to_string().contains("priority must be 1, 2 or 3"),
        "unexpected error: {err}"
    );
}
