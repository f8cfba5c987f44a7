//! Default starter tasks.
//!
//! # Responsibility
//! - Supply the fixed task set installed when storage reports no prior
//!   state.
//!
//! # Invariants
//! - The returned set is deterministic: fixed IDs, fixed deadlines.
//! - No side effects; callers decide whether the set is ever persisted.

use crate::model::todo::{Priority, Todo};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

/// Returns the starter collection shown on a fresh install.
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: Uuid::from_u128(0x9e8f_1aa0_5c1b_4f67_9d20_000000000001),
            name: "Pay the rent".to_string(),
            is_done: false,
            priority: Priority::High,
            deadline: Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).single(),
        },
        Todo {
            id: Uuid::from_u128(0x9e8f_1aa0_5c1b_4f67_9d20_000000000002),
            name: "Book a dentist appointment".to_string(),
            is_done: false,
            priority: Priority::Medium,
            deadline: Utc.with_ymd_and_hms(2026, 9, 10, 9, 30, 0).single(),
        },
        Todo {
            id: Uuid::from_u128(0x9e8f_1aa0_5c1b_4f67_9d20_000000000003),
            name: "Water the plants".to_string(),
            is_done: false,
            priority: Priority::Low,
            deadline: None,
        },
    ]
}
