//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, persistence and UI.
//! - Provide the single name-validation rule used at the create/update
//!   boundary.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `priority` only ever carries the levels 1, 2 or 3 on the wire.
//! - Name validation applies when a task enters the collection; records
//!   already in storage are taken as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = Uuid;

/// Inclusive lower bound on task name length, in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Inclusive upper bound on task name length, in characters.
pub const NAME_MAX_CHARS: usize = 32;

/// Task urgency level, carried as the integers 1..=3 in storage and JSON.
///
/// `High` is the creation default and sorts first under priority ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::High
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(InvalidPriority(other)),
        }
    }
}

/// Error for priority levels outside 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPriority(pub u8);

impl Display for InvalidPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "priority must be 1, 2 or 3, got {}", self.0)
    }
}

impl Error for InvalidPriority {}

/// Error for task names outside the accepted length range.
///
/// One fixed message for both bounds; the form surface shows it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameValidationError;

impl Display for NameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "task name must be {NAME_MIN_CHARS} to {NAME_MAX_CHARS} characters long"
        )
    }
}

impl Error for NameValidationError {}

/// Checks a candidate task name against the length rule.
///
/// Pure and total: returns `Ok(())` for 2..=32 characters, the fixed
/// validation error otherwise. Length is counted in Unicode scalar values.
pub fn validate_name(candidate: &str) -> Result<(), NameValidationError> {
    let chars = candidate.chars().count();
    if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(NameValidationError)
    }
}

/// Canonical task record.
///
/// Serializes with camelCase field names to keep the stored record shape
/// compatible with prior installations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Stable global ID, assigned once at creation.
    pub id: TodoId,
    /// Display name, 2..=32 characters for any accepted task.
    pub name: String,
    /// Completion flag. New tasks start out not done.
    pub is_done: bool,
    /// Urgency level 1..=3.
    pub priority: Priority,
    /// Optional due instant. `None` means the task has no deadline.
    pub deadline: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates a new task with a generated stable ID.
    ///
    /// # Contract
    /// - `name` must pass [`validate_name`].
    /// - `is_done` starts as `false`.
    pub fn new(
        name: impl Into<String>,
        priority: Priority,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Self, NameValidationError> {
        Self::with_id(Uuid::new_v4(), name, priority, deadline)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by paths where identity already exists, such as seed data.
    pub fn with_id(
        id: TodoId,
        name: impl Into<String>,
        priority: Priority,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Self, NameValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id,
            name,
            is_done: false,
            priority,
            deadline,
        })
    }
}
