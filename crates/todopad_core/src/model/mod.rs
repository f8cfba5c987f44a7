//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical `Todo` record and its field constraints.
//! - Keep name validation pure and reusable by store and constructors.
//!
//! # Invariants
//! - Every `Todo` is identified by a stable `TodoId`.
//! - A `Todo` accepted into the collection has a name of 2 to 32 characters.

pub mod todo;
