//! Persistence adapter contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the durable-slot contract the store persists through.
//! - Isolate SQL details from store/business orchestration.
//!
//! # Invariants
//! - `save` replaces the whole collection atomically; a reader never
//!   observes a partially written set.
//! - Read paths reject malformed persisted values instead of masking them.

pub mod todo_repo;
