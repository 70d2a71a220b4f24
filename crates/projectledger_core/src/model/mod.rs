//! Domain model for the project registry.
//!
//! # Responsibility
//! - Define the canonical `Project` record and its field validation.
//! - Define platform-level identifier and balance primitives.
//!
//! # Invariants
//! - Every registry entry is keyed by exactly one `AccountId`.
//! - A `Project` that fails `validate()` is never persisted.

pub mod account;
pub mod project;
