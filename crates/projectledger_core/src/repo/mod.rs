//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the registry.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Project::validate()` before persistence.
//! - Repository APIs return semantic results (row present/absent) in
//!   addition to DB transport errors.

pub mod project_repo;
