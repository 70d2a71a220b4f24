//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into registry-level operations.
//! - Keep callers decoupled from storage details.

pub mod registry_service;
