//! Core domain logic for the project registry ledger.
//! This crate is the single source of truth for registry invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, RegistryConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{is_valid_account_id, AccountId};
pub use model::project::{Balance, Project, ProjectValidationError, MIN_TEXT_LEN, ONE_UNIT};
pub use repo::project_repo::{
    ProjectRepository, RepoError, RepoResult, SqliteProjectRepository,
};
pub use service::registry_service::{
    CallContext, RegisterProjectRequest, RegistryError, RegistryResult, RegistryService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
