//! Registry use-case service.
//!
//! # Responsibility
//! - Gate every mutating operation behind the administrator check.
//! - Validate inputs and the attached payment before any write.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - A failed precondition aborts the operation with no state change.
//! - "Not found" and "already completed" are boolean outcomes, not errors.
//! - Log emission never influences control flow.

use crate::config::RegistryConfig;
use crate::model::account::AccountId;
use crate::model::project::{Balance, Project, ProjectValidationError};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Fatal operation errors surfaced to the caller boundary.
///
/// Non-fatal conditions (absent project, already completed) are reported as
/// `Ok(false)` by the affected operations instead.
#[derive(Debug)]
pub enum RegistryError {
    Unauthorized { caller: AccountId },
    InvalidInput(ProjectValidationError),
    InsufficientPayment { attached: Balance, required: Balance },
    Repo(RepoError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { caller } => {
                write!(f, "account `{caller}` is not allowed to run this command")
            }
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::InsufficientPayment { attached, required } => write!(
                f,
                "attached payment {attached} is below the required {required} base units"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for RegistryError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for RegistryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Identity and payment attached to one call, supplied by the surrounding
/// execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Account that signed the call.
    pub caller: AccountId,
    /// Payment attached to the call, in base units.
    pub attached_deposit: Balance,
}

impl CallContext {
    pub fn new(caller: impl Into<AccountId>, attached_deposit: Balance) -> Self {
        Self {
            caller: caller.into(),
            attached_deposit,
        }
    }

    /// Context for calls that carry no payment.
    pub fn unpaid(caller: impl Into<AccountId>) -> Self {
        Self::new(caller, 0)
    }
}

/// Input for the registration operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterProjectRequest {
    pub name: String,
    pub description: String,
    pub total_amount: u32,
}

/// Use-case service wrapper for registry operations.
pub struct RegistryService<R: ProjectRepository> {
    repo: R,
    config: RegistryConfig,
}

impl<R: ProjectRepository> RegistryService<R> {
    /// Creates a service using the provided repository and deployment config.
    pub fn new(repo: R, config: RegistryConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers (or silently re-registers) a project owned by the caller.
    ///
    /// # Contract
    /// - Administrator only.
    /// - Checks, in order: authorization, amount, name, description, payment.
    /// - Stores `Project { completed: false }` keyed by the caller account,
    ///   overwriting any existing entry for that account in full.
    /// - Any failed check aborts with no write.
    pub fn register(
        &self,
        ctx: &CallContext,
        request: &RegisterProjectRequest,
    ) -> RegistryResult<()> {
        self.require_admin(&ctx.caller)?;

        let project = Project::new(
            request.name.clone(),
            ctx.caller.clone(),
            request.description.clone(),
            request.total_amount,
        );
        project.validate()?;

        let required = self.config.registration_fee();
        if ctx.attached_deposit < required {
            return Err(RegistryError::InsufficientPayment {
                attached: ctx.attached_deposit,
                required,
            });
        }

        self.repo.upsert_project(&project)?;
        info!(
            "event=project_registered module=registry status=ok account={} total_amount={}",
            project.owner_account, project.total_amount
        );
        Ok(())
    }

    /// Returns the project registered for `account`, if any.
    ///
    /// Open read: no authorization, no side effects.
    pub fn get_project(&self, account: &str) -> RegistryResult<Option<Project>> {
        Ok(self.repo.get_project(account)?)
    }

    /// Returns a snapshot of every registered project.
    ///
    /// Open read; ordering is not part of the contract.
    pub fn list_projects(&self) -> RegistryResult<Vec<Project>> {
        Ok(self.repo.list_projects()?)
    }

    /// Marks the project for `account` as completed.
    ///
    /// # Contract
    /// - Administrator only; auth failure is the only error path.
    /// - Returns `true` when the flag flipped false→true.
    /// - Returns `false` when the project is absent or already completed.
    pub fn complete(&self, ctx: &CallContext, account: &str) -> RegistryResult<bool> {
        self.require_admin(&ctx.caller)?;

        match self.repo.get_project(account)? {
            Some(mut project) if !project.completed => {
                project.complete();
                self.repo.upsert_project(&project)?;
                info!(
                    "event=project_completed module=registry status=ok account={account}"
                );
                Ok(true)
            }
            Some(_) => {
                warn!(
                    "event=project_completed module=registry status=noop reason=already_completed account={account}"
                );
                Ok(false)
            }
            None => {
                warn!(
                    "event=project_completed module=registry status=noop reason=not_found account={account}"
                );
                Ok(false)
            }
        }
    }

    /// Deletes the project for `account` when it is completed.
    ///
    /// # Contract
    /// - Administrator only; auth failure is the only error path.
    /// - Returns `true` when a completed project was removed.
    /// - Returns `false` when the project is absent or not yet completed.
    pub fn remove(&self, ctx: &CallContext, account: &str) -> RegistryResult<bool> {
        self.require_admin(&ctx.caller)?;

        match self.repo.get_project(account)? {
            Some(project) if project.completed => {
                self.repo.delete_project(account)?;
                info!(
                    "event=project_removed module=registry status=ok account={account}"
                );
                Ok(true)
            }
            Some(_) => {
                warn!(
                    "event=project_removed module=registry status=noop reason=not_completed account={account}"
                );
                Ok(false)
            }
            None => {
                warn!(
                    "event=project_removed module=registry status=noop reason=not_found account={account}"
                );
                Ok(false)
            }
        }
    }

    fn require_admin(&self, caller: &str) -> RegistryResult<()> {
        if self.config.is_admin(caller) {
            return Ok(());
        }
        warn!("event=auth_check module=registry status=denied caller={caller}");
        Err(RegistryError::Unauthorized {
            caller: caller.to_string(),
        })
    }
}
