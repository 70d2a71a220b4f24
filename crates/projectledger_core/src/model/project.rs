//! Project record and validation rules.
//!
//! # Responsibility
//! - Define the canonical per-account project record.
//! - Enforce field rules shared by every write path.
//!
//! # Invariants
//! - `owner_account` is assigned at registration and never mutated.
//! - `completed` starts `false` and only `complete()` flips it forward.
//! - `total_amount` is strictly positive for every persisted record.

use crate::model::account::AccountId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payment amount in base units of the platform currency.
pub type Balance = u128;

/// One whole platform token (10^24 base units); the fixed minimum payment
/// required to register a project.
pub const ONE_UNIT: Balance = 1_000_000_000_000_000_000_000_000;

/// Minimum character count for `name` and `description`.
pub const MIN_TEXT_LEN: usize = 3;

/// Validation failure for project field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    AmountNotPositive,
    NameTooShort { len: usize },
    DescriptionTooShort { len: usize },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmountNotPositive => write!(f, "total amount must be greater than zero"),
            Self::NameTooShort { len } => write!(
                f,
                "name must contain at least {MIN_TEXT_LEN} characters, got {len}"
            ),
            Self::DescriptionTooShort { len } => write!(
                f,
                "description must contain at least {MIN_TEXT_LEN} characters, got {len}"
            ),
        }
    }
}

impl Error for ProjectValidationError {}

/// Canonical registry record: one project per owning account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Display name, at least `MIN_TEXT_LEN` characters.
    pub name: String,
    /// Account that registered the project; also the registry key.
    pub owner_account: AccountId,
    /// Free-form summary, at least `MIN_TEXT_LEN` characters.
    pub description: String,
    /// Total funding amount requested by the project.
    pub total_amount: u32,
    /// Completion flag; flipped one-way by the completion operation.
    pub completed: bool,
}

impl Project {
    /// Creates a new incomplete project owned by `owner_account`.
    ///
    /// Does not validate; call `validate()` before persisting.
    pub fn new(
        name: impl Into<String>,
        owner_account: impl Into<AccountId>,
        description: impl Into<String>,
        total_amount: u32,
    ) -> Self {
        Self {
            name: name.into(),
            owner_account: owner_account.into(),
            description: description.into(),
            total_amount,
            completed: false,
        }
    }

    /// Checks field rules in the same order every write path applies them:
    /// amount, name, description.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.total_amount == 0 {
            return Err(ProjectValidationError::AmountNotPositive);
        }
        let name_len = self.name.chars().count();
        if name_len < MIN_TEXT_LEN {
            return Err(ProjectValidationError::NameTooShort { len: name_len });
        }
        let description_len = self.description.chars().count();
        if description_len < MIN_TEXT_LEN {
            return Err(ProjectValidationError::DescriptionTooShort {
                len: description_len,
            });
        }
        Ok(())
    }

    /// Marks this project as completed.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}
