//! Deployment configuration for the registry.
//!
//! # Responsibility
//! - Carry the administrator identity and registration fee supplied at
//!   deployment/initialization time.
//! - Reject malformed administrator identifiers before any operation runs.
//!
//! # Invariants
//! - `admin_account` is a well-formed platform account id.
//! - `registration_fee` never changes after construction.

use crate::model::account::{is_valid_account_id, AccountId};
use crate::model::project::{Balance, ONE_UNIT};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAdminAccount(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAdminAccount(value) => {
                write!(f, "invalid administrator account id `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Registry deployment settings.
///
/// The administrator identity is a deployment-time value, not a compiled-in
/// literal, so the core stays testable against any account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    admin_account: AccountId,
    registration_fee: Balance,
}

impl RegistryConfig {
    /// Builds a config with an explicit registration fee.
    pub fn new(
        admin_account: impl Into<AccountId>,
        registration_fee: Balance,
    ) -> Result<Self, ConfigError> {
        let admin_account = admin_account.into();
        if !is_valid_account_id(&admin_account) {
            return Err(ConfigError::InvalidAdminAccount(admin_account));
        }
        Ok(Self {
            admin_account,
            registration_fee,
        })
    }

    /// Builds a config using the platform default fee of one whole token.
    pub fn with_default_fee(admin_account: impl Into<AccountId>) -> Result<Self, ConfigError> {
        Self::new(admin_account, ONE_UNIT)
    }

    pub fn admin_account(&self) -> &str {
        &self.admin_account
    }

    pub fn registration_fee(&self) -> Balance {
        self.registration_fee
    }

    /// Returns whether `caller` is the configured administrator.
    pub fn is_admin(&self, caller: &str) -> bool {
        caller == self.admin_account
    }
}
