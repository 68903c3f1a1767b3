//! Role assignment at signup

use crate::models::Role;
use core_config::{ConfigError, FromEnv, env_list};

/// Decides the role of a freshly signed-up account.
///
/// Addresses on the allow-list start as `admin`; everyone else is a
/// `student`. An empty list means nobody is promoted at signup and the
/// first admin has to be seeded in the store directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionPolicy {
    admin_emails: Vec<String>,
}

impl PromotionPolicy {
    pub fn new<I, S>(admin_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_emails: admin_emails.into_iter().map(Into::into).collect(),
        }
    }

    pub fn role_for(&self, email: &str) -> Role {
        if self.admin_emails.iter().any(|admin| admin == email) {
            Role::Admin
        } else {
            Role::Student
        }
    }
}

impl FromEnv for PromotionPolicy {
    /// `ADMIN_EMAILS`: comma-separated addresses, unset means empty.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_list("ADMIN_EMAILS")))
    }
}
