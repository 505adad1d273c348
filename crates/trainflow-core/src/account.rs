//! # Account Module
//!
//! Demo sign-in and sign-up. There is no credential store and no real
//! authentication: login derives a session user from the e-mail address,
//! and registration only checks that the password was typed the same way
//! twice.

use crate::TrainflowError;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Employee,
}

/// The signed-in user held by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub role: Role,
}

/// Local part of an e-mail address (everything before the first `@`).
fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

// =============================================================================
// LOGIN
// =============================================================================

/// The sign-in form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Demo login.
    ///
    /// The display name is the e-mail local part. Addresses containing
    /// `admin` sign in as administrators, everyone else as employees.
    #[must_use]
    pub fn login(&self) -> SessionUser {
        let role = if self.email.contains("admin") {
            Role::Admin
        } else {
            Role::Employee
        };
        SessionUser {
            name: local_part(&self.email).to_string(),
            role,
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// The sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: Role,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            user_type: Role::Admin,
        }
    }
}

impl RegistrationForm {
    /// Whether password and confirmation are identical.
    ///
    /// Compared in constant time.
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password
            .as_bytes()
            .ct_eq(self.confirm_password.as_bytes())
            .into()
    }

    /// Demo registration.
    ///
    /// Fails with [`TrainflowError::PasswordMismatch`] and leaves the form
    /// untouched when the confirmation differs. Otherwise the display name
    /// is the company name, or the e-mail local part when that is empty.
    pub fn register(&self) -> Result<SessionUser, TrainflowError> {
        if !self.passwords_match() {
            return Err(TrainflowError::PasswordMismatch);
        }
        let name = if self.company_name.is_empty() {
            local_part(&self.email).to_string()
        } else {
            self.company_name.clone()
        };
        Ok(SessionUser {
            name,
            role: self.user_type,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
