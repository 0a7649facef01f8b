//! Structural checks applied to account input before the store is touched.

use crate::domain::shared::{errors::DomainError, validation::into_domain_error};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref EMAIL_REGEX: regex::Regex = regex::Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Username {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub value: String,
}

impl Username {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let username = Self { value };
        username.validate()?;
        Ok(username)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct Password {
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub value: String,
}

impl Password {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let password = Self { value };
        password.validate()?;
        Ok(password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Email {
    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid Email"))]
    pub value: String,
}

impl Email {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let email = Self { value };
        email.validate()?;
        Ok(email)
    }
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: Username,
    pub email: Email,
    pub password: Password,
}

impl Registration {
    /// Checks password, then username, then email; the first failure wins.
    pub fn parse(username: String, email: String, password: String) -> Result<Self, DomainError> {
        let password = Password::new(password).map_err(|e| into_domain_error(e, "password"))?;
        let username = Username::new(username).map_err(|e| into_domain_error(e, "username"))?;
        let email = Email::new(email).map_err(|e| into_domain_error(e, "email"))?;
        Ok(Self {
            username,
            email,
            password,
        })
    }
}

/// How `login` / `changePassword` locate an account from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Email(String),
    Username(String),
}

impl LoginIdentifier {
    pub fn parse(text: &str) -> Self {
        if text.contains('@') {
            Self::Email(text.to_string())
        } else {
            Self::Username(text.to_string())
        }
    }

    /// Field name reported when no account matches.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Username(_) => "username",
        }
    }
}
