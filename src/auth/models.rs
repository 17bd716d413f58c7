//! Authentication Models

use serde::{Deserialize, Serialize};

pub const DEMO_USER_ID: &str = "user-1";
pub const DEMO_USER_NAME: &str = "Nguyễn Văn A";
pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password";
/// Opaque token handed out on login. Never verified beyond equality.
pub const DEMO_TOKEN: &str = "mock-jwt-token";

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The logged-in user as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthUser {
    pub fn demo() -> Self {
        Self {
            id: DEMO_USER_ID.to_string(),
            name: DEMO_USER_NAME.to_string(),
            email: DEMO_EMAIL.to_string(),
            token: DEMO_TOKEN.to_string(),
        }
    }
}

/// Sign-up form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
