//! Explicit client session.
//!
//! The session is a value the caller owns and passes to every operation
//! that needs credentials. Logging out, including the forced logout after
//! an `Unauthorized` answer, is a method call on it.

use super::models::AuthUser;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<AuthUser>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }

    /// Stores the user returned by a successful login.
    pub fn sign_in(&mut self, user: AuthUser) {
        self.user = Some(user);
    }

    /// Clears stored credentials, returning the user that was signed in.
    pub fn sign_out(&mut self) -> Option<AuthUser> {
        self.user.take()
    }
}
