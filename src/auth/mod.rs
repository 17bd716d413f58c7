//! Authentication Module
//!
//! - Credential and user models, including the demo account
//! - The explicit client [`Session`](session::Session)
//! - Login and registration form validation
//! - The `/auth/login` handler

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod session;

pub use handlers::routes;
pub use models::{AuthUser, Credentials};
pub use session::Session;
