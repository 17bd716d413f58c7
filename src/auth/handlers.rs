//! REST API handler for the demo login

use super::{helpers::check_demo_credentials, models::*};
use crate::catalog::models::DataResponse;
use crate::error::StoreError;
use crate::state::SharedState;
use axum::{routing::post, Json, Router};

/// Creates routes for authentication
pub fn routes() -> Router<SharedState> {
    Router::new().route("/auth/login", post(login))
}

/// Endpoint: POST /auth/login
/// Succeeds only for the demo account; anything else is a 401.
async fn login(
    Json(credentials): Json<Credentials>,
) -> Result<Json<DataResponse<AuthUser>>, StoreError> {
    match check_demo_credentials(&credentials) {
        Some(user) => {
            tracing::info!(user_id = %user.id, "login succeeded");
            Ok(Json(DataResponse { data: user }))
        }
        None => {
            tracing::warn!(email = %credentials.email, "login rejected");
            Err(StoreError::InvalidCredentials)
        }
    }
}
