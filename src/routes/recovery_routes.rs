use axum::{
    routing::post,
    Router,
};

use crate::{
    handlers::recovery,
    state::AppState,
};

pub fn recovery_routes() -> Router<AppState> {
    Router::new()
        // Request OTP for password recovery
        .route("/forgot-password/request-otp", post(recovery::request_otp))

        // Verify OTP and reset the password
        .route("/forgot-password/reset", post(recovery::reset_password))
}
