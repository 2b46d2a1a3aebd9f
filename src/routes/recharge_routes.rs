use axum::{
    routing::post,
    Router,
};

use crate::{
    handlers::payment,
    state::AppState,
};

pub fn recharge_routes() -> Router<AppState> {
    Router::new()
        // Open a recharge session for a plan
        .route("/sessions", post(payment::start_session))

        // Step transitions on one session
        .route("/sessions/:session_id/proceed", post(payment::proceed_to_payment))
        .route("/sessions/:session_id/method", post(payment::select_method))
        .route("/sessions/:session_id/card", post(payment::set_card_details))
        .route("/sessions/:session_id/submit", post(payment::submit))
}
