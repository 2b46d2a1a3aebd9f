use axum::extract::State;
use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber;

use recharge_portal::config::AppConfig;
use recharge_portal::routes;
use recharge_portal::services::email_service::EmailService;
use recharge_portal::services::ledger_service::LedgerService;
use recharge_portal::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    let app_state = initialize_app_state(&config);

    let app = build_router(app_state);
    start_server(app, &config).await;
}

fn initialize_app_state(config: &AppConfig) -> AppState {
    let ledger = Arc::new(LedgerService::new(&config.ledger_base_url));
    tracing::info!("✅ Ledger client initialized for {}", config.ledger_base_url);

    let mut app_state = AppState::new(ledger);

    if config.has_email_credentials() {
        let email_service = Arc::new(EmailService::new(
            config.email_service_id.clone(),
            config.email_public_key.clone(),
            config.email_otp_template.clone(),
            config.email_receipt_template.clone(),
        ));
        app_state = app_state.with_notifier(email_service);
        tracing::info!("✅ Email notification service initialized");
    } else {
        tracing::warn!("Email credentials not set; OTP and confirmation emails will be disabled");
    }

    app_state
}

fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .nest("/api/auth", routes::recovery_routes::recovery_routes())
        .nest("/api/recharge", routes::recharge_routes::recharge_routes())
        .layer(cors)
        .with_state(app_state)
}

async fn start_server(app: Router, config: &AppConfig) {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST and PORT must form a valid socket address");

    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            axum::serve(listener, app).await.unwrap();
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn root_handler() -> &'static str {
    "📱 Prepaid Recharge Portal API"
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "notifications": state.notifier.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
