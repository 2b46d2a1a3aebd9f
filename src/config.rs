// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ledger_base_url: String,
    pub email_service_id: String,
    pub email_public_key: String,
    pub email_otp_template: String,
    pub email_receipt_template: String,
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        AppConfig {
            ledger_base_url: env::var("LEDGER_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            email_service_id: env::var("EMAIL_SERVICE_ID").unwrap_or_default(),
            email_public_key: env::var("EMAIL_PUBLIC_KEY").unwrap_or_default(),
            email_otp_template: env::var("EMAIL_OTP_TEMPLATE")
                .unwrap_or_else(|_| "template_ssc183d".to_string()),
            email_receipt_template: env::var("EMAIL_RECEIPT_TEMPLATE")
                .unwrap_or_else(|_| "template_oo64rft".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        }
    }

    pub fn has_email_credentials(&self) -> bool {
        !self.email_service_id.is_empty() && !self.email_public_key.is_empty()
    }
}
