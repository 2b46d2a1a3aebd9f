//! Contract tests for LedgerService against the subscriber ledger REST API.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/auth/forgot-password/get-email` | `get_contact_*` |
//! | POST   | `/auth/forgot-password` | `reset_password_*` |
//! | GET    | `/plans/{id}` | `get_plan_*` |
//! | POST   | `/recharge` | `create_recharge_*` |

use recharge_portal::errors::AppError;
use recharge_portal::models::recharge::RechargeRequest;
use recharge_portal::services::ledger_service::LedgerService;
use recharge_portal::services::SubscriberLedger;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> LedgerService {
    LedgerService::new(mock_server.uri())
}

// ── POST /auth/forgot-password/get-email ─────────────────────────────

#[tokio::test]
async fn get_contact_sends_camel_case_body_and_parses_the_contact() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/forgot-password/get-email"))
        .and(body_json(serde_json::json!({ "mobileNumber": "9876543210" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "email": "asha@example.com",
            "userName": "Asha"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let contact = test_client(&mock_server)
        .get_contact("9876543210")
        .await
        .unwrap();

    assert_eq!(contact.email, "asha@example.com");
    assert_eq!(contact.user_name, "Asha");
}

#[tokio::test]
async fn get_contact_defaults_the_user_name_when_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/forgot-password/get-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "email": "asha@example.com"
        })))
        .mount(&mock_server)
        .await;

    let contact = test_client(&mock_server)
        .get_contact("9876543210")
        .await
        .unwrap();

    assert_eq!(contact.user_name, "User");
}

#[tokio::test]
async fn get_contact_maps_404_to_mobile_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/forgot-password/get-email"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false,
            "message": "Subscriber not found"
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .get_contact("0000000000")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MobileNotFound(ref mobile) if mobile == "0000000000"));
}

// ── POST /auth/forgot-password ───────────────────────────────────────

#[tokio::test]
async fn reset_password_returns_the_backend_confirmation_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_json(serde_json::json!({
            "email": "asha@example.com",
            "newPassword": "n3w-secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Password reset successfully"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let message = test_client(&mock_server)
        .reset_password("asha@example.com", "n3w-secret")
        .await
        .unwrap();

    assert_eq!(message, "Password reset successfully");
}

#[tokio::test]
async fn reset_password_surfaces_the_backend_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Invalid email format"
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .reset_password("not-an-email", "n3w-secret")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upstream(ref msg) if msg == "Invalid email format"));
}

// ── GET /plans/{id} ──────────────────────────────────────────────────

#[tokio::test]
async fn get_plan_parses_the_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "name": "Smart 299",
            "price": 299,
            "validity": "28 days",
            "data": "1.5GB/day",
            "calls": "Unlimited",
            "sms": "100/day",
            "category": "popular",
            "benefits": ["Unlimited 5G"],
            "active": true
        })))
        .mount(&mock_server)
        .await;

    let plan = test_client(&mock_server).get_plan(7).await.unwrap();

    assert_eq!(plan.name, "Smart 299");
    assert_eq!(plan.price, 299.0);
    assert_eq!(plan.validity_days(), 28);
}

#[tokio::test]
async fn get_plan_maps_404_to_plan_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).get_plan(999).await.unwrap_err();

    assert!(matches!(err, AppError::PlanNotFound(999)));
}

// ── POST /recharge ───────────────────────────────────────────────────

#[tokio::test]
async fn create_recharge_sends_the_full_payload_and_parses_the_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recharge"))
        .and(body_json(serde_json::json!({
            "userId": 42,
            "userName": "Asha",
            "mobile": "9876543210",
            "planName": "Smart 299",
            "validityDays": 28,
            "amount": 299.0,
            "paymentMethod": "card"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1001,
            "userId": 42,
            "userName": "Asha",
            "mobile": "9876543210",
            "planName": "Smart 299",
            "amount": 299.0,
            "date": "2025-06-05T01:02:00",
            "status": "Successful"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = RechargeRequest {
        user_id: 42,
        user_name: "Asha".to_string(),
        mobile: "9876543210".to_string(),
        plan_name: "Smart 299".to_string(),
        validity_days: 28,
        amount: 299.0,
        payment_method: "card".to_string(),
    };

    let record = test_client(&mock_server)
        .create_recharge(&request)
        .await
        .unwrap();

    assert_eq!(record.id, Some(1001));
    assert_eq!(record.amount, 299.0);
    assert_eq!(record.status.as_deref(), Some("Successful"));
}

#[tokio::test]
async fn create_recharge_maps_server_errors_to_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recharge"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let request = RechargeRequest {
        user_id: 42,
        user_name: "Asha".to_string(),
        mobile: "9876543210".to_string(),
        plan_name: "Smart 299".to_string(),
        validity_days: 28,
        amount: 299.0,
        payment_method: "upi".to_string(),
    };

    let err = test_client(&mock_server)
        .create_recharge(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upstream(_)));
}
