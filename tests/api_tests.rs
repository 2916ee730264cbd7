//! API integration tests
//!
//! These run against a live server with the seed data loaded (an admin
//! employee with id 1). Login is OTP-verified, so authenticated tests
//! mint a token directly with the configured JWT secret instead of
//! completing the email round trip.

use reqwest::Client;
use serde_json::{json, Value};

use veranda_server::models::{employee::EmployeeClaims, enums::EmployeeRole};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-this-secret-in-production".to_string())
}

/// Mint a token for the seeded admin account
fn admin_token() -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = EmployeeClaims {
        sub: "admin@veranda.example".to_string(),
        employee_id: 1,
        role: EmployeeRole::Admin,
        exp: now + 3600,
        iat: now,
    };
    claims.create_token(&jwt_secret()).expect("Failed to mint token")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_sends_otp() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@veranda.example",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body["employee_id"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@veranda.example",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_otp_attempts_exhaust_after_three_failures() {
    let client = Client::new();

    // Issue a fresh code; this supersedes any unverified one
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@veranda.example",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    let employee_id = body["employee_id"].as_i64().expect("No employee id");

    // "000000" lies outside the generated range so it can never match
    for remaining in ["2", "1", "0"] {
        let response = client
            .post(format!("{}/auth/verify-otp", BASE_URL))
            .json(&json!({ "employee_id": employee_id, "code": "000000" }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 401);

        let body: Value = response.json().await.expect("Failed to parse response");
        let error = body["error"].as_str().expect("error should be a string");
        assert!(error.contains(&format!("{} attempts remaining", remaining)));
    }

    // Budget spent: even the right code would now be refused
    let response = client
        .post(format!("{}/auth/verify-otp", BASE_URL))
        .json(&json!({ "employee_id": employee_id, "code": "000000" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .expect("error should be a string")
        .contains("Maximum verification attempts exceeded"));
}

#[tokio::test]
#[ignore]
async fn test_booking_rolls_back_on_unknown_service() {
    let client = Client::new();
    let token = admin_token();
    let email = "rollback-check@example.com";

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_name": "Rollback Check",
            "customer_email": email,
            "room_type_id": 1,
            "checkin_date": "2027-03-01",
            "checkout_date": "2027-03-02",
            "guest_count": 1,
            "total_amount": "500",
            "service_ids": [999999]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .expect("error should be a string")
        .contains("Unknown service id"));

    // The whole transaction rolled back: no reservation for this customer
    let response = client
        .get(format!("{}/reservations?per_page=100", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let leaked = body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .any(|r| r["customer_email"] == email);
    assert!(!leaked);
}

#[tokio::test]
#[ignore]
async fn test_verify_otp_with_bad_code() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/verify-otp", BASE_URL))
        .json(&json!({
            "employee_id": 1,
            "code": "000000"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_employee() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_list_rooms() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .get(format!("{}/rooms", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_availability_rejects_inverted_interval() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .get(format!(
            "{}/reservations/availability?room_type_id=1&checkin_datetime=2026-09-10T15:00:00&checkout_datetime=2026-09-08T12:00:00&guest_count=2",
            BASE_URL
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_booking_missing_fields() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_email": "guest@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .expect("error should be a string")
        .contains("Missing required field"));
}

#[tokio::test]
#[ignore]
async fn test_booking_applies_time_adjustments() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_name": "Integration Guest",
            "customer_email": "integration-guest@example.com",
            "room_type_id": 1,
            "checkin_date": "2026-12-01",
            "checkout_date": "2026-12-03",
            "checkin_time": "10:00:00",
            "guest_count": 2,
            "total_amount": "1000"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["room_assignment_pending"], true);
    assert_eq!(body["customer"]["email"], "integration-guest@example.com");
    // Early check-in adds the 500 fee to the base total
    assert_eq!(body["final_total"], "1500");
}

#[tokio::test]
#[ignore]
async fn test_booking_with_advance_payment_lists_it() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_name": "Deposit Guest",
            "customer_email": "deposit-guest@example.com",
            "room_type_id": 1,
            "checkin_date": "2027-05-10",
            "checkout_date": "2027-05-12",
            "guest_count": 2,
            "total_amount": "900",
            "advance_payment": "300",
            "payment_method": "card"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let reservation_id = body["reservation_id"].as_i64().expect("No reservation id");
    assert!(body["advance_payment_id"].is_number());

    let response = client
        .get(format!(
            "{}/reservations/{}/payments",
            BASE_URL, reservation_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let payments = body.as_array().expect("payments should be an array");
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["amount"], "300");
    assert_eq!(payments[0]["payment_method"], "card");
    // Recorded as pending until verified
    assert_eq!(payments[0]["status"], 1);
}

#[tokio::test]
#[ignore]
async fn test_list_reservations_pagination_meta() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .get(format!("{}/reservations?page=1&per_page=5", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"].is_array());
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["per_page"], 5);
    assert!(body["pagination"]["total_items"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_maintenance_statuses() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .get(format!("{}/maintenance/statuses", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let statuses = body.as_array().expect("statuses should be an array");
    assert_eq!(statuses.len(), 3);
}

#[tokio::test]
#[ignore]
async fn test_admin_dashboard() {
    let client = Client::new();
    let token = admin_token();

    let response = client
        .get(format!("{}/dashboard/admin", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_rooms"].is_number());
    assert!(body["rooms_by_status"].is_array());
    assert!(body["monthly_revenue"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reservations", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
