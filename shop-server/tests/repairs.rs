//! Workshop appointments: booking, assignment, progress

mod common;

use chrono::{Duration, Utc};
use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::{Value, json};
use shared::models::Role;

fn booking(days_from_today: i64) -> Value {
    let date = Utc::now().date_naive() + Duration::days(days_from_today);
    json!({
        "kind": "repair",
        "customer_name": "Luis",
        "customer_email": "luis@example.com",
        "bike_description": "2019 steel tourer",
        "issue": "Rear derailleur skipping",
        "preferred_date": date.to_string(),
    })
}

#[tokio::test]
async fn test_booking_rejects_past_dates() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/shop/appointments", None, booking(-1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 7003);
}

#[tokio::test]
async fn test_assignment_and_progress() {
    let app = TestApp::new();
    let (status, appointment) = app.post("/api/shop/appointments", None, booking(2)).await;
    assert_eq!(status, StatusCode::OK, "{appointment}");
    assert_eq!(appointment["status"], "booked");
    let id = appointment["id"].as_i64().unwrap();

    let manager = app.token_for(Role::Manager);
    let technician = app.staff(Role::Technician);
    let technician_token = app.token(&technician);
    let sales = app.staff(Role::Sales);

    // Cannot start without a technician
    let (status, body) = app
        .put(
            &format!("/api/repairs/{id}"),
            Some(&technician_token),
            json!({ "status": "in-progress" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), 7006);

    // Sales staff do not hold manage-repairs
    let (status, body) = app
        .put(
            &format!("/api/repairs/{id}/assign"),
            Some(&manager),
            json!({ "technician_id": sales.id }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), 7005);

    // Technicians cannot assign work
    let (status, _) = app
        .put(
            &format!("/api/repairs/{id}/assign"),
            Some(&technician_token),
            json!({ "technician_id": technician.id }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, assigned) = app
        .put(
            &format!("/api/repairs/{id}/assign"),
            Some(&manager),
            json!({ "technician_id": technician.id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{assigned}");
    assert_eq!(assigned["technician_id"], technician.id);

    let (status, started) = app
        .put(
            &format!("/api/repairs/{id}"),
            Some(&technician_token),
            json!({ "status": "in-progress", "estimated_cost": "45.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{started}");
    assert_eq!(started["status"], "in-progress");

    // Receptionists can look but not touch
    let receptionist = app.token_for(Role::Receptionist);
    let (status, _) = app.get(&format!("/api/repairs/{id}"), Some(&receptionist)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .put(
            &format!("/api/repairs/{id}"),
            Some(&receptionist),
            json!({ "status": "completed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, done) = app
        .put(
            &format!("/api/repairs/{id}"),
            Some(&technician_token),
            json!({ "status": "completed", "final_cost": "52.50" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");

    // The invoice is settled; later edits are refused
    let (status, body) = app
        .put(
            &format!("/api/repairs/{id}"),
            Some(&technician_token),
            json!({ "final_cost": "10.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 7002);

    // Filter by technician
    let (status, list) = app
        .get(
            &format!("/api/repairs?technician_id={}", technician.id),
            Some(&manager),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}
