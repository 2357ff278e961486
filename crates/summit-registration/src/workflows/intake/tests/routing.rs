use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::hubspot::FormKind;

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, "theme=dark; hubspotutk=visitor-77")
        .header(header::REFERER, "https://summit.example.com/register?summit=18233")
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn summit_route_forwards_payload_with_visitor_context() {
    let (router, forms) = router_with(RecordingForms::default(), MemoryDirectory::with_schedule());

    let response = router
        .oneshot(post_json("/api/register", &summit_body()))
        .await
        .expect("route responds");
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Registration submitted successfully", "total": 1850 })
    );

    let recorded = forms.recorded();
    assert_eq!(recorded.len(), 1);
    let (form, payload) = &recorded[0];
    assert_eq!(*form, FormKind::Summit);
    assert_eq!(payload.context.hutk.as_deref(), Some("visitor-77"));
    assert_eq!(
        payload.context.page_uri,
        "https://summit.example.com/register?summit=18233"
    );
    assert_eq!(
        payload.field("summit_registration_summit_name"),
        Some("Summit - Des Moines - March 15-16, 2026")
    );
    assert_eq!(payload.field("summit_registration_total_amount"), Some("1850"));
}

#[tokio::test]
async fn summit_route_rejects_invalid_answers_with_details() {
    let (router, forms) = router_with(RecordingForms::default(), MemoryDirectory::with_schedule());
    let mut body = summit_body();
    body["isAlumni"] = Value::Null;
    body["primaryAttendee"]["email"] = json!("not-an-email");

    let response = router
        .oneshot(post_json("/api/register", &body))
        .await
        .expect("route responds");
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["details"]["primaryAttendee.email"],
        json!(["Please enter a valid email address"])
    );
    assert!(body["details"]["isAlumni"].is_array());
    assert!(forms.recorded().is_empty());
}

#[tokio::test]
async fn mistyped_summit_fields_use_the_validation_shape() {
    let (router, forms) = router_with(RecordingForms::default(), MemoryDirectory::with_schedule());

    for (field, value) in [("isAlumni", json!("yes")), ("totalAttendees", json!(300))] {
        let mut body = summit_body();
        body[field] = value;

        let response = router
            .clone()
            .oneshot(post_json("/api/register", &body))
            .await
            .expect("route responds");
        let (status, body) = read_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body["error"], "Validation failed");
        let message = body["details"]["body"][0].as_str().expect("body message");
        assert!(message.starts_with("Failed to deserialize"), "{message}");
    }
    assert!(forms.recorded().is_empty());
}

#[tokio::test]
async fn camp_route_rejects_malformed_json_with_details() {
    let (router, _) = router_with(RecordingForms::default(), MemoryDirectory::with_schedule());
    let request = Request::post("/api/register/camp-essence")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"salonName\": "))
        .expect("request builds");

    let (status, body) = read_json(router.oneshot(request).await.expect("route responds")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]["body"].is_array());
}

#[tokio::test]
async fn camp_route_reports_missing_form_to_operators() {
    let (router, _) = router_with(
        RecordingForms::failing(FormsFailure::FormNotFound),
        MemoryDirectory::with_schedule(),
    );

    let response = router
        .oneshot(post_json("/api/register/camp-essence", &camp_body()))
        .await
        .expect("route responds");
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Camp Essence form configuration error: HubSpot form was not found. Please verify HUBSPOT_CAMP_ESSENCE_FORM_GUID."
    );
}

#[tokio::test]
async fn unconfigured_gateway_yields_generic_configuration_error() {
    let (router, _) = router_with(
        RecordingForms::failing(FormsFailure::Unconfigured),
        MemoryDirectory::with_schedule(),
    );

    let response = router
        .oneshot(post_json("/api/register/camp-essence", &camp_body()))
        .await
        .expect("route responds");
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server configuration error" }));
}

#[tokio::test]
async fn upstream_rejection_yields_generic_failure() {
    let (router, _) = router_with(
        RecordingForms::failing(FormsFailure::Rejected),
        MemoryDirectory::with_schedule(),
    );

    let response = router
        .oneshot(post_json("/api/register", &summit_body()))
        .await
        .expect("route responds");
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to submit registration" }));
}

#[tokio::test]
async fn summit_listing_and_lookup() {
    let (router, _) = router_with(RecordingForms::default(), MemoryDirectory::with_schedule());

    let (status, body) = read_json(
        router
            .clone()
            .oneshot(get("/api/summits"))
            .await
            .expect("route responds"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summits"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["summits"][0]["startDate"], "2026-03-15");

    let (status, body) = read_json(
        router
            .clone()
            .oneshot(get("/api/summits/900"))
            .await
            .expect("route responds"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "expired");
    assert_eq!(body["summit"]["location"], "Omaha");

    let (status, body) = read_json(
        router
            .oneshot(get("/api/summits/404404"))
            .await
            .expect("route responds"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "missing");
    assert_eq!(
        body["notice"],
        "This summit is no longer available. Please select from an upcoming summit below."
    );
}

#[tokio::test]
async fn unconfigured_directory_yields_configuration_error() {
    let directory = MemoryDirectory {
        unconfigured: true,
        ..MemoryDirectory::default()
    };
    let (router, _) = router_with(RecordingForms::default(), directory);

    let (status, body) = read_json(
        router
            .oneshot(get("/api/summits"))
            .await
            .expect("route responds"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server configuration error");
}

#[tokio::test]
async fn quote_route_replays_edits() {
    let (router, _) = router_with(RecordingForms::default(), MemoryDirectory::with_schedule());
    let request = json!({
        "edits": [
            { "op": "alumni", "value": false },
            { "op": "level_member", "value": true },
            { "op": "total_attendees", "value": 3 },
            { "op": "toggle_payment", "value": "loyalty" }
        ],
        "validate": true
    });

    let (status, body) = read_json(
        router
            .oneshot(post_json("/api/v1/summit/quote", &request))
            .await
            .expect("route responds"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registrationType"], "level-member");
    assert_eq!(body["quote"]["total"], 2550);
    assert_eq!(body["requirements"]["additionalAttendeeSlots"], 2);
    assert_eq!(body["focus"], "summitId");
    assert!(body["errors"]["additionalAttendees.0.fullName"].is_array());
}
