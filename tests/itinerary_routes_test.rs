mod common;

use actix_web::test;
use chrono::{Duration, NaiveDate};
use serde_json::json;

use itinerary_ai_api::models::generation::GenerationOutcome;

use common::TestApp;

#[actix_rt::test]
async fn test_generate_itinerary_wire_format() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({
            "days": 7,
            "cities": ["Istanbul", "Cappadocia"],
            "tour_type": "SIC",
            "pax": 2,
            "interests": ["history", "culture", "photography"],
            "start_date": "2025-05-01"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["tour_type"], "SIC");
    assert_eq!(body["duration"], 7);
    assert_eq!(body["cities"], json!(["Istanbul", "Cappadocia"]));
    assert_eq!(body["pax"], 2);
    assert_eq!(body["learned_from"], 0);
    assert!(body["generated_at"].is_string());

    let days = body["itinerary"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], 1);
    assert_eq!(days[0]["date"], "2025-05-01");
    assert_eq!(days[0]["city"], "Istanbul");
    assert_eq!(days[0]["meals"], json!([]));
    assert_eq!(days[0]["activities"], json!(["Hagia Sophia", "Blue Mosque"]));
    assert_eq!(days[3]["city"], "Istanbul");
    assert_eq!(days[4]["city"], "Cappadocia");
    assert_eq!(days[6]["date"], "2025-05-07");
    assert_eq!(days[6]["accommodation"], serde_json::Value::Null);
    assert_eq!(days[5]["accommodation"], "Hotel in Cappadocia");

    // One title call plus one call per day.
    assert_eq!(test_app.generator.call_count(), 8);
}

#[actix_rt::test]
async fn test_generate_itinerary_defaults() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["duration"], 7);
    assert_eq!(body["tour_type"], "Private");
    assert_eq!(body["pax"], 2);
    assert_eq!(body["cities"], json!(["Istanbul", "Cappadocia"]));

    let days = body["itinerary"].as_array().unwrap();
    let first = NaiveDate::parse_from_str(days[0]["date"].as_str().unwrap(), "%Y-%m-%d").unwrap();
    let last = NaiveDate::parse_from_str(days[6]["date"].as_str().unwrap(), "%Y-%m-%d").unwrap();
    assert_eq!(last - first, Duration::days(6));
}

#[actix_rt::test]
async fn test_generate_itinerary_uses_training_examples() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let content = "Day 1 - Ephesus: Arrival\n\
        Upon arrival at Izmir Airport, meet our driver and transfer to your hotel in Kusadasi.\n\
        Day 2 - Ephesus\n\
        After breakfast, visit the ancient city of Ephesus including the Library of Celsus.";

    let req = test::TestRequest::post()
        .uri("/api/training-itineraries")
        .set_json(&json!({
            "title": "Ancient Wonders of Turkey",
            "tour_type": "Private",
            "days": 3,
            "cities": "Ephesus",
            "content": content
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({
            "days": 3,
            "cities": ["Ephesus"],
            "tour_type": "Private",
            "start_date": "2025-05-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(body["learned_from"], 1);
    let calls = test_app.generator.calls.lock().unwrap().clone();
    assert!(calls[0].contains("- \"Ancient Wonders of Turkey\""));
    assert!(calls[1].contains("Example 1: Upon arrival at Izmir Airport"));
    assert!(calls[1].contains("Example 2: After breakfast, visit the ancient city"));
}

#[actix_rt::test]
async fn test_degraded_generation_is_rendered_as_text() {
    let test_app = TestApp::with_reply(GenerationOutcome::Degraded(
        "Error calling AI API: 503".to_string(),
    ));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({ "days": 2, "cities": ["Antalya"] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Error calling AI API: 503");
    assert_eq!(body["itinerary"][1]["description"], "Error calling AI API: 503");
}

#[actix_rt::test]
async fn test_generate_rejects_unknown_tour_type() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({ "tour_type": "Luxury" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(test_app.generator.call_count(), 0);
}

#[actix_rt::test]
async fn test_generate_rejects_overlong_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({ "days": 4294967295u32, "cities": ["Istanbul"] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Trip length cannot exceed 60 days");
    assert_eq!(test_app.generator.call_count(), 0);
}

#[actix_rt::test]
async fn test_generate_accepts_longest_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries/generate")
        .set_json(&json!({ "days": 60, "cities": ["Istanbul", "Antalya"] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["duration"], 60);
    assert_eq!(body["itinerary"].as_array().unwrap().len(), 60);
}
