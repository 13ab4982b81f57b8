mod common;

use actix_web::{App, test};
use serde_json::{Value, json};

use common::{NASSAU, SKINS, card, load};
use rusty_golf_games::controller::game::routes;

#[actix_web::test]
async fn status_endpoint_returns_tagged_json() -> Result<(), Box<dyn std::error::Error>> {
    let app = test::init_service(App::new().configure(routes)).await;
    let mut snapshot = load(NASSAU)?;
    snapshot.scores = card("p1", &[3]);
    snapshot.scores.extend(card("p2", &[4]));

    let req = test::TestRequest::post()
        .uri("/status")
        .set_json(&snapshot)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "status was {}", resp.status());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "nassau");
    assert_eq!(body["pairs"][0]["bets"][0]["margin"], 1);
    Ok(())
}

#[actix_web::test]
async fn settlements_endpoint_lists_transfers() -> Result<(), Box<dyn std::error::Error>> {
    let app = test::init_service(App::new().configure(routes)).await;
    let mut snapshot = load(NASSAU)?;
    snapshot.scores = card("p1", &[3]);
    snapshot.scores.extend(card("p2", &[4]));
    snapshot.round = rusty_golf_games::model::RoundState::Completed;

    let req = test::TestRequest::post()
        .uri("/settlements")
        .set_json(&snapshot)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["from_player"], "p2");
    assert_eq!(body[0]["to_player"], "p1");
    assert_eq!(body[0]["amount"], 1000);
    Ok(())
}

#[actix_web::test]
async fn rejected_operations_are_bad_requests() -> Result<(), Box<dyn std::error::Error>> {
    let app = test::init_service(App::new().configure(routes)).await;
    let snapshot = load(SKINS)?;
    let req = test::TestRequest::post()
        .uri("/press")
        .set_json(json!({
            "snapshot": snapshot,
            "parent_bet_id": "p1-p2-front",
            "press_id": "press-1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "invalid_press");
    assert!(body["error"].is_string());
    Ok(())
}

#[actix_web::test]
async fn bets_and_health() -> Result<(), Box<dyn std::error::Error>> {
    let app = test::init_service(App::new().configure(routes)).await;
    let req = test::TestRequest::post()
        .uri("/bets")
        .set_json(load(NASSAU)?)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(body[0]["kind"], "parent");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    Ok(())
}
