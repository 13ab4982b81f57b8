use actix_web::web::{self, Json};
use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::GameError;
use crate::game;
use crate::model::{BetId, GameSnapshot, Player, WolfChoice};

#[derive(Deserialize, Serialize, Debug)]
pub struct PressRequest {
    pub snapshot: GameSnapshot,
    pub parent_bet_id: BetId,
    pub press_id: BetId,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct WolfChoiceRequest {
    pub snapshot: GameSnapshot,
    pub choice: WolfChoice,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LateJoinRequest {
    pub snapshot: GameSnapshot,
    pub player: Player,
}

fn respond<T: Serialize>(result: Result<T, GameError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            log::info!("request rejected ({}): {e}", e.kind());
            HttpResponse::BadRequest().json(json!({"error": e.to_string(), "kind": e.kind()}))
        }
    }
}

pub async fn status(snapshot: Json<GameSnapshot>) -> impl Responder {
    respond(game::compute_status(&snapshot))
}

pub async fn settlements(snapshot: Json<GameSnapshot>) -> impl Responder {
    respond(game::compute_settlements(&snapshot))
}

pub async fn bets(snapshot: Json<GameSnapshot>) -> impl Responder {
    respond(game::initial_bets(&snapshot))
}

pub async fn press(request: Json<PressRequest>) -> impl Responder {
    let request = request.into_inner();
    respond(game::create_press(
        &request.snapshot,
        &request.parent_bet_id,
        request.press_id,
    ))
}

pub async fn wolf_choice(request: Json<WolfChoiceRequest>) -> impl Responder {
    let request = request.into_inner();
    respond(game::record_wolf_choice(&request.snapshot, request.choice))
}

pub async fn late_join(request: Json<LateJoinRequest>) -> impl Responder {
    let request = request.into_inner();
    respond(game::late_join(&request.snapshot, request.player))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// All game routes, for `App::configure`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::post().to(status))
        .route("/settlements", web::post().to(settlements))
        .route("/bets", web::post().to(bets))
        .route("/press", web::post().to(press))
        .route("/wolf-choice", web::post().to(wolf_choice))
        .route("/late-join", web::post().to(late_join))
        .route("/health", web::get().to(health));
}
