//! Single entry point for every caller: validates the snapshot once and
//! dispatches on the game format.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::games::{GameContext, match_play, nassau, skins, wolf};
use crate::model::{
    Bet, BetId, GameFormat, GameSnapshot, LiveStatus, MatchType, Player, PlayerId, Press,
    Settlement, WolfChoice,
};

/// Recompute the live standings from scratch.
///
/// # Errors
/// Returns the validation error when the snapshot is malformed.
pub fn compute_status(snapshot: &GameSnapshot) -> Result<LiveStatus, GameError> {
    let ctx = GameContext::new(snapshot)?;
    log::debug!(
        "computing {} status for {} players, {} scores",
        snapshot.settings.format,
        ctx.seating.len(),
        snapshot.scores.len()
    );
    Ok(match &snapshot.settings.format {
        GameFormat::Nassau(settings) => LiveStatus::Nassau(nassau::status(&ctx, settings)?),
        GameFormat::Skins(settings) => LiveStatus::Skins(skins::status(&ctx, settings)?),
        GameFormat::MatchPlay(settings) => {
            LiveStatus::MatchPlay(match_play::status(&ctx, settings)?)
        }
        GameFormat::Wolf(settings) => LiveStatus::Wolf(wolf::status(&ctx, settings)?),
    })
}

/// Final transfers for whatever holes were played.
///
/// # Errors
/// Returns the validation error when the snapshot is malformed.
pub fn compute_settlements(snapshot: &GameSnapshot) -> Result<Vec<Settlement>, GameError> {
    let ctx = GameContext::new(snapshot)?;
    let settlements = match &snapshot.settings.format {
        GameFormat::Nassau(settings) => nassau::settle(&ctx, settings)?,
        GameFormat::Skins(settings) => skins::settle(&ctx, settings)?,
        GameFormat::MatchPlay(settings) => match_play::settle(&ctx, settings)?,
        GameFormat::Wolf(settings) => wolf::settle(&ctx, settings)?,
    };
    log::debug!(
        "{} settlement produced {} transfers",
        snapshot.settings.format,
        settlements.len()
    );
    Ok(settlements)
}

/// Parent bets to persist when the game starts. Skins and wolf have none.
///
/// # Errors
/// Returns the validation error when the snapshot is malformed.
pub fn initial_bets(snapshot: &GameSnapshot) -> Result<Vec<Bet>, GameError> {
    let ctx = GameContext::new(snapshot)?;
    Ok(match &snapshot.settings.format {
        GameFormat::Nassau(settings) => nassau::initial_bets(&ctx.seating, settings),
        GameFormat::MatchPlay(settings) => match_play::initial_bets(&ctx.seating, settings),
        GameFormat::Skins(_) | GameFormat::Wolf(_) => Vec::new(),
    })
}

/// Build a press on `parent_bet_id`. The caller persists it.
///
/// # Errors
/// `InvalidPress` outside nassau or when the bet cannot be pressed,
/// `DuplicatePress` when it already has been.
pub fn create_press(
    snapshot: &GameSnapshot,
    parent_bet_id: &BetId,
    press_id: BetId,
) -> Result<Press, GameError> {
    let ctx = GameContext::new(snapshot)?;
    let GameFormat::Nassau(settings) = &snapshot.settings.format else {
        return Err(GameError::InvalidPress(format!(
            "presses are not played in {}",
            snapshot.settings.format
        )));
    };
    nassau::create_press(&ctx, settings, parent_bet_id, press_id).inspect_err(|e| {
        log::warn!("press on {parent_bet_id} rejected: {e}");
    })
}

/// Validate the wolf's call for a hole. The caller persists it.
///
/// # Errors
/// `InvalidWolfChoice` outside wolf or for a bad call, `DuplicateWolfChoice`
/// when the hole already has one.
pub fn record_wolf_choice(
    snapshot: &GameSnapshot,
    choice: WolfChoice,
) -> Result<WolfChoice, GameError> {
    let ctx = GameContext::new(snapshot)?;
    let GameFormat::Wolf(settings) = &snapshot.settings.format else {
        return Err(GameError::InvalidWolfChoice(format!(
            "wolf calls are not played in {}",
            snapshot.settings.format
        )));
    };
    wolf::record_choice(&ctx, settings, choice).inspect_err(|e| {
        log::warn!("wolf call rejected: {e}");
    })
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LateJoin {
    pub player: Player,
    /// Bet records to store. When the snapshot had none, this is the whole
    /// parent set for the new seating, not just the newcomer's bets.
    pub bets: Vec<Bet>,
}

/// Seat a player after the game started, with their parent bets against
/// everyone already seated. The newcomer's bets start on hole 2 when hole 1
/// has already been scored.
///
/// # Errors
/// `LateJoinRejected` outside nassau and singles match play, once hole 2 has
/// a score, or when the id is taken.
pub fn late_join(snapshot: &GameSnapshot, player: Player) -> Result<LateJoin, GameError> {
    let ctx = GameContext::new(snapshot)?;
    let allowed = match &snapshot.settings.format {
        GameFormat::Nassau(_) => true,
        GameFormat::MatchPlay(settings) => settings.match_type == MatchType::Singles,
        GameFormat::Skins(_) | GameFormat::Wolf(_) => false,
    };
    if !allowed {
        return Err(GameError::LateJoinRejected(format!(
            "players cannot join a {} game once it starts",
            snapshot.settings.format
        )));
    }
    if ctx.ledger.any_score_from(2) {
        return Err(GameError::LateJoinRejected(
            "hole 2 has already been scored".to_string(),
        ));
    }
    if ctx.is_seated(&player.id) {
        return Err(GameError::LateJoinRejected(format!(
            "player id {} is already seated",
            player.id
        )));
    }
    if !player.handicap.is_finite() {
        return Err(GameError::LateJoinRejected(format!(
            "{} has a handicap that is not a number",
            player.id
        )));
    }

    let position = ctx.players.iter().map(|p| p.position).max().map_or(0, |p| p + 1);
    let start_hole = if ctx.ledger.any_score_on(1) { 2 } else { 1 };
    let player = Player {
        position,
        start_hole,
        ..player
    };

    let mut seating: Vec<PlayerId> = ctx.seating.clone();
    seating.push(player.id.clone());
    let all_bets = match &snapshot.settings.format {
        GameFormat::Nassau(settings) => nassau::initial_bets(&seating, settings),
        GameFormat::MatchPlay(settings) => match_play::initial_bets(&seating, settings),
        GameFormat::Skins(_) | GameFormat::Wolf(_) => Vec::new(),
    };
    // implicit bets stop applying once anything is stored, so store them all
    let bets = if snapshot.bets.is_empty() {
        all_bets
    } else {
        all_bets
            .into_iter()
            .filter(|bet| {
                let (a, b) = bet.players();
                a == &player.id || b == &player.id
            })
            .collect()
    };

    log::debug!(
        "{} joins late at position {position}, from hole {start_hole}",
        player.id
    );
    Ok(LateJoin { player, bets })
}
