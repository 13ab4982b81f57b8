//! Wolf: a rotating captain picks a partner, goes alone, or calls blind.
//!
//! Points are kept in thirds internally so a lone wolf's swing splits evenly
//! across the three field players.

use ahash::RandomState;
use std::collections::{HashMap, HashSet};

use super::GameContext;
use crate::error::GameError;
use crate::model::{
    PlayerId, PointDelta, Settlement, WolfCall, WolfChoice, WolfHole, WolfHoleWinner,
    WolfSettings, WolfStatus, WolfTally, dollars_to_cents,
};
use crate::score::{HoleWinner, compare_nets};
use crate::settlement::{PoolBalance, PoolSource, resolve_pool};

const THIRDS: i64 = 3;

/// Wolf rotation: the captured order, or seat order.
#[must_use]
pub fn rotation(ctx: &GameContext<'_>, settings: &WolfSettings) -> Vec<PlayerId> {
    settings
        .wolf_order
        .clone()
        .unwrap_or_else(|| ctx.seating.clone())
}

#[must_use]
pub fn wolf_for_hole(rotation: &[PlayerId], hole: u8) -> Option<&PlayerId> {
    if rotation.is_empty() || hole == 0 {
        return None;
    }
    rotation.get(usize::from(hole - 1) % rotation.len())
}

fn check_choice(
    ctx: &GameContext<'_>,
    settings: &WolfSettings,
    rotation: &[PlayerId],
    choice: &WolfChoice,
) -> Result<(), GameError> {
    if choice.hole == 0 || choice.hole > ctx.hole_count() {
        return Err(GameError::InvalidWolfChoice(format!(
            "hole {} is outside a {} hole round",
            choice.hole,
            ctx.hole_count()
        )));
    }
    if !ctx.is_seated(&choice.wolf_player) {
        return Err(GameError::UnknownPlayer(choice.wolf_player.to_string()));
    }
    if let Some(expected) = wolf_for_hole(rotation, choice.hole) {
        if expected != &choice.wolf_player {
            return Err(GameError::InvalidWolfChoice(format!(
                "hole {} belongs to {expected}, not {}",
                choice.hole, choice.wolf_player
            )));
        }
    }
    match (choice.choice, &choice.partner) {
        (WolfCall::Partner, None) => Err(GameError::InvalidWolfChoice(format!(
            "hole {}: a partner call needs a partner",
            choice.hole
        ))),
        (WolfCall::Partner, Some(partner)) if !ctx.is_seated(partner) => {
            Err(GameError::UnknownPlayer(partner.to_string()))
        }
        (WolfCall::Partner, Some(partner)) if partner == &choice.wolf_player => {
            Err(GameError::InvalidWolfChoice(format!(
                "hole {}: the wolf cannot partner themselves",
                choice.hole
            )))
        }
        (WolfCall::Solo | WolfCall::Blind, Some(_)) => Err(GameError::InvalidWolfChoice(format!(
            "hole {}: {} cannot take a partner",
            choice.hole, choice.choice
        ))),
        (WolfCall::Blind, None) if !settings.blind_wolf => Err(GameError::InvalidWolfChoice(
            "blind wolf is not enabled for this game".to_string(),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn validate_choices(
    ctx: &GameContext<'_>,
    settings: &WolfSettings,
) -> Result<(), GameError> {
    let rotation = rotation(ctx, settings);
    let mut holes: HashSet<u8, RandomState> = HashSet::default();
    for choice in &ctx.snapshot.wolf_choices {
        check_choice(ctx, settings, &rotation, choice)?;
        if !holes.insert(choice.hole) {
            return Err(GameError::DuplicateWolfChoice(choice.hole));
        }
    }
    Ok(())
}

/// Validate a new call against the snapshot it would join.
///
/// # Errors
/// `DuplicateWolfChoice` when the hole already has a call, `InvalidWolfChoice`
/// for the wrong wolf, a bad partner, or a blind call after scores are in.
pub fn record_choice(
    ctx: &GameContext<'_>,
    settings: &WolfSettings,
    choice: WolfChoice,
) -> Result<WolfChoice, GameError> {
    let rotation = rotation(ctx, settings);
    check_choice(ctx, settings, &rotation, &choice)?;
    if ctx
        .snapshot
        .wolf_choices
        .iter()
        .any(|existing| existing.hole == choice.hole)
    {
        return Err(GameError::DuplicateWolfChoice(choice.hole));
    }
    if choice.choice == WolfCall::Blind && ctx.ledger.any_score_on(choice.hole) {
        return Err(GameError::InvalidWolfChoice(format!(
            "blind wolf must be called before any score on hole {}",
            choice.hole
        )));
    }
    log::debug!(
        "hole {}: {} calls {}",
        choice.hole,
        choice.wolf_player,
        choice.choice
    );
    Ok(choice)
}

struct WolfRun {
    holes: Vec<WolfHole>,
    /// Per seat, in thirds of a point.
    thirds: Vec<i64>,
    /// Per seat: (label, thirds gained) for every hole a player came out ahead.
    gains: Vec<Vec<(String, i64)>>,
}

fn play(ctx: &GameContext<'_>) -> WolfRun {
    let seats = ctx.seating.len();
    let seat_of: HashMap<&PlayerId, usize, RandomState> = ctx
        .seating
        .iter()
        .enumerate()
        .map(|(seat, id)| (id, seat))
        .collect();
    let choices: HashMap<u8, &WolfChoice, RandomState> = ctx
        .snapshot
        .wolf_choices
        .iter()
        .map(|choice| (choice.hole, choice))
        .collect();
    let mut run = WolfRun {
        holes: Vec::new(),
        thirds: vec![0; seats],
        gains: vec![Vec::new(); seats],
    };

    for hole in ctx.settings().holes() {
        let Some(choice) = choices.get(&hole) else {
            continue;
        };
        let mut wolf_side = vec![choice.wolf_player.clone()];
        if let Some(partner) = &choice.partner {
            wolf_side.push(partner.clone());
        }
        let field_side: Vec<PlayerId> = ctx
            .seating
            .iter()
            .filter(|id| !wolf_side.contains(id))
            .cloned()
            .collect();
        let (Some(wolf_net), Some(field_net)) = (
            ctx.best_ball(&wolf_side, hole),
            ctx.best_ball(&field_side, hole),
        ) else {
            continue;
        };

        let multiplier = choice.choice.multiplier();
        let (winner, sign) = match compare_nets(wolf_net, field_net) {
            HoleWinner::SideA => (WolfHoleWinner::Wolf, 1),
            HoleWinner::SideB => (WolfHoleWinner::Field, -1),
            HoleWinner::Halved => (WolfHoleWinner::Push, 0),
        };
        let wolf_each = sign * THIRDS * multiplier;
        let field_each = if wolf_side.len() == 2 {
            -wolf_each
        } else {
            -sign * multiplier
        };

        let mut points = Vec::with_capacity(seats);
        let sides = wolf_side
            .iter()
            .map(|id| (id, wolf_each))
            .chain(field_side.iter().map(|id| (id, field_each)));
        for (id, delta) in sides {
            if let Some(&seat) = seat_of.get(id) {
                run.thirds[seat] += delta;
                if delta > 0 {
                    let label = match winner {
                        WolfHoleWinner::Wolf => format!("Hole {hole}: {} win", choice.choice),
                        _ => format!("Hole {hole}: beat the wolf"),
                    };
                    run.gains[seat].push((label, delta));
                }
            }
            points.push(PointDelta {
                player_id: id.clone(),
                points: delta as f64 / THIRDS as f64,
            });
        }
        log::trace!("wolf hole {hole}: {wolf_net} vs {field_net} -> {winner:?} x{multiplier}");

        run.holes.push(WolfHole {
            hole,
            wolf_player: choice.wolf_player.clone(),
            choice: choice.choice,
            wolf_side,
            field_side,
            wolf_net,
            field_net,
            multiplier,
            winner,
            points,
        });
    }
    run
}

pub fn status(ctx: &GameContext<'_>, settings: &WolfSettings) -> Result<WolfStatus, GameError> {
    let run = play(ctx);
    let rotation = rotation(ctx, settings);
    let awaiting_choice = ctx
        .settings()
        .holes()
        .find(|hole| !ctx.snapshot.wolf_choices.iter().any(|c| c.hole == *hole))
        .and_then(|hole| wolf_for_hole(&rotation, hole).map(|wolf| (hole, wolf.clone())));
    let standings = ctx
        .seating
        .iter()
        .zip(&run.thirds)
        .map(|(player_id, thirds)| WolfTally {
            player_id: player_id.clone(),
            points: *thirds as f64 / THIRDS as f64,
        })
        .collect();
    Ok(WolfStatus {
        progress: ctx.progress(),
        holes: run.holes,
        standings,
        awaiting_choice,
    })
}

/// # Errors
/// Returns a config error if the point value cannot be converted to cents.
pub fn settle(ctx: &GameContext<'_>, settings: &WolfSettings) -> Result<Vec<Settlement>, GameError> {
    let point_value = dollars_to_cents(settings.point_value)?;
    let run = play(ctx);
    let balances: Vec<PoolBalance> = ctx
        .seating
        .iter()
        .zip(run.thirds)
        .zip(run.gains)
        .map(|((player_id, thirds), gains)| PoolBalance {
            player_id: player_id.clone(),
            amount: thirds * point_value,
            sources: gains
                .into_iter()
                .map(|(label, gained)| PoolSource {
                    label,
                    weight: gained * point_value,
                })
                .collect(),
        })
        .collect();
    Ok(resolve_pool(&balances, THIRDS, "Wolf points"))
}
