//! Singles (every pair plays its own match) and 2v2 best-ball match play,
//! with dormie and closeout tracking.

use std::borrow::Cow;

use super::GameContext;
use crate::error::GameError;
use crate::model::{
    Bet, BetId, BetRegion, MatchPlaySettings, MatchPlayStatus, MatchStanding, MatchState,
    MatchType, ParentBet, PlayerId, Settlement, dollars_to_cents,
};
use crate::score::{HoleWinner, MatchTally, compare_nets};
use crate::settlement::{BilateralOutcome, resolve_pairwise};

/// Team one is the first two seats, team two the last two.
fn teams(seating: &[PlayerId]) -> (Vec<PlayerId>, Vec<PlayerId>) {
    let split = seating.len().min(2);
    (seating[..split].to_vec(), seating[split..].to_vec())
}

/// One match per pair for singles; one match between the team anchors for teams.
#[must_use]
pub fn initial_bets(seating: &[PlayerId], settings: &MatchPlaySettings) -> Vec<Bet> {
    let pairs = match settings.match_type {
        MatchType::Singles => super::seat_pairs(seating),
        MatchType::Teams => {
            let (one, two) = teams(seating);
            match (one.first(), two.first()) {
                (Some(a), Some(b)) => vec![(a.clone(), b.clone())],
                _ => Vec::new(),
            }
        }
    };
    pairs
        .into_iter()
        .map(|(a, b)| {
            Bet::Parent(ParentBet {
                id: BetId(format!("{a}-{b}-match")),
                region: BetRegion::Match,
                player_a: a,
                player_b: b,
                amount: settings.total_bet,
            })
        })
        .collect()
}

fn effective_bets<'a>(ctx: &GameContext<'a>, settings: &MatchPlaySettings) -> Cow<'a, [Bet]> {
    if ctx.snapshot.bets.is_empty() {
        Cow::Owned(initial_bets(&ctx.seating, settings))
    } else {
        Cow::Borrowed(ctx.snapshot.bets.as_slice())
    }
}

fn sides(
    ctx: &GameContext<'_>,
    settings: &MatchPlaySettings,
    bet: &Bet,
) -> Result<(Vec<PlayerId>, Vec<PlayerId>), GameError> {
    let (a, b) = bet.players();
    match settings.match_type {
        MatchType::Singles => Ok((vec![a.clone()], vec![b.clone()])),
        MatchType::Teams => {
            let (one, two) = teams(&ctx.seating);
            if one.contains(a) && two.contains(b) {
                Ok((one, two))
            } else if two.contains(a) && one.contains(b) {
                Ok((two, one))
            } else {
                Err(GameError::Config(format!(
                    "match {} must pair players from opposite teams",
                    bet.id()
                )))
            }
        }
    }
}

fn side_nets(
    ctx: &GameContext<'_>,
    settings: &MatchPlaySettings,
    side_a: &[PlayerId],
    side_b: &[PlayerId],
    hole: u8,
) -> Option<(u8, u8)> {
    match settings.match_type {
        MatchType::Singles => ctx.pair_nets(&side_a[0], &side_b[0], hole),
        MatchType::Teams => Some((ctx.best_ball(side_a, hole)?, ctx.best_ball(side_b, hole)?)),
    }
}

fn standing(
    ctx: &GameContext<'_>,
    settings: &MatchPlaySettings,
    bet: &Bet,
) -> Result<MatchStanding, GameError> {
    let (side_a, side_b) = sides(ctx, settings, bet)?;
    let hole_count = ctx.hole_count();
    // a late joiner's match is played over the holes from their start
    let first_hole = ctx.joint_start(side_a.iter().chain(&side_b));
    let match_length = hole_count - (first_hole - 1);
    let mut tally = MatchTally::default();
    let mut closed_on_hole = None;

    for hole in first_hole..=hole_count {
        let Some((net_a, net_b)) = side_nets(ctx, settings, &side_a, &side_b, hole) else {
            break;
        };
        tally.record(hole, compare_nets(net_a, net_b));
        let remaining = match_length - tally.holes_played;
        if tally.margin().unsigned_abs() > u32::from(remaining) {
            // closed out; nothing after this hole can matter
            closed_on_hole = Some(hole);
            break;
        }
    }

    let holes_remaining = match_length - tally.holes_played;
    let lead = tally.margin().unsigned_abs();
    let state = if closed_on_hole.is_some() {
        MatchState::Decided
    } else if holes_remaining == 0 || ctx.round().is_over() {
        MatchState::Finished
    } else if lead == u32::from(holes_remaining) {
        MatchState::Dormie
    } else {
        MatchState::InProgress
    };
    let leader = match tally.leading_side() {
        Some(HoleWinner::SideA) => side_a.first().cloned(),
        Some(HoleWinner::SideB) => side_b.first().cloned(),
        _ => None,
    };
    let result = match state {
        MatchState::Decided => format!("{lead}&{holes_remaining}"),
        MatchState::Dormie => format!("{} (dormie)", tally.describe()),
        MatchState::InProgress if tally.holes_played > 0 => {
            format!("{} thru {}", tally.describe(), tally.holes_played)
        }
        _ => tally.describe(),
    };
    log::trace!("match {}: {result}", bet.id());

    Ok(MatchStanding {
        bet_id: bet.id().clone(),
        side_a,
        side_b,
        holes_played: tally.holes_played,
        holes_remaining,
        margin: tally.margin(),
        leader,
        is_dormie: state == MatchState::Dormie,
        state,
        closed_on_hole,
        result,
    })
}

/// # Errors
/// Returns a config error when a team match pairs players from the same team.
pub fn status(
    ctx: &GameContext<'_>,
    settings: &MatchPlaySettings,
) -> Result<MatchPlayStatus, GameError> {
    let bets = effective_bets(ctx, settings);
    let matches = bets
        .iter()
        .map(|bet| standing(ctx, settings, bet))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("match play status: {} matches", matches.len());
    Ok(MatchPlayStatus {
        progress: ctx.progress(),
        match_type: settings.match_type,
        matches,
    })
}

/// # Errors
/// Returns a config error for a bad team pairing or an unpriceable stake.
pub fn outcomes(
    ctx: &GameContext<'_>,
    settings: &MatchPlaySettings,
) -> Result<Vec<BilateralOutcome>, GameError> {
    let bets = effective_bets(ctx, settings);
    let mut outcomes = Vec::new();
    for bet in bets.iter() {
        let standing = standing(ctx, settings, bet)?;
        let amount = dollars_to_cents(bet.amount())?;
        let owed = match standing.margin.cmp(&0) {
            std::cmp::Ordering::Greater => -amount,
            std::cmp::Ordering::Less => amount,
            std::cmp::Ordering::Equal => 0,
        };
        let label = format!("Match {}", standing.result);
        // team matches settle seat for seat across the two sides
        for (a, b) in standing.side_a.iter().zip(&standing.side_b) {
            outcomes.push(BilateralOutcome {
                player_a: a.clone(),
                player_b: b.clone(),
                amount_a_owes_b: owed,
                label: label.clone(),
            });
        }
    }
    Ok(outcomes)
}

/// # Errors
/// Returns a config error for a bad team pairing or an unpriceable stake.
pub fn settle(
    ctx: &GameContext<'_>,
    settings: &MatchPlaySettings,
) -> Result<Vec<Settlement>, GameError> {
    let outcomes = outcomes(ctx, settings)?;
    Ok(resolve_pairwise(&outcomes, &ctx.seating))
}
