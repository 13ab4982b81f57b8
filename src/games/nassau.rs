//! Nassau: front, back and overall match-play bets for every pair, plus the
//! presses layered on top of them while the round is live.

use ahash::RandomState;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::GameContext;
use crate::error::GameError;
use crate::model::{
    Bet, BetId, BetRegion, BetStanding, BetState, NassauPair, NassauSettings, NassauStatus,
    ParentBet, PlayerId, Press, Settlement, SuggestedPress, dollars_to_cents,
};
use crate::score::{HoleWinner, MatchTally, compare_nets};
use crate::settlement::{BilateralOutcome, resolve_pairwise};

/// First and last hole of a region.
#[must_use]
pub fn region_bounds(region: BetRegion, hole_count: u8) -> (u8, u8) {
    let split = hole_count.div_ceil(2);
    match region {
        BetRegion::Front => (1, split),
        BetRegion::Back => (split + 1, hole_count),
        BetRegion::Overall | BetRegion::Match => (1, hole_count),
    }
}

fn region_key(region: BetRegion) -> &'static str {
    match region {
        BetRegion::Front => "front",
        BetRegion::Back => "back",
        BetRegion::Overall => "overall",
        BetRegion::Match => "match",
    }
}

/// Front, back and overall bets for every pair at the settings' stakes.
#[must_use]
pub fn initial_bets(seating: &[PlayerId], settings: &NassauSettings) -> Vec<Bet> {
    let mut bets = Vec::new();
    for (a, b) in super::seat_pairs(seating) {
        for region in BetRegion::NASSAU {
            let amount = match region {
                BetRegion::Front => settings.front_bet,
                BetRegion::Back => settings.back_bet,
                _ => settings.overall_bet,
            };
            bets.push(Bet::Parent(ParentBet {
                id: BetId(format!("{a}-{b}-{}", region_key(region))),
                region,
                player_a: a.clone(),
                player_b: b.clone(),
                amount,
            }));
        }
    }
    bets
}

fn effective_bets<'a>(ctx: &GameContext<'a>, settings: &NassauSettings) -> Cow<'a, [Bet]> {
    if ctx.snapshot.bets.is_empty() {
        Cow::Owned(initial_bets(&ctx.seating, settings))
    } else {
        Cow::Borrowed(ctx.snapshot.bets.as_slice())
    }
}

/// Holes a bet covers: its region, from the later of the press hole and the
/// hole both players were in the game.
fn window(ctx: &GameContext<'_>, bet: &Bet) -> (u8, u8) {
    let (start, end) = region_bounds(bet.region(), ctx.hole_count());
    let (a, b) = bet.players();
    let start = start.max(ctx.joint_start([a, b]));
    match bet {
        Bet::Parent(_) => (start, end),
        Bet::Press(press) => (press.start_hole.max(start), end),
    }
}

pub(crate) fn validate_press(ctx: &GameContext<'_>, press: &Press) -> Result<(), GameError> {
    if press.parent_id == press.id {
        return Err(GameError::Config(format!("press {} presses itself", press.id)));
    }
    let Some(parent) = ctx.snapshot.bets.iter().find(|b| b.id() == &press.parent_id) else {
        return Err(GameError::Config(format!(
            "press {} points at missing bet {}",
            press.id, press.parent_id
        )));
    };
    if parent.region() != press.region || parent.players() != (&press.player_a, &press.player_b)
    {
        return Err(GameError::Config(format!(
            "press {} must match the region and players of bet {}",
            press.id, press.parent_id
        )));
    }
    let (start, end) = region_bounds(press.region, ctx.hole_count());
    if !(start..=end).contains(&press.start_hole) {
        return Err(GameError::Config(format!(
            "press {} starts on hole {}, outside holes {start}-{end}",
            press.id, press.start_hole
        )));
    }
    if press.pressed_by != press.player_a && press.pressed_by != press.player_b {
        return Err(GameError::Config(format!(
            "press {} was made by {}, who is not in the bet",
            press.id, press.pressed_by
        )));
    }
    Ok(())
}

type PressKey<'b> = (&'b BetId, BetRegion, &'b PlayerId, &'b PlayerId);

pub(crate) fn reject_duplicate_presses(bets: &[Bet]) -> Result<(), GameError> {
    let mut seen: HashSet<PressKey<'_>, RandomState> = HashSet::default();
    for bet in bets {
        if let Bet::Press(press) = bet {
            let key = (
                &press.parent_id,
                press.region,
                &press.player_a,
                &press.player_b,
            );
            if !seen.insert(key) {
                return Err(GameError::DuplicatePress(format!(
                    "bet {} is already pressed",
                    press.parent_id
                )));
            }
        }
    }
    Ok(())
}

fn is_pressed(bets: &[Bet], bet: &Bet) -> bool {
    let (a, b) = bet.players();
    bets.iter().any(|other| match other {
        Bet::Press(press) => {
            &press.parent_id == bet.id()
                && press.region == bet.region()
                && (&press.player_a, &press.player_b) == (a, b)
        }
        Bet::Parent(_) => false,
    })
}

fn same_pair(x: (&PlayerId, &PlayerId), y: (&PlayerId, &PlayerId)) -> bool {
    x == y || (x.0 == y.1 && x.1 == y.0)
}

fn presses_in_region(bets: &[Bet], bet: &Bet) -> u32 {
    bets.iter()
        .filter(|other| {
            other.is_press()
                && other.region() == bet.region()
                && same_pair(other.players(), bet.players())
        })
        .count() as u32
}

fn limit_reached(settings: &NassauSettings, bets: &[Bet], bet: &Bet) -> bool {
    settings.press_limit != 0 && presses_in_region(bets, bet) >= settings.press_limit
}

/// "Front 9", "Back 9", "Overall", and "Front 9 Press #2" for presses,
/// numbered per pair and region by starting hole.
fn bet_labels(bets: &[Bet], hole_count: u8) -> HashMap<BetId, String, RandomState> {
    let mut labels: HashMap<BetId, String, RandomState> = HashMap::default();
    let mut presses: Vec<&Press> = Vec::new();
    for bet in bets {
        match bet {
            Bet::Parent(parent) => {
                labels.insert(parent.id.clone(), parent.region.label(hole_count).to_string());
            }
            Bet::Press(press) => presses.push(press),
        }
    }
    presses.sort_by(|x, y| x.start_hole.cmp(&y.start_hole).then(x.id.cmp(&y.id)));
    let mut counters: HashMap<(BetRegion, &PlayerId, &PlayerId), u32, RandomState> =
        HashMap::default();
    for press in presses {
        let pair = if press.player_a <= press.player_b {
            (&press.player_a, &press.player_b)
        } else {
            (&press.player_b, &press.player_a)
        };
        let n = counters.entry((press.region, pair.0, pair.1)).or_insert(0);
        *n += 1;
        labels.insert(
            press.id.clone(),
            format!("{} Press #{n}", press.region.label(hole_count)),
        );
    }
    labels
}

struct Evaluated<'b> {
    bet: &'b Bet,
    standing: BetStanding,
    next_hole: Option<u8>,
}

fn evaluate<'b>(ctx: &GameContext<'_>, bet: &'b Bet, label: String) -> Evaluated<'b> {
    let (a, b) = bet.players();
    let (start, end) = window(ctx, bet);
    let mut tally = MatchTally::default();
    for hole in start..=end {
        if let Some((net_a, net_b)) = ctx.pair_nets(a, b, hole) {
            let winner = compare_nets(net_a, net_b);
            log::trace!("{label} hole {hole}: {a} {net_a} vs {b} {net_b} -> {winner:?}");
            tally.record(hole, winner);
        }
    }

    let window_len = if start > end { 0 } else { end - start + 1 };
    let state = if ctx.round().is_over() || tally.holes_played >= window_len {
        BetState::Complete
    } else if tally.holes_played == 0 {
        BetState::NotStarted
    } else {
        BetState::InProgress
    };
    let leader = match tally.leading_side() {
        Some(HoleWinner::SideA) => Some(a.clone()),
        Some(HoleWinner::SideB) => Some(b.clone()),
        _ => None,
    };
    let summary = match (&leader, state) {
        (_, BetState::NotStarted) => "Not started".to_string(),
        (None, _) => tally.describe(),
        (Some(leader), BetState::Complete) => format!("{leader} won {}", tally.describe()),
        (Some(leader), _) => format!("{leader} {}", tally.describe()),
    };
    let next_hole = tally
        .last_hole
        .map_or(start, |h| h + 1)
        .min(end + 1);

    Evaluated {
        bet,
        standing: BetStanding {
            bet_id: bet.id().clone(),
            label,
            region: bet.region(),
            parent_id: bet.parent_id().cloned(),
            player_a: a.clone(),
            player_b: b.clone(),
            start_hole: start,
            end_hole: end,
            holes_played: tally.holes_played,
            holes_won_a: tally.won_a,
            holes_won_b: tally.won_b,
            margin: tally.margin(),
            leader,
            state,
            summary,
        },
        next_hole: (next_hole <= end).then_some(next_hole),
    }
}

fn evaluate_all<'b>(ctx: &GameContext<'_>, bets: &'b [Bet]) -> Vec<Evaluated<'b>> {
    let mut labels = bet_labels(bets, ctx.hole_count());
    bets.iter()
        .map(|bet| {
            let label = labels.remove(bet.id()).unwrap_or_else(|| bet.id().to_string());
            evaluate(ctx, bet, label)
        })
        .collect()
}

fn trailing(standing: &BetStanding) -> Option<(PlayerId, PlayerId)> {
    match standing.margin.cmp(&0) {
        std::cmp::Ordering::Greater => Some((standing.player_b.clone(), standing.player_a.clone())),
        std::cmp::Ordering::Less => Some((standing.player_a.clone(), standing.player_b.clone())),
        std::cmp::Ordering::Equal => None,
    }
}

/// # Errors
/// Returns an error if the bet records cannot be priced.
pub fn status(ctx: &GameContext<'_>, settings: &NassauSettings) -> Result<NassauStatus, GameError> {
    let bets = effective_bets(ctx, settings);
    let evaluated = evaluate_all(ctx, &bets);

    let mut suggested_presses = Vec::new();
    for eval in &evaluated {
        let standing = &eval.standing;
        let holes_down = standing.margin.unsigned_abs();
        if standing.state == BetState::Complete || holes_down < u32::from(settings.press_threshold)
        {
            continue;
        }
        let Some(start_hole) = eval.next_hole else {
            continue;
        };
        if is_pressed(&bets, eval.bet) || limit_reached(settings, &bets, eval.bet) {
            continue;
        }
        if let Some((pressing_player, opponent)) = trailing(standing) {
            suggested_presses.push(SuggestedPress {
                bet_id: standing.bet_id.clone(),
                region: standing.region,
                pressing_player,
                opponent,
                start_hole,
                holes_down: holes_down as u8,
                reason: format!("{holes_down} down on {}", standing.label),
                automatic: settings.auto_press,
            });
        }
    }

    let seat = |id: &PlayerId| ctx.seating.iter().position(|p| p == id).unwrap_or(usize::MAX);
    let mut pairs: BTreeMap<(usize, usize), NassauPair> = BTreeMap::new();
    for eval in evaluated {
        let standing = eval.standing;
        let (x, y) = (seat(&standing.player_a), seat(&standing.player_b));
        pairs
            .entry((x.min(y), x.max(y)))
            .or_insert_with(|| NassauPair {
                player_a: standing.player_a.clone(),
                player_b: standing.player_b.clone(),
                bets: Vec::new(),
            })
            .bets
            .push(standing);
    }
    let pairs: Vec<NassauPair> = pairs
        .into_values()
        .map(|mut pair| {
            pair.bets.sort_by(|x, y| {
                x.region
                    .cmp(&y.region)
                    .then(x.parent_id.is_some().cmp(&y.parent_id.is_some()))
                    .then(x.start_hole.cmp(&y.start_hole))
                    .then(x.bet_id.cmp(&y.bet_id))
            });
            pair
        })
        .collect();

    log::debug!(
        "nassau status: {} pairs, {} suggested presses",
        pairs.len(),
        suggested_presses.len()
    );
    Ok(NassauStatus {
        progress: ctx.progress(),
        pairs,
        suggested_presses,
    })
}

/// Validate and build a press against `parent_bet_id` for the trailing player.
///
/// # Errors
/// `InvalidPress` when the bet is missing, complete, all square, out of holes
/// or at its press limit; `DuplicatePress` when the bet was already pressed.
pub fn create_press(
    ctx: &GameContext<'_>,
    settings: &NassauSettings,
    parent_bet_id: &BetId,
    press_id: BetId,
) -> Result<Press, GameError> {
    let bets = effective_bets(ctx, settings);
    let Some(bet) = bets.iter().find(|b| b.id() == parent_bet_id) else {
        return Err(GameError::InvalidPress(format!("no bet {parent_bet_id}")));
    };
    if bets.iter().any(|b| b.id() == &press_id) {
        return Err(GameError::InvalidPress(format!(
            "bet id {press_id} is already taken"
        )));
    }
    if is_pressed(&bets, bet) {
        return Err(GameError::DuplicatePress(format!(
            "bet {parent_bet_id} is already pressed"
        )));
    }

    let labels = bet_labels(&bets, ctx.hole_count());
    let label = labels
        .get(parent_bet_id)
        .cloned()
        .unwrap_or_else(|| parent_bet_id.to_string());
    let eval = evaluate(ctx, bet, label);
    let standing = &eval.standing;
    if standing.state == BetState::Complete {
        return Err(GameError::InvalidPress(format!("{} is complete", standing.label)));
    }
    let Some((pressed_by, _)) = trailing(standing) else {
        return Err(GameError::InvalidPress(format!(
            "{} is all square, there is nothing to press",
            standing.label
        )));
    };
    if limit_reached(settings, &bets, bet) {
        return Err(GameError::InvalidPress(format!(
            "press limit of {} reached on {}",
            settings.press_limit,
            bet.region().label(ctx.hole_count())
        )));
    }
    let Some(start_hole) = eval.next_hole else {
        return Err(GameError::InvalidPress(format!(
            "no holes remain on {}",
            standing.label
        )));
    };

    let (a, b) = bet.players();
    log::debug!(
        "{pressed_by} presses {} at {} from hole {start_hole}",
        standing.label,
        standing.summary
    );
    Ok(Press {
        id: press_id,
        parent_id: parent_bet_id.clone(),
        region: bet.region(),
        player_a: a.clone(),
        player_b: b.clone(),
        amount: bet.amount(),
        start_hole,
        margin_at_press: standing.margin,
        pressed_by,
    })
}

/// One bilateral outcome per parent bet and per press, pushes included.
///
/// # Errors
/// Returns a config error if a stake cannot be converted to cents.
pub fn outcomes(
    ctx: &GameContext<'_>,
    settings: &NassauSettings,
) -> Result<Vec<BilateralOutcome>, GameError> {
    let bets = effective_bets(ctx, settings);
    evaluate_all(ctx, &bets)
        .into_iter()
        .map(|eval| {
            let amount = dollars_to_cents(eval.bet.amount())?;
            let owed = match eval.standing.margin.cmp(&0) {
                std::cmp::Ordering::Greater => -amount,
                std::cmp::Ordering::Less => amount,
                std::cmp::Ordering::Equal => 0,
            };
            Ok(BilateralOutcome {
                player_a: eval.standing.player_a,
                player_b: eval.standing.player_b,
                amount_a_owes_b: owed,
                label: eval.standing.label,
            })
        })
        .collect()
}

/// # Errors
/// Returns a config error if a stake cannot be converted to cents.
pub fn settle(
    ctx: &GameContext<'_>,
    settings: &NassauSettings,
) -> Result<Vec<Settlement>, GameError> {
    let outcomes = outcomes(ctx, settings)?;
    Ok(resolve_pairwise(&outcomes, &ctx.seating))
}
