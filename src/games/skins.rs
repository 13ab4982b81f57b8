use super::GameContext;
use crate::error::GameError;
use crate::model::{
    Cents, Settlement, SkinHole, SkinOutcome, SkinsSettings, SkinsStatus, SkinsTally,
    dollars_to_cents,
};
use crate::settlement::{PoolBalance, PoolSource, resolve_pool};

struct SkinsRun {
    holes: Vec<SkinHole>,
    /// Indexed by seat.
    skins_won: Vec<u32>,
    winnings: Vec<Cents>,
    sources: Vec<Vec<PoolSource>>,
    carryover: u32,
    forfeited: Cents,
    round_over: bool,
}

fn play(ctx: &GameContext<'_>, settings: &SkinsSettings) -> Result<SkinsRun, GameError> {
    let skin_value = dollars_to_cents(settings.skin_value)?;
    let seats = ctx.seating.len();
    let mut run = SkinsRun {
        holes: Vec::new(),
        skins_won: vec![0; seats],
        winnings: vec![0; seats],
        sources: vec![Vec::new(); seats],
        carryover: 0,
        forfeited: 0,
        round_over: false,
    };
    let mut last_tie: Vec<usize> = Vec::new();
    let mut evaluated_all = true;

    for hole in ctx.settings().holes() {
        // carryovers only make sense hole after hole, so stop at the first gap
        let Some(nets) = ctx
            .seating
            .iter()
            .map(|player| ctx.field_net(player, hole))
            .collect::<Option<Vec<u8>>>()
        else {
            evaluated_all = false;
            break;
        };
        let low_net = nets.iter().copied().min().unwrap_or(0);
        let low: Vec<usize> = (0..seats).filter(|&i| nets[i] == low_net).collect();

        let sole_winner = if low.len() == 1 { Some(low[0]) } else { None };
        let outcome = if let Some(winner) = sole_winner {
            let skins = 1 + run.carryover;
            let value = skin_value * Cents::from(skins);
            run.skins_won[winner] += skins;
            run.winnings[winner] += value;
            run.sources[winner].push(PoolSource {
                label: skins_label(hole, skins),
                weight: value,
            });
            run.carryover = 0;
            last_tie.clear();
            SkinOutcome::Won {
                player_id: ctx.seating[winner].clone(),
                skins,
                value,
            }
        } else if settings.allow_carryovers {
            run.carryover += 1;
            last_tie = low;
            SkinOutcome::Carried {
                carried_skins: run.carryover,
            }
        } else {
            run.forfeited += skin_value;
            last_tie.clear();
            SkinOutcome::Voided { value: skin_value }
        };
        log::trace!("skins hole {hole}: low net {low_net}, {outcome:?}");
        run.holes.push(SkinHole {
            hole,
            low_net,
            outcome,
        });
    }

    run.round_over = evaluated_all || ctx.round().is_over();
    if run.round_over && run.carryover > 0 {
        settle_final_carryover(ctx, settings, skin_value, &last_tie, &mut run);
    }
    Ok(run)
}

fn skins_label(hole: u8, skins: u32) -> String {
    if skins == 1 {
        format!("Hole {hole} skin")
    } else {
        format!("Hole {hole} skins ({skins})")
    }
}

/// An unresolved carryover at round end is split across the final hole's low
/// nets, or forfeited.
fn settle_final_carryover(
    ctx: &GameContext<'_>,
    settings: &SkinsSettings,
    skin_value: Cents,
    tied: &[usize],
    run: &mut SkinsRun,
) {
    let skins = run.carryover;
    let total = skin_value * Cents::from(skins);
    run.carryover = 0;
    let Some(final_hole) = run.holes.last_mut() else {
        run.forfeited += total;
        return;
    };

    if settings.split_final_ties && !tied.is_empty() {
        let share = total / tied.len() as Cents;
        let remainder = total - share * tied.len() as Cents;
        // seats are in position order, so tied[0] is the lowest position
        for (n, &seat) in tied.iter().enumerate() {
            let amount = share + if n == 0 { remainder } else { 0 };
            run.winnings[seat] += amount;
            run.sources[seat].push(PoolSource {
                label: format!("Hole {} split ({skins} skins)", final_hole.hole),
                weight: amount,
            });
        }
        final_hole.outcome = SkinOutcome::Split {
            player_ids: tied.iter().map(|&s| ctx.seating[s].clone()).collect(),
            skins,
            value: total,
        };
    } else {
        run.forfeited += total;
        final_hole.outcome = SkinOutcome::Forfeited {
            skins,
            value: total,
        };
    }
}

/// # Errors
/// Returns a config error if the skin value cannot be converted to cents.
pub fn status(ctx: &GameContext<'_>, settings: &SkinsSettings) -> Result<SkinsStatus, GameError> {
    let skin_value = dollars_to_cents(settings.skin_value)?;
    let run = play(ctx, settings)?;
    let players = ctx
        .seating
        .iter()
        .enumerate()
        .map(|(seat, player_id)| SkinsTally {
            player_id: player_id.clone(),
            skins_won: run.skins_won[seat],
            winnings: run.winnings[seat],
        })
        .collect();
    let value_at_stake = if run.round_over {
        0
    } else {
        skin_value * Cents::from(1 + run.carryover)
    };
    Ok(SkinsStatus {
        progress: ctx.progress(),
        holes: run.holes,
        players,
        carryover: run.carryover,
        value_at_stake,
        paid_out: run.winnings.iter().sum(),
        forfeited: run.forfeited,
    })
}

/// Winnings are funded equally by the whole group, so each balance is the
/// player's winnings less an even share of everything paid out.
///
/// # Errors
/// Returns a config error if the skin value cannot be converted to cents.
pub fn settle(ctx: &GameContext<'_>, settings: &SkinsSettings) -> Result<Vec<Settlement>, GameError> {
    let run = play(ctx, settings)?;
    let seats = ctx.seating.len() as i64;
    let paid_out: Cents = run.winnings.iter().sum();
    let balances: Vec<PoolBalance> = ctx
        .seating
        .iter()
        .zip(run.winnings)
        .zip(run.sources)
        .map(|((player_id, won), sources)| PoolBalance {
            player_id: player_id.clone(),
            amount: won * seats - paid_out,
            sources,
        })
        .collect();
    Ok(resolve_pool(&balances, seats, "Skins"))
}
