//! Turns one format's raw results into the transfers players actually make.
//!
//! Pairwise formats (Nassau, Match Play) hand in bilateral outcomes that are
//! netted per pair. Pool formats (Skins, Wolf) hand in per-player balances that
//! are matched greedily, largest debtor against largest creditor.

use std::collections::BTreeMap;

use crate::model::{Cents, LineItem, PlayerId, Settlement};

/// One resolved bet between two players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilateralOutcome {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    /// Negative when B owes A.
    pub amount_a_owes_b: Cents,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSource {
    pub label: String,
    pub weight: i64,
}

/// A player's position in a pool, as a numerator over the pool's scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolBalance {
    pub player_id: PlayerId,
    pub amount: i64,
    pub sources: Vec<PoolSource>,
}

fn seat_of(seating: &[PlayerId], player: &PlayerId) -> Option<usize> {
    seating.iter().position(|p| p == player)
}

/// Net every outcome between the same two players into a single transfer.
/// Pushes drop out; every non-zero bet stays in the breakdown.
#[must_use]
pub fn resolve_pairwise(outcomes: &[BilateralOutcome], seating: &[PlayerId]) -> Vec<Settlement> {
    let mut pairs: BTreeMap<(usize, usize), (Cents, Vec<(String, Cents)>)> = BTreeMap::new();

    for outcome in outcomes {
        if outcome.amount_a_owes_b == 0 {
            continue;
        }
        let (Some(a), Some(b)) = (
            seat_of(seating, &outcome.player_a),
            seat_of(seating, &outcome.player_b),
        ) else {
            log::warn!(
                "dropping outcome '{}' between unseated players {} and {}",
                outcome.label,
                outcome.player_a,
                outcome.player_b
            );
            continue;
        };
        if a == b {
            continue;
        }
        // orient every outcome as "lower seat owes higher seat"
        let (key, owed) = if a < b {
            ((a, b), outcome.amount_a_owes_b)
        } else {
            ((b, a), -outcome.amount_a_owes_b)
        };
        let entry = pairs.entry(key).or_default();
        entry.0 += owed;
        entry.1.push((outcome.label.clone(), owed));
    }

    pairs
        .into_iter()
        .filter(|(_, (net, _))| *net != 0)
        .map(|((lo, hi), (net, items))| {
            let (from, to, sign) = if net > 0 { (lo, hi, 1) } else { (hi, lo, -1) };
            Settlement {
                from_player: seating[from].clone(),
                to_player: seating[to].clone(),
                amount: net.abs(),
                breakdown: items
                    .into_iter()
                    .map(|(label, amount)| LineItem {
                        label,
                        amount: amount * sign,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Integer division rounding half away from zero.
#[must_use]
pub fn round_div(numerator: i64, denominator: i64) -> i64 {
    if denominator <= 0 {
        return numerator;
    }
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if 2 * remainder.abs() >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

/// Split `total` over `weights` with largest-remainder rounding; the parts
/// always sum to `total`. Empty when there is nothing to weight by.
#[must_use]
pub fn apportion(total: Cents, weights: &[i64]) -> Vec<Cents> {
    let weight_sum: i128 = weights.iter().map(|w| i128::from((*w).max(0))).sum();
    if weight_sum == 0 {
        return Vec::new();
    }
    let mut parts = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for (idx, weight) in weights.iter().enumerate() {
        let scaled = i128::from(total) * i128::from((*weight).max(0));
        parts.push((scaled / weight_sum) as Cents);
        remainders.push((scaled % weight_sum, idx));
    }
    let mut leftover = total - parts.iter().sum::<Cents>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, idx) in remainders {
        if leftover <= 0 {
            break;
        }
        parts[idx] += 1;
        leftover -= 1;
    }
    parts
}

fn first_extreme(values: &[Cents], better: impl Fn(Cents, Cents) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, value) in values.iter().enumerate() {
        match best {
            Some(b) if !better(*value, values[b]) => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// Round pool balances to cents and settle them with the fewest transfers.
///
/// Balances are given as numerators over `scale`. Rounding leftovers are
/// absorbed by the largest balance so the result stays zero-sum.
#[must_use]
pub fn resolve_pool(balances: &[PoolBalance], scale: i64, fallback_label: &str) -> Vec<Settlement> {
    let mut rounded: Vec<Cents> = balances
        .iter()
        .map(|b| round_div(b.amount, scale))
        .collect();

    let residual = -rounded.iter().sum::<Cents>();
    if residual != 0 {
        if let Some(idx) = first_extreme(&rounded, |a, b| a.abs() > b.abs()) {
            log::debug!(
                "assigning {residual} cent rounding remainder to {}",
                balances[idx].player_id
            );
            rounded[idx] += residual;
        }
    }

    let mut transfers = Vec::new();
    loop {
        let (Some(debtor), Some(creditor)) = (
            first_extreme(&rounded, |a, b| a < b),
            first_extreme(&rounded, |a, b| a > b),
        ) else {
            break;
        };
        if rounded[debtor] >= 0 || rounded[creditor] <= 0 {
            break;
        }
        let amount = (-rounded[debtor]).min(rounded[creditor]);
        rounded[debtor] += amount;
        rounded[creditor] -= amount;

        let sources = &balances[creditor].sources;
        let weights: Vec<i64> = sources.iter().map(|s| s.weight).collect();
        let parts = apportion(amount, &weights);
        let mut breakdown: Vec<LineItem> = sources
            .iter()
            .zip(parts)
            .filter(|(_, part)| *part != 0)
            .map(|(source, part)| LineItem {
                label: source.label.clone(),
                amount: part,
            })
            .collect();
        if breakdown.is_empty() {
            breakdown.push(LineItem {
                label: fallback_label.to_string(),
                amount,
            });
        }

        transfers.push(Settlement {
            from_player: balances[debtor].player_id.clone(),
            to_player: balances[creditor].player_id.clone(),
            amount,
            breakdown,
        });
    }
    transfers
}
