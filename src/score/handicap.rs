use serde::{Deserialize, Serialize};

use crate::model::HandicapMode;

const PARTIAL_ALLOWANCE: f64 = 0.8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrokeAllocation {
    pub strokes_to_a: u8,
    pub strokes_to_b: u8,
}

/// Strokes the higher handicap receives over the whole round for a given gap.
#[must_use]
pub fn allotted_strokes(handicap_gap: f64, mode: HandicapMode) -> u32 {
    let gap = handicap_gap.abs();
    if !gap.is_finite() {
        return 0;
    }
    match mode {
        HandicapMode::None => 0,
        HandicapMode::Full => gap.round() as u32,
        HandicapMode::Partial => (gap * PARTIAL_ALLOWANCE).round() as u32,
    }
}

/// Zero-based difficulty rank of `hole`: lower par plays harder, ties go to the
/// lower hole number.
#[must_use]
pub fn difficulty_rank(pars: &[u8], hole: u8) -> Option<usize> {
    let idx = usize::from(hole).checked_sub(1)?;
    let par = *pars.get(idx)?;
    let harder = pars
        .iter()
        .enumerate()
        .filter(|&(i, &p)| p < par || (p == par && i < idx))
        .count();
    Some(harder)
}

/// Strokes given on one hole from a round allotment, wrapping past the card.
#[must_use]
pub fn strokes_on_hole(allotted: u32, rank: usize, hole_count: usize) -> u8 {
    if hole_count == 0 {
        return 0;
    }
    let hole_count = hole_count as u32;
    let base = allotted / hole_count;
    let extra = u32::from((rank as u32) < allotted % hole_count);
    u8::try_from(base + extra).unwrap_or(u8::MAX)
}

#[must_use]
pub fn allocate_strokes(
    handicap_a: f64,
    handicap_b: f64,
    hole: u8,
    pars: &[u8],
    mode: HandicapMode,
) -> StrokeAllocation {
    let Some(rank) = difficulty_rank(pars, hole) else {
        return StrokeAllocation::default();
    };
    let allotted = allotted_strokes(handicap_a - handicap_b, mode);
    let strokes = strokes_on_hole(allotted, rank, pars.len());
    if handicap_a > handicap_b {
        StrokeAllocation {
            strokes_to_a: strokes,
            strokes_to_b: 0,
        }
    } else if handicap_b > handicap_a {
        StrokeAllocation {
            strokes_to_a: 0,
            strokes_to_b: strokes,
        }
    } else {
        StrokeAllocation::default()
    }
}

/// Strokes for one player measured against the lowest handicap in the group.
#[must_use]
pub fn strokes_off_the_low(
    handicap: f64,
    low_handicap: f64,
    hole: u8,
    pars: &[u8],
    mode: HandicapMode,
) -> u8 {
    allocate_strokes(handicap, low_handicap, hole, pars, mode).strokes_to_a
}

#[must_use]
pub fn net_score(gross: u8, strokes: u8) -> u8 {
    gross.saturating_sub(strokes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARS: [u8; 9] = [4, 5, 3, 4, 4, 3, 5, 4, 4];

    #[test]
    fn scratch_gives_nothing() {
        for hole in 1..=9 {
            let a = allocate_strokes(20.0, 2.0, hole, &PARS, HandicapMode::None);
            assert_eq!(a, StrokeAllocation::default());
        }
    }

    #[test]
    fn par_threes_are_stroked_first() {
        // gap of 2 -> the two par 3s (holes 3 and 6)
        let stroked: Vec<u8> = (1..=9)
            .filter(|&h| allocate_strokes(12.0, 10.0, h, &PARS, HandicapMode::Full).strokes_to_a == 1)
            .collect();
        assert_eq!(stroked, vec![3, 6]);
    }

    #[test]
    fn rank_breaks_par_ties_by_hole_number() {
        assert_eq!(difficulty_rank(&PARS, 3), Some(0));
        assert_eq!(difficulty_rank(&PARS, 6), Some(1));
        assert_eq!(difficulty_rank(&PARS, 1), Some(2));
        assert_eq!(difficulty_rank(&PARS, 9), Some(6));
        assert_eq!(difficulty_rank(&PARS, 2), Some(7));
        assert_eq!(difficulty_rank(&PARS, 10), None);
    }

    #[test]
    fn partial_scales_before_rounding() {
        assert_eq!(allotted_strokes(10.0, HandicapMode::Partial), 8);
        assert_eq!(allotted_strokes(-3.0, HandicapMode::Partial), 2);
        assert_eq!(allotted_strokes(2.4, HandicapMode::Full), 2);
    }

    #[test]
    fn allotments_wrap_past_the_card() {
        // 11 strokes over 9 holes: everyone gets one, the two hardest get two
        let total: u32 = (1..=9)
            .map(|h| u32::from(allocate_strokes(11.0, 0.0, h, &PARS, HandicapMode::Full).strokes_to_a))
            .sum();
        assert_eq!(total, 11);
        assert_eq!(allocate_strokes(11.0, 0.0, 3, &PARS, HandicapMode::Full).strokes_to_a, 2);
        assert_eq!(allocate_strokes(11.0, 0.0, 2, &PARS, HandicapMode::Full).strokes_to_a, 1);
    }

    #[test]
    fn allocation_is_symmetric() {
        for mode in [HandicapMode::None, HandicapMode::Full, HandicapMode::Partial] {
            for hole in 1..=9 {
                let ab = allocate_strokes(14.3, 6.0, hole, &PARS, mode);
                let ba = allocate_strokes(6.0, 14.3, hole, &PARS, mode);
                assert_eq!(ab.strokes_to_a, ba.strokes_to_b);
                assert_eq!(ab.strokes_to_b, ba.strokes_to_a);
            }
        }
    }

    #[test]
    fn net_never_goes_negative() {
        assert_eq!(net_score(1, 2), 0);
        assert_eq!(net_score(5, 1), 4);
    }
}
