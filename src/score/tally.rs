use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleWinner {
    SideA,
    SideB,
    Halved,
}

/// Lower net takes the hole.
#[must_use]
pub fn compare_nets(net_a: u8, net_b: u8) -> HoleWinner {
    match net_a.cmp(&net_b) {
        Ordering::Less => HoleWinner::SideA,
        Ordering::Greater => HoleWinner::SideB,
        Ordering::Equal => HoleWinner::Halved,
    }
}

/// Running hole-by-hole count between two sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub holes_played: u8,
    pub won_a: u8,
    pub won_b: u8,
    pub last_hole: Option<u8>,
}

impl MatchTally {
    pub fn record(&mut self, hole: u8, winner: HoleWinner) {
        self.holes_played += 1;
        self.last_hole = Some(hole);
        match winner {
            HoleWinner::SideA => self.won_a += 1,
            HoleWinner::SideB => self.won_b += 1,
            HoleWinner::Halved => {}
        }
    }

    /// Positive when side A is ahead.
    #[must_use]
    pub fn margin(&self) -> i32 {
        i32::from(self.won_a) - i32::from(self.won_b)
    }

    #[must_use]
    pub fn leading_side(&self) -> Option<HoleWinner> {
        match self.margin().cmp(&0) {
            Ordering::Greater => Some(HoleWinner::SideA),
            Ordering::Less => Some(HoleWinner::SideB),
            Ordering::Equal => None,
        }
    }

    /// "2 up", "All square".
    #[must_use]
    pub fn describe(&self) -> String {
        match self.margin().unsigned_abs() {
            0 => "All square".to_string(),
            n => format!("{n} up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_count_as_played() {
        let mut tally = MatchTally::default();
        tally.record(1, compare_nets(4, 5));
        tally.record(2, compare_nets(4, 4));
        tally.record(3, compare_nets(6, 3));
        tally.record(4, compare_nets(6, 3));
        assert_eq!(tally.holes_played, 4);
        assert_eq!(tally.margin(), -1);
        assert_eq!(tally.leading_side(), Some(HoleWinner::SideB));
        assert_eq!(tally.describe(), "1 up");
        assert_eq!(tally.last_hole, Some(4));
    }
}
