pub mod match_play;
pub mod nassau;
pub mod skins;
pub mod wolf;

use ahash::RandomState;
use std::collections::HashSet;

use crate::error::GameError;
use crate::model::{
    Bet, BetRegion, GameFormat, GameSettings, GameSnapshot, MatchType, Player, PlayerId,
    RoundProgress, RoundState, dollars_to_cents,
};
use crate::score::{ScoreLedger, allocate_strokes, net_score, strokes_off_the_low};

const MIN_PAR: u8 = 3;
const MAX_PAR: u8 = 6;

/// A validated snapshot with its scores indexed. Every engine works from this.
#[derive(Debug)]
pub struct GameContext<'a> {
    pub snapshot: &'a GameSnapshot,
    /// Players in seat order.
    pub players: Vec<&'a Player>,
    pub seating: Vec<PlayerId>,
    pub ledger: ScoreLedger,
    low_handicap: f64,
}

impl<'a> GameContext<'a> {
    /// Validate the snapshot and index its scores.
    ///
    /// # Errors
    /// Returns a config error for malformed settings, players or scores, and
    /// the specific duplicate errors for repeated presses or wolf choices.
    pub fn new(snapshot: &'a GameSnapshot) -> Result<Self, GameError> {
        validate_settings(&snapshot.settings)?;

        let mut players: Vec<&Player> = snapshot.players.iter().collect();
        players.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
        validate_players(&players, snapshot.settings.hole_count)?;
        validate_format_players(&snapshot.settings.format, &players)?;

        let seating: Vec<PlayerId> = players.iter().map(|p| p.id.clone()).collect();
        let low_handicap = players
            .iter()
            .map(|p| p.handicap)
            .fold(f64::INFINITY, f64::min);

        let ctx = Self {
            snapshot,
            players,
            seating,
            ledger: ScoreLedger::from_scores(&snapshot.scores),
            low_handicap,
        };
        ctx.validate_scores()?;
        match &snapshot.settings.format {
            GameFormat::Nassau(_) | GameFormat::MatchPlay(_) => ctx.validate_bets()?,
            GameFormat::Skins(_) | GameFormat::Wolf(_) => {
                if !snapshot.bets.is_empty() {
                    log::debug!(
                        "ignoring {} bet records for a {} game",
                        snapshot.bets.len(),
                        snapshot.settings.format
                    );
                }
            }
        }
        if let GameFormat::Wolf(settings) = &snapshot.settings.format {
            wolf::validate_choices(&ctx, settings)?;
        }
        Ok(ctx)
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.snapshot.settings
    }

    #[must_use]
    pub fn hole_count(&self) -> u8 {
        self.snapshot.settings.hole_count
    }

    #[must_use]
    pub fn round(&self) -> RoundState {
        self.snapshot.round
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&'a Player> {
        self.players.iter().copied().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn is_seated(&self, id: &PlayerId) -> bool {
        self.seating.contains(id)
    }

    /// First hole a player is in the game for.
    #[must_use]
    pub fn start_hole(&self, id: &PlayerId) -> u8 {
        self.player(id).map_or(1, |p| p.start_hole)
    }

    /// First hole every one of `members` is in the game for.
    #[must_use]
    pub fn joint_start<'m>(&self, members: impl IntoIterator<Item = &'m PlayerId>) -> u8 {
        members
            .into_iter()
            .map(|id| self.start_hole(id))
            .max()
            .unwrap_or(1)
    }

    fn handicap(&self, id: &PlayerId) -> f64 {
        self.player(id).map_or(0.0, |p| p.handicap)
    }

    /// Both players' nets on a hole with strokes given between the two of them.
    #[must_use]
    pub fn pair_nets(&self, a: &PlayerId, b: &PlayerId, hole: u8) -> Option<(u8, u8)> {
        let gross_a = self.ledger.gross(a, hole)?;
        let gross_b = self.ledger.gross(b, hole)?;
        let settings = self.settings();
        let strokes = allocate_strokes(
            self.handicap(a),
            self.handicap(b),
            hole,
            &settings.pars,
            settings.handicap_mode,
        );
        Some((
            net_score(gross_a, strokes.strokes_to_a),
            net_score(gross_b, strokes.strokes_to_b),
        ))
    }

    /// A player's net on a hole with strokes taken off the low handicap.
    #[must_use]
    pub fn field_net(&self, player: &PlayerId, hole: u8) -> Option<u8> {
        let gross = self.ledger.gross(player, hole)?;
        let settings = self.settings();
        let strokes = strokes_off_the_low(
            self.handicap(player),
            self.low_handicap,
            hole,
            &settings.pars,
            settings.handicap_mode,
        );
        Some(net_score(gross, strokes))
    }

    /// Best net among `members`, only when all of them have scored.
    #[must_use]
    pub fn best_ball(&self, members: &[PlayerId], hole: u8) -> Option<u8> {
        members
            .iter()
            .map(|member| self.field_net(member, hole))
            .collect::<Option<Vec<u8>>>()?
            .into_iter()
            .min()
    }

    /// Every player already in the game on `hole` has a score there.
    #[must_use]
    pub fn hole_complete(&self, hole: u8) -> bool {
        let expected = self
            .players
            .iter()
            .filter(|p| p.start_hole <= hole)
            .map(|p| &p.id);
        self.ledger.hole_complete(expected, hole)
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        let hole_count = self.hole_count();
        let holes_completed = self
            .settings()
            .holes()
            .filter(|&hole| self.hole_complete(hole))
            .count() as u8;
        RoundProgress {
            current_hole: (self.ledger.last_hole() + 1).clamp(1, hole_count),
            holes_completed,
            hole_count,
            round_complete: self.round().is_over() || holes_completed == hole_count,
        }
    }

    fn validate_scores(&self) -> Result<(), GameError> {
        for score in &self.snapshot.scores {
            if !self.is_seated(&score.player_id) {
                return Err(GameError::UnknownPlayer(score.player_id.to_string()));
            }
            if score.hole == 0 || score.hole > self.hole_count() {
                return Err(GameError::Config(format!(
                    "score for hole {} is outside a {} hole round",
                    score.hole,
                    self.hole_count()
                )));
            }
            if score.strokes == 0 {
                return Err(GameError::Config(format!(
                    "{} has zero strokes on hole {}",
                    score.player_id, score.hole
                )));
            }
        }
        Ok(())
    }

    fn validate_bets(&self) -> Result<(), GameError> {
        let format = &self.settings().format;
        let mut ids: HashSet<&str, RandomState> = HashSet::default();
        for bet in &self.snapshot.bets {
            if !ids.insert(bet.id().0.as_str()) {
                return Err(GameError::Config(format!("bet id {} is used twice", bet.id())));
            }
            let (a, b) = bet.players();
            for player in [a, b] {
                if !self.is_seated(player) {
                    return Err(GameError::UnknownPlayer(player.to_string()));
                }
            }
            if a == b {
                return Err(GameError::Config(format!(
                    "bet {} pairs {a} with themselves",
                    bet.id()
                )));
            }
            let region_ok = match format {
                GameFormat::Nassau(_) => bet.region() != BetRegion::Match,
                _ => bet.region() == BetRegion::Match,
            };
            if !region_ok {
                return Err(GameError::Config(format!(
                    "bet {} has region {:?}, which a {format} game does not use",
                    bet.id(),
                    bet.region()
                )));
            }
            dollars_to_cents(bet.amount())?;
        }

        for bet in &self.snapshot.bets {
            if let Bet::Press(press) = bet {
                if !matches!(format, GameFormat::Nassau(_)) {
                    return Err(GameError::Config(format!(
                        "press {} found, presses are only played in nassau",
                        press.id
                    )));
                }
                nassau::validate_press(self, press)?;
            }
        }
        nassau::reject_duplicate_presses(&self.snapshot.bets)
    }
}

fn validate_settings(settings: &GameSettings) -> Result<(), GameError> {
    if !matches!(settings.hole_count, 9 | 18) {
        return Err(GameError::Config(format!(
            "hole count must be 9 or 18, got {}",
            settings.hole_count
        )));
    }
    if settings.pars.len() != usize::from(settings.hole_count) {
        return Err(GameError::Config(format!(
            "{} pars supplied for a {} hole round",
            settings.pars.len(),
            settings.hole_count
        )));
    }
    if let Some((idx, par)) = settings
        .pars
        .iter()
        .enumerate()
        .find(|(_, par)| !(MIN_PAR..=MAX_PAR).contains(*par))
    {
        return Err(GameError::Config(format!(
            "hole {} has par {par}, expected {MIN_PAR} to {MAX_PAR}",
            idx + 1
        )));
    }
    match &settings.format {
        GameFormat::Nassau(nassau) => {
            dollars_to_cents(nassau.front_bet)?;
            dollars_to_cents(nassau.back_bet)?;
            dollars_to_cents(nassau.overall_bet)?;
            if nassau.press_threshold == 0 {
                return Err(GameError::Config(
                    "press threshold must be at least one hole".to_string(),
                ));
            }
        }
        GameFormat::Skins(skins) => {
            dollars_to_cents(skins.skin_value)?;
        }
        GameFormat::MatchPlay(match_play) => {
            dollars_to_cents(match_play.total_bet)?;
        }
        GameFormat::Wolf(wolf) => {
            dollars_to_cents(wolf.point_value)?;
        }
    }
    Ok(())
}

fn validate_players(players: &[&Player], hole_count: u8) -> Result<(), GameError> {
    if players.len() < 2 {
        return Err(GameError::Config(format!(
            "a game needs at least two players, got {}",
            players.len()
        )));
    }
    let mut ids: HashSet<&PlayerId, RandomState> = HashSet::default();
    let mut seats: HashSet<u32, RandomState> = HashSet::default();
    for player in players {
        if !ids.insert(&player.id) {
            return Err(GameError::Config(format!("player id {} is used twice", player.id)));
        }
        if !seats.insert(player.position) {
            return Err(GameError::Config(format!(
                "two players share position {}",
                player.position
            )));
        }
        if !player.handicap.is_finite() {
            return Err(GameError::Config(format!(
                "{} has a handicap that is not a number",
                player.id
            )));
        }
        if player.start_hole == 0 || player.start_hole > hole_count {
            return Err(GameError::Config(format!(
                "{} starts on hole {}, outside a {hole_count} hole round",
                player.id, player.start_hole
            )));
        }
    }
    if players.iter().all(|p| p.start_hole > 1) {
        return Err(GameError::Config(
            "at least one player must start on hole 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_format_players(format: &GameFormat, players: &[&Player]) -> Result<(), GameError> {
    let needs_four = match format {
        GameFormat::Wolf(_) => Some("wolf"),
        GameFormat::MatchPlay(settings) if settings.match_type == MatchType::Teams => {
            Some("team match play")
        }
        _ => None,
    };
    let late_joins_allowed = match format {
        GameFormat::Nassau(_) => true,
        GameFormat::MatchPlay(settings) => settings.match_type == MatchType::Singles,
        GameFormat::Skins(_) | GameFormat::Wolf(_) => false,
    };
    if !late_joins_allowed {
        if let Some(player) = players.iter().find(|p| p.start_hole != 1) {
            return Err(GameError::Config(format!(
                "{} starts on hole {}, but a {format} game has no late joins",
                player.id, player.start_hole
            )));
        }
    }
    if let Some(name) = needs_four {
        if players.len() != 4 {
            return Err(GameError::Config(format!(
                "{name} needs exactly 4 players, got {}",
                players.len()
            )));
        }
    }
    if let GameFormat::Wolf(settings) = format {
        if let Some(order) = &settings.wolf_order {
            let mut seen: HashSet<&PlayerId, RandomState> = HashSet::default();
            let valid = order.len() == players.len()
                && order
                    .iter()
                    .all(|id| seen.insert(id) && players.iter().any(|p| &p.id == id));
            if !valid {
                return Err(GameError::Config(
                    "wolf order must list every player exactly once".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Every unordered pair of seated players, in seat order.
#[must_use]
pub fn seat_pairs(seating: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut pairs = Vec::new();
    for (i, a) in seating.iter().enumerate() {
        for b in &seating[i + 1..] {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}
