mod common;

use common::{WOLF, assert_well_formed, hole, load};
use rusty_golf_games::model::{
    GameFormat, LiveStatus, PlayerId, WolfCall, WolfChoice, WolfHoleWinner, WolfStatus,
};
use rusty_golf_games::{GameError, compute_settlements, compute_status, record_wolf_choice};

fn wolf(status: LiveStatus) -> Result<WolfStatus, Box<dyn std::error::Error>> {
    match status {
        LiveStatus::Wolf(status) => Ok(status),
        other => Err(format!("expected wolf status, got {other:?}").into()),
    }
}

fn choice(hole: u8, wolf: &str, call: WolfCall, partner: Option<&str>) -> WolfChoice {
    WolfChoice {
        hole,
        wolf_player: wolf.into(),
        choice: call,
        partner: partner.map(PlayerId::from),
    }
}

fn points(status: &WolfStatus, player: &str) -> f64 {
    status
        .standings
        .iter()
        .find(|t| t.player_id == PlayerId::from(player))
        .map_or(f64::NAN, |t| t.points)
}

#[test]
fn blind_wolf_wins_three_points() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(WOLF)?;
    // the rotation starts with p3, so p3 is the wolf again on hole 5
    snapshot.wolf_choices = vec![choice(5, "p3", WolfCall::Blind, None)];
    snapshot.scores = hole(5, &[("p1", 4), ("p2", 4), ("p3", 3), ("p4", 4)]);

    let status = wolf(compute_status(&snapshot)?)?;
    assert_eq!(status.holes.len(), 1);
    let played = &status.holes[0];
    assert_eq!(played.winner, WolfHoleWinner::Wolf);
    assert_eq!(played.multiplier, 3);
    assert_eq!(played.wolf_side, vec![PlayerId::from("p3")]);
    assert_eq!(played.field_side.len(), 3);

    assert!((points(&status, "p3") - 3.0).abs() < 1e-9);
    for other in ["p1", "p2", "p4"] {
        assert!((points(&status, other) + 1.0).abs() < 1e-9);
    }
    let total: f64 = status.standings.iter().map(|t| t.points).sum();
    assert!(total.abs() < 1e-9);
    assert_eq!(status.awaiting_choice, Some((1, PlayerId::from("p3"))));

    let settlements = compute_settlements(&snapshot)?;
    assert_well_formed(&settlements);
    assert_eq!(settlements.len(), 3);
    for s in &settlements {
        assert_eq!(s.to_player, PlayerId::from("p3"));
        assert_eq!(s.amount, 100);
        assert_eq!(s.breakdown[0].label, "Hole 5: blind wolf win");
    }
    Ok(())
}

#[test]
fn partner_and_lone_holes_stay_zero_sum() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(WOLF)?;
    snapshot.wolf_choices = vec![
        choice(1, "p3", WolfCall::Partner, Some("p1")),
        choice(2, "p4", WolfCall::Solo, None),
    ];
    // hole 1: p3 and p1 take it with a 3; hole 2: the lone wolf makes 5
    snapshot.scores = hole(1, &[("p1", 3), ("p2", 4), ("p3", 5), ("p4", 4)]);
    snapshot
        .scores
        .extend(hole(2, &[("p1", 4), ("p2", 4), ("p3", 4), ("p4", 5)]));

    let status = wolf(compute_status(&snapshot)?)?;
    assert_eq!(status.holes[0].winner, WolfHoleWinner::Wolf);
    assert_eq!(status.holes[0].multiplier, 1);
    assert_eq!(status.holes[1].winner, WolfHoleWinner::Field);
    assert_eq!(status.holes[1].multiplier, 2);

    // p1: +1 then +2/3; p4: -1 then -2
    assert!((points(&status, "p1") - (1.0 + 2.0 / 3.0)).abs() < 1e-9);
    assert!((points(&status, "p4") + 3.0).abs() < 1e-9);
    let total: f64 = status.standings.iter().map(|t| t.points).sum();
    assert!(total.abs() < 1e-9);
    assert_eq!(status.awaiting_choice, Some((3, PlayerId::from("p1"))));

    let settlements = compute_settlements(&snapshot)?;
    assert_well_formed(&settlements);
    let net = |player: &str| -> i64 {
        let id = PlayerId::from(player);
        settlements
            .iter()
            .map(|s| {
                if s.to_player == id {
                    s.amount
                } else if s.from_player == id {
                    -s.amount
                } else {
                    0
                }
            })
            .sum()
    };
    // thirds of a dollar round to the cent; the odd cent lands on p4
    assert_eq!(net("p1"), 167);
    assert_eq!(net("p3"), 167);
    assert_eq!(net("p2"), -33);
    assert_eq!(net("p4"), -301);
    Ok(())
}

#[test]
fn pushed_hole_moves_no_points() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(WOLF)?;
    snapshot.wolf_choices = vec![choice(1, "p3", WolfCall::Solo, None)];
    snapshot.scores = hole(1, &[("p1", 4), ("p2", 4), ("p3", 4), ("p4", 4)]);

    let status = wolf(compute_status(&snapshot)?)?;
    assert_eq!(status.holes[0].winner, WolfHoleWinner::Push);
    assert!(status.standings.iter().all(|t| t.points == 0.0));
    assert!(compute_settlements(&snapshot)?.is_empty());
    Ok(())
}

#[test]
fn wolf_calls_are_validated() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(WOLF)?;
    snapshot.wolf_choices = vec![choice(1, "p3", WolfCall::Partner, Some("p2"))];
    snapshot.scores = hole(2, &[("p1", 4)]);

    let ok = record_wolf_choice(&snapshot, choice(3, "p1", WolfCall::Partner, Some("p4")))?;
    assert_eq!(ok.hole, 3);

    let duplicate = record_wolf_choice(&snapshot, choice(1, "p3", WolfCall::Solo, None));
    assert_eq!(duplicate.err(), Some(GameError::DuplicateWolfChoice(1)));

    let wrong_wolf = record_wolf_choice(&snapshot, choice(3, "p2", WolfCall::Solo, None));
    assert!(matches!(wrong_wolf, Err(GameError::InvalidWolfChoice(_))));

    let late_blind = record_wolf_choice(&snapshot, choice(2, "p4", WolfCall::Blind, None));
    assert!(matches!(late_blind, Err(GameError::InvalidWolfChoice(_))));

    let no_partner = record_wolf_choice(&snapshot, choice(3, "p1", WolfCall::Partner, None));
    assert!(matches!(no_partner, Err(GameError::InvalidWolfChoice(_))));

    let stranger = record_wolf_choice(&snapshot, choice(3, "p1", WolfCall::Partner, Some("zz")));
    assert!(matches!(stranger, Err(GameError::UnknownPlayer(_))));

    if let GameFormat::Wolf(settings) = &mut snapshot.settings.format {
        settings.blind_wolf = false;
    }
    let disabled = record_wolf_choice(&snapshot, choice(4, "p2", WolfCall::Blind, None));
    assert!(matches!(disabled, Err(GameError::InvalidWolfChoice(_))));
    Ok(())
}

#[test]
fn stored_duplicate_choices_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(WOLF)?;
    snapshot.wolf_choices = vec![
        choice(1, "p3", WolfCall::Solo, None),
        choice(1, "p3", WolfCall::Partner, Some("p2")),
    ];
    assert_eq!(
        compute_status(&snapshot).err(),
        Some(GameError::DuplicateWolfChoice(1))
    );
    Ok(())
}

#[test]
fn wolf_needs_four_players() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(WOLF)?;
    snapshot.players.pop();
    if let GameFormat::Wolf(settings) = &mut snapshot.settings.format {
        settings.wolf_order = None;
    }
    assert!(matches!(compute_status(&snapshot), Err(GameError::Config(_))));
    Ok(())
}
