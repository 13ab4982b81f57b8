mod common;

use common::{SKINS, assert_well_formed, hole, load};
use rusty_golf_games::model::{
    LiveStatus, PlayerId, RoundState, Score, SkinOutcome, SkinsStatus,
};
use rusty_golf_games::{compute_settlements, compute_status};

fn skins(status: LiveStatus) -> Result<SkinsStatus, Box<dyn std::error::Error>> {
    match status {
        LiveStatus::Skins(status) => Ok(status),
        other => Err(format!("expected skins status, got {other:?}").into()),
    }
}

fn everyone(hole_number: u8, strokes: u8) -> Vec<Score> {
    hole(
        hole_number,
        &[("p1", strokes), ("p2", strokes), ("p3", strokes), ("p4", strokes)],
    )
}

#[test]
fn tie_carries_into_the_next_skin() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(SKINS)?;
    snapshot.scores = hole(1, &[("p1", 3), ("p2", 3), ("p3", 4), ("p4", 5)]);

    let status = skins(compute_status(&snapshot)?)?;
    assert_eq!(status.holes[0].outcome, SkinOutcome::Carried { carried_skins: 1 });
    assert_eq!(status.carryover, 1);
    assert_eq!(status.value_at_stake, 400);
    assert!(compute_settlements(&snapshot)?.is_empty());

    snapshot
        .scores
        .extend(hole(2, &[("p1", 4), ("p2", 4), ("p3", 3), ("p4", 4)]));
    let status = skins(compute_status(&snapshot)?)?;
    assert_eq!(
        status.holes[1].outcome,
        SkinOutcome::Won {
            player_id: PlayerId::from("p3"),
            skins: 2,
            value: 400
        }
    );
    assert_eq!(status.carryover, 0);
    assert_eq!(status.value_at_stake, 200);
    assert_eq!(status.paid_out, 400);
    assert_eq!(status.players[2].skins_won, 2);
    assert_eq!(status.players[2].winnings, 400);

    // the group funds the pot evenly: each of the other three owes $1
    let settlements = compute_settlements(&snapshot)?;
    assert_well_formed(&settlements);
    assert_eq!(settlements.len(), 3);
    for s in &settlements {
        assert_eq!(s.to_player, PlayerId::from("p3"));
        assert_eq!(s.amount, 100);
        assert_eq!(s.breakdown[0].label, "Hole 2 skins (2)");
    }
    assert_eq!(settlements[0].from_player, PlayerId::from("p1"));
    Ok(())
}

#[test]
fn incomplete_hole_stops_the_run() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(SKINS)?;
    snapshot.scores = everyone(1, 4);
    // hole 2 is missing p4, so hole 3 cannot be decided yet
    snapshot
        .scores
        .extend(hole(2, &[("p1", 3), ("p2", 4), ("p3", 4)]));
    snapshot
        .scores
        .extend(hole(3, &[("p1", 3), ("p2", 4), ("p3", 4), ("p4", 4)]));

    let status = skins(compute_status(&snapshot)?)?;
    assert_eq!(status.holes.len(), 1);
    assert_eq!(status.carryover, 1);
    assert_eq!(status.paid_out, 0);
    Ok(())
}

#[test]
fn final_tie_splits_the_carryover() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(SKINS)?;
    if let rusty_golf_games::model::GameFormat::Skins(settings) = &mut snapshot.settings.format {
        settings.split_final_ties = true;
    }
    snapshot.scores = (1..=17).flat_map(|h| everyone(h, 4)).collect();
    snapshot
        .scores
        .extend(hole(18, &[("p1", 3), ("p2", 3), ("p3", 4), ("p4", 4)]));

    let status = skins(compute_status(&snapshot)?)?;
    assert_eq!(
        status.holes[17].outcome,
        SkinOutcome::Split {
            player_ids: vec![PlayerId::from("p1"), PlayerId::from("p2")],
            skins: 18,
            value: 3600
        }
    );
    assert_eq!(status.carryover, 0);
    assert_eq!(status.value_at_stake, 0);
    assert_eq!(status.paid_out, 3600);
    assert_eq!(status.forfeited, 0);

    let settlements = compute_settlements(&snapshot)?;
    assert_well_formed(&settlements);
    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0].from_player, PlayerId::from("p3"));
    assert_eq!(settlements[0].to_player, PlayerId::from("p1"));
    assert_eq!(settlements[0].amount, 900);
    assert_eq!(settlements[0].breakdown[0].label, "Hole 18 split (18 skins)");
    assert_eq!(settlements[1].from_player, PlayerId::from("p4"));
    assert_eq!(settlements[1].to_player, PlayerId::from("p2"));
    Ok(())
}

#[test]
fn unsplit_final_carryover_is_forfeited() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(SKINS)?;
    snapshot.scores = (1..=18).flat_map(|h| everyone(h, 4)).collect();

    let status = skins(compute_status(&snapshot)?)?;
    assert_eq!(
        status.holes[17].outcome,
        SkinOutcome::Forfeited {
            skins: 18,
            value: 3600
        }
    );
    // every skin is either paid or forfeited
    assert_eq!(status.paid_out + status.forfeited, 18 * 200);
    assert!(compute_settlements(&snapshot)?.is_empty());
    Ok(())
}

#[test]
fn ties_are_voided_without_carryovers() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(SKINS)?;
    if let rusty_golf_games::model::GameFormat::Skins(settings) = &mut snapshot.settings.format {
        settings.allow_carryovers = false;
    }
    snapshot.scores = everyone(1, 4);
    snapshot
        .scores
        .extend(hole(2, &[("p1", 4), ("p2", 4), ("p3", 3), ("p4", 4)]));

    let status = skins(compute_status(&snapshot)?)?;
    assert_eq!(status.holes[0].outcome, SkinOutcome::Voided { value: 200 });
    assert_eq!(
        status.holes[1].outcome,
        SkinOutcome::Won {
            player_id: PlayerId::from("p3"),
            skins: 1,
            value: 200
        }
    );
    assert_eq!(status.forfeited, 200);
    assert_eq!(status.carryover, 0);
    Ok(())
}

#[test]
fn ending_early_settles_the_open_carryover() -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = load(SKINS)?;
    if let rusty_golf_games::model::GameFormat::Skins(settings) = &mut snapshot.settings.format {
        settings.split_final_ties = true;
    }
    snapshot.scores = hole(1, &[("p1", 3), ("p2", 3), ("p3", 4), ("p4", 5)]);
    snapshot.round = RoundState::EndedEarly;

    let status = skins(compute_status(&snapshot)?)?;
    assert!(status.progress.round_complete);
    assert!(matches!(status.holes[0].outcome, SkinOutcome::Split { skins: 1, .. }));

    let settlements = compute_settlements(&snapshot)?;
    assert_well_formed(&settlements);
    let total: i64 = settlements.iter().map(|s| s.amount).sum();
    assert_eq!(total, 100);
    assert!(
        settlements
            .iter()
            .all(|s| s.to_player == PlayerId::from("p1") || s.to_player == PlayerId::from("p2"))
    );
    Ok(())
}
