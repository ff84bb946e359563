use rand::{SeedableRng, rngs::StdRng};
use vote_race::motion::{CENTER_Y, END_X, MAX_VERTICAL_SPEED, MAX_Y, MIN_Y};
use vote_race::trail::TRAIL_LEN;
use vote_race::{
    ROUNDS_PER_SERIES, Race, RoundStatus, Scripted, Side, Start, Tally, TickOutcome, play_series,
};

fn assert_invariants(race: &Race) {
    let tally = race.tally();
    assert_eq!(tally.red() + tally.blue(), race.rounds());
    assert!(race.rounds() <= ROUNDS_PER_SERIES);
    assert!(race.trail().len() <= TRAIL_LEN);
    assert!(race.momentum().abs() <= MAX_VERTICAL_SPEED);
    assert!((MIN_Y..=MAX_Y).contains(&race.position().y));
}

/// Tick a started round until it resolves, checking invariants each tick.
fn finish_round(race: &mut Race, rng: &mut StdRng) -> Side {
    loop {
        let outcome = race.tick(rng);
        assert_invariants(race);
        match outcome {
            TickOutcome::Resolved(resolution) => return resolution.winner,
            TickOutcome::Moved => assert_eq!(race.status(), RoundStatus::Playing),
            TickOutcome::Idle => panic!("round stopped playing without resolving"),
        }
    }
}

#[test]
fn invariants_hold_across_several_series() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut race = Race::new();
    for _ in 0..3 * ROUNDS_PER_SERIES {
        assert!(matches!(race.start_round(), Start::Began { .. }));
        assert_invariants(&race);
        finish_round(&mut race, &mut rng);
    }
    assert!(race.series_complete());
}

#[test]
fn winner_matches_final_half_plane() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut race = Race::new();
    for _ in 0..ROUNDS_PER_SERIES {
        race.start_round();
        let winner = finish_round(&mut race, &mut rng);
        let end = race.position();
        assert!(end.x >= END_X);
        let expected = if end.y < CENTER_Y { Side::Red } else { Side::Blue };
        assert_eq!(winner, expected);
    }
}

#[test]
fn same_seed_replays_same_series() {
    let first = play_series(&mut StdRng::seed_from_u64(77));
    let second = play_series(&mut StdRng::seed_from_u64(77));
    assert_eq!(first, second);
    assert_eq!(first.winners.len(), ROUNDS_PER_SERIES as usize);
    assert_eq!(first.tally.total(), ROUNDS_PER_SERIES);
}

#[test]
fn same_seed_replays_same_trajectory() {
    let trace = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut race = Race::new();
        race.start_round();
        let mut points = Vec::new();
        while let TickOutcome::Moved = race.tick(&mut rng) {
            points.push(race.position());
        }
        points
    };
    assert_eq!(trace(5), trace(5));
}

#[test]
fn forced_climb_resolves_red() {
    let mut race = Race::new();
    race.start_round();
    let mut climb = Scripted::new(vec![0.0]);
    let resolution = loop {
        if let TickOutcome::Resolved(r) = race.tick(&mut climb) {
            break r;
        }
    };
    assert_eq!(resolution.winner, Side::Red);
    assert_eq!(race.tally().red(), 1);
    assert_eq!(race.rounds(), 1);
    assert_eq!(race.status(), RoundStatus::Finished);
}

#[test]
fn six_four_series_predicts_red() {
    let mut race = Race::new();
    for _ in 0..6 {
        race.run_round(&mut Scripted::new(vec![0.0]));
    }
    for _ in 0..4 {
        race.run_round(&mut Scripted::new(vec![0.0, 0.99, 0.99]));
    }
    assert_eq!(race.tally().red(), 6);
    assert_eq!(race.tally().blue(), 4);
    assert_eq!(race.final_result(), Some(Side::Red));
}

#[test]
fn restart_after_result_clears_series() {
    let mut race = Race::new();
    for _ in 0..ROUNDS_PER_SERIES {
        race.run_round(&mut Scripted::calm());
    }
    assert_eq!(race.final_result(), Some(Side::Blue));

    race.start_round();
    assert_eq!(race.rounds(), 0);
    assert_eq!(race.tally(), Tally::new());
    assert_eq!(race.final_result(), None);
    assert_eq!(race.status(), RoundStatus::Playing);
}

#[test]
fn five_five_tie_predicts_blue() {
    let mut race = Race::new();
    for _ in 0..5 {
        race.run_round(&mut Scripted::new(vec![0.0]));
        race.run_round(&mut Scripted::calm());
    }
    assert_eq!(race.final_result(), Some(Side::Blue));
}

#[test]
fn finished_round_ignores_ticks() {
    let mut race = Race::new();
    race.run_round(&mut Scripted::calm());
    let end = race.position();
    assert_eq!(race.tick(&mut Scripted::new(vec![0.0])), TickOutcome::Idle);
    assert_eq!(race.position(), end);
    assert_eq!(race.rounds(), 1);
}
