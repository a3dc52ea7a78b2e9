use hawkins_battleship::events::{GameEvent, RecordingSink};
use hawkins_battleship::{
    BoardError, GameConfig, HumanPlayer, MatchController, MatchError, Orientation,
    PlacementStrategy, Player, ReportKind, Side, BOARD_SIZE, CLASSIC_FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn fixed_config() -> GameConfig {
    GameConfig {
        human_placement: PlacementStrategy::Fixed,
        ..GameConfig::default()
    }
}

/// Sweep the computer's board row by row until someone wins.
fn play_out(controller: &mut MatchController) {
    let cells = (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)));
    for (r, c) in cells {
        assert!(controller.is_player_turn());
        let report = controller.process_player_attack(r, c).unwrap();
        if report.game_over {
            return;
        }
        controller.switch_turn().unwrap();
        let reply = controller.process_computer_attack().unwrap();
        assert_ne!(reply.kind, ReportKind::NoTarget);
        if reply.game_over {
            return;
        }
        controller.switch_turn().unwrap();
    }
    panic!("a full sweep must end the match");
}

#[test]
fn test_initial_status() {
    let controller = MatchController::with_seed(&fixed_config(), 1).unwrap();
    let status = controller.get_game_status();
    assert_eq!(status, controller.get_game_status());
    assert_eq!(status.turn, 0);
    assert_eq!(status.current_player, "You");
    assert_eq!(status.player_ships_remaining, 5);
    assert_eq!(status.player_ships_total, 5);
    assert_eq!(status.computer_ships_remaining, 5);
    assert_eq!(status.computer_ships_total, 5);
    assert!(!status.finished);
    assert_eq!(status.winner, None);
    assert!(controller.is_player_turn());
    assert!(controller.end_of_match_summary().is_none());
}

#[test]
fn test_attack_positions() {
    let mut controller = MatchController::with_seed(&fixed_config(), 2).unwrap();
    assert!(controller.is_valid_attack_position(0, 0));
    assert!(!controller.is_valid_attack_position(10, 0));
    assert!(!controller.is_valid_attack_position(0, 10));

    assert_eq!(
        controller.process_player_attack(10, 0),
        Err(MatchError::Board(BoardError::OutOfBounds { row: 10, col: 0 }))
    );

    let report = controller.process_player_attack(0, 0).unwrap();
    assert_eq!(report.coord, Some((0, 0)));
    assert!(matches!(report.kind, ReportKind::Hit | ReportKind::Water));
    assert!(!controller.is_valid_attack_position(0, 0));
}

#[test]
fn test_out_of_turn() {
    let mut controller = MatchController::with_seed(&fixed_config(), 3).unwrap();
    assert_eq!(
        controller.process_computer_attack(),
        Err(MatchError::OutOfTurn)
    );
    controller.process_player_attack(4, 4).unwrap();
    controller.switch_turn().unwrap();
    assert!(!controller.is_player_turn());
    assert_eq!(
        controller.process_player_attack(5, 5),
        Err(MatchError::OutOfTurn)
    );

    let reply = controller.process_computer_attack().unwrap();
    let (r, c) = reply.coord.unwrap();
    assert!(controller.player().board().is_attacked(r, c));
    assert_eq!(controller.get_game_status().current_player, "Computer");
}

#[test]
fn test_repeated_attack_message() {
    let mut controller = MatchController::with_seed(&fixed_config(), 4).unwrap();
    controller.process_player_attack(2, 2).unwrap();
    controller.switch_turn().unwrap();
    controller.process_computer_attack().unwrap();
    controller.switch_turn().unwrap();

    let report = controller.process_player_attack(2, 2).unwrap();
    assert_eq!(report.kind, ReportKind::AlreadyAttacked);
    assert_eq!(report.message, "You already attacked this position!");
}

#[test]
fn test_full_match_and_summary() {
    for seed in [10, 11, 12] {
        let mut controller = MatchController::with_seed(&fixed_config(), seed).unwrap();
        play_out(&mut controller);

        assert!(controller.finished());
        let winner = controller.winner().unwrap();
        let status = controller.get_game_status();
        assert!(status.finished);

        let summary = controller.end_of_match_summary().unwrap();
        assert_eq!(summary.player_name, "You");
        assert_eq!(summary.won, winner == Side::One);
        assert_eq!(summary.turns, status.turn);
        assert_eq!(summary.ships_remaining, status.player_ships_remaining);
        assert_eq!(summary.ships_destroyed, 5 - status.computer_ships_remaining);
        assert!((0.0..=1.0).contains(&summary.accuracy));
        if summary.won {
            assert_eq!(summary.ships_destroyed, 5);
            assert_eq!(status.winner.as_deref(), Some("You"));
        } else {
            assert_eq!(summary.ships_remaining, 0);
            assert_eq!(status.winner.as_deref(), Some("Computer"));
        }

        let after = controller.process_player_attack(9, 9).unwrap();
        assert_eq!(after.kind, ReportKind::MatchOver);
        assert!(after.game_over);
        let after = controller.process_computer_attack().unwrap();
        assert_eq!(after.kind, ReportKind::MatchOver);
    }
}

#[test]
fn test_same_seed_same_match() {
    let mut a = MatchController::with_seed(&GameConfig::default(), 99).unwrap();
    let mut b = MatchController::with_seed(&GameConfig::default(), 99).unwrap();
    assert_eq!(a.player().board(), b.player().board());
    assert_eq!(a.computer().board(), b.computer().board());
    play_out(&mut a);
    play_out(&mut b);
    assert_eq!(a.game().history(), b.game().history());
    assert_eq!(a.end_of_match_summary(), b.end_of_match_summary());
}

#[test]
fn test_prepared_human_board_is_kept() {
    let mut human = HumanPlayer::new(
        "Eleven",
        &CLASSIC_FLEET,
        PlacementStrategy::Random,
        SmallRng::seed_from_u64(1),
    );
    for (i, &def) in CLASSIC_FLEET.iter().enumerate() {
        human.place_ship(def, 0, 2 * i, Orientation::Vertical).unwrap();
    }
    let layout = human.board().clone();

    let controller =
        MatchController::new(&GameConfig::default(), Some(human), SmallRng::seed_from_u64(2)).unwrap();
    assert_eq!(controller.player().board(), &layout);
    assert_eq!(controller.player().name(), "Eleven");
}

#[test]
fn test_unplaceable_fleet_refuses_to_start() {
    let config = GameConfig {
        human_placement: PlacementStrategy::Fixed,
        placement_attempts: 0,
        ..GameConfig::default()
    };
    let sink = RecordingSink::new();
    let result =
        MatchController::with_events(&config, None, SmallRng::seed_from_u64(5), sink.clone());
    let err = result.err().expect("start must fail");
    assert_eq!(
        err,
        MatchError::IncompleteFleet {
            player: "Computer".to_string(),
            unplaced: 5
        }
    );

    let failures = sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::PlacementFailed { player, .. } if player == "Computer"))
        .count();
    assert_eq!(failures, 5);
}

#[test]
fn test_partial_fleet_allowed_when_configured() {
    let config = GameConfig {
        human_placement: PlacementStrategy::Fixed,
        placement_attempts: 0,
        require_full_fleet: false,
        ..GameConfig::default()
    };
    let mut controller = MatchController::with_seed(&config, 6).unwrap();
    assert!(!controller.computer().board().has_ships());

    // no enemy ships means the first shot wins
    let report = controller.process_player_attack(0, 0).unwrap();
    assert!(report.game_over);
    assert_eq!(report.message, "YOU WIN! You destroyed every enemy ship!");
    assert_eq!(controller.winner(), Some(Side::One));
}

fn lone_destroyer() -> HumanPlayer {
    let mut human = HumanPlayer::new(
        "Eleven",
        &CLASSIC_FLEET,
        PlacementStrategy::Random,
        SmallRng::seed_from_u64(8),
    );
    human
        .place_ship(CLASSIC_FLEET[4], 0, 0, Orientation::Horizontal)
        .unwrap();
    human
}

#[test]
fn test_partial_prepared_fleet_refuses_to_start() {
    let result = MatchController::new(
        &GameConfig::default(),
        Some(lone_destroyer()),
        SmallRng::seed_from_u64(9),
    );
    let err = result.err().expect("start must fail");
    assert_eq!(
        err,
        MatchError::IncompleteFleet {
            player: "Eleven".to_string(),
            unplaced: 4
        }
    );
}

#[test]
fn test_partial_prepared_fleet_allowed_when_configured() {
    let config = GameConfig {
        require_full_fleet: false,
        ..GameConfig::default()
    };
    let controller =
        MatchController::new(&config, Some(lone_destroyer()), SmallRng::seed_from_u64(9)).unwrap();
    let status = controller.get_game_status();
    assert_eq!(status.player_ships_total, 1);
    assert_eq!(status.computer_ships_total, 5);
}
