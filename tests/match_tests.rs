use hawkins_battleship::events::{GameEvent, RecordingSink};
use hawkins_battleship::{
    AttackOutcome, HumanPlayer, Match, MatchError, MatchState, PlacementStrategy, Player, Side,
    CLASSIC_FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn fixed(name: &str, seed: u64) -> HumanPlayer {
    HumanPlayer::new(
        name,
        &CLASSIC_FLEET,
        PlacementStrategy::Fixed,
        SmallRng::seed_from_u64(seed),
    )
}

fn started() -> Match<HumanPlayer, HumanPlayer> {
    let mut game = Match::new(fixed("Alice", 1), fixed("Bob", 2));
    game.start().unwrap();
    game
}

#[test]
fn test_start_hands_first_move_to_player_one() {
    let game = started();
    assert_eq!(game.state(), MatchState::InProgress);
    assert_eq!(game.current_side(), Side::One);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.current_player().name(), "Alice");
    assert_eq!(game.get_opponent().name(), "Bob");
    assert_eq!(game.player1().board().ships().len(), 5);
    assert_eq!(game.player2().board().ships().len(), 5);
}

#[test]
fn test_lifecycle_errors() {
    let mut game = Match::new(fixed("Alice", 1), fixed("Bob", 2));
    assert_eq!(game.process_turn(0, 0), Err(MatchError::NotStarted));
    assert_eq!(game.switch_player(), Err(MatchError::NotStarted));
    game.start().unwrap();
    assert_eq!(game.start(), Err(MatchError::AlreadyStarted));
}

#[test]
fn test_switch_player_advances_turn() {
    let mut game = started();
    game.process_turn(9, 9).unwrap();
    assert_eq!(game.current_side(), Side::One);
    game.switch_player().unwrap();
    assert_eq!(game.current_side(), Side::Two);
    assert_eq!(game.turn(), 1);
    game.switch_player().unwrap();
    assert_eq!(game.current_side(), Side::One);
    assert_eq!(game.turn(), 2);
}

#[test]
fn test_turn_attacks_opponent_board() {
    let mut game = started();
    let report = game.process_turn(0, 0).unwrap();
    assert_eq!(report.outcome, AttackOutcome::Hit(0));
    assert!(!report.ship_destroyed);
    assert!(game.player2().board().is_attacked(0, 0));
    assert!(!game.player1().board().is_attacked(0, 0));

    let history = game.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].player, "Alice");
    assert_eq!(history[0].coord, (0, 0));
}

#[test]
fn test_sinking_every_ship_ends_match() {
    let sink = RecordingSink::new();
    let mut game = Match::new(fixed("Alice", 1), fixed("Bob", 2)).with_events(sink.clone());
    game.start().unwrap();

    let targets: Vec<_> = game
        .player2()
        .board()
        .ships()
        .iter()
        .flat_map(|s| s.positions().to_vec())
        .collect();
    let (last, rest) = targets.split_last().unwrap();
    for &(r, c) in rest {
        assert!(!game.process_turn(r, c).unwrap().game_over);
    }
    let report = game.process_turn(last.0, last.1).unwrap();
    assert!(report.game_over);
    assert!(report.ship_destroyed);

    assert_eq!(game.winner(), Some(Side::One));
    assert_eq!(game.state(), MatchState::Finished { winner: Side::One });
    assert_eq!(game.current_side(), Side::One);
    assert_eq!(game.process_turn(9, 9), Err(MatchError::Finished));
    assert_eq!(game.switch_player(), Err(MatchError::Finished));

    let status = game.status();
    assert_eq!(status.ships_p2, 0);
    assert_eq!(status.ships_p1, 5);
    assert_eq!(status.winner.as_deref(), Some("Alice"));

    let events = sink.events();
    assert!(matches!(events.first(), Some(GameEvent::MatchStarted { first }) if first == "Alice"));
    assert!(matches!(events.last(), Some(GameEvent::MatchFinished { winner, .. }) if winner == "Alice"));
}

#[test]
fn test_out_of_bounds_turn_is_rejected() {
    let mut game = started();
    assert!(matches!(game.process_turn(0, 10), Err(MatchError::Board(_))));
    assert!(game.history().is_empty());
}

#[test]
fn test_start_checks_prepared_fleets() {
    let mut bob = fixed("Bob", 2);
    bob.place_ship(CLASSIC_FLEET[0], 9, 0, hawkins_battleship::Orientation::Horizontal)
        .unwrap();

    let mut game = Match::new(fixed("Alice", 1), bob);
    assert_eq!(
        game.start(),
        Err(MatchError::IncompleteFleet {
            player: "Bob".to_string(),
            unplaced: 4
        })
    );
    assert_eq!(game.state(), MatchState::NotStarted);
}
