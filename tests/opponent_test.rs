//! Tests for the automated opponent.

use fillshape::{AiPlayer, Coord, DEFAULT_EPSILON, OpponentError, Player, Variant};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

#[test]
fn test_default_epsilon() {
    let ai = AiPlayer::new(Player::One);
    assert_eq!(ai.epsilon(), DEFAULT_EPSILON);
    assert_eq!(ai.piece(), Player::One);
}

#[test]
fn test_refuses_out_of_turn() {
    let engine = Variant::TicTacToe.config().build_engine().expect("Valid variant");
    let mut rng = StdRng::seed_from_u64(1);
    let result =
        AiPlayer::new(Player::Two).choose_move(&engine, &fillshape::NeutralEvaluator, &mut rng);
    assert_eq!(
        result,
        Err(OpponentError::WrongPlayer {
            piece: Player::Two,
            to_move: Player::One
        })
    );
}

#[test]
fn test_refuses_finished_game() {
    let mut engine = Variant::TicTacToe.config().build_engine().expect("Valid variant");
    for (r, c) in [(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)] {
        engine.try_move(r, c).expect("Valid move");
    }
    let mut rng = StdRng::seed_from_u64(1);
    let result = AiPlayer::new(engine.piece_to_move()).choose_move(
        &engine,
        &fillshape::NeutralEvaluator,
        &mut rng,
    );
    assert!(matches!(result, Err(OpponentError::NotInProgress(_))));
}

#[test]
fn test_picks_best_move_for_player_one() {
    let engine = Variant::TicTacToe.config().build_engine().expect("Valid variant");
    // Rewards player 1 for holding the center.
    let evaluator = |occupancy: &[u8], _rows: usize, columns: usize| -> f32 {
        if occupancy[columns + 1] == 1 { 1.0 } else { 0.0 }
    };
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..10 {
        let choice = AiPlayer::new(Player::One)
            .choose_move(&engine, &evaluator, &mut rng)
            .expect("Move available");
        assert_eq!(choice, Coord::new(1, 1));
    }
}

#[test]
fn test_player_two_minimizes_score() {
    let mut engine = Variant::TicTacToe.config().build_engine().expect("Valid variant");
    engine.try_move(1, 1).expect("Valid move");
    // Scores are from player 1's view: a player-2 corner at (2, 2) is bad for player 1.
    let evaluator = |occupancy: &[u8], _rows: usize, _columns: usize| -> f32 {
        if occupancy[8] == 2 { -1.0 } else { 0.0 }
    };
    let mut rng = StdRng::seed_from_u64(3);
    let choice = AiPlayer::new(Player::Two)
        .choose_move(&engine, &evaluator, &mut rng)
        .expect("Move available");
    assert_eq!(choice, Coord::new(2, 2));
}

#[test]
fn test_epsilon_keeps_near_best_moves() {
    let engine = Variant::TicTacToe.config().build_engine().expect("Valid variant");
    // First row scores 1.0, second 0.9, third 0.0.
    let evaluator = |occupancy: &[u8], _rows: usize, columns: usize| -> f32 {
        let i = occupancy.iter().position(|&v| v == 1).unwrap_or(0);
        match i / columns {
            0 => 1.0,
            1 => 0.9,
            _ => 0.0,
        }
    };
    let mut rng = StdRng::seed_from_u64(11);
    let ai = AiPlayer::new(Player::One);
    let rows_seen: HashSet<usize> = (0..200)
        .map(|_| ai.choose_move(&engine, &evaluator, &mut rng).expect("Move").row)
        .collect();
    assert_eq!(rows_seen, HashSet::from([0, 1]));

    let strict = ai.with_epsilon(0.0);
    for _ in 0..50 {
        let choice = strict.choose_move(&engine, &evaluator, &mut rng).expect("Move");
        assert_eq!(choice.row, 0);
    }
}

#[test]
fn test_invalid_epsilon_clamps_to_best_moves_only() {
    let engine = Variant::TicTacToe.config().build_engine().expect("Valid variant");
    // Only the center scores.
    let evaluator = |occupancy: &[u8], _rows: usize, columns: usize| -> f32 {
        if occupancy[columns + 1] == 1 { 1.0 } else { 0.0 }
    };
    let mut rng = StdRng::seed_from_u64(13);
    for epsilon in [-0.5, f32::NAN, f32::NEG_INFINITY] {
        let ai = AiPlayer::new(Player::One).with_epsilon(epsilon);
        assert_eq!(ai.epsilon(), 0.0);
        for _ in 0..20 {
            let choice = ai.choose_move(&engine, &evaluator, &mut rng).expect("Move");
            assert_eq!(choice, Coord::new(1, 1));
        }
    }
}

#[test]
fn test_choice_is_always_valid_and_engine_untouched() {
    let mut engine = Variant::TicTacToe4.config().build_engine().expect("Valid variant");
    let mut rng = StdRng::seed_from_u64(5);
    while !engine.state().is_terminal() {
        let before = engine.occupancy();
        let choice = AiPlayer::new(engine.piece_to_move())
            .choose_move(&engine, &fillshape::NeutralEvaluator, &mut rng)
            .expect("Move available");
        assert_eq!(engine.occupancy(), before);
        assert!(engine.valid_move(choice.row, choice.column));
        engine.try_move(choice.row, choice.column).expect("Valid move");
    }
}
