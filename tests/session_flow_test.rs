//! Whole-round flows through the session controller: countdown, keyboard
//! and swipe input, the tick schedule, and the end-of-round summary.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slither::arena::{Board, Direction, EffectKind, FoodEffectPolicy};
use slither::core::GameConfig;
use slither::input::{RawKey, ScreenPoint, ScreenSize};
use slither::session::{SessionController, SessionPhase};

const BOARD: Board = Board {
    width: 40,
    height: 30,
};

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn two_player_session() -> SessionController {
    SessionController::new(GameConfig {
        players: 2,
        food_effect: FoodEffectPolicy::Fixed(EffectKind::Food),
        ..Default::default()
    })
}

/// Player 1 runs right along row 16 starting at x = 5; player 2 runs left
/// along row 14 starting at x = 34. Turning player 2 down after 15 ticks
/// drops its head onto player 1's body two ticks later.
#[test]
fn test_full_round_to_summary() {
    let mut rng = test_rng();
    let mut session = two_player_session();
    session.start_round(BOARD, 0, &mut rng);

    let round = session.round().unwrap();
    assert_eq!(round.snakes[0].head().map(|p| (p.x, p.y)), Some((5, 16)));
    assert_eq!(round.snakes[1].head().map(|p| (p.x, p.y)), Some((34, 14)));
    assert_eq!(round.snakes[0].len(), 6);

    assert!(session.update(BOARD, 1_999, &mut rng).is_empty());
    assert_eq!(session.countdown_remaining(1_999), Some(1));
    assert_eq!(session.ticks(), 0);

    let interval = session.tick_interval_ms();
    assert_eq!(interval, 40);

    let mut now = 2_000;
    for tick in 1..=17 {
        if tick == 16 {
            assert!(session.handle_key(RawKey::Char('s')));
        }
        session.update(BOARD, now, &mut rng);
        now += interval;
    }

    assert_eq!(session.ticks(), 17);
    let round = session.round().unwrap();
    assert!(round.snakes[0].alive);
    assert!(!round.snakes[1].alive);
    assert!(round.is_ending());
    assert_eq!(session.phase(), SessionPhase::Playing);

    for _ in 0..20 {
        if session.phase() == SessionPhase::Summary {
            break;
        }
        session.update(BOARD, now, &mut rng);
        now += interval;
    }
    assert_eq!(session.phase(), SessionPhase::Summary);

    let summary = session.summary().unwrap();
    assert_eq!(summary.survivor, Some(0));
    assert_eq!(summary.death_order, vec![1]);
    assert_eq!(summary.players[0].kills, 1);
    assert_eq!(summary.headline(), "Player 1 wins!");
    assert_eq!(
        summary.death_order_text(),
        "The order of death was Players 2."
    );

    let message = session.message(now).unwrap();
    assert_eq!(message.text, "Nice.");

    // Input is ignored once the round is over
    assert!(!session.handle_key(RawKey::Up));
    let ticks = session.ticks();
    session.update(BOARD, now + 1_000, &mut rng);
    assert_eq!(session.ticks(), ticks);
}

#[test]
fn test_rematch_resets_round() {
    let mut rng = test_rng();
    let mut session = two_player_session();
    session.start_round(BOARD, 0, &mut rng);
    for step in 0..10 {
        session.update(BOARD, 2_000 + step * 40, &mut rng);
    }
    assert_eq!(session.ticks(), 10);

    session.start_round(BOARD, 10_000, &mut rng);
    assert_eq!(session.phase(), SessionPhase::Countdown { until: 12_000 });
    assert_eq!(session.ticks(), 0);
    assert!(session.summary().is_none());
    assert!(session.message(10_000).is_none());
    let round = session.round().unwrap();
    assert!(round.snakes.iter().all(|s| s.alive));
    assert_eq!(round.foods.len(), 1);
}

#[test]
fn test_stall_runs_one_tick_and_reschedules() {
    let mut rng = test_rng();
    let mut session = two_player_session();
    session.start_round(BOARD, 0, &mut rng);

    session.update(BOARD, 2_000, &mut rng);
    // A long stall still produces a single tick
    session.update(BOARD, 2_500, &mut rng);
    assert_eq!(session.ticks(), 2);
    session.update(BOARD, 2_539, &mut rng);
    assert_eq!(session.ticks(), 2);
    session.update(BOARD, 2_540, &mut rng);
    assert_eq!(session.ticks(), 3);
}

#[test]
fn test_swipe_steers_top_half_player() {
    let mut rng = test_rng();
    let mut session = two_player_session();
    session.start_round(BOARD, 0, &mut rng);
    let screen = ScreenSize::new(80, 80);

    // Top half belongs to player 2, who is heading left
    session.touch_start(7, ScreenPoint::new(40, 10));
    assert!(session.touch_end(7, ScreenPoint::new(42, 30), screen));
    assert_eq!(session.round().unwrap().snakes[1].direction, Direction::Down);

    // Bottom half is player 1; swiping straight back is a reversal
    session.touch_start(8, ScreenPoint::new(40, 60));
    assert!(!session.touch_end(8, ScreenPoint::new(10, 60), screen));
    assert_eq!(session.round().unwrap().snakes[0].direction, Direction::Right);

    // Diagonal swipes are ambiguous
    session.touch_start(9, ScreenPoint::new(40, 60));
    assert!(!session.touch_end(9, ScreenPoint::new(50, 70), screen));
}

#[test]
fn test_keys_for_missing_players_are_ignored() {
    let mut rng = test_rng();
    let mut session = two_player_session();
    session.start_round(BOARD, 0, &mut rng);

    // IJKL belongs to player 3, who is not in this round
    assert!(!session.handle_key(RawKey::Char('k')));
    assert!(session.handle_key(RawKey::Char('W')));
    assert_eq!(session.round().unwrap().snakes[1].direction, Direction::Up);
    assert!(session.handle_key(RawKey::Down));
    assert_eq!(session.round().unwrap().snakes[0].direction, Direction::Down);
}

#[test]
fn test_abandon_returns_to_idle() {
    let mut rng = test_rng();
    let mut session = two_player_session();
    session.start_round(BOARD, 0, &mut rng);
    session.abandon();

    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.round().is_none());
    assert!(!session.accepts_input());
    assert!(session.update(BOARD, 5_000, &mut rng).is_empty());
}
