//! Integration test: frame stepping, scoring, eviction and game over.

use flappy::core::constants::*;
use flappy::core::entities::{Obstacle, ObstacleKind};
use flappy::core::rules::{GameRules, Variant};
use flappy::core::session::{CrashCause, GameInput, Session, SessionEvent, SessionState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Running session with no gravity and no spawning, for hand-placed pipes.
fn frozen_session(variant: Variant) -> Session {
    let mut rules = GameRules::for_variant(variant);
    rules.gravity = 0.0;
    let mut session = Session::new(rules, 0.0);
    session.start();
    session.spawner.timer.cancel();
    session.drain_events();
    session
}

/// A pipe well above the bird so it never collides.
fn harmless_pipe(x: f64) -> Obstacle {
    Obstacle::new(ObstacleKind::Upper, x, -2000.0)
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(2024)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_single_frame_of_gravity() {
    let mut session = Session::new(GameRules::for_variant(Variant::Classic), 0.0);
    session.start();
    session.body.y = 100.0;
    session.body.velocity_y = 0.0;

    session.step_frame(&mut rng());

    assert!((session.body.velocity_y - 0.4).abs() < 1e-9);
    assert!((session.body.y - 100.4).abs() < 1e-9);
}

#[test]
fn test_jump_sets_fixed_impulse() {
    for prior in [-6.0, -1.0, 0.0, 3.5, 25.0] {
        let mut session = frozen_session(Variant::Endless);
        session.body.velocity_y = prior;
        session.handle_input(GameInput::Jump);
        assert!((session.body.velocity_y - (-6.0)).abs() < f64::EPSILON);
    }
}

#[test]
fn test_repeated_jumps_have_no_cooldown() {
    let mut session = frozen_session(Variant::Endless);
    for _ in 0..5 {
        session.body.velocity_y = 10.0;
        session.handle_input(GameInput::Jump);
        assert!((session.body.velocity_y - JUMP_IMPULSE).abs() < f64::EPSILON);
    }
}

#[test]
fn test_constant_speed_pipe_evicted_after_204_frames() {
    let mut session = frozen_session(Variant::Classic);
    session.obstacles.push_back(harmless_pipe(750.0));
    let mut rng = rng();

    for _ in 0..203 {
        session.step_frame(&mut rng);
    }
    assert_eq!(session.obstacles.len(), 1, "trailing edge still >= 0");

    session.step_frame(&mut rng);
    assert!(session.obstacles.is_empty());
    assert_eq!(session.state, SessionState::Running);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_bird_never_above_ceiling() {
    let mut session = Session::new(GameRules::for_variant(Variant::Endless), 0.0);
    let mut rng = rng();
    session.handle_input(GameInput::Jump);

    for _ in 0..5_000 {
        if rng.gen_bool(0.15) {
            session.handle_input(GameInput::Jump);
        }
        session.step_frame(&mut rng);
        assert!(session.body.y >= 0.0);
        if session.state == SessionState::Over {
            session.handle_input(GameInput::Jump);
        }
    }
}

#[test]
fn test_each_pipe_scores_half_point_once() {
    let mut session = frozen_session(Variant::Classic);
    for i in 0..6 {
        session.obstacles.push_back(harmless_pipe(200.0 + i as f64 * 80.0));
    }
    let mut rng = rng();

    let mut scored = Vec::new();
    for _ in 0..300 {
        session.step_frame(&mut rng);
        for event in session.drain_events() {
            if let SessionEvent::Scored { score } = event {
                scored.push(score);
            }
        }
    }

    assert_eq!(scored, vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
    assert!((session.score - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_eviction_in_creation_order() {
    let mut session = frozen_session(Variant::Classic);
    let starts = [100.0, 300.0, 500.0];
    for x in starts {
        session.obstacles.push_back(harmless_pipe(x));
    }
    let mut rng = rng();

    let mut remaining = session.obstacles.len();
    for _ in 0..300 {
        session.step_frame(&mut rng);

        // Never evicted while its trailing edge is still on the board
        assert!(session.obstacles.iter().all(|o| !o.is_off_screen()));
        // Oldest first
        let xs: Vec<f64> = session.obstacles.iter().map(|o| o.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));

        if session.obstacles.len() < remaining {
            let evicted = remaining - session.obstacles.len();
            assert_eq!(evicted, 1);
            remaining = session.obstacles.len();
        }
    }
    assert!(session.obstacles.is_empty());
}

#[test]
fn test_pipe_hit_reports_cause() {
    let mut session = frozen_session(Variant::Classic);
    let bird = session.body.clone();
    session
        .obstacles
        .push_back(Obstacle::new(ObstacleKind::Lower, bird.x + bird.width + 1.0, bird.y));

    session.step_frame(&mut rng());

    assert_eq!(session.state, SessionState::Over);
    assert!(session.drain_events().contains(&SessionEvent::GameOver {
        score: 0.0,
        cause: CrashCause::HitPipe,
    }));
}

#[test]
fn test_pipe_just_touching_bird_is_safe() {
    let mut session = frozen_session(Variant::Classic);
    let bird = session.body.clone();
    // Lower pipe whose top edge sits exactly on the bird's bottom edge
    session.obstacles.push_back(Obstacle::new(
        ObstacleKind::Lower,
        bird.x,
        bird.y + bird.height,
    ));

    session.step_frame(&mut rng());
    assert_eq!(session.state, SessionState::Running);
}

#[test]
fn test_high_score_updates_only_when_beaten() {
    let mut session = Session::new(GameRules::for_variant(Variant::Classic), 3.0);
    let mut rng = rng();

    // Equal score: no record
    session.handle_input(GameInput::Jump);
    session.score = 3.0;
    session.body.y = BOARD_HEIGHT + 10.0;
    session.step_frame(&mut rng);
    let events = session.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, SessionEvent::NewHighScore { .. })));
    assert!((session.high_score - 3.0).abs() < f64::EPSILON);

    // Beaten: exactly one record event
    session.handle_input(GameInput::Jump);
    session.score = 4.5;
    session.body.y = BOARD_HEIGHT + 10.0;
    session.step_frame(&mut rng);
    session.step_frame(&mut rng);
    let records: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SessionEvent::NewHighScore { .. }))
        .collect();
    assert_eq!(
        records,
        vec![SessionEvent::NewHighScore {
            score: 4.5,
            previous: 3.0
        }]
    );
    assert!((session.high_score - 4.5).abs() < f64::EPSILON);
}

#[test]
fn test_over_session_does_not_advance() {
    let mut session = frozen_session(Variant::Classic);
    session.state = SessionState::Over;
    let y = session.body.y;
    assert!(!session.tick(100, &mut rng()));
    session.step_frame(&mut rng());
    assert!((session.body.y - y).abs() < f64::EPSILON);
}

#[test]
fn test_restart_on_jump_resets_board() {
    let mut session = Session::new(GameRules::for_variant(Variant::Endless), 0.0);
    let mut rng = rng();
    session.handle_input(GameInput::Jump);
    for _ in 0..200 {
        session.step_frame(&mut rng);
    }
    session.state = SessionState::Over;
    session.score = 2.0;
    session.velocity_x = -9.0;

    session.handle_input(GameInput::Jump);

    assert_eq!(session.state, SessionState::Running);
    assert!(session.obstacles.is_empty());
    assert!(session.score.abs() < f64::EPSILON);
    assert!((session.velocity_x - BASE_VELOCITY_X).abs() < f64::EPSILON);
    assert!((session.body.y - BIRD_START_Y).abs() < f64::EPSILON);
    assert!((session.body.velocity_y - JUMP_IMPULSE).abs() < f64::EPSILON);
}
