use glam::Vec2;

use gorillas::Settings;
use gorillas::sim::{
    FlightToken, FrameOutcome, GamePhase, GameStateMachine, Player, TickOutcome, Viewport,
};

const FRAME_MS: f64 = 16.0;

fn machine(seed: u64) -> GameStateMachine {
    GameStateMachine::new(seed, Settings::default(), Viewport::new(1280.0, 720.0).unwrap())
}

/// Drive animation frames until the throw stops requesting more
fn run_frames(m: &mut GameStateMachine, token: FlightToken) -> FrameOutcome {
    let mut time = 1000.0;
    for _ in 0..100_000 {
        let outcome = m.animation_frame(token, time);
        if !outcome.keep_running() {
            return outcome;
        }
        time += FRAME_MS;
    }
    panic!("throw never resolved");
}

// ── single throw ──────────────────────────────────────────────────────────────

#[test]
fn test_throw_resolves_to_turn_or_win() {
    for seed in [1, 7, 42, 12345, 987_654_321] {
        let mut m = machine(seed);
        m.new_game();
        assert!(m.set_aim(Vec2::new(-50.0, 80.0)));
        let token = m.release().expect("aiming player can throw");
        assert_eq!(m.state().phase, GamePhase::InFlight);

        match run_frames(&mut m, token) {
            FrameOutcome::Ticked(TickOutcome::TurnEnded { next }) => {
                let s = m.state();
                assert_eq!(next, Player::Two);
                assert_eq!(s.phase, GamePhase::Aiming);
                assert_eq!(s.current_player, Player::Two);
                assert_eq!(s.projectile.pos, s.hand_position(Player::Two));
                assert_eq!(s.projectile.velocity, Vec2::ZERO);
                assert_eq!(s.winner, None);
            }
            FrameOutcome::Ticked(TickOutcome::RoundEnded { winner }) => {
                let s = m.state();
                assert_eq!(winner, Player::One);
                assert_eq!(s.phase, GamePhase::Celebrating);
                assert_eq!(s.winner, Some(Player::One));
            }
            other => panic!("seed {}: unexpected outcome {:?}", seed, other),
        }

        // The readout of the thrower survives the turn change
        let readout = m.state().readout(Player::One);
        assert_eq!((readout.angle, readout.speed), (58, 94));
    }
}

#[test]
fn test_first_frame_only_anchors() {
    let mut m = machine(3);
    m.set_aim(Vec2::new(-50.0, 80.0));
    let token = m.release().unwrap();
    let start = m.state().projectile.pos;

    assert_eq!(m.animation_frame(token, 500.0), FrameOutcome::Anchored);
    assert_eq!(m.state().projectile.pos, start);

    assert_eq!(m.animation_frame(token, 516.0), FrameOutcome::Ticked(TickOutcome::Continue));
    assert_ne!(m.state().projectile.pos, start);
}

// ── input adapter flow ────────────────────────────────────────────────────────

#[test]
fn test_drag_gesture_throws() {
    let mut m = machine(99);
    assert!(!m.on_drag_move(-10.0, 10.0), "moves without a drag are ignored");

    assert!(m.on_drag_start());
    assert!(m.on_drag_move(-30.0, 40.0));
    assert!(m.on_drag_move(-50.0, 80.0));
    let token = m.on_drag_end().expect("drag end throws");

    assert!(m.is_current(token));
    assert_eq!(m.state().projectile.velocity, Vec2::new(50.0, 80.0));
    assert_eq!(m.on_drag_end(), None, "a second release does nothing");
}

#[test]
fn test_no_drag_during_flight() {
    let mut m = machine(5);
    m.set_aim(Vec2::new(-50.0, 80.0));
    m.release().unwrap();

    assert!(!m.on_drag_start());
    assert!(!m.set_aim(Vec2::new(-10.0, 10.0)));
    assert_eq!(m.release(), None);
}

#[test]
fn test_new_game_invalidates_flight() {
    let mut m = machine(11);
    m.set_aim(Vec2::new(-50.0, 80.0));
    let token = m.release().unwrap();
    m.animation_frame(token, 0.0);

    m.on_new_game_requested();
    assert_eq!(m.animation_frame(token, 16.0), FrameOutcome::Stale);
    assert!(!FrameOutcome::Stale.keep_running());

    let s = m.state();
    assert_eq!(s.phase, GamePhase::Aiming);
    assert_eq!(s.current_player, Player::One);
    assert!(s.craters.is_empty());
    assert_eq!(s.winner, None);
}

#[test]
fn test_resize_refits_world() {
    let mut m = machine(21);
    let city_width = m.state().city.total_width();

    assert!(m.on_resize(640.0, 480.0));
    assert!((m.state().world_width() - city_width).abs() < 0.05);
    assert!((m.state().scale * city_width - 640.0).abs() < 0.05);

    let scale = m.state().scale;
    assert!(!m.on_resize(0.0, 480.0));
    assert!(!m.on_resize(640.0, -1.0));
    assert_eq!(m.state().scale, scale);
}

// ── full match ────────────────────────────────────────────────────────────────

#[test]
fn test_turns_alternate_until_a_win() {
    let mut m = machine(2024);
    let mut expected = Player::One;

    for throw in 0..60 {
        assert_eq!(m.state().current_player, expected);
        let dx = if expected == Player::One { -60.0 } else { 60.0 };
        let dy = 60.0 + (throw % 7) as f32 * 8.0;
        m.set_aim(Vec2::new(dx, dy));
        let token = m.release().unwrap();

        match run_frames(&mut m, token) {
            FrameOutcome::Ticked(TickOutcome::TurnEnded { next }) => {
                assert_eq!(next, expected.opponent());
                expected = next;
            }
            FrameOutcome::Ticked(TickOutcome::RoundEnded { winner }) => {
                assert_eq!(winner, expected);
                assert_eq!(m.state().phase, GamePhase::Celebrating);
                // Celebrating ignores input until a new game
                assert!(!m.on_drag_start());
                m.on_new_game_requested();
                assert_eq!(m.state().phase, GamePhase::Aiming);
                return;
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
