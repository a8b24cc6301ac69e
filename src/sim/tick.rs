//! Turn state machine and the fixed sub-step flight loop
//!
//! The machine owns the only `GameState`. Input adapters call the `on_*`
//! handlers; the animation loop calls `animation_frame` with the token it
//! got from `release` until the returned outcome says to stop.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::character::Player;
use super::city::generate_city;
use super::collision::{Collision, check_collision};
use super::state::{AimReadout, GamePhase, GameState};
use super::viewport::Viewport;
use crate::consts::HIT_DETECTION_SUBSTEPS;
use crate::settings::Settings;

/// Result of advancing one animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing to simulate (not in flight)
    Idle,
    /// Still flying, schedule another frame
    Continue,
    /// Throw missed; `next` is now aiming
    TurnEnded { next: Player },
    /// Throw hit the opponent
    RoundEnded { winner: Player },
}

/// Identifies one throw; stale tokens are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightToken(u64);

/// Result of an animation-frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Callback belongs to a throw that no longer exists
    Stale,
    /// First frame of a throw: timestamp recorded, nothing simulated
    Anchored,
    /// Simulated one frame
    Ticked(TickOutcome),
}

impl FrameOutcome {
    /// Whether the adapter should request another frame
    pub fn keep_running(&self) -> bool {
        matches!(
            self,
            FrameOutcome::Anchored | FrameOutcome::Ticked(TickOutcome::Continue)
        )
    }
}

/// Owns the game state and drives every transition
pub struct GameStateMachine {
    state: GameState,
    settings: Settings,
    rng: Pcg32,
    /// Bumped on every release and new game
    generation: u64,
    /// Timestamp (ms) of the previous frame of the current throw
    previous_frame: Option<f64>,
    dragging: bool,
}

impl GameStateMachine {
    /// Start a machine with a new game already set up
    pub fn new(seed: u64, settings: Settings, viewport: Viewport) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = fresh_round(&mut rng, &settings, viewport);
        log::info!(
            "Game ready: {} buildings, scale {:.3}",
            state.city.buildings.len(),
            state.scale
        );
        Self {
            state,
            settings,
            rng,
            generation: 0,
            previous_frame: None,
            dragging: false,
        }
    }

    /// Read-only view for presentation
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a drag gesture is in progress
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Throw away the round and start over with a fresh city
    pub fn new_game(&mut self) {
        self.generation += 1;
        self.previous_frame = None;
        self.dragging = false;

        self.state = fresh_round(&mut self.rng, &self.settings, self.state.viewport);
        self.start_aiming(Player::One);

        log::info!(
            "New game: {} buildings, scale {:.3}",
            self.state.city.buildings.len(),
            self.state.scale
        );
    }

    /// Hand the projectile to `player` and wait for their aim
    pub fn start_aiming(&mut self, player: Player) {
        self.state.current_player = player;
        let hand = self.state.hand_position(player);
        self.state.projectile.reset_to(hand);
        self.state.phase = GamePhase::Aiming;
    }

    /// Set the throw from a screen-space drag (Y down); ignored unless aiming
    pub fn set_aim(&mut self, drag: Vec2) -> bool {
        if self.state.phase != GamePhase::Aiming {
            log::trace!("Ignoring aim while {:?}", self.state.phase);
            return false;
        }
        self.state.projectile.velocity = Vec2::new(-drag.x, drag.y);
        self.state.readouts[self.state.current_player.index()] = AimReadout::from_drag(drag);
        true
    }

    /// Let go of the projectile; ignored unless aiming
    pub fn release(&mut self) -> Option<FlightToken> {
        if self.state.phase != GamePhase::Aiming {
            log::trace!("Ignoring release while {:?}", self.state.phase);
            return None;
        }
        self.state.phase = GamePhase::InFlight;
        self.generation += 1;
        self.previous_frame = None;

        let v = self.state.projectile.velocity;
        log::debug!(
            "Player {} throws with velocity ({:.0}, {:.0})",
            self.state.current_player.number(),
            v.x,
            v.y
        );
        Some(FlightToken(self.generation))
    }

    /// Whether `token` still refers to the active throw
    #[inline]
    pub fn is_current(&self, token: FlightToken) -> bool {
        token.0 == self.generation && self.state.phase == GamePhase::InFlight
    }

    /// Animation-frame callback for the throw identified by `token`
    ///
    /// The first frame after a release only records `timestamp` (ms); later
    /// frames simulate the time elapsed since the previous one.
    pub fn animation_frame(&mut self, token: FlightToken, timestamp: f64) -> FrameOutcome {
        if !self.is_current(token) {
            return FrameOutcome::Stale;
        }

        let Some(previous) = self.previous_frame.replace(timestamp) else {
            return FrameOutcome::Anchored;
        };
        let elapsed = (timestamp - previous).max(0.0) as f32;
        FrameOutcome::Ticked(self.tick(elapsed))
    }

    /// Advance the flight by `frame_dt` milliseconds in fixed sub-steps
    pub fn tick(&mut self, frame_dt: f32) -> TickOutcome {
        if self.state.phase != GamePhase::InFlight {
            return TickOutcome::Idle;
        }

        let dt = frame_dt / HIT_DETECTION_SUBSTEPS as f32;
        let thrower = self.state.current_player;

        for _ in 0..HIT_DETECTION_SUBSTEPS {
            self.state.projectile.step(thrower, dt);

            let collision = check_collision(&mut self.state);
            if collision.is_miss() {
                let next = thrower.opponent();
                log::info!("Player {} missed ({:?})", thrower.number(), collision);
                self.start_aiming(next);
                return TickOutcome::TurnEnded { next };
            }
            if collision == Collision::CharacterHit {
                self.state.phase = GamePhase::Celebrating;
                self.state.winner = Some(thrower);
                log::info!("Player {} wins", thrower.number());
                return TickOutcome::RoundEnded { winner: thrower };
            }
        }

        TickOutcome::Continue
    }

    /// Pointer pressed on the drag handle
    pub fn on_drag_start(&mut self) -> bool {
        if self.state.phase != GamePhase::Aiming {
            log::trace!("Ignoring drag start while {:?}", self.state.phase);
            return false;
        }
        self.dragging = true;
        true
    }

    /// Pointer moved by (`dx`, `dy`) pixels from where the drag started
    pub fn on_drag_move(&mut self, dx: f32, dy: f32) -> bool {
        self.dragging && self.set_aim(Vec2::new(dx, dy))
    }

    /// Pointer released; throws if a drag was in progress
    pub fn on_drag_end(&mut self) -> Option<FlightToken> {
        if !std::mem::take(&mut self.dragging) {
            return None;
        }
        self.release()
    }

    /// Viewport changed size; non-positive sizes are ignored
    pub fn on_resize(&mut self, width: f32, height: f32) -> bool {
        let Some(viewport) = Viewport::new(width, height) else {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return false;
        };
        self.state.viewport = viewport;
        self.state.refresh_scale()
    }

    /// New-game button
    pub fn on_new_game_requested(&mut self) {
        self.new_game();
    }
}

/// A new city and a round on it, player one aiming
fn fresh_round(rng: &mut Pcg32, settings: &Settings, viewport: Viewport) -> GameState {
    let city = generate_city(rng, settings.background_buildings, settings.buildings);
    GameState::new(city, viewport)
}
