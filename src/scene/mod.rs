//! Scene description for presentation
//!
//! Turns a `GameState` into layered draw lists and a HUD model. Painting is
//! left to the platform adapter; nothing here touches the DOM.

pub mod hud;
pub mod shapes;

pub use hud::Hud;
pub use shapes::{Color, Path, Shape, palette};

use glam::Vec2;

use crate::consts::{AIM_PULLBACK_DIVISOR, ARM_STROKE_WIDTH, BLAST_CRATER_RADIUS};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Player};
use shapes::{circle, ground_rect, stroke};

const MOON_CENTER: Vec2 = Vec2::new(200.0, 550.0);
const MOON_RADIUS: f32 = 60.0;
const MARKER_RADIUS: f32 = 6.0;
const TRAJECTORY_WIDTH: f32 = 4.0;
const TRAJECTORY_DASH: [f32; 2] = [3.0, 8.0];
const FACE_LINE_WIDTH: f32 = 2.0;

/// A circular hole cut out of the foreground layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub center: Vec2,
    pub radius: f32,
}

/// Layers, painted back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// World units to pixels
    pub scale: f32,
    /// Visible world size
    pub world_size: Vec2,
    /// Sky gradient, ground then top of the world
    pub sky: [Color; 2],
    /// Moon and background skyline
    pub background: Vec<Shape>,
    /// Clip holes applied to `foreground` only
    pub holes: Vec<Hole>,
    /// Collidable buildings and their windows
    pub foreground: Vec<Shape>,
    /// Characters and projectile
    pub actors: Vec<Shape>,
}

impl Scene {
    pub fn build(state: &GameState, settings: &Settings) -> Self {
        let world_size = Vec2::new(
            state.viewport.world_width(state.scale),
            state.viewport.world_height(state.scale),
        );

        let mut background = vec![circle(MOON_CENTER, MOON_RADIUS, palette::MOON)];
        background.extend(
            state
                .city
                .background
                .iter()
                .map(|b| ground_rect(b.x, b.width, b.height, palette::BACKGROUND_BUILDING)),
        );

        let holes = state
            .craters
            .iter()
            .map(|c| Hole {
                center: c.center,
                radius: BLAST_CRATER_RADIUS,
            })
            .collect();

        let mut foreground = Vec::new();
        for building in &state.city.buildings {
            foreground.push(ground_rect(
                building.x,
                building.width,
                building.height,
                palette::BUILDING,
            ));
            foreground.extend(building.lit_windows(settings.light_indexing).into_iter().map(
                |w| Shape::Rect {
                    x: w.x,
                    y: w.y,
                    width: w.width,
                    height: w.height,
                    color: palette::WINDOW,
                },
            ));
        }

        let mut actors = Vec::new();
        for player in [Player::One, Player::Two] {
            character(state, player, &mut actors);
        }
        projectile(state, settings, &mut actors);

        Self {
            scale: state.scale,
            world_size,
            sky: [palette::SKY_HORIZON, palette::SKY_ZENITH],
            background,
            holes,
            foreground,
            actors,
        }
    }

    /// Every shape in paint order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.background
            .iter()
            .chain(self.foreground.iter())
            .chain(self.actors.iter())
    }
}

fn character(state: &GameState, player: Player, out: &mut Vec<Shape>) {
    let silhouette = state.silhouette(player);
    let origin = silhouette.origin;

    out.push(Shape::Polygon {
        points: silhouette.body().to_vec(),
        color: palette::CHARACTER,
    });
    for arm in &silhouette.arms {
        out.push(stroke(
            Path::Quadratic {
                start: origin + arm.start,
                control: origin + arm.control,
                end: origin + arm.end,
            },
            ARM_STROKE_WIDTH,
            palette::CHARACTER,
        ));
    }

    // Face
    let at = |x: f32, y: f32| origin + Vec2::new(x, y);
    out.push(circle(at(0.0, 63.0), 9.0, palette::FACE));
    out.push(circle(at(-3.5, 70.0), 4.0, palette::FACE));
    out.push(circle(at(3.5, 70.0), 4.0, palette::FACE));
    out.push(circle(at(-3.5, 70.0), 1.4, palette::CHARACTER));
    out.push(circle(at(3.5, 70.0), 1.4, palette::CHARACTER));
    for side in [-1.0, 1.0] {
        out.push(stroke(
            Path::Line {
                from: at(side * 3.5, 66.5),
                to: at(side * 1.5, 65.0),
            },
            FACE_LINE_WIDTH,
            palette::CHARACTER,
        ));
    }

    let smiling = state.phase == GamePhase::Celebrating && state.winner == Some(player);
    let (corner_y, control_y) = if smiling { (60.0, 56.0) } else { (56.0, 60.0) };
    out.push(stroke(
        Path::Quadratic {
            start: at(-5.0, corner_y),
            control: at(0.0, control_y),
            end: at(5.0, corner_y),
        },
        FACE_LINE_WIDTH,
        palette::CHARACTER,
    ));
}

fn projectile(state: &GameState, settings: &Settings, out: &mut Vec<Shape>) {
    let projectile = &state.projectile;
    match state.phase {
        GamePhase::Aiming => {
            // The marker is pulled back against the drag
            let marker = projectile.pos - projectile.velocity / AIM_PULLBACK_DIVISOR;
            if settings.trajectory_preview {
                out.push(Shape::Stroke {
                    path: Path::Line {
                        from: marker,
                        to: marker + projectile.velocity,
                    },
                    width: TRAJECTORY_WIDTH,
                    color: palette::TRAJECTORY,
                    dash: Some(TRAJECTORY_DASH),
                });
            }
            out.push(circle(marker, MARKER_RADIUS, palette::AIM_MARKER));
        }
        GamePhase::InFlight => out.push(Shape::Banana {
            center: projectile.pos,
            rotation: projectile.rotation,
        }),
        GamePhase::Celebrating => {
            out.push(circle(projectile.pos, MARKER_RADIUS, palette::AIM_MARKER))
        }
    }
}
