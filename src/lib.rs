//! Goal Rush - a race to the goal across a pixel-mask track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (walkability, placement, motion, collisions)
//! - `settings`: Race configuration and participant roster
//! - `session`: Frame driver (countdown, ticking, snapshots for the renderer)
//! - `platform`: Browser bindings

pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{RacePhase, RaceSession, RaceSnapshot};
pub use settings::{Participant, RaceSettings, SettingsError};

use glam::Vec2;

/// Race configuration constants
pub mod consts {
    /// Agent disc radius (pixels)
    pub const AGENT_RADIUS: f32 = 15.0;
    /// Goal circle radius (pixels)
    pub const GOAL_RADIUS: f32 = 5.0;
    /// Number of racers in a default race
    pub const AGENT_COUNT: usize = 5;
    /// Cruising speed (pixels per tick)
    pub const BASE_SPEED: f32 = 1.1;

    /// A mask pixel is track iff R, G and B are all above this
    pub const WALKABLE_THRESHOLD: u8 = 200;

    /// Rejection-sampling budget for spawn and goal placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Half-width of the heading jitter applied on a wall bounce (10 degrees)
    pub const WALL_JITTER: f32 = std::f32::consts::PI / 18.0;
    /// Fraction of the speed error removed each tick
    pub const SPEED_RESTORE_GAIN: f32 = 0.05;

    /// Default spawn rectangle (x, y, width, height)
    pub const SPAWN_AREA: (f32, f32, f32, f32) = (60.0, 60.0, 200.0, 100.0);
    /// Side of the goal placement box anchored at the bottom-right corner
    pub const CORNER_MARGIN: f32 = 100.0;

    /// Whole seconds shown before the race starts
    pub const COUNTDOWN_SECS: u32 = 5;
}

/// Velocity of the given magnitude along `angle`
#[inline]
pub fn heading_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Rotate a velocity by `delta` radians, keeping its magnitude
///
/// The heading is recovered with `atan2`, so a zero vector comes back as zero.
#[inline]
pub fn rotate_heading(vel: Vec2, delta: f32) -> Vec2 {
    let speed = vel.length();
    let angle = vel.y.atan2(vel.x) + delta;
    heading_velocity(angle, speed)
}
