//! Per-agent integration: wall bounce, heading jitter, speed restoration
//!
//! Each axis is probed on its own against the track mask. A blocked axis
//! flips its velocity component, nudges the heading by a random angle and
//! holds position on that axis for the tick, so the agent pushes off the
//! wall on the next tick.

use glam::Vec2;
use rand::Rng;

use super::state::Agent;
use super::walkability::WalkabilityMap;
use crate::consts::{SPEED_RESTORE_GAIN, WALL_JITTER};
use crate::{heading_velocity, rotate_heading};

/// Which axes hit a wall this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub x: bool,
    pub y: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Uniform heading offset in `[-WALL_JITTER, WALL_JITTER)`
#[inline]
fn wall_jitter<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-WALL_JITTER..WALL_JITTER)
}

/// Relax speed toward `base_speed` by a fixed fraction, keeping the heading
pub fn restore_speed(vel: Vec2, base_speed: f32) -> Vec2 {
    let speed = vel.length();
    let new_speed = speed + (base_speed - speed) * SPEED_RESTORE_GAIN;
    heading_velocity(vel.y.atan2(vel.x), new_speed)
}

/// Advance one agent by one tick
///
/// Both wall probes use the position at the start of the tick. When both
/// axes are blocked the heading is jittered twice, with an independent draw
/// for each axis.
pub fn update_agent<R: Rng + ?Sized>(
    agent: &mut Agent,
    map: &WalkabilityMap,
    rng: &mut R,
) -> WallContact {
    let r = agent.radius;
    let pos = agent.pos;
    let next = pos + agent.vel;
    let mut contact = WallContact::default();

    if !map.is_walkable(next.x + r, pos.y) || !map.is_walkable(next.x - r, pos.y) {
        agent.vel.x = -agent.vel.x;
        agent.vel = rotate_heading(agent.vel, wall_jitter(rng));
        contact.x = true;
    }

    if !map.is_walkable(pos.x, next.y + r) || !map.is_walkable(pos.x, next.y - r) {
        agent.vel.y = -agent.vel.y;
        agent.vel = rotate_heading(agent.vel, wall_jitter(rng));
        contact.y = true;
    }

    agent.vel = restore_speed(agent.vel, agent.base_speed);

    if !contact.x {
        agent.pos.x += agent.vel.x;
    }
    if !contact.y {
        agent.pos.y += agent.vel.y;
    }

    contact
}
