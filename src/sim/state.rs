//! Race state and core simulation types
//!
//! `RaceState` owns the agents, the goal, the track mask and the RNG stream.
//! Only `tick` mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::walkability::WalkabilityMap;
use crate::settings::Participant;

/// Axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `margin` tucked into the bottom-right corner of a playfield
    pub fn bottom_right(field_width: u32, field_height: u32, margin: f32) -> Self {
        Self::new(
            field_width as f32 - margin,
            field_height as f32 - margin,
            margin,
            margin,
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A racer
#[derive(Debug, Clone)]
pub struct Agent {
    /// Spawn index
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cruising speed the velocity relaxes toward
    pub base_speed: f32,
    pub radius: f32,
    /// Cleared on goal arrival; dead agents never move again
    pub alive: bool,
    /// Display identity (presentation only)
    pub identity: Participant,
}

impl Agent {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, base_speed: f32, radius: f32, identity: Participant) -> Self {
        Self {
            id,
            pos,
            vel,
            base_speed,
            radius,
            alive: true,
            identity,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The finish circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub radius: f32,
}

impl Goal {
    /// Whether a disc of `radius` at `pos` touches the goal
    #[inline]
    pub fn reached_by(&self, pos: Vec2, radius: f32) -> bool {
        pos.distance(self.pos) < radius + self.radius
    }
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct RaceState {
    /// Seed the RNG stream was started from
    pub seed: u64,
    /// Ticks advanced since setup
    pub time_ticks: u64,
    /// Shared disc radius for agent-agent contacts
    pub agent_radius: f32,
    /// Racers in spawn order
    pub agents: Vec<Agent>,
    pub goal: Goal,
    pub(crate) map: WalkabilityMap,
    /// Index of the first agent to reach the goal
    pub(crate) winner: Option<usize>,
    pub(crate) rng: Pcg32,
}

impl RaceState {
    /// Assemble a race from already-placed agents and goal
    pub fn new(map: WalkabilityMap, agents: Vec<Agent>, goal: Goal, agent_radius: f32, seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            agent_radius,
            agents,
            goal,
            map,
            winner: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn map(&self) -> &WalkabilityMap {
        &self.map
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Agent> {
        self.winner.and_then(|i| self.agents.get(i))
    }

    /// A winner has been recorded; `tick` no longer advances
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }
}
