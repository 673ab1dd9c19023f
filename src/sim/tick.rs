//! Race setup and the per-frame simulation tick
//!
//! `tick` is a pure state transition: agents move in spawn order, goal
//! arrival is checked right after each move, then live pairs are separated.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::resolve_collisions;
use super::motion::update_agent;
use super::placement::{sample_position_near_corner, sample_safe_position_in_area};
use super::state::{Agent, Goal, RaceState};
use super::walkability::WalkabilityMap;
use crate::heading_velocity;
use crate::settings::RaceSettings;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Agents that reached the goal this tick, in arrival order
    pub arrivals: Vec<usize>,
    /// Agents that bounced off the track edge
    pub wall_bounces: usize,
    /// Overlapping agent pairs that were separated
    pub pair_contacts: usize,
}

/// Place agents and goal on the track
///
/// Each agent gets a random heading at cruising speed, then a spawn point
/// that is safe for that heading. The goal goes near the bottom-right
/// corner. Placement never fails; exhausted sampling falls back to the
/// centre of the search box.
pub fn initialize(map: WalkabilityMap, settings: &RaceSettings, seed: u64) -> RaceState {
    let mut rng = Pcg32::seed_from_u64(seed);

    let agents: Vec<Agent> = (0..settings.agent_count)
        .map(|i| {
            let angle = rng.random::<f32>() * TAU;
            let vel = heading_velocity(angle, settings.base_speed);
            let placement = sample_safe_position_in_area(
                &map,
                &mut rng,
                settings.spawn_area,
                vel,
                settings.agent_radius,
            );
            let identity = settings.participant(i);
            log::debug!(
                "{} spawns at {:?} heading {:.2} rad{}",
                identity.name,
                placement.pos(),
                angle,
                if placement.is_fallback() { " (fallback)" } else { "" }
            );
            Agent::new(
                i as u32,
                placement.pos(),
                vel,
                settings.base_speed,
                settings.agent_radius,
                identity,
            )
        })
        .collect();

    let goal_placement =
        sample_position_near_corner(&map, &mut rng, settings.corner_margin, settings.agent_radius);
    let goal = Goal {
        pos: goal_placement.pos(),
        radius: settings.goal_radius,
    };
    log::info!(
        "Race ready: {} agents, goal at {:?}, seed {}",
        agents.len(),
        goal.pos,
        seed
    );

    RaceState {
        seed,
        time_ticks: 0,
        agent_radius: settings.agent_radius,
        agents,
        goal,
        map,
        winner: None,
        rng,
    }
}

/// Advance the race by one frame; does nothing once a winner exists
pub fn tick(state: &mut RaceState) -> TickEvents {
    let mut events = TickEvents::default();
    if state.is_finished() {
        return events;
    }
    state.time_ticks += 1;

    let RaceState {
        agents,
        goal,
        map,
        winner,
        rng,
        agent_radius,
        time_ticks,
        ..
    } = state;

    for (i, agent) in agents.iter_mut().enumerate() {
        if !agent.alive {
            continue;
        }

        if update_agent(agent, map, rng).any() {
            events.wall_bounces += 1;
        }

        if goal.reached_by(agent.pos, agent.radius) {
            agent.alive = false;
            events.arrivals.push(i);
            log::debug!("{} reached the goal on tick {}", agent.identity.name, time_ticks);

            if winner.is_none() {
                *winner = Some(i);
                log::info!("Winner: {} ({})", agent.identity.name, agent.identity.color);
            }
        }
    }

    events.pair_contacts = resolve_collisions(agents, *agent_radius);
    events
}
