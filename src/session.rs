//! Frame driver for a race
//!
//! Runs the pre-race countdown, then calls `tick` once per animation frame
//! until a winner exists. The renderer reads a `RaceSnapshot` after every
//! frame and draws one last frame once the race is finished.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::RaceSettings;
use crate::sim::{Goal, RaceState, Rect, TickEvents, WalkabilityMap, initialize, tick};

/// Where the race is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    /// Counting down whole seconds before the start
    Countdown,
    /// One tick per frame
    Racing,
    /// A winner has been recorded
    Finished,
}

/// One racer as the renderer needs it
#[derive(Debug, Clone, Serialize)]
pub struct AgentSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub alive: bool,
    pub name: String,
    pub color: String,
    pub sprite: String,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    /// Seconds left before the start (0 once racing)
    pub countdown: u32,
    pub time_ticks: u64,
    pub radius: f32,
    pub spawn_area: Rect,
    pub agents: Vec<AgentSnapshot>,
    pub goal: Goal,
    pub winner: Option<usize>,
    /// Win message, once there is a winner
    pub banner: Option<String>,
}

/// A race plus the scheduling around it
#[derive(Debug, Clone)]
pub struct RaceSession {
    state: RaceState,
    phase: RacePhase,
    countdown: u32,
    spawn_area: Rect,
    /// Seconds accumulated toward the next countdown step
    accumulator: f32,
}

impl RaceSession {
    /// Set up a race on `map` and start its countdown
    pub fn new(map: WalkabilityMap, settings: &RaceSettings, seed: u64) -> Self {
        let state = initialize(map, settings, seed);
        Self::from_state(state, settings.countdown_secs, settings.spawn_area)
    }

    /// Wrap an already-built race
    pub fn from_state(state: RaceState, countdown_secs: u32, spawn_area: Rect) -> Self {
        let phase = if state.is_finished() {
            RacePhase::Finished
        } else if countdown_secs == 0 {
            RacePhase::Racing
        } else {
            RacePhase::Countdown
        };
        Self {
            state,
            phase,
            countdown: countdown_secs,
            spawn_area,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Seconds left on the countdown
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Advance by one animation frame of `dt` seconds
    ///
    /// Returns the tick's events while racing, `None` during the countdown
    /// and after the finish.
    pub fn frame(&mut self, dt: f32) -> Option<TickEvents> {
        match self.phase {
            RacePhase::Countdown => {
                self.accumulator += dt.max(0.0);
                while self.accumulator >= 1.0 && self.countdown > 0 {
                    self.accumulator -= 1.0;
                    self.countdown -= 1;
                }
                if self.countdown == 0 {
                    self.phase = RacePhase::Racing;
                    log::info!("Race started");
                }
                None
            }
            RacePhase::Racing => {
                let events = tick(&mut self.state);
                if self.state.is_finished() {
                    self.phase = RacePhase::Finished;
                    log::info!("Race finished after {} ticks", self.state.time_ticks);
                }
                Some(events)
            }
            RacePhase::Finished => None,
        }
    }

    /// Countdown roster lines, `"<n>. <NAME>"` in spawn order
    pub fn roster_lines(&self) -> Vec<String> {
        self.state
            .agents()
            .iter()
            .enumerate()
            .map(|(i, agent)| format!("{}. {}", i + 1, agent.identity.name))
            .collect()
    }

    /// Win message, once there is a winner
    pub fn banner(&self) -> Option<String> {
        self.state
            .winner()
            .map(|agent| format!("{} WINS!", agent.identity.name))
    }

    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            phase: self.phase,
            countdown: self.countdown,
            time_ticks: self.state.time_ticks,
            radius: self.state.agent_radius,
            spawn_area: self.spawn_area,
            agents: self
                .state
                .agents()
                .iter()
                .map(|agent| AgentSnapshot {
                    id: agent.id,
                    pos: agent.pos,
                    alive: agent.alive,
                    name: agent.identity.name.clone(),
                    color: agent.identity.color.clone(),
                    sprite: agent.identity.sprite.clone(),
                })
                .collect(),
            goal: *self.state.goal(),
            winner: self.state.winner_index(),
            banner: self.banner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Participant;
    use crate::sim::Agent;

    fn short_race(countdown_secs: u32) -> RaceSession {
        let agents = vec![Agent::new(
            0,
            Vec2::new(10.0, 50.0),
            Vec2::new(2.0, 0.0),
            2.0,
            15.0,
            Participant::from_sprite("sprites/nosko.png", "green"),
        )];
        let goal = Goal {
            pos: Vec2::new(50.0, 50.0),
            radius: 5.0,
        };
        let state = RaceState::new(WalkabilityMap::unloaded(100, 100), agents, goal, 15.0, 0);
        RaceSession::from_state(state, countdown_secs, Rect::new(0.0, 0.0, 20.0, 20.0))
    }

    #[test]
    fn test_countdown_counts_whole_seconds() {
        let mut session = short_race(3);
        assert_eq!(session.phase(), RacePhase::Countdown);

        assert!(session.frame(0.6).is_none());
        assert_eq!(session.countdown(), 3);
        session.frame(0.6);
        assert_eq!(session.countdown(), 2);
        session.frame(2.5);
        assert_eq!(session.countdown(), 0);
        assert_eq!(session.phase(), RacePhase::Racing);
        assert_eq!(session.state().time_ticks, 0);
    }

    #[test]
    fn test_frames_tick_until_finished() {
        let mut session = short_race(0);
        assert_eq!(session.phase(), RacePhase::Racing);

        let mut frames = 0;
        while session.frame(1.0 / 60.0).is_some() {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(session.phase(), RacePhase::Finished);
        // 10 -> 32 in steps of 2 crosses into the goal on the 11th tick
        assert_eq!(session.state().time_ticks, 11);
        assert_eq!(session.banner().as_deref(), Some("NOSKO WINS!"));
        assert!(session.frame(1.0).is_none());
    }

    #[test]
    fn test_snapshot_serializes_for_renderer() {
        let mut session = short_race(0);
        session.frame(0.016);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.agents.len(), 1);
        assert_eq!(snapshot.winner, None);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "Racing");
        assert_eq!(json["agents"][0]["name"], "NOSKO");
        assert_eq!(json["goal"]["radius"], 5.0);
        assert!(json["banner"].is_null());
    }

    #[test]
    fn test_roster_lines_in_spawn_order() {
        let session = RaceSession::new(WalkabilityMap::unloaded(640, 480), &RaceSettings::default(), 1);
        let lines = session.roster_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "1. VERKHVO");
        assert_eq!(lines[4], "5. OSTANO");
    }
}
