//! Race settings and participant roster
//!
//! Hosts hand these in as JSON; anything left out takes the default race.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Colors cycled through for racers beyond the roster
const FALLBACK_COLORS: [&str; 5] = ["red", "blue", "green", "orange", "purple"];

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("a race needs at least one agent")]
    NoAgents,
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
}

/// Display identity of one racer (presentation only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub color: String,
    /// Sprite image path, relative to the page
    pub sprite: String,
}

impl Participant {
    /// Named after the sprite's file stem, upper-cased
    pub fn from_sprite(sprite: &str, color: &str) -> Self {
        let file = sprite.rsplit('/').next().unwrap_or(sprite);
        let stem = file.split('.').next().unwrap_or(file);
        Self {
            name: stem.to_uppercase(),
            color: color.to_string(),
            sprite: sprite.to_string(),
        }
    }

    /// Generated identity for racers without a roster entry
    pub fn numbered(index: usize) -> Self {
        Self {
            name: format!("RACER {}", index + 1),
            color: FALLBACK_COLORS[index % FALLBACK_COLORS.len()].to_string(),
            sprite: String::new(),
        }
    }
}

/// Race setup parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceSettings {
    pub agent_count: usize,
    pub agent_radius: f32,
    pub goal_radius: f32,
    /// Cruising speed in pixels per tick
    pub base_speed: f32,
    /// Rectangle agents spawn in
    pub spawn_area: Rect,
    /// Side of the goal search box at the bottom-right corner
    pub corner_margin: f32,
    /// Whole seconds of countdown before the first tick
    pub countdown_secs: u32,
    /// Identities in spawn order; missing entries are generated
    pub roster: Vec<Participant>,
}

impl Default for RaceSettings {
    fn default() -> Self {
        let (x, y, width, height) = SPAWN_AREA;
        let roster = [
            ("sprites/verkhvo.png", "red"),
            ("sprites/arseno.png", "blue"),
            ("sprites/nosko.png", "green"),
            ("sprites/gvaramo.png", "orange"),
            ("sprites/ostano.png", "purple"),
        ]
        .iter()
        .map(|(sprite, color)| Participant::from_sprite(sprite, color))
        .collect();

        Self {
            agent_count: AGENT_COUNT,
            agent_radius: AGENT_RADIUS,
            goal_radius: GOAL_RADIUS,
            base_speed: BASE_SPEED,
            spawn_area: Rect::new(x, y, width, height),
            corner_margin: CORNER_MARGIN,
            countdown_secs: COUNTDOWN_SECS,
            roster,
        }
    }
}

impl RaceSettings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.agent_count == 0 {
            return Err(SettingsError::NoAgents);
        }
        let positive = [
            ("agent_radius", self.agent_radius),
            ("goal_radius", self.goal_radius),
            ("base_speed", self.base_speed),
            ("corner_margin", self.corner_margin),
            ("spawn_area.width", self.spawn_area.width),
            ("spawn_area.height", self.spawn_area.height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    /// Identity for the racer at spawn index `index`
    pub fn participant(&self, index: usize) -> Participant {
        self.roster
            .get(index)
            .cloned()
            .unwrap_or_else(|| Participant::numbered(index))
    }
}
