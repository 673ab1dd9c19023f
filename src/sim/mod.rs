//! Deterministic race simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only, owned by `RaceState`
//! - Stable iteration order (spawn order, ascending pairs)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod placement;
pub mod state;
pub mod tick;
pub mod walkability;

pub use collision::{PairContact, resolve_collisions, resolve_pair};
pub use motion::{WallContact, restore_speed, update_agent};
pub use placement::{Placement, sample_position_near_corner, sample_safe_position_in_area};
pub use state::{Agent, Goal, RaceState, Rect};
pub use tick::{TickEvents, initialize, tick};
pub use walkability::{MaskError, WalkabilityMap};
