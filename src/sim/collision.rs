//! Agent-agent collision response
//!
//! Pairs are resolved one at a time in ascending `(i, j)` order, and each
//! correction moves the agents in place. Later pairs see the corrected
//! positions of earlier ones; there is no global solve.

use glam::Vec2;

use super::state::Agent;

/// Separation axis used when two centres coincide exactly
pub const COINCIDENT_NORMAL: Vec2 = Vec2::X;

/// Outcome of resolving a single pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    /// Unit vector from `a` toward `b`
    pub normal: Vec2,
    /// Velocity of `b` relative to `a` along the normal, before the impulse
    pub rel_vel: f32,
    /// Penetration depth that was corrected
    pub overlap: f32,
}

/// Resolve one overlapping pair of equal-radius discs
///
/// Approaching pairs exchange the normal component of their relative
/// velocity once (a softer bounce than a full elastic exchange). Any overlap
/// is split evenly so the discs end up exactly touching.
pub fn resolve_pair(a: &mut Agent, b: &mut Agent, radius: f32) -> Option<PairContact> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = radius * 2.0;
    if dist >= min_dist {
        return None;
    }

    let normal = if dist > 0.0 {
        delta / dist
    } else {
        COINCIDENT_NORMAL
    };

    let rel_vel = (b.vel - a.vel).dot(normal);
    if rel_vel < 0.0 {
        let impulse = normal * rel_vel;
        a.vel += impulse;
        b.vel -= impulse;
    }

    let overlap = min_dist - dist;
    let correction = normal * (overlap / 2.0);
    a.pos -= correction;
    b.pos += correction;

    Some(PairContact {
        normal,
        rel_vel,
        overlap,
    })
}

/// Resolve every live pair in ascending index order; returns the number of contacts
pub fn resolve_collisions(agents: &mut [Agent], radius: f32) -> usize {
    let mut contacts = 0;
    for i in 0..agents.len() {
        // Split so `a` and `b` can be borrowed mutably together
        let (head, tail) = agents.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if !a.alive || !b.alive {
                continue;
            }
            if resolve_pair(a, b, radius).is_some() {
                contacts += 1;
            }
        }
    }
    contacts
}
