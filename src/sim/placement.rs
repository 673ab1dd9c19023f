//! Rejection sampling of spawn and goal positions
//!
//! Both samplers draw integer pixel positions until one passes the disc
//! probe, and give up after a fixed budget by returning the centre of the
//! search box. The fallback is never re-validated.

use glam::Vec2;
use rand::Rng;

use super::state::Rect;
use super::walkability::WalkabilityMap;
use crate::consts::MAX_PLACEMENT_ATTEMPTS;

/// Where a sampled position came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Passed the safety probe after this many draws
    Sampled { pos: Vec2, attempts: u32 },
    /// Budget exhausted; centre of the search box
    Fallback { pos: Vec2 },
}

impl Placement {
    pub fn pos(&self) -> Vec2 {
        match *self {
            Placement::Sampled { pos, .. } | Placement::Fallback { pos } => pos,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Placement::Fallback { .. })
    }
}

/// Spawn position inside `area` for a disc that will move with `vel`
pub fn sample_safe_position_in_area<R: Rng + ?Sized>(
    map: &WalkabilityMap,
    rng: &mut R,
    area: Rect,
    vel: Vec2,
    radius: f32,
) -> Placement {
    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let x = (area.x + rng.random::<f32>() * area.width).floor();
        let y = (area.y + rng.random::<f32>() * area.height).floor();
        let pos = Vec2::new(x, y);

        if map.is_position_safe(pos, vel, radius) {
            return Placement::Sampled {
                pos,
                attempts: attempt,
            };
        }
    }

    log::warn!(
        "No safe spawn in {:?} after {} draws, using its centre",
        area,
        MAX_PLACEMENT_ATTEMPTS
    );
    Placement::Fallback { pos: area.center() }
}

/// Resting position for a disc within `margin` pixels of the bottom-right corner
///
/// Candidates count inward from the last pixel column and row, so the box is
/// `[W - margin, W - 1] x [H - margin, H - 1]`.
pub fn sample_position_near_corner<R: Rng + ?Sized>(
    map: &WalkabilityMap,
    rng: &mut R,
    margin: f32,
    radius: f32,
) -> Placement {
    let right = map.width() as f32 - 1.0;
    let bottom = map.height() as f32 - 1.0;

    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let x = right - (rng.random::<f32>() * margin).floor();
        let y = bottom - (rng.random::<f32>() * margin).floor();
        let pos = Vec2::new(x, y);

        if map.is_position_safe(pos, Vec2::ZERO, radius) {
            return Placement::Sampled {
                pos,
                attempts: attempt,
            };
        }
    }

    let area = Rect::bottom_right(map.width(), map.height(), margin);
    log::warn!(
        "No open spot within {} px of the bottom-right corner, using {:?}",
        margin,
        area.center()
    );
    Placement::Fallback { pos: area.center() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_fallback_is_area_centre() {
        let map = WalkabilityMap::from_fn(200, 200, |_, _| false);
        let mut rng = Pcg32::seed_from_u64(1);
        let area = Rect::new(10.0, 20.0, 50.0, 30.0);

        let placement = sample_safe_position_in_area(&map, &mut rng, area, Vec2::ZERO, 5.0);
        assert_eq!(placement, Placement::Fallback { pos: Vec2::new(35.0, 35.0) });
    }

    #[test]
    fn test_corner_fallback_is_box_centre() {
        let map = WalkabilityMap::from_fn(400, 300, |_, _| false);
        let mut rng = Pcg32::seed_from_u64(2);

        let placement = sample_position_near_corner(&map, &mut rng, 100.0, 15.0);
        assert!(placement.is_fallback());
        assert_eq!(placement.pos(), Vec2::new(350.0, 250.0));
    }

    #[test]
    fn test_corner_sample_stays_in_box() {
        let map = WalkabilityMap::from_fn(400, 300, |x, y| x < 380 && y < 280);
        let mut rng = Pcg32::seed_from_u64(3);

        for _ in 0..50 {
            let placement = sample_position_near_corner(&map, &mut rng, 100.0, 15.0);
            let pos = placement.pos();
            assert!(!placement.is_fallback());
            assert!((300.0..=399.0).contains(&pos.x));
            assert!((200.0..=299.0).contains(&pos.y));
            assert!(map.is_position_safe(pos, Vec2::ZERO, 15.0));
        }
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let map = WalkabilityMap::from_fn(300, 300, |x, y| (x + y) % 7 != 0);
        let area = Rect::new(60.0, 60.0, 200.0, 100.0);
        let vel = Vec2::new(1.1, 0.0);

        let a = sample_safe_position_in_area(&map, &mut Pcg32::seed_from_u64(9), area, vel, 2.0);
        let b = sample_safe_position_in_area(&map, &mut Pcg32::seed_from_u64(9), area, vel, 2.0);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_spawn_is_safe_or_exact_fallback(
            seed in any::<u64>(),
            wall_x in 0u32..200,
            vx in -2.0f32..2.0,
            vy in -2.0f32..2.0,
        ) {
            let map = WalkabilityMap::from_fn(200, 120, |x, _| x >= wall_x);
            let area = Rect::new(0.0, 0.0, 200.0, 120.0);
            let vel = Vec2::new(vx, vy);
            let mut rng = Pcg32::seed_from_u64(seed);

            match sample_safe_position_in_area(&map, &mut rng, area, vel, 15.0) {
                Placement::Sampled { pos, .. } => {
                    prop_assert!(map.is_position_safe(pos, vel, 15.0));
                    prop_assert_eq!(pos, pos.floor());
                }
                Placement::Fallback { pos } => prop_assert_eq!(pos, area.center()),
            }
        }
    }
}
