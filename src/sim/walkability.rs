//! Track walkability derived from a rasterized level image
//!
//! The level image is drawn into an RGBA buffer once at setup. Near-white
//! pixels are track, everything else is wall. The map never changes after
//! construction.

use glam::Vec2;
use thiserror::Error;

use crate::consts::WALKABLE_THRESHOLD;

/// Rejected mask buffers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("mask dimensions must be non-zero (got {width}x{height})")]
    ZeroSized { width: u32, height: u32 },
    #[error("mask buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Per-pixel walkability over a `width` x `height` playfield
#[derive(Debug, Clone)]
pub struct WalkabilityMap {
    width: u32,
    height: u32,
    /// Row-major track flags; `None` until a level image has been rasterized
    cells: Option<Vec<bool>>,
}

impl WalkabilityMap {
    /// Map with no level loaded yet: every point is walkable
    pub fn unloaded(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: None,
        }
    }

    /// Build from an RGBA byte buffer (`width * height * 4` bytes, alpha ignored)
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, MaskError> {
        if width == 0 || height == 0 {
            return Err(MaskError::ZeroSized { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(MaskError::LengthMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        let cells = rgba
            .chunks_exact(4)
            .map(|px| {
                px[0] > WALKABLE_THRESHOLD && px[1] > WALKABLE_THRESHOLD && px[2] > WALKABLE_THRESHOLD
            })
            .collect();

        Ok(Self {
            width,
            height,
            cells: Some(cells),
        })
    }

    /// Build from a predicate over integer pixel coordinates
    pub fn from_fn<F>(width: u32, height: u32, mut is_track: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(is_track(x, y));
            }
        }
        Self {
            width,
            height,
            cells: Some(cells),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a level image has been rasterized into this map
    pub fn is_loaded(&self) -> bool {
        self.cells.is_some()
    }

    /// Point query at the floored pixel coordinate
    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        let Some(cells) = &self.cells else {
            return true;
        };
        // NaN fails every comparison below, so reject it explicitly
        if !(x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32) {
            return false;
        }
        let (px, py) = (x.floor() as usize, y.floor() as usize);
        cells
            .get(py * self.width as usize + px)
            .copied()
            .unwrap_or(false)
    }

    #[inline]
    pub fn is_walkable_at(&self, p: Vec2) -> bool {
        self.is_walkable(p.x, p.y)
    }

    /// Whether a disc of `radius` at `pos` fits on the track now and after one step of `vel`
    ///
    /// This is a cheap probe, not a raster of the disc: the centre and the four
    /// axis extremes are sampled, then the four extremes of the stepped disc
    /// along each axis separately. A wall corner can slip between probes at
    /// shallow angles.
    pub fn is_position_safe(&self, pos: Vec2, vel: Vec2, radius: f32) -> bool {
        let Vec2 { x, y } = pos;
        let disc_fits = self.is_walkable(x, y)
            && self.is_walkable(x + radius, y)
            && self.is_walkable(x - radius, y)
            && self.is_walkable(x, y + radius)
            && self.is_walkable(x, y - radius);
        if !disc_fits {
            return false;
        }

        let next = pos + vel;
        self.is_walkable(next.x + radius, y)
            && self.is_walkable(next.x - radius, y)
            && self.is_walkable(x, next.y + radius)
            && self.is_walkable(x, next.y - radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let mut buf = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            buf.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        buf
    }

    #[test]
    fn test_rejects_bad_buffers() {
        assert_eq!(
            WalkabilityMap::from_rgba(0, 4, &[]).unwrap_err(),
            MaskError::ZeroSized { width: 0, height: 4 }
        );
        let err = WalkabilityMap::from_rgba(2, 2, &[255; 15]).unwrap_err();
        assert!(matches!(err, MaskError::LengthMismatch { expected: 16, actual: 15, .. }));
    }

    #[test]
    fn test_threshold_is_strict_and_ignores_alpha() {
        // 4x1 strip: white, exactly-200 grey, near-white with zero alpha, red
        let rgba = [
            255, 255, 255, 255, //
            200, 200, 200, 255, //
            201, 230, 250, 0, //
            255, 0, 0, 255,
        ];
        let map = WalkabilityMap::from_rgba(4, 1, &rgba).unwrap();
        assert!(map.is_walkable(0.5, 0.5));
        assert!(!map.is_walkable(1.5, 0.5));
        assert!(map.is_walkable(2.0, 0.0));
        assert!(!map.is_walkable(3.9, 0.9));
    }

    #[test]
    fn test_unloaded_map_is_all_walkable() {
        let map = WalkabilityMap::unloaded(10, 10);
        assert!(!map.is_loaded());
        assert!(map.is_walkable(5.0, 5.0));
        assert!(map.is_walkable(-100.0, 400.0));
    }

    #[test]
    fn test_position_safe_needs_room_for_the_step() {
        // Track is x < 50; a disc of radius 10 at x=38 fits, but one step of +3 pokes into the wall
        let map = WalkabilityMap::from_fn(100, 100, |x, _| x < 50);
        let pos = Vec2::new(38.0, 50.0);
        assert!(map.is_position_safe(pos, Vec2::ZERO, 10.0));
        assert!(!map.is_position_safe(pos, Vec2::new(3.0, 0.0), 10.0));
        assert!(map.is_position_safe(pos, Vec2::new(-3.0, 0.0), 10.0));
    }

    #[test]
    fn test_position_safe_rejects_disc_over_edge() {
        let map = WalkabilityMap::from_fn(100, 100, |_, _| true);
        assert!(!map.is_position_safe(Vec2::new(5.0, 50.0), Vec2::ZERO, 10.0));
        assert!(map.is_position_safe(Vec2::new(10.0, 50.0), Vec2::ZERO, 10.0));
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_never_walkable(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
        ) {
            let map = WalkabilityMap::from_rgba(64, 48, &solid(64, 48, [255, 255, 255])).unwrap();
            let inside = x >= 0.0 && y >= 0.0 && x < 64.0 && y < 48.0;
            prop_assert_eq!(map.is_walkable(x, y), inside);
        }

        #[test]
        fn prop_black_pixels_never_walkable(x in 0.0f32..64.0, y in 0.0f32..48.0) {
            let map = WalkabilityMap::from_rgba(64, 48, &solid(64, 48, [0, 0, 0])).unwrap();
            prop_assert!(!map.is_walkable(x, y));
        }
    }
}
