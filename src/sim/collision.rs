//! Circle geometry and wall response
//!
//! Every body in the arena is a circle; collisions are discrete per-tick
//! distance checks, no sweeping.

use glam::Vec2;

/// Euclidean distance between two centers
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Two circles overlap iff their centers are closer than the radius sum
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Clamp a circle into `[0, extent]` on one axis. When the circle crosses a
/// wall its center is pinned to the boundary and the velocity component is
/// forced away from that wall, magnitude unchanged. Returns `(pos, vel)`.
pub fn clamp_axis(pos: f32, vel: f32, radius: f32, extent: f32) -> (f32, f32) {
    if pos < radius {
        (radius, vel.abs())
    } else if pos > extent - radius {
        (extent - radius, -vel.abs())
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_circles_overlap_boundary() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Touching exactly is not an overlap
        assert!(!circles_overlap(a, 5.0, b, 5.0));
        assert!(circles_overlap(a, 5.0, b, 5.1));
    }

    #[test]
    fn test_clamp_axis_left_wall() {
        let (pos, vel) = clamp_axis(3.0, -2.5, 50.0, 1440.0);
        assert_eq!(pos, 50.0);
        assert_eq!(vel, 2.5);
    }

    #[test]
    fn test_clamp_axis_right_wall() {
        let (pos, vel) = clamp_axis(1439.0, 4.0, 50.0, 1440.0);
        assert_eq!(pos, 1390.0);
        assert_eq!(vel, -4.0);
    }

    #[test]
    fn test_clamp_axis_interior_untouched() {
        let (pos, vel) = clamp_axis(700.0, -3.0, 50.0, 1440.0);
        assert_eq!(pos, 700.0);
        assert_eq!(vel, -3.0);
    }

    #[test]
    fn test_clamp_axis_wall_contact_keeps_outward_velocity() {
        // Already moving away from the wall: sign is preserved
        let (_, vel) = clamp_axis(10.0, 2.0, 50.0, 1440.0);
        assert_eq!(vel, 2.0);
    }
}
