//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of engine updates that advanced the world.
    pub tick: u64,
    /// Elapsed physics time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one update that consumed `physics_secs` of world time.
    pub fn advance(&mut self, physics_secs: f64) {
        self.tick += 1;
        self.elapsed_secs = physics_secs;
    }
}

/// Unit vector pointing along `angle` (radians, counter-clockwise from +x).
pub fn direction(angle: f64) -> DVec2 {
    DVec2::from_angle(angle)
}

/// Rotate a vector by `angle` radians.
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(v)
}

/// Transform a point from a body-local frame into world space.
pub fn to_global_frame(local: DVec2, frame_position: DVec2, frame_angle: f64) -> DVec2 {
    frame_position + rotate(local, frame_angle)
}

/// Transform a world-space point into a body-local frame.
pub fn to_local_frame(world: DVec2, frame_position: DVec2, frame_angle: f64) -> DVec2 {
    rotate(world - frame_position, -frame_angle)
}

/// Wrap `value` into `[0, span)`.
pub fn wrap(value: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(span);
    // Tiny negative remainders round up to `span`.
    if wrapped >= span {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn global_frame_rotates_then_translates() {
        let p = to_global_frame(DVec2::new(1.0, 0.0), DVec2::new(10.0, 5.0), FRAC_PI_2);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn local_frame_inverts_global_frame() {
        let origin = DVec2::new(-3.0, 7.5);
        let local = DVec2::new(32.0, -32.0);
        let world = to_global_frame(local, origin, 0.7);
        let back = to_local_frame(world, origin, 0.7);
        assert_relative_eq!(back.x, local.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, local.y, epsilon = 1e-9);
    }

    #[test]
    fn direction_is_unit_length() {
        for i in 0..16 {
            let a = i as f64 * PI / 8.0;
            assert_relative_eq!(direction(a).length(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn wrap_handles_negative_values() {
        assert_relative_eq!(wrap(-10.0, 800.0), 790.0);
        assert_relative_eq!(wrap(810.0, 800.0), 10.0);
        assert_eq!(wrap(5.0, 0.0), 0.0);
    }
}
