//! Force, damping and kinematic integration for one internal step.

use glam::DVec2;

use starwake_core::components::RigidBody;
use starwake_core::enums::BodyType;

/// Remember the transform before this step so it can be interpolated.
pub fn store_previous(body: &mut RigidBody) {
    body.previous_position = body.position;
    body.previous_angle = body.angle;
}

/// Semi-implicit Euler: velocities from forces and damping, then positions.
pub fn integrate(body: &mut RigidBody, gravity: DVec2, dt: f64) {
    match body.body_type {
        BodyType::Static => {}
        BodyType::Kinematic => {
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
        }
        BodyType::Dynamic => {
            body.velocity += (gravity + body.force * body.inv_mass) * dt;
            body.angular_velocity += body.torque * body.inv_inertia * dt;

            body.velocity *= (1.0 - body.damping).max(0.0).powf(dt);
            body.angular_velocity *= (1.0 - body.angular_damping).max(0.0).powf(dt);

            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
        }
    }
    body.force = DVec2::ZERO;
    body.torque = 0.0;
}

/// Blend the rendered transform between the previous and current step.
pub fn interpolate(body: &mut RigidBody, alpha: f64) {
    body.interpolated_position = body.previous_position.lerp(body.position, alpha);
    body.interpolated_angle = body.previous_angle + (body.angle - body.previous_angle) * alpha;
}

/// Change velocity by `impulse` (world frame) applied at the centre of mass.
pub fn apply_impulse(body: &mut RigidBody, impulse: DVec2) {
    body.velocity += impulse * body.inv_mass;
}

/// Change velocity by `impulse` given in the body's local frame.
pub fn apply_impulse_local(body: &mut RigidBody, local_impulse: DVec2) {
    let world = DVec2::from_angle(body.angle).rotate(local_impulse);
    apply_impulse(body, world);
}

/// Change angular velocity by an angular impulse.
pub fn apply_angular_impulse(body: &mut RigidBody, impulse: f64) {
    body.angular_velocity += impulse * body.inv_inertia;
}

/// Accumulate a force in the body's local frame for the next step.
pub fn apply_force_local(body: &mut RigidBody, local_force: DVec2) {
    body.force += DVec2::from_angle(body.angle).rotate(local_force);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use starwake_core::components::CircleShape;
    use starwake_core::materials::MaterialId;
    use std::f64::consts::FRAC_PI_2;

    fn ball(mass: f64) -> RigidBody {
        RigidBody::new(BodyType::Dynamic, mass, DVec2::ZERO, 0.0)
            .with_shape(CircleShape::centered(1.0, MaterialId(0)))
    }

    #[test]
    fn damping_is_frame_rate_independent() {
        let mut coarse = ball(1.0).with_velocity(DVec2::new(10.0, 0.0));
        let mut fine = coarse.clone();
        coarse.damping = 0.5;
        fine.damping = 0.5;

        integrate(&mut coarse, DVec2::ZERO, 0.1);
        for _ in 0..10 {
            integrate(&mut fine, DVec2::ZERO, 0.01);
        }
        assert_relative_eq!(coarse.velocity.x, fine.velocity.x, epsilon = 1e-9);
        assert_relative_eq!(coarse.velocity.x, 10.0 * 0.5f64.powf(0.1), epsilon = 1e-9);
    }

    #[test]
    fn static_bodies_ignore_velocity() {
        let mut wall = RigidBody::new(BodyType::Static, 0.0, DVec2::ZERO, 0.0)
            .with_velocity(DVec2::new(5.0, 0.0));
        integrate(&mut wall, DVec2::new(0.0, -9.8), 1.0);
        assert_eq!(wall.position, DVec2::ZERO);
    }

    #[test]
    fn forces_are_cleared_after_integration() {
        let mut body = ball(2.0);
        body.damping = 0.0;
        apply_force_local(&mut body, DVec2::new(0.0, 4.0));
        integrate(&mut body, DVec2::ZERO, 1.0);
        assert_relative_eq!(body.velocity.y, 2.0);
        assert_eq!(body.force, DVec2::ZERO);
    }

    #[test]
    fn local_impulse_follows_heading() {
        let mut body = ball(1.0);
        body.angle = FRAC_PI_2;
        apply_impulse_local(&mut body, DVec2::new(0.0, 1.0));
        assert_relative_eq!(body.velocity.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(body.velocity.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolation_blends_previous_and_current() {
        let mut body = ball(1.0).with_velocity(DVec2::new(60.0, 0.0));
        body.damping = 0.0;
        store_previous(&mut body);
        integrate(&mut body, DVec2::ZERO, 1.0 / 60.0);
        interpolate(&mut body, 0.25);
        assert_relative_eq!(body.interpolated_position.x, 0.25, epsilon = 1e-12);
    }
}
