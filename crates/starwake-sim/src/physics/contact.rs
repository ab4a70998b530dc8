//! Contact detection and response between circle shapes.
//!
//! Broadphase compares bounding circles of whole bodies; narrowphase
//! tests every shape pair of two bodies. Response is a single
//! sequential-impulse pass per internal step: normal impulse with
//! restitution, Coulomb friction, then positional correction.

use glam::DVec2;

use starwake_core::components::RigidBody;
use starwake_core::constants::{PENETRATION_SLOP, POSITION_CORRECTION};
use starwake_core::materials::{MaterialId, MaterialLibrary};
use starwake_core::types::to_global_frame;

/// A touching pair of shapes on two different bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the first body in the step's body list.
    pub a: usize,
    pub b: usize,
    /// Unit normal pointing from `a` to `b`.
    pub normal: DVec2,
    pub depth: f64,
    /// World-space contact point on the surface of `a`'s shape.
    pub point: DVec2,
    pub material_a: MaterialId,
    pub material_b: MaterialId,
}

/// Find every touching shape pair.
pub fn detect(bodies: &[(hecs::Entity, &mut RigidBody)]) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let a = &*bodies[i].1;
            let b = &*bodies[j].1;

            if !a.is_dynamic() && !b.is_dynamic() {
                continue;
            }

            let reach = a.bounding_radius() + b.bounding_radius();
            if a.position.distance_squared(b.position) > reach * reach {
                continue;
            }

            for shape_a in &a.shapes {
                let ca = to_global_frame(shape_a.offset, a.position, a.angle);
                for shape_b in &b.shapes {
                    let cb = to_global_frame(shape_b.offset, b.position, b.angle);
                    let delta = cb - ca;
                    let radii = shape_a.radius + shape_b.radius;
                    let dist_sq = delta.length_squared();
                    if dist_sq >= radii * radii {
                        continue;
                    }

                    let dist = dist_sq.sqrt();
                    let normal = if dist > 1e-9 { delta / dist } else { DVec2::X };
                    contacts.push(Contact {
                        a: i,
                        b: j,
                        normal,
                        depth: radii - dist,
                        point: ca + normal * shape_a.radius,
                        material_a: shape_a.material,
                        material_b: shape_b.material,
                    });
                }
            }
        }
    }

    contacts
}

/// Apply impulses and positional correction for each contact.
pub fn resolve(
    bodies: &mut [(hecs::Entity, &mut RigidBody)],
    contacts: &[Contact],
    materials: &MaterialLibrary,
) {
    for contact in contacts {
        debug_assert!(contact.a < contact.b);
        let (left, right) = bodies.split_at_mut(contact.b);
        let a = &mut *left[contact.a].1;
        let b = &mut *right[0].1;

        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum == 0.0 {
            continue;
        }

        let surface = materials.contact_for(contact.material_a, contact.material_b);
        let n = contact.normal;
        let ra = contact.point - a.position;
        let rb = contact.point - b.position;

        let relative = velocity_at(b, rb) - velocity_at(a, ra);
        let vn = relative.dot(n);

        if vn < 0.0 {
            let ra_n = ra.perp_dot(n);
            let rb_n = rb.perp_dot(n);
            let denom = inv_mass_sum + ra_n * ra_n * a.inv_inertia + rb_n * rb_n * b.inv_inertia;
            let jn = -(1.0 + surface.restitution) * vn / denom;
            apply_pair_impulse(a, b, ra, rb, n * jn);

            // Friction against the post-impulse sliding velocity.
            let relative = velocity_at(b, rb) - velocity_at(a, ra);
            let tangent_velocity = relative - n * relative.dot(n);
            if tangent_velocity.length_squared() > 1e-18 {
                let t = tangent_velocity.normalize();
                let ra_t = ra.perp_dot(t);
                let rb_t = rb.perp_dot(t);
                let denom_t =
                    inv_mass_sum + ra_t * ra_t * a.inv_inertia + rb_t * rb_t * b.inv_inertia;
                let max_friction = surface.friction * jn;
                let jt = (-relative.dot(t) / denom_t).clamp(-max_friction, max_friction);
                apply_pair_impulse(a, b, ra, rb, t * jt);
            }
        }

        let correction = (contact.depth - PENETRATION_SLOP).max(0.0) / inv_mass_sum
            * POSITION_CORRECTION;
        a.position -= n * correction * a.inv_mass;
        b.position += n * correction * b.inv_mass;
    }
}

fn velocity_at(body: &RigidBody, r: DVec2) -> DVec2 {
    body.velocity + DVec2::new(-body.angular_velocity * r.y, body.angular_velocity * r.x)
}

fn apply_pair_impulse(a: &mut RigidBody, b: &mut RigidBody, ra: DVec2, rb: DVec2, impulse: DVec2) {
    a.velocity -= impulse * a.inv_mass;
    a.angular_velocity -= ra.perp_dot(impulse) * a.inv_inertia;
    b.velocity += impulse * b.inv_mass;
    b.angular_velocity += rb.perp_dot(impulse) * b.inv_inertia;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;
    use starwake_core::components::CircleShape;
    use starwake_core::enums::BodyType;

    fn hull_with_outriggers() -> RigidBody {
        let mut body = RigidBody::new(BodyType::Dynamic, 50.0, DVec2::ZERO, 0.0)
            .with_shape(CircleShape::centered(40.0, MaterialId(0)));
        for x in [32.0, -32.0] {
            body.add_shape(CircleShape {
                offset: DVec2::new(x, -32.0),
                ..CircleShape::centered(20.0, MaterialId(0))
            });
        }
        body
    }

    #[test]
    fn outrigger_contact_uses_shape_offset() {
        let mut world = World::new();
        let (ea, eb) = (world.spawn(()), world.spawn(()));
        let mut hull = hull_with_outriggers();
        let mut ball = RigidBody::new(BodyType::Dynamic, 1.0, DVec2::new(32.0, -56.0), 0.0)
            .with_shape(CircleShape::centered(5.0, MaterialId(0)))
            .with_velocity(DVec2::new(0.0, 60.0));
        let mut bodies = vec![(ea, &mut hull), (eb, &mut ball)];

        let contacts = detect(&bodies);
        assert_eq!(contacts.len(), 1);
        let c = contacts[0];
        assert!((c.normal - DVec2::new(0.0, -1.0)).length() < 1e-12);
        assert!((c.point - DVec2::new(32.0, -52.0)).length() < 1e-12);
        assert!((c.depth - 1.0).abs() < 1e-12);

        resolve(&mut bodies, &contacts, &MaterialLibrary::new());

        // Off-centre hit: the hull is pushed and spun counter-clockwise.
        assert!(hull.velocity.y > 0.0);
        assert!(hull.angular_velocity > 0.0);
        assert!(ball.velocity.y < 60.0);
    }

    #[test]
    fn separated_bodies_do_not_touch() {
        let mut world = World::new();
        let (ea, eb) = (world.spawn(()), world.spawn(()));
        let mut hull = hull_with_outriggers();
        let mut ball = RigidBody::new(BodyType::Dynamic, 1.0, DVec2::new(32.0, -80.0), 0.0)
            .with_shape(CircleShape::centered(5.0, MaterialId(0)));
        let bodies = vec![(ea, &mut hull), (eb, &mut ball)];

        assert!(detect(&bodies).is_empty());
    }
}
