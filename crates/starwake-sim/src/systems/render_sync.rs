//! Render sync: mirrors body transforms onto their scene containers.

use glam::DVec2;
use hecs::World;

use starwake_core::components::RigidBody;
use starwake_scene::{NodeId, SceneGraph};

/// Links an entity to the container node drawn for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub node: NodeId,
}

/// Add one circle child per body shape, positioned at the shape's local offset.
///
/// Returns the number of circles created.
pub fn draw_debug(scene: &mut SceneGraph, container: NodeId, body: &RigidBody) -> usize {
    let mut created = 0;
    for shape in &body.shapes {
        let circle = scene.create_circle(shape.radius);
        scene.set_position(circle, shape.offset);
        scene.set_rotation(circle, shape.angle);
        if scene.add_child(container, circle) {
            created += 1;
        } else {
            scene.destroy(circle);
        }
    }
    created
}

/// Copy every body's interpolated transform onto its container.
pub fn run(world: &World, scene: &mut SceneGraph) {
    for (_entity, (body, renderable)) in world.query::<(&RigidBody, &Renderable)>().iter() {
        scene.set_position(renderable.node, body.interpolated_position);
        scene.set_rotation(renderable.node, body.interpolated_angle);
    }
}

/// Place a freshly created container where its body starts.
pub fn place(scene: &mut SceneGraph, node: NodeId, position: DVec2, angle: f64) {
    scene.set_position(node, position);
    scene.set_rotation(node, angle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use starwake_core::components::CircleShape;
    use starwake_core::enums::BodyType;
    use starwake_core::materials::MaterialId;

    #[test]
    fn debug_circles_follow_shape_offsets() {
        let mut scene = SceneGraph::new();
        let container = scene.create_container();
        let body = RigidBody::new(BodyType::Dynamic, 50.0, DVec2::ZERO, 0.0)
            .with_shape(CircleShape::centered(40.0, MaterialId(0)))
            .with_shape(CircleShape {
                offset: DVec2::new(32.0, -32.0),
                angle: 0.0,
                radius: 20.0,
                material: MaterialId(0),
            });

        assert_eq!(draw_debug(&mut scene, container, &body), 2);
        let children = &scene.get(container).unwrap().children;
        assert_eq!(children.len(), 2);
        assert_eq!(scene.get(children[1]).unwrap().position, DVec2::new(32.0, -32.0));
    }

    #[test]
    fn sync_copies_interpolated_transform() {
        let mut scene = SceneGraph::new();
        let node = scene.create_container();
        let mut world = World::new();
        let mut body = RigidBody::new(BodyType::Dynamic, 1.0, DVec2::ZERO, 0.0);
        body.interpolated_position = DVec2::new(3.0, 4.0);
        body.interpolated_angle = 0.5;
        world.spawn((body, Renderable { node }));

        run(&world, &mut scene);

        let n = scene.get(node).unwrap();
        assert_eq!(n.position, DVec2::new(3.0, 4.0));
        assert_eq!(n.rotation, 0.5);
    }
}
