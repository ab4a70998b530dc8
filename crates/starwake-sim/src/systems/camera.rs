//! Camera: keeps the player centred by moving the world container.

use glam::DVec2;
use hecs::World;

use starwake_core::components::{Player, RigidBody};
use starwake_core::state::CameraView;
use starwake_scene::{NodeId, SceneGraph};

/// Screen offset that puts `focus` at the centre of a `width` x `height` viewport.
pub fn offset_for(focus: DVec2, width: f64, height: f64) -> DVec2 {
    DVec2::new(width / 2.0 - focus.x, height / 2.0 - focus.y)
}

/// Follow the player. Without a player the camera holds its last offset.
pub fn run(
    world: &World,
    scene: &mut SceneGraph,
    world_container: NodeId,
    width: f64,
    height: f64,
    previous: CameraView,
) -> CameraView {
    let focus = world
        .query::<(&Player, &RigidBody)>()
        .iter()
        .map(|(_, (_, body))| body.interpolated_position)
        .next();

    let Some(focus) = focus else {
        return previous;
    };

    let offset = offset_for(focus, width, height);
    scene.set_position(world_container, offset);
    CameraView { offset, focus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starwake_core::enums::BodyType;

    #[test]
    fn origin_maps_to_viewport_centre() {
        assert_eq!(offset_for(DVec2::ZERO, 1280.0, 720.0), DVec2::new(640.0, 360.0));
        assert_eq!(offset_for(DVec2::new(100.0, -50.0), 200.0, 100.0), DVec2::new(0.0, 100.0));
    }

    #[test]
    fn follows_player_and_moves_container() {
        let mut scene = SceneGraph::new();
        let container = scene.create_container();
        let mut world = World::new();
        world.spawn((Player, RigidBody::new(BodyType::Dynamic, 1.0, DVec2::new(10.0, 20.0), 0.0)));

        let view = run(&world, &mut scene, container, 100.0, 100.0, CameraView::default());
        assert_eq!(view.focus, DVec2::new(10.0, 20.0));
        assert_eq!(view.offset, DVec2::new(40.0, 30.0));
        assert_eq!(scene.get(container).unwrap().position, view.offset);
    }

    #[test]
    fn holds_without_player() {
        let mut scene = SceneGraph::new();
        let container = scene.create_container();
        let previous = CameraView {
            offset: DVec2::new(1.0, 2.0),
            focus: DVec2::new(3.0, 4.0),
        };
        assert_eq!(run(&World::new(), &mut scene, container, 10.0, 10.0, previous), previous);
    }
}
