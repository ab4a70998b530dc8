//! Helm system: turns player commands into impulses on the player ship.

use glam::DVec2;
use hecs::World;
use log::trace;

use starwake_core::commands::PlayerCommand;
use starwake_core::components::{Helm, Player, RigidBody};

use crate::physics::integrate::{apply_angular_impulse, apply_impulse_local};

/// Apply a helm command to every player ship. Returns false for commands
/// the helm does not handle.
pub fn apply(world: &mut World, command: PlayerCommand) -> bool {
    let mut handled = false;
    for (_entity, (_player, helm, body)) in
        world.query_mut::<(&Player, &mut Helm, &mut RigidBody)>()
    {
        handled = steer(helm, body, command);
        trace!("helm {command:?} -> v={:?} w={:.3}", body.velocity, body.angular_velocity);
    }
    handled
}

/// Apply one command to one ship. Ships face their local +y axis.
pub fn steer(helm: &mut Helm, body: &mut RigidBody, command: PlayerCommand) -> bool {
    match command {
        PlayerCommand::Forward => apply_impulse_local(body, DVec2::new(0.0, helm.thrust)),
        PlayerCommand::Backward => apply_impulse_local(body, DVec2::new(0.0, -helm.thrust)),
        PlayerCommand::TurnLeft => apply_angular_impulse(body, helm.turn_impulse),
        PlayerCommand::TurnRight => apply_angular_impulse(body, -helm.turn_impulse),
        PlayerCommand::BankLeft => apply_impulse_local(body, DVec2::new(-helm.bank_thrust, 0.0)),
        PlayerCommand::BankRight => apply_impulse_local(body, DVec2::new(helm.bank_thrust, 0.0)),
        PlayerCommand::SetBoost { engaged } => helm.set_boost(engaged),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use starwake_core::components::CircleShape;
    use starwake_core::enums::BodyType;
    use starwake_core::materials::MaterialId;

    fn ship() -> (Helm, RigidBody) {
        let body = RigidBody::new(BodyType::Dynamic, 10.0, DVec2::ZERO, 0.0)
            .with_shape(CircleShape::centered(20.0, MaterialId(0)));
        (Helm::new(5.0, 12.0, 40.0, 3.0), body)
    }

    #[test]
    fn forward_pushes_along_local_y() {
        let (mut helm, mut body) = ship();
        assert!(steer(&mut helm, &mut body, PlayerCommand::Forward));
        assert_relative_eq!(body.velocity.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(body.velocity.y, 0.5);
    }

    #[test]
    fn boost_raises_forward_impulse() {
        let (mut helm, mut body) = ship();
        steer(&mut helm, &mut body, PlayerCommand::SetBoost { engaged: true });
        steer(&mut helm, &mut body, PlayerCommand::Forward);
        assert_relative_eq!(body.velocity.y, 1.2);
    }

    #[test]
    fn turning_left_is_counter_clockwise() {
        let (mut helm, mut body) = ship();
        steer(&mut helm, &mut body, PlayerCommand::TurnLeft);
        assert!(body.angular_velocity > 0.0);
        steer(&mut helm, &mut body, PlayerCommand::TurnRight);
        assert_relative_eq!(body.angular_velocity, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn bank_left_moves_toward_negative_x() {
        let (mut helm, mut body) = ship();
        steer(&mut helm, &mut body, PlayerCommand::BankLeft);
        assert!(body.velocity.x < 0.0);
    }

    #[test]
    fn non_helm_commands_are_not_handled() {
        let (mut helm, mut body) = ship();
        assert!(!steer(&mut helm, &mut body, PlayerCommand::Fire));
        assert!(!steer(&mut helm, &mut body, PlayerCommand::Pause));
    }
}
