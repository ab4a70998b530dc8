//! Game configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! wants to change. Files are JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Top-level configuration for one sandbox session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in screen units.
    pub width: f64,
    /// Viewport height in screen units.
    pub height: f64,
    /// RNG seed. Same seed = same sandbox.
    pub seed: u64,
    /// Munitions beyond this range from the origin are removed.
    pub world_bound: f64,
    /// Remove bullets and projectiles when they hit something.
    pub remove_projectiles_on_impact: bool,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub weapons: WeaponConfig,
    pub sandbox: SandboxConfig,
    pub starfield: StarfieldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            seed: 42,
            world_bound: WORLD_BOUND,
            remove_projectiles_on_impact: true,
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            weapons: WeaponConfig::default(),
            sandbox: SandboxConfig::default(),
            starfield: StarfieldConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Internal step size in seconds.
    pub fixed_step: f64,
    /// Cap on internal steps per update.
    pub max_substeps: u32,
    pub gravity: [f64; 2],
    /// Friction of the fallback contact material.
    pub friction: f64,
    /// Restitution of the fallback contact material.
    pub restitution: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_step: FIXED_STEP,
            max_substeps: MAX_SUBSTEPS,
            gravity: [0.0, 0.0],
            friction: 0.3,
            restitution: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f64,
    pub mass: f64,
    pub thrust: f64,
    pub boost_thrust: f64,
    pub turn_impulse: f64,
    pub bank_thrust: f64,
    pub turret_radius: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            mass: PLAYER_MASS,
            thrust: PLAYER_THRUST,
            boost_thrust: PLAYER_BOOST_THRUST,
            turn_impulse: PLAYER_TURN_IMPULSE,
            bank_thrust: PLAYER_BANK_THRUST,
            turret_radius: PLAYER_TURRET_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Seconds between nose gun shots.
    pub reload_secs: f64,
    pub bullet_radius: f64,
    pub bullet_mass: f64,
    pub bullet_speed: f64,
    pub bullet_lifetime_secs: f64,
    pub turret_muzzle_speed: f64,
    pub turret_standoff_factor: f64,
    pub projectile_radius: f64,
    pub projectile_mass: f64,
    pub projectile_lifetime_secs: f64,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            reload_secs: RELOAD_SECS,
            bullet_radius: BULLET_RADIUS,
            bullet_mass: BULLET_MASS,
            bullet_speed: BULLET_MUZZLE_SPEED,
            bullet_lifetime_secs: BULLET_LIFETIME_SECS,
            turret_muzzle_speed: TURRET_MUZZLE_SPEED,
            turret_standoff_factor: TURRET_STANDOFF_FACTOR,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_mass: PROJECTILE_MASS,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub prop_count_min: u32,
    pub prop_count_max: u32,
    pub prop_radius_min: f64,
    pub prop_radius_max: f64,
    /// Props spawn within `[-extent, extent]` on both axes.
    pub prop_extent: f64,
    /// Spawn the three-circle composite body at the origin.
    pub composite_body: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            prop_count_min: PROP_COUNT_MIN,
            prop_count_max: PROP_COUNT_MAX,
            prop_radius_min: PROP_RADIUS_MIN,
            prop_radius_max: PROP_RADIUS_MAX,
            prop_extent: PROP_EXTENT,
            composite_body: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: u32,
    /// Parallax of the nearest layer; farther stars move less.
    pub parallax: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            parallax: STAR_PARALLAX_MAX,
        }
    }
}

impl GameConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate config JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.physics.fixed_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "physics.fixed_step must be positive, got {}",
                self.physics.fixed_step
            )));
        }
        if self.physics.max_substeps == 0 {
            return Err(ConfigError::Invalid(
                "physics.max_substeps must be at least 1".into(),
            ));
        }
        if self.sandbox.prop_count_min > self.sandbox.prop_count_max {
            return Err(ConfigError::Invalid(format!(
                "sandbox.prop_count_min ({}) exceeds prop_count_max ({})",
                self.sandbox.prop_count_min, self.sandbox.prop_count_max
            )));
        }
        if !(self.sandbox.prop_radius_min > 0.0
            && self.sandbox.prop_radius_min <= self.sandbox.prop_radius_max)
        {
            return Err(ConfigError::Invalid(format!(
                "sandbox prop radius range {}..={} is empty or non-positive",
                self.sandbox.prop_radius_min, self.sandbox.prop_radius_max
            )));
        }
        if self.player.mass <= 0.0 || self.player.radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "player mass and radius must be positive".into(),
            ));
        }
        if self.weapons.reload_secs < 0.0 {
            return Err(ConfigError::Invalid(
                "weapons.reload_secs must not be negative".into(),
            ));
        }
        Ok(())
    }
}
