//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `GameConfig`; anything a player might
//! want to tweak is overridable from the config file.

use std::f64::consts::FRAC_PI_2;

// --- Physics stepping ---

/// Fixed internal physics step (seconds).
pub const FIXED_STEP: f64 = 1.0 / 60.0;

/// Maximum internal steps taken per engine update.
pub const MAX_SUBSTEPS: u32 = 10;

/// Default linear damping (fraction of velocity lost per second).
pub const DEFAULT_DAMPING: f64 = 0.1;

/// Default angular damping.
pub const DEFAULT_ANGULAR_DAMPING: f64 = 0.1;

/// Fraction of penetration depth corrected per contact resolution.
pub const POSITION_CORRECTION: f64 = 0.8;

/// Penetration allowed before positional correction kicks in.
pub const PENETRATION_SLOP: f64 = 0.01;

// --- Viewport ---

pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 720.0;

// --- Heading convention ---

/// Ships face local +y; firing directions are `angle + FACING_OFFSET`.
pub const FACING_OFFSET: f64 = FRAC_PI_2;

// --- Turret kinematics ---

/// Clearance added to the turret radius before extending to the muzzle.
pub const TURRET_STANDOFF_PAD: f64 = 3.0;

/// Multiplier applied to the padded turret radius.
pub const TURRET_STANDOFF_FACTOR: f64 = 1.5;

/// Projectile speed relative to the parent ship.
pub const TURRET_MUZZLE_SPEED: f64 = 50.0;

// --- Nose gun ---

/// Extra clearance beyond `ship radius + bullet radius` for the nose gun.
pub const NOSE_GUN_PAD: f64 = 1.2;

/// Bullet radius.
pub const BULLET_RADIUS: f64 = 3.0;

/// Bullet mass.
pub const BULLET_MASS: f64 = 0.5;

/// Bullet speed relative to the ship.
pub const BULLET_MUZZLE_SPEED: f64 = 85.0;

/// Seconds between nose gun shots.
pub const RELOAD_SECS: f64 = 0.1;

/// Slack when comparing accumulated physics time against a cooldown.
/// Summed fixed steps land a few ulps short of exact multiples.
pub const TIMER_EPSILON: f64 = 1e-9;

/// Seconds a bullet lives before being removed.
pub const BULLET_LIFETIME_SECS: f64 = 4.0;

// --- Projectiles ---

pub const PROJECTILE_RADIUS: f64 = 3.0;
pub const PROJECTILE_MASS: f64 = 1.0;
pub const PROJECTILE_LIFETIME_SECS: f64 = 6.0;

// --- Player ship ---

pub const PLAYER_RADIUS: f64 = 20.0;
pub const PLAYER_MASS: f64 = 10.0;

/// Impulse per update while thrusting.
pub const PLAYER_THRUST: f64 = 5.0;

/// Impulse per update while thrusting with boost engaged.
pub const PLAYER_BOOST_THRUST: f64 = 12.0;

/// Angular impulse per update while turning.
pub const PLAYER_TURN_IMPULSE: f64 = 40.0;

/// Lateral impulse per update while banking.
pub const PLAYER_BANK_THRUST: f64 = 3.0;

/// Turret radius on the player ship.
pub const PLAYER_TURRET_RADIUS: f64 = 4.0;

// --- Sandbox population ---

pub const PROP_COUNT_MIN: u32 = 10;
pub const PROP_COUNT_MAX: u32 = 20;
pub const PROP_RADIUS_MIN: f64 = 10.0;
pub const PROP_RADIUS_MAX: f64 = 30.0;
pub const PROP_EXTENT: f64 = 1000.0;

// --- Backdrop ---

pub const STAR_COUNT: u32 = 200;

/// Nearest star layer moves this fraction of the camera motion.
pub const STAR_PARALLAX_MAX: f64 = 0.1;

// --- World bounds ---

/// Bullets and projectiles beyond this range from the origin are removed.
pub const WORLD_BOUND: f64 = 5000.0;
