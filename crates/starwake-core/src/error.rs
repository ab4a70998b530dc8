//! Error types shared by the simulation crates.

/// Errors raised while loading or validating a `GameConfig`.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised by turret hardpoints.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TurretError {
    #[error("No schema defined to load projectile with")]
    NoProjectileSchema,

    #[error("ship has no turret at index {0}")]
    NoSuchTurret(usize),
}

/// Errors raised by engine operations on entities.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown entity {0}")]
    UnknownEntity(u64),

    #[error("entity {0} has no rigid body")]
    NoBody(u64),

    #[error(transparent)]
    Turret(#[from] TurretError),
}
