use thiserror::Error;

use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    #[error("Squad not found: {0}")]
    SquadNotFound(usize),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
