use thiserror::Error;

use crate::combat::ShipType;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("no ship specs available for '{0}'")]
    MissingShipSpecs(ShipType),

    #[error("unknown ship type '{0}'")]
    UnknownShipType(String),

    #[error("invalid fleet: {0}")]
    InvalidFleet(String),

    #[error("unsupported spec table format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;
