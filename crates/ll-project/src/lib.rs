//! ll-project: persisted simulation configuration and validation.
//!
//! The on-disk format is a single JSON document: ARX coefficients and
//! delay, PID gains, the generator's weighted signal tree with stable
//! integer discriminants, and the step budget. Runtime
//! buffer contents are not persisted; loading rebuilds components with
//! freshly zeroed history sized from the restored coefficients.

pub mod schema;
pub mod validate;

pub use schema::{ArxDef, GenTermDef, PidDef, SignalDef, SimulationConfig};
pub use validate::{validate_config, ValidationError};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &std::path::Path, config: &SimulationConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
