//! Configuration validation.
//!
//! Runs on load and before save. Catches the degeneracies the numeric
//! core deliberately does not guard against (zero periods, non-finite
//! coefficients) so a persisted file never produces a NaN-only run.

use ll_core::{ensure_finite, CoreError};
use thiserror::Error;

use crate::schema::{SignalDef, SimulationConfig};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    NonFinite(#[from] CoreError),

    #[error("{what} period must be non-zero")]
    ZeroPeriod { what: &'static str },

    #[error("square duty must be in (0, 1), got {duty}")]
    DutyOutOfRange { duty: f64 },
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), ValidationError> {
    for &c in &config.arx.a {
        ensure_finite(c, "ARX denominator coefficient")?;
    }
    for &c in &config.arx.b {
        ensure_finite(c, "ARX numerator coefficient")?;
    }
    ensure_finite(config.arx.ns_var, "ARX noise amplitude")?;

    ensure_finite(config.pid.p, "PID proportional gain")?;
    ensure_finite(config.pid.i, "PID integral gain")?;
    ensure_finite(config.pid.d, "PID derivative gain")?;

    for term in &config.gen {
        ensure_finite(term.weight, "generator weight")?;
        validate_signal(&term.signal)?;
    }

    Ok(())
}

fn validate_signal(signal: &SignalDef) -> Result<(), ValidationError> {
    match signal {
        SignalDef::Const | SignalDef::Impulse => Ok(()),
        SignalDef::Sine { period } => validate_period(*period, "sine"),
        SignalDef::Triangle { period } => validate_period(*period, "triangle"),
        SignalDef::Square { period, duty } => {
            validate_period(*period, "square")?;
            if !(*duty > 0.0 && *duty < 1.0) {
                return Err(ValidationError::DutyOutOfRange { duty: *duty });
            }
            Ok(())
        }
        SignalDef::Delay { inner, .. } => validate_signal(inner),
    }
}

fn validate_period(period: f64, what: &'static str) -> Result<(), ValidationError> {
    ensure_finite(period, "signal period")?;
    if period == 0.0 {
        return Err(ValidationError::ZeroPeriod { what });
    }
    Ok(())
}
