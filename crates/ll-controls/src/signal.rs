//! Reference signals and their weighted composition.

use std::f64::consts::TAU;

use crate::error::{ControlError, ControlResult};

/// A reference waveform, evaluated at a discrete step index.
///
/// Every variant is a pure function of the step except `Delay`, which
/// recurses into an exclusively owned child. `value` is total for all
/// step indices; a zero period makes the periodic variants return NaN
/// rather than fail (callers validate periods up front, see the checked
/// constructors).
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Always 1.
    Const,
    /// 1 at step 0, 0 afterwards.
    Impulse,
    /// `sin(2π·step/period)`.
    Sine { period: f64 },
    /// 1 while the phase fraction is below `duty`, else 0.
    Square { period: f64, duty: f64 },
    /// Piecewise-linear wave in [-1, 1], peak at quarter-period,
    /// trough at three-quarter-period.
    Triangle { period: f64 },
    /// 0 for the first `offset` steps, then the child shifted in time.
    Delay { offset: u64, inner: Box<Signal> },
}

impl Signal {
    /// Checked sine constructor. Rejects a zero period.
    pub fn sine(period: f64) -> ControlResult<Self> {
        if period == 0.0 {
            return Err(ControlError::InvalidArg {
                what: "sine period must be non-zero",
            });
        }
        Ok(Self::Sine { period })
    }

    /// Checked square constructor. Rejects a zero period and a duty cycle
    /// outside (0, 1).
    pub fn square(period: f64, duty: f64) -> ControlResult<Self> {
        if period == 0.0 {
            return Err(ControlError::InvalidArg {
                what: "square period must be non-zero",
            });
        }
        if !(duty > 0.0 && duty < 1.0) {
            return Err(ControlError::InvalidArg {
                what: "square duty must be in (0, 1)",
            });
        }
        Ok(Self::Square { period, duty })
    }

    /// Checked triangle constructor. Rejects a zero period.
    pub fn triangle(period: f64) -> ControlResult<Self> {
        if period == 0.0 {
            return Err(ControlError::InvalidArg {
                what: "triangle period must be non-zero",
            });
        }
        Ok(Self::Triangle { period })
    }

    /// Wrap a signal so it starts after `offset` steps.
    pub fn delayed(offset: u64, inner: Signal) -> Self {
        Self::Delay {
            offset,
            inner: Box::new(inner),
        }
    }

    /// Evaluate the signal at a step index.
    pub fn value(&self, step: u64) -> f64 {
        match self {
            Self::Const => 1.0,
            Self::Impulse => {
                if step == 0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Sine { period } => (step as f64 * TAU / period).sin(),
            Self::Square { period, duty } => {
                let phase = (step as f64 / period).fract();
                if phase < *duty {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Triangle { period } => {
                let phase = (step as f64 / period).fract();
                if phase < 0.25 {
                    phase * 4.0
                } else if phase > 0.75 {
                    (phase - 1.0) * 4.0
                } else {
                    (0.5 - phase) * 4.0
                }
            }
            Self::Delay { offset, inner } => {
                if step < *offset {
                    0.0
                } else {
                    inner.value(step - offset)
                }
            }
        }
    }
}

/// Weighted sum of signals: the setpoint source for the closed loop.
///
/// Entries are append-only and keep insertion order so a persisted
/// generator round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generator {
    terms: Vec<(f64, Signal)>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a weighted signal. The generator takes ownership.
    pub fn add(&mut self, weight: f64, signal: Signal) {
        self.terms.push((weight, signal));
    }

    /// `Σ weightᵢ · signalᵢ.value(step)`; 0 for an empty generator.
    pub fn value(&self, step: u64) -> f64 {
        self.terms.iter().map(|(w, s)| w * s.value(step)).sum()
    }

    /// The weighted terms in insertion order.
    pub fn terms(&self) -> &[(f64, Signal)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}
