//! Configuration schema definitions.
//!
//! Signals are persisted as `{"t": <tag>, "p": <payload>}` with stable
//! integer discriminants. Tag 0 is reserved for the abstract signal and
//! is rejected on decode; `Delay` nests its child payload recursively.

use ll_controls::{ArxModel, Generator, Pid, Signal};
use ll_sim::Simulation;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Stable signal discriminants. `Delay` sits at the bottom of the i8
/// range so new plain variants can be appended after `Triangle`.
pub const TAG_VIRTUAL: i8 = 0;
pub const TAG_CONST: i8 = 1;
pub const TAG_IMPULSE: i8 = 2;
pub const TAG_SINE: i8 = 3;
pub const TAG_SQUARE: i8 = 4;
pub const TAG_TRIANGLE: i8 = 5;
pub const TAG_DELAY: i8 = i8::MIN;

/// Top-level persisted configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(rename = "ARX")]
    pub arx: ArxDef,
    #[serde(rename = "PID")]
    pub pid: PidDef,
    #[serde(default)]
    pub gen: Vec<GenTermDef>,
    pub len: u64,
}

/// ARX plant coefficients. `A` may be empty (no feedback term).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArxDef {
    #[serde(rename = "A")]
    pub a: Vec<f64>,
    #[serde(rename = "B")]
    pub b: Vec<f64>,
    pub k: usize,
    pub ns_var: f64,
}

/// PID gains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PidDef {
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "I")]
    pub i: f64,
    #[serde(rename = "D")]
    pub d: f64,
}

/// One weighted generator entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenTermDef {
    /// Weight applied to the signal.
    #[serde(rename = "A")]
    pub weight: f64,
    /// The signal tree.
    #[serde(rename = "S")]
    pub signal: SignalDef,
}

/// Persisted signal tree, serialized through the tagged raw form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSignalDef", into = "RawSignalDef")]
pub enum SignalDef {
    Const,
    Impulse,
    Sine { period: f64 },
    Square { period: f64, duty: f64 },
    Triangle { period: f64 },
    Delay { offset: u64, inner: Box<SignalDef> },
}

/// Errors decoding a tagged signal payload.
#[derive(Debug, Error)]
pub enum SignalDecodeError {
    #[error("signal tag 0 denotes the abstract signal and cannot be instantiated")]
    AbstractTag,

    #[error("unknown signal tag: {0}")]
    UnknownTag(i8),

    #[error("bad signal payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Wire form of a signal node: discriminant plus variant payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSignalDef {
    t: i8,
    p: serde_json::Value,
}

#[derive(Deserialize)]
struct PeriodPayload {
    #[serde(rename = "T")]
    period: f64,
}

#[derive(Deserialize)]
struct SquarePayload {
    #[serde(rename = "T")]
    period: f64,
    #[serde(rename = "D")]
    duty: f64,
}

#[derive(Deserialize)]
struct DelayPayload {
    #[serde(rename = "D")]
    offset: u64,
    #[serde(rename = "S")]
    inner: RawSignalDef,
}

impl TryFrom<RawSignalDef> for SignalDef {
    type Error = SignalDecodeError;

    fn try_from(raw: RawSignalDef) -> Result<Self, Self::Error> {
        match raw.t {
            TAG_VIRTUAL => Err(SignalDecodeError::AbstractTag),
            TAG_CONST => Ok(Self::Const),
            TAG_IMPULSE => Ok(Self::Impulse),
            TAG_SINE => {
                let p: PeriodPayload = serde_json::from_value(raw.p)?;
                Ok(Self::Sine { period: p.period })
            }
            TAG_SQUARE => {
                let p: SquarePayload = serde_json::from_value(raw.p)?;
                Ok(Self::Square {
                    period: p.period,
                    duty: p.duty,
                })
            }
            TAG_TRIANGLE => {
                let p: PeriodPayload = serde_json::from_value(raw.p)?;
                Ok(Self::Triangle { period: p.period })
            }
            TAG_DELAY => {
                let p: DelayPayload = serde_json::from_value(raw.p)?;
                let inner = SignalDef::try_from(p.inner)?;
                Ok(Self::Delay {
                    offset: p.offset,
                    inner: Box::new(inner),
                })
            }
            other => Err(SignalDecodeError::UnknownTag(other)),
        }
    }
}

impl From<SignalDef> for RawSignalDef {
    fn from(def: SignalDef) -> Self {
        match def {
            SignalDef::Const => RawSignalDef {
                t: TAG_CONST,
                p: json!({}),
            },
            SignalDef::Impulse => RawSignalDef {
                t: TAG_IMPULSE,
                p: json!({}),
            },
            SignalDef::Sine { period } => RawSignalDef {
                t: TAG_SINE,
                p: json!({ "T": period }),
            },
            SignalDef::Square { period, duty } => RawSignalDef {
                t: TAG_SQUARE,
                p: json!({ "T": period, "D": duty }),
            },
            SignalDef::Triangle { period } => RawSignalDef {
                t: TAG_TRIANGLE,
                p: json!({ "T": period }),
            },
            SignalDef::Delay { offset, inner } => {
                let child = RawSignalDef::from(*inner);
                RawSignalDef {
                    t: TAG_DELAY,
                    p: json!({ "D": offset, "S": { "t": child.t, "p": child.p } }),
                }
            }
        }
    }
}

impl SignalDef {
    /// Build the runtime signal this definition describes.
    pub fn build(&self) -> Signal {
        match self {
            Self::Const => Signal::Const,
            Self::Impulse => Signal::Impulse,
            Self::Sine { period } => Signal::Sine { period: *period },
            Self::Square { period, duty } => Signal::Square {
                period: *period,
                duty: *duty,
            },
            Self::Triangle { period } => Signal::Triangle { period: *period },
            Self::Delay { offset, inner } => Signal::Delay {
                offset: *offset,
                inner: Box::new(inner.build()),
            },
        }
    }

    /// Capture a runtime signal into its persisted definition.
    pub fn from_signal(signal: &Signal) -> Self {
        match signal {
            Signal::Const => Self::Const,
            Signal::Impulse => Self::Impulse,
            Signal::Sine { period } => Self::Sine { period: *period },
            Signal::Square { period, duty } => Self::Square {
                period: *period,
                duty: *duty,
            },
            Signal::Triangle { period } => Self::Triangle { period: *period },
            Signal::Delay { offset, inner } => Self::Delay {
                offset: *offset,
                inner: Box::new(Self::from_signal(inner)),
            },
        }
    }
}

impl SimulationConfig {
    /// Build a runnable simulation. History buffers start zeroed; runtime
    /// state is not part of the persisted contract.
    pub fn build_simulation(&self) -> Simulation {
        let mut generator = Generator::new();
        for term in &self.gen {
            generator.add(term.weight, term.signal.build());
        }
        let pid = Pid::new(self.pid.p, self.pid.i, self.pid.d);
        let plant = ArxModel::new(
            self.arx.a.clone(),
            self.arx.b.clone(),
            self.arx.k,
            self.arx.ns_var,
        );
        Simulation::new(generator, pid, plant, self.len)
    }

    /// Capture a simulation's configuration (not its runtime buffers).
    pub fn from_simulation(sim: &Simulation) -> Self {
        let plant = sim.plant();
        let (p, i, d) = sim.pid().gains();
        Self {
            arx: ArxDef {
                a: plant.denominator().to_vec(),
                b: plant.numerator().to_vec(),
                k: plant.delay(),
                ns_var: plant.noise_amp(),
            },
            pid: PidDef { p, i, d },
            gen: sim
                .generator()
                .terms()
                .iter()
                .map(|(weight, signal)| GenTermDef {
                    weight: *weight,
                    signal: SignalDef::from_signal(signal),
                })
                .collect(),
            len: sim.len(),
        }
    }
}
