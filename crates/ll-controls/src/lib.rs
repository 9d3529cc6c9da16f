//! Control-loop component family for looplab.
//!
//! This crate provides the three component kinds wired together by the
//! closed-loop orchestrator:
//! - Reference signals ([`Signal`]) and their weighted composition
//!   ([`Generator`]) produce the setpoint trajectory
//! - The [`Pid`] controller maps tracking error to a control value
//! - The [`ArxModel`] plant maps control input to plant output through a
//!   linear recurrence with configurable input delay and optional noise
//!
//! # Design Principles
//!
//! - **Closed sum type**: the signal family is a fixed enum, not open
//!   subclassing; persistence maps each variant to a stable tag
//! - **Exclusive ownership**: a `Delay` owns its child outright; no signal
//!   is shared between generator entries
//! - **Total numeric methods**: `value` and `sim` never fail; degenerate
//!   parameters (zero period) propagate as NaN by documented policy

pub mod arx;
pub mod error;
pub mod pid;
pub mod signal;

pub use arx::ArxModel;
pub use error::{ControlError, ControlResult};
pub use pid::Pid;
pub use signal::{Generator, Signal};
