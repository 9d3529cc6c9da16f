//! Closed-loop simulation runner for looplab.
//!
//! Wires one [`Generator`](ll_controls::Generator), one
//! [`Pid`](ll_controls::Pid) and one [`ArxModel`](ll_controls::ArxModel)
//! into the per-step loop: setpoint, tracking error, control value, plant
//! output, feedback. Stepping has no failure path: degenerate component
//! parameters surface as NaN in the trace, never as an error.

pub mod sim;

pub use sim::{SimTrace, Simulation, StepObserver, StepRecord};
