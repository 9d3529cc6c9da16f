//! ll-core: stable foundation for looplab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - noise (injectable standard-normal noise sources)
//! - error (shared error types)

pub mod error;
pub mod noise;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use noise::{GaussianNoise, NoiseSource, ZeroNoise};
pub use numeric::*;
