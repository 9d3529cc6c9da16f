//! PID controller.

/// Discrete PID control law.
///
/// Integration is a running sum of errors (backward Euler with unit step),
/// the derivative a first difference. The two state fields start at zero
/// and there is no reset method: constructing a fresh instance is the only
/// way to clear history.
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    kp: f64,
    ki: f64,
    kd: f64,
    sum_err: f64,
    last_err: f64,
}

impl Pid {
    /// Create a controller with the given gains and zeroed state.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            sum_err: 0.0,
            last_err: 0.0,
        }
    }

    /// One controller iteration: tracking error in, control value out.
    ///
    /// Mutates the accumulated and previous error on every call. Pure
    /// arithmetic, assumes finite input.
    pub fn sim(&mut self, error: f64) -> f64 {
        self.sum_err += error;
        let diff_err = error - self.last_err;
        self.last_err = error;

        self.kp * error + self.ki * self.sum_err + self.kd * diff_err
    }

    /// The `(kp, ki, kd)` gains.
    pub fn gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }
}
