//! Simulation orchestrator and trace recording.

use ll_controls::{ArxModel, Generator, Pid};
use ll_core::NoiseSource;
use tracing::debug;

/// Everything observable about one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRecord {
    /// Step index.
    pub step: u64,
    /// Reference value produced by the generator.
    pub setpoint: f64,
    /// Tracking error: setpoint minus the previous plant output.
    pub error: f64,
    /// Control value produced by the PID controller.
    pub control: f64,
    /// Plant output, fed back into the next step.
    pub output: f64,
}

/// Per-step sink for loop iterations (logging, plotting, progress).
///
/// Purely observational: the loop does not depend on the observer and
/// runs identically without one.
pub trait StepObserver {
    fn on_step(&mut self, record: &StepRecord);
}

/// Record of a completed run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimTrace {
    pub records: Vec<StepRecord>,
}

impl SimTrace {
    /// Plant outputs in step order.
    pub fn outputs(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.output)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Closed control loop: generator → error → PID → ARX plant → feedback.
///
/// Owns its components exclusively; they are driven only through their
/// `value`/`sim` contracts. `run` executes the whole configured step
/// budget synchronously, steps `0..=len`.
#[derive(Debug, Clone)]
pub struct Simulation {
    generator: Generator,
    pid: Pid,
    plant: ArxModel,
    len: u64,
}

impl Simulation {
    pub fn new(generator: Generator, pid: Pid, plant: ArxModel, len: u64) -> Self {
        Self {
            generator,
            pid,
            plant,
            len,
        }
    }

    /// Run the configured step budget, collecting the full trace.
    pub fn run(&mut self, noise: &mut dyn NoiseSource) -> SimTrace {
        self.run_inner(noise, None)
    }

    /// Run while reporting each record to a caller-supplied sink.
    pub fn run_with_observer(
        &mut self,
        noise: &mut dyn NoiseSource,
        observer: &mut dyn StepObserver,
    ) -> SimTrace {
        self.run_inner(noise, Some(observer))
    }

    fn run_inner(
        &mut self,
        noise: &mut dyn NoiseSource,
        mut observer: Option<&mut dyn StepObserver>,
    ) -> SimTrace {
        debug!(len = self.len, signals = self.generator.len(), "run start");

        let mut records = Vec::with_capacity(self.len as usize + 1);
        let mut prev_output = 0.0;

        for step in 0..=self.len {
            let setpoint = self.generator.value(step);
            let error = setpoint - prev_output;
            let control = self.pid.sim(error);
            let output = self.plant.sim(control, noise);
            prev_output = output;

            let record = StepRecord {
                step,
                setpoint,
                error,
                control,
                output,
            };
            if let Some(obs) = observer.as_deref_mut() {
                obs.on_step(&record);
            }
            records.push(record);
        }

        debug!(
            steps = records.len(),
            final_output = prev_output,
            "run complete"
        );
        SimTrace { records }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn plant(&self) -> &ArxModel {
        &self.plant
    }

    /// Step budget; a run produces `len + 1` records (step 0 included).
    pub fn len(&self) -> u64 {
        self.len
    }
}
