//! ARX plant model.
//!
//! Implements the difference equation
//! `y[n] = Σ b[j]·u[n-k-j] − Σ a[i]·y[n-1-i] + noise_amp·e[n]`
//! where `k` is the input delay and `e[n]` a standard-normal disturbance
//! drawn from an injected [`NoiseSource`].

use std::collections::VecDeque;

use ll_core::NoiseSource;

/// Discrete ARX plant.
///
/// The two history windows hold the most recent samples front-first:
/// `in_buf[0]` is the input just applied, `out_buf[0]` the previous
/// output. Their lengths are tied to the coefficient vectors
/// (`in_buf.len() == b.len() + delay`, `out_buf.len() == a.len()`) and
/// both are re-zeroed whenever the coefficients are reassigned.
///
/// The denominator is used as-is: no leading-coefficient normalization,
/// and an empty `a` is valid (the feedback term is then vacuously zero).
#[derive(Debug, Clone, PartialEq)]
pub struct ArxModel {
    a: Vec<f64>,
    b: Vec<f64>,
    delay: usize,
    noise_amp: f64,
    in_buf: VecDeque<f64>,
    out_buf: VecDeque<f64>,
}

impl ArxModel {
    /// Build a plant from denominator `a`, numerator `b`, input delay and
    /// noise amplitude. History starts zeroed.
    pub fn new(a: Vec<f64>, b: Vec<f64>, delay: usize, noise_amp: f64) -> Self {
        let mut model = Self {
            a: Vec::new(),
            b: Vec::new(),
            delay,
            noise_amp,
            in_buf: VecDeque::new(),
            out_buf: VecDeque::new(),
        };
        model.set_numerator(b);
        model.set_denominator(a);
        model
    }

    /// Replace the numerator. Resizes the input window to
    /// `b.len() + delay` and discards its previous contents.
    pub fn set_numerator(&mut self, b: Vec<f64>) {
        self.b = b;
        self.in_buf = VecDeque::from(vec![0.0; self.b.len() + self.delay]);
    }

    /// Replace the denominator. Resizes the output window to `a.len()`
    /// and discards its previous contents.
    pub fn set_denominator(&mut self, a: Vec<f64>) {
        self.a = a;
        self.out_buf = VecDeque::from(vec![0.0; self.a.len()]);
    }

    /// One plant iteration: control input in, plant output out.
    pub fn sim(&mut self, input: f64, noise: &mut dyn NoiseSource) -> f64 {
        self.in_buf.push_front(input);
        self.in_buf.truncate(self.b.len() + self.delay);

        let numerator: f64 = self
            .in_buf
            .iter()
            .skip(self.delay)
            .zip(&self.b)
            .map(|(u, b)| b * u)
            .sum();
        let denominator: f64 = self.a.iter().zip(&self.out_buf).map(|(a, y)| a * y).sum();

        let mut output = numerator - denominator;
        if self.noise_amp != 0.0 {
            output += self.noise_amp * noise.next_standard_normal();
        }

        self.out_buf.push_front(output);
        self.out_buf.truncate(self.a.len());
        output
    }

    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    pub fn noise_amp(&self) -> f64 {
        self.noise_amp
    }

    #[cfg(test)]
    fn input_window(&self) -> &VecDeque<f64> {
        &self.in_buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll_core::{nearly_equal, Tolerances, ZeroNoise};

    // Reference traces are quoted to three decimals.
    const TOL: Tolerances = Tolerances {
        abs: 1e-3,
        rel: 0.0,
    };

    fn drive(model: &mut ArxModel, inputs: &[f64]) -> Vec<f64> {
        let mut noise = ZeroNoise;
        inputs.iter().map(|&u| model.sim(u, &mut noise)).collect()
    }

    fn unit_step(len: usize) -> Vec<f64> {
        // 0 at step 0, 1 afterwards.
        (0..len).map(|i| if i == 0 { 0.0 } else { 1.0 }).collect()
    }

    fn assert_sequence(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (got, want)) in actual.iter().zip(expected).enumerate() {
            assert!(
                nearly_equal(*got, *want, TOL),
                "step {i}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn null_excitation_stays_zero() {
        let mut model = ArxModel::new(vec![-0.4], vec![0.6], 1, 0.0);
        let out = drive(&mut model, &vec![0.0; 30]);
        assert!(out.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn unit_step_first_order_delay_one() {
        let mut model = ArxModel::new(vec![-0.4], vec![0.6], 1, 0.0);
        let out = drive(&mut model, &unit_step(30));
        let expected = [
            0.0, 0.0, 0.6, 0.84, 0.936, 0.9744, 0.98976, 0.995904, 0.998362, 0.999345, 0.999738,
            0.999895, 0.999958, 0.999983, 0.999993, 0.999997, 0.999999, 1.0, 1.0, 1.0, 1.0, 1.0,
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        ];
        assert_sequence(&out, &expected);
    }

    #[test]
    fn unit_step_first_order_delay_two() {
        let mut model = ArxModel::new(vec![-0.4], vec![0.6], 2, 0.0);
        let out = drive(&mut model, &unit_step(30));
        let expected = [
            0.0, 0.0, 0.0, 0.6, 0.84, 0.936, 0.9744, 0.98976, 0.995904, 0.998362, 0.999345,
            0.999738, 0.999895, 0.999958, 0.999983, 0.999993, 0.999997, 0.999999, 1.0, 1.0, 1.0,
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        ];
        assert_sequence(&out, &expected);
    }

    #[test]
    fn unit_step_second_order() {
        let mut model = ArxModel::new(vec![-0.4, 0.2], vec![0.6, 0.3], 2, 0.0);
        let out = drive(&mut model, &unit_step(30));
        let expected = [
            0.0, 0.0, 0.0, 0.6, 1.14, 1.236, 1.1664, 1.11936, 1.11446, 1.12191, 1.12587, 1.12597,
            1.12521, 1.12489, 1.12491, 1.12499, 1.12501, 1.12501, 1.125, 1.125, 1.125, 1.125,
            1.125, 1.125, 1.125, 1.125, 1.125, 1.125, 1.125, 1.125,
        ];
        assert_sequence(&out, &expected);
    }

    #[test]
    fn step_converges_to_dc_gain() {
        // DC gain of y[n] = b·u[n-k] - a·y[n-1] is b.sum() / (1 + a.sum()).
        let a = vec![-0.4, 0.2];
        let b = vec![0.6, 0.3];
        let gain = b.iter().sum::<f64>() / (1.0 + a.iter().sum::<f64>());
        let mut model = ArxModel::new(a, b, 2, 0.0);
        let out = drive(&mut model, &unit_step(60));
        assert!(nearly_equal(out[59], gain, TOL));
        assert!((gain - 1.125).abs() < 1e-12);
    }

    #[test]
    fn numerator_reset_resizes_and_zeroes_window() {
        let mut model = ArxModel::new(vec![-0.4], vec![0.6], 3, 0.0);
        let mut noise = ZeroNoise;
        model.sim(1.0, &mut noise);
        model.sim(2.0, &mut noise);

        model.set_numerator(vec![0.5, 0.25]);
        assert_eq!(model.input_window().len(), 2 + 3);
        assert!(model.input_window().iter().all(|&u| u == 0.0));
    }

    #[test]
    fn denominator_reset_clears_feedback_history() {
        let mut model = ArxModel::new(vec![-0.4], vec![1.0], 0, 0.0);
        let mut noise = ZeroNoise;
        model.sim(1.0, &mut noise);
        assert_ne!(model.sim(0.0, &mut noise), 0.0);

        model.set_denominator(vec![-0.4]);
        // History gone: with zero input the output is zero again.
        assert_eq!(model.sim(0.0, &mut noise), 0.0);
    }

    #[test]
    fn empty_denominator_is_pure_moving_average() {
        let mut model = ArxModel::new(vec![], vec![0.5, 0.5], 0, 0.0);
        let out = drive(&mut model, &[1.0, 1.0, 0.0, 0.0]);
        assert_eq!(out, vec![0.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn empty_numerator_and_zero_delay() {
        let mut model = ArxModel::new(vec![-0.9], vec![], 0, 0.0);
        let out = drive(&mut model, &[1.0, 1.0, 1.0]);
        assert!(out.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn noise_amplitude_scales_disturbance() {
        struct UnitNoise;
        impl NoiseSource for UnitNoise {
            fn next_standard_normal(&mut self) -> f64 {
                1.0
            }
        }

        let mut model = ArxModel::new(vec![], vec![1.0], 0, 0.25);
        let mut noise = UnitNoise;
        assert_eq!(model.sim(0.0, &mut noise), 0.25);
        assert_eq!(model.sim(1.0, &mut noise), 1.25);
    }
}
