use rustfft::{Fft, FftPlanner, num_complex::Complex64};
use std::sync::Arc;

/// Forward/inverse transform pair of a fixed length, with its own scratch
/// memory. One instance per worker: nothing in here may be shared.
pub struct SpectralCorrelator {
    len: usize,
    fft_fw: Arc<dyn Fft<f64>>,
    fft_bw: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

impl SpectralCorrelator {
    pub fn new(len: usize) -> Self {
        let mut fft_planner: FftPlanner<f64> = FftPlanner::new();
        let fft_fw = fft_planner.plan_fft_forward(len);
        let fft_bw = fft_planner.plan_fft_inverse(len);
        let scratch_len = usize::max(
            fft_fw.get_inplace_scratch_len(),
            fft_bw.get_inplace_scratch_len(),
        );

        Self {
            len,
            fft_fw,
            fft_bw,
            buffer: vec![Complex64::default(); len],
            scratch: vec![Complex64::default(); scratch_len],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn spectralize_in_place(&mut self, buf: &mut [Complex64]) {
        assert_eq!(buf.len(), self.len);
        self.fft_fw.process_with_scratch(buf, &mut self.scratch);
    }

    pub fn spectralize(&mut self, seq: &[Complex64]) -> Vec<Complex64> {
        let mut spectrum = seq.to_vec();
        self.spectralize_in_place(&mut spectrum);
        spectrum
    }

    /// Conjugated spectrum of a local replica, computed once per PRN.
    pub fn reference_spectrum_conj(&mut self, code: &[Complex64]) -> Vec<Complex64> {
        let mut spectrum = self.spectralize(code);
        spectrum.iter_mut().for_each(|x| *x = x.conj());
        spectrum
    }

    /// Circular cross-correlation, as |IFFT(S . R*)|^2 per lag. Lag `k` peaks
    /// when the signal is the replica delayed by `k` samples. The inverse
    /// transform is not normalized.
    pub fn correlate(&mut self, signal_spectrum: &[Complex64], reference_conj: &[Complex64]) -> Vec<f64> {
        assert_eq!(signal_spectrum.len(), self.len);
        assert_eq!(reference_conj.len(), self.len);

        for ((b, s), r) in self
            .buffer
            .iter_mut()
            .zip(signal_spectrum.iter())
            .zip(reference_conj.iter())
        {
            *b = s * r;
        }
        self.fft_bw.process_with_scratch(&mut self.buffer, &mut self.scratch);

        self.buffer.iter().map(|v| v.norm_sqr()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gold_code::gen_code;

    fn brute_force(signal: &[Complex64], replica: &[Complex64]) -> Vec<f64> {
        let n = signal.len();
        (0..n)
            .map(|k| {
                let acc: Complex64 = (0..n).map(|m| signal[(m + k) % n] * replica[m].conj()).sum();
                // match the unnormalized inverse transform
                (acc * n as f64).norm_sqr()
            })
            .collect()
    }

    fn test_vec(n: usize, seed: u32) -> Vec<Complex64> {
        (0..n)
            .map(|i| {
                let x = ((i as u32).wrapping_mul(2654435761) ^ seed) % 17;
                Complex64::new(x as f64 - 8.0, (x % 5) as f64 - 2.0)
            })
            .collect()
    }

    #[test]
    fn test_matches_direct_correlation() {
        for n in [16, 31, 60] {
            let signal = test_vec(n, 7);
            let replica = test_vec(n, 1234);
            let mut corr = SpectralCorrelator::new(n);
            assert_eq!(corr.len(), n);

            let s = corr.spectralize(&signal);
            let r = corr.reference_spectrum_conj(&replica);
            let fast = corr.correlate(&s, &r);
            let slow = brute_force(&signal, &replica);

            assert_eq!(fast.len(), n);
            for (a, b) in fast.iter().zip(slow.iter()) {
                assert!((a - b).abs() <= 1e-6 * b.abs().max(1.0), "{a} != {b}");
            }
        }
    }

    #[test]
    fn test_peak_at_delay() {
        let n = 64;
        let replica: Vec<_> = gen_code(1).unwrap()[..n]
            .iter()
            .map(|&c| Complex64::new(if c == 0 { -1.0 } else { 1.0 }, 0.0))
            .collect();
        let delay = 23;
        let signal: Vec<_> = (0..n).map(|i| replica[(i + n - delay) % n]).collect();

        let mut corr = SpectralCorrelator::new(n);
        let s = corr.spectralize(&signal);
        let r = corr.reference_spectrum_conj(&replica);
        let c = corr.correlate(&s, &r);

        let (idx, _) = c
            .iter()
            .enumerate()
            .fold((0, 0.0), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) });
        assert_eq!(idx, delay);
        assert!((c[delay] - ((n * n) as f64).powi(2)).abs() < 1e-3);
    }

    #[test]
    fn test_reusable_across_calls() {
        let n = 48;
        let signal = test_vec(n, 99);
        let replica = test_vec(n, 5);
        let mut corr = SpectralCorrelator::new(n);
        let r = corr.reference_spectrum_conj(&replica);

        let s = corr.spectralize(&signal);
        let first = corr.correlate(&s, &r);
        let _ = corr.correlate(&r, &s);
        let s = corr.spectralize(&signal);
        let second = corr.correlate(&s, &r);
        assert_eq!(first, second);
    }
}
