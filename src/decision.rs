use serde::Serialize;

use crate::doppler::DopplerBin;
use crate::util::get_2nd_max;

/// Outcome of the search for one PRN, acquired or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrnDecision {
    pub prn: usize,
    pub carrier_hz: f64,
    pub code_phase: usize,
    pub peak: f64,
    pub second_peak: f64,
    pub peak_ratio: Option<f64>,
    pub acquired: bool,
}

/// Running peak state over the doppler bins of one PRN.
///
/// The second peak is only refreshed when a bin beats the global peak, and is
/// taken from that same bin with a window of `samples_per_chip` around the
/// new peak left out, so the main lobe never competes with itself.
#[derive(Debug, Clone)]
pub struct PeakTracker {
    samples_per_chip: usize,
    max_peak: f64,
    second_peak: f64,
    carrier_hz: f64,
    code_phase: usize,
    best_corr: Vec<f64>,
}

impl PeakTracker {
    pub fn new(samples_per_chip: usize) -> Self {
        Self {
            samples_per_chip,
            max_peak: 0.0,
            second_peak: 0.0,
            carrier_hz: 0.0,
            code_phase: 0,
            best_corr: vec![],
        }
    }

    pub fn update(&mut self, bin: DopplerBin) {
        if bin.peak <= self.max_peak {
            return;
        }
        self.max_peak = bin.peak;
        self.carrier_hz = bin.carrier_hz;
        self.code_phase = bin.peak_idx;
        self.second_peak = get_2nd_max(&bin.corr, bin.peak_idx, self.samples_per_chip);
        self.best_corr = bin.corr;
    }

    /// Correlation function of the bin holding the global peak.
    pub fn best_corr(&self) -> &[f64] {
        &self.best_corr
    }

    pub fn decide(&self, prn: usize, threshold: f64) -> PrnDecision {
        // no second peak means a flat search: the ratio is undefined
        let peak_ratio = if self.second_peak > 0.0 {
            Some(self.max_peak / self.second_peak)
        } else {
            None
        };
        let acquired = peak_ratio.is_some_and(|r| r > threshold);

        PrnDecision {
            prn,
            carrier_hz: self.carrier_hz,
            code_phase: self.code_phase,
            peak: self.max_peak,
            second_peak: self.second_peak,
            peak_ratio,
            acquired,
        }
    }
}
