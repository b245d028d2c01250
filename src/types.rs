use serde::Serialize;

use crate::decision::PrnDecision;

/// A satellite found in the signal, with the coarse estimates a tracking loop
/// would start from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionResult {
    pub prn: usize,
    /// absolute carrier of the best bin
    pub carrier_hz: f64,
    /// carrier minus IF
    pub doppler_hz: f64,
    /// samples into the code period
    pub code_phase: usize,
    pub peak_ratio: f64,
}

impl AcquisitionResult {
    pub fn from_decision(d: &PrnDecision, if_freq: f64) -> Option<Self> {
        if !d.acquired {
            return None;
        }
        Some(Self {
            prn: d.prn,
            carrier_hz: d.carrier_hz,
            doppler_hz: d.carrier_hz - if_freq,
            code_phase: d.code_phase,
            peak_ratio: d.peak_ratio?,
        })
    }
}
