use rustfft::num_complex::Complex64;

use crate::correlator::SpectralCorrelator;
use crate::error::{AcqError, AcqResult};
use crate::settings::Settings;
use crate::util::carrier_wipeoff;
use crate::util::get_max_with_idx;
use crate::util::phase_points;

/// One code period of raw samples and the matching phase ramp, shared
/// read-only by every PRN and every doppler bin.
pub struct SignalWindow {
    samples: Vec<f64>,
    phase_points: Vec<f64>,
}

impl SignalWindow {
    /// Keeps the first `samples_per_code` samples of `raw`. Anything beyond
    /// is left to the caller.
    pub fn new(raw: &[i8], settings: &Settings) -> AcqResult<Self> {
        let n = settings.samples_per_code();
        if raw.len() < n {
            return Err(AcqError::InsufficientData {
                needed: n,
                got: raw.len(),
            });
        }

        Ok(Self {
            samples: raw[..n].iter().map(|&x| x as f64).collect(),
            phase_points: phase_points(n, settings.sampling_freq),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sweep<'a>(
        &'a self,
        settings: &'a Settings,
        reference_conj: &'a [Complex64],
        correlator: &'a mut SpectralCorrelator,
    ) -> DopplerSweep<'a> {
        assert_eq!(correlator.len(), self.len());
        assert_eq!(reference_conj.len(), self.len());

        DopplerSweep {
            settings,
            window: self,
            reference_conj,
            correlator,
            baseband: vec![Complex64::default(); self.len()],
            bin: 0,
            num_bins: settings.num_freq_bins(),
        }
    }
}

/// Correlation of one PRN replica against the signal at one carrier hypothesis.
pub struct DopplerBin {
    pub bin: usize,
    pub carrier_hz: f64,
    pub corr: Vec<f64>,
    pub peak_idx: usize,
    pub peak: f64,
}

/// Walks the doppler bins of one PRN in ascending frequency. Every step reuses
/// the correlator's buffers, so bins are produced one at a time.
pub struct DopplerSweep<'a> {
    settings: &'a Settings,
    window: &'a SignalWindow,
    reference_conj: &'a [Complex64],
    correlator: &'a mut SpectralCorrelator,
    baseband: Vec<Complex64>,
    bin: usize,
    num_bins: usize,
}

impl Iterator for DopplerSweep<'_> {
    type Item = DopplerBin;

    fn next(&mut self) -> Option<DopplerBin> {
        if self.bin >= self.num_bins {
            return None;
        }
        let bin = self.bin;
        self.bin += 1;

        let carrier_hz = self.settings.carrier_freq(bin);
        carrier_wipeoff(
            &self.window.samples,
            carrier_hz,
            &self.window.phase_points,
            &mut self.baseband,
        );
        self.correlator.spectralize_in_place(&mut self.baseband);
        let corr = self.correlator.correlate(&self.baseband, self.reference_conj);
        let (peak_idx, peak) = get_max_with_idx(&corr);

        log::trace!("bin {bin:2}: carrier={carrier_hz:.0} peak={peak:.3e} idx={peak_idx}");

        Some(DopplerBin {
            bin,
            carrier_hz,
            corr,
            peak_idx,
            peak,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.num_bins - self.bin;
        (left, Some(left))
    }
}

impl ExactSizeIterator for DopplerSweep<'_> {}
