use colored::Colorize;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::code::Code;
use crate::constants::NUM_GPS_SATS;
use crate::correlator::SpectralCorrelator;
use crate::decision::{PeakTracker, PrnDecision};
use crate::doppler::SignalWindow;
use crate::error::{AcqError, AcqResult};
use crate::gold_code::check_prn;
use crate::settings::Settings;
use crate::types::AcquisitionResult;

/// Parallel code phase search over all GPS L1 C/A PRNs, one code period of
/// coherent integration.
///
/// Raw captures usually hold far more than one code period; only the first
/// `samples_per_code` samples are used and the rest is left to the caller.
pub struct Acquisition {
    settings: Settings,
}

impl Acquisition {
    pub fn new(settings: Settings) -> AcqResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn samples_per_code(&self) -> usize {
        self.settings.samples_per_code()
    }

    /// Searches PRN 1 to 32 in order on the calling thread.
    pub fn process(&self, raw: &[i8]) -> AcqResult<Vec<AcquisitionResult>> {
        self.process_with_cancel(raw, &AtomicBool::new(false))
    }

    pub fn process_with_cancel(
        &self,
        raw: &[i8],
        cancel: &AtomicBool,
    ) -> AcqResult<Vec<AcquisitionResult>> {
        let window = SignalWindow::new(raw, &self.settings)?;
        let mut correlator = SpectralCorrelator::new(window.len());
        let ts = Instant::now();
        self.log_start();

        let mut decisions = Vec::with_capacity(NUM_GPS_SATS);
        for prn in 1..=NUM_GPS_SATS {
            if cancel.load(Ordering::SeqCst) {
                return Err(AcqError::Cancelled);
            }
            let tracker = self.search_prn(prn, &window, &mut correlator)?;
            decisions.push(tracker.decide(prn, self.settings.acq_threshold));
        }

        Ok(self.collect_results(&decisions, ts))
    }

    /// Same search as `process`, one PRN per rayon task. Each worker owns its
    /// correlator; results come back in PRN order.
    pub fn process_parallel(&self, raw: &[i8]) -> AcqResult<Vec<AcquisitionResult>> {
        self.process_parallel_with_cancel(raw, &AtomicBool::new(false))
    }

    pub fn process_parallel_with_cancel(
        &self,
        raw: &[i8],
        cancel: &AtomicBool,
    ) -> AcqResult<Vec<AcquisitionResult>> {
        let window = SignalWindow::new(raw, &self.settings)?;
        let n = window.len();
        let ts = Instant::now();
        self.log_start();

        let decisions = (1..=NUM_GPS_SATS)
            .into_par_iter()
            .map_init(
                || SpectralCorrelator::new(n),
                |correlator, prn| {
                    if cancel.load(Ordering::SeqCst) {
                        return Err(AcqError::Cancelled);
                    }
                    let tracker = self.search_prn(prn, &window, correlator)?;
                    Ok(tracker.decide(prn, self.settings.acq_threshold))
                },
            )
            .collect::<AcqResult<Vec<_>>>()?;

        Ok(self.collect_results(&decisions, ts))
    }

    /// Searches a single PRN; the decision is returned whether or not it was
    /// acquired.
    pub fn acquire_prn(&self, prn: usize, raw: &[i8]) -> AcqResult<PrnDecision> {
        Ok(self.trace_prn(prn, raw)?.0)
    }

    /// Like `acquire_prn`, also returning the correlation function of the
    /// winning doppler bin.
    pub fn trace_prn(&self, prn: usize, raw: &[i8]) -> AcqResult<(PrnDecision, Vec<f64>)> {
        check_prn(prn)?;
        let window = SignalWindow::new(raw, &self.settings)?;
        let mut correlator = SpectralCorrelator::new(window.len());
        let tracker = self.search_prn(prn, &window, &mut correlator)?;
        let decision = tracker.decide(prn, self.settings.acq_threshold);
        log_decision(&decision);
        Ok((decision, tracker.best_corr().to_vec()))
    }

    fn search_prn(
        &self,
        prn: usize,
        window: &SignalWindow,
        correlator: &mut SpectralCorrelator,
    ) -> AcqResult<PeakTracker> {
        let code = Code::gen_resampled_code(prn, &self.settings)?;
        let reference_conj = correlator.reference_spectrum_conj(&code);

        let mut tracker = PeakTracker::new(self.settings.samples_per_chip());
        for bin in window.sweep(&self.settings, &reference_conj, correlator) {
            tracker.update(bin);
        }
        Ok(tracker)
    }

    fn log_start(&self) {
        log::info!(
            "starting acquisition: samples_per_code={} doppler_bins={} threshold={}",
            self.settings.samples_per_code(),
            self.settings.num_freq_bins(),
            self.settings.acq_threshold,
        );
    }

    fn collect_results(&self, decisions: &[PrnDecision], ts: Instant) -> Vec<AcquisitionResult> {
        decisions.iter().for_each(log_decision);
        let results: Vec<_> = decisions
            .iter()
            .filter_map(|d| AcquisitionResult::from_decision(d, self.settings.if_freq))
            .collect();
        log::info!(
            "acquisition complete: {} satellites in {} msec",
            format!("{}", results.len()).yellow(),
            ts.elapsed().as_millis(),
        );
        results
    }
}

fn log_decision(d: &PrnDecision) {
    let ratio = d.peak_ratio.unwrap_or(0.0);
    if d.acquired {
        log::info!(
            " sat_id: {} -- carrier_hz: {:9.0} phase_idx: {:5} ratio: {}",
            format!("{:2}", d.prn).yellow(),
            d.carrier_hz,
            d.code_phase,
            format!("{:.2}", ratio).green(),
        );
    } else {
        log::debug!(
            " sat_id: {:2} -- carrier_hz: {:9.0} phase_idx: {:5} ratio: {:.2} (rejected)",
            d.prn,
            d.carrier_hz,
            d.code_phase,
            ratio,
        );
    }
}
