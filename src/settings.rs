use serde::{Deserialize, Serialize};

use crate::constants::DOPPLER_STEP_HZ;
use crate::constants::PRN_CODE_LEN;
use crate::error::{AcqError, AcqResult};

/// Receiver front-end description and search parameters.
///
/// `Default` matches the gioveA/B capture from the SoftGNSS book:
/// 16.3676 MHz real sampling, 4.1304 MHz IF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub sampling_freq: f64,
    pub if_freq: f64,
    pub code_freq_basis: f64,
    pub code_length: usize,
    /// total width of the doppler search band, centered on the IF
    pub acq_search_band_khz: f64,
    /// peak to second peak ratio required to declare a satellite
    pub acq_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sampling_freq: 16367600.0,
            if_freq: 4130400.0,
            code_freq_basis: 1023000.0,
            code_length: PRN_CODE_LEN,
            acq_search_band_khz: 14.0,
            acq_threshold: 2.5,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> AcqResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(AcqError::InvalidSettings(format!("{name} must be > 0, got {v}")))
            }
        };
        positive("sampling_freq", self.sampling_freq)?;
        positive("if_freq", self.if_freq)?;
        positive("code_freq_basis", self.code_freq_basis)?;
        positive("acq_threshold", self.acq_threshold)?;

        if self.code_length != PRN_CODE_LEN {
            return Err(AcqError::InvalidSettings(format!(
                "code_length must be {PRN_CODE_LEN}, got {}",
                self.code_length
            )));
        }
        if !self.acq_search_band_khz.is_finite() || self.acq_search_band_khz < 0.0 {
            return Err(AcqError::InvalidSettings(format!(
                "acq_search_band_khz must be >= 0, got {}",
                self.acq_search_band_khz
            )));
        }
        if self.samples_per_code() == 0 || self.samples_per_chip() == 0 {
            return Err(AcqError::InvalidSettings(format!(
                "sampling_freq {} too low for chip rate {}",
                self.sampling_freq, self.code_freq_basis
            )));
        }
        Ok(())
    }

    pub fn samples_per_code(&self) -> usize {
        let code_rate = self.code_freq_basis / self.code_length as f64;
        (self.sampling_freq / code_rate).round() as usize
    }

    pub fn samples_per_chip(&self) -> usize {
        (self.sampling_freq / self.code_freq_basis).round() as usize
    }

    pub fn code_period_sec(&self) -> f64 {
        self.code_length as f64 / self.code_freq_basis
    }

    pub fn num_freq_bins(&self) -> usize {
        (self.acq_search_band_khz * 2.0).floor() as usize + 1
    }

    /// Carrier frequency tested by doppler bin `bin`.
    pub fn carrier_freq(&self, bin: usize) -> f64 {
        self.if_freq - self.acq_search_band_khz * 1000.0 / 2.0 + bin as f64 * DOPPLER_STEP_HZ
    }
}
