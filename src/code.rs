use rustfft::num_complex::Complex64;

use crate::gold_code::gen_code;
use crate::error::AcqResult;
use crate::settings::Settings;

pub struct Code {}

impl Code {
    /// Maps chips onto `settings.samples_per_code()` samples, each sample taking
    /// the chip in progress at its sampling instant. Chip 0 becomes -1, chip 1
    /// becomes +1.
    pub fn resample(code: &[u8], settings: &Settings) -> Vec<Complex64> {
        // i * ts / tc
        let chip_rate = settings.code_freq_basis;
        let fs = settings.sampling_freq;

        (0..settings.samples_per_code())
            .map(|i| {
                let code_idx = (i as f64 * chip_rate / fs).floor() as usize % code.len();
                Complex64 {
                    re: if code[code_idx] == 0 { -1.0 } else { 1.0 },
                    im: 0.0,
                }
            })
            .collect()
    }

    pub fn gen_resampled_code(prn: usize, settings: &Settings) -> AcqResult<Vec<Complex64>> {
        let code = gen_code(prn)?;
        Ok(Self::resample(&code, settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRN_CODE_LEN;
    use crate::error::AcqError;

    #[test]
    fn test_resampled_shape() {
        let configs = [
            Settings::default(),
            Settings {
                sampling_freq: 2.046e6,
                ..Settings::default()
            },
            Settings {
                sampling_freq: 4e6,
                ..Settings::default()
            },
            Settings {
                sampling_freq: 38.192e6,
                ..Settings::default()
            },
        ];
        for s in configs {
            for prn in [1, 7, 32] {
                let v = Code::gen_resampled_code(prn, &s).unwrap();
                assert_eq!(v.len(), s.samples_per_code());
                assert!(v.iter().all(|c| (c.re == 1.0 || c.re == -1.0) && c.im == 0.0));
            }
        }
    }

    #[test]
    fn test_integer_oversampling_repeats_chips() {
        let s = Settings {
            sampling_freq: 2.046e6,
            ..Settings::default()
        };
        let code = gen_code(3).unwrap();
        let v = Code::resample(&code, &s);
        assert_eq!(v.len(), 2 * PRN_CODE_LEN);
        for (i, &chip) in code.iter().enumerate() {
            let expected = if chip == 0 { -1.0 } else { 1.0 };
            assert_eq!(v[2 * i].re, expected);
            assert_eq!(v[2 * i + 1].re, expected);
        }
    }

    #[test]
    fn test_nearest_lower_chip_mapping() {
        let s = Settings::default();
        let code = gen_code(11).unwrap();
        let v = Code::resample(&code, &s);
        for i in [0, 1, 15, 16, 17, 8000, 16367] {
            let chip_idx = (i as u64 * 1023000 / 16367600) as usize % PRN_CODE_LEN;
            let chip = code[chip_idx];
            assert_eq!(v[i].re, if chip == 0 { -1.0 } else { 1.0 }, "sample {i}");
        }
    }

    #[test]
    fn test_invalid_prn_propagates() {
        let s = Settings::default();
        assert!(matches!(
            Code::gen_resampled_code(0, &s),
            Err(AcqError::InvalidArgument { prn: 0 })
        ));
    }
}
