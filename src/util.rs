use rustfft::num_complex::Complex64;

const PI: f64 = std::f64::consts::PI;

/// First index of the maximum value; (0, 0.0) if nothing is positive.
pub fn get_max_with_idx(v: &[f64]) -> (usize, f64) {
    let mut max = 0.0f64;
    let mut idx = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > max {
            max = x;
            idx = i;
        }
    }
    (idx, max)
}

/// Whether `idx` lies within `delta` samples of `center` on a circle of `len`.
pub fn in_exclusion_zone(idx: usize, center: usize, delta: usize, len: usize) -> bool {
    let d = (idx + len - center % len) % len;
    usize::min(d, len - d) <= delta
}

/// Largest value outside the circular window `i_max +/- delta`.
pub fn get_2nd_max(v: &[f64], i_max: usize, delta: usize) -> f64 {
    let mut second = 0.0;
    for (i, &x) in v.iter().enumerate() {
        if x > second && !in_exclusion_zone(i, i_max, delta, v.len()) {
            second = x;
        }
    }
    second
}

/// Per-sample phase ramp `k * 2pi / fs`, scaled by the carrier at wipeoff time.
pub fn phase_points(num_samples: usize, sample_rate: f64) -> Vec<f64> {
    let ts = 1.0 / sample_rate;
    (0..num_samples).map(|k| k as f64 * 2.0 * PI * ts).collect()
}

/// Mixes a real signal with the local carrier at `carrier_hz`, writing
/// (s * sin, s * cos) into `out`.
pub fn carrier_wipeoff(signal: &[f64], carrier_hz: f64, phase_points: &[f64], out: &mut [Complex64]) {
    assert_eq!(signal.len(), phase_points.len());
    assert_eq!(signal.len(), out.len());

    for ((o, &s), &p) in out.iter_mut().zip(signal.iter()).zip(phase_points.iter()) {
        let (sin, cos) = (carrier_hz * p).sin_cos();
        *o = Complex64 {
            re: s * sin,
            im: s * cos,
        };
    }
}
