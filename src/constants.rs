pub const PRN_CODE_LEN: usize = 1023;
pub const NUM_GPS_SATS: usize = 32;
pub const DOPPLER_STEP_HZ: f64 = 500.0;
