pub mod acquisition;
pub mod code;
pub mod constants;
pub mod correlator;
pub mod decision;
pub mod doppler;
pub mod error;
pub mod gold_code;
pub mod plots;
pub mod recording;
pub mod settings;
pub mod types;
pub mod util;
