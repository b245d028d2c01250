use bytesize::ByteSize;
use colored::Colorize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::error::AcqResult;

const BUFFER_SIZE: usize = 128 * 1024;

/// Reads up to `num_samples` signed 8-bit real samples from a raw capture.
/// A shorter file is not an error: whatever is there gets returned.
pub fn read_i8_samples(file_path: &Path, num_samples: usize) -> AcqResult<Vec<i8>> {
    let file = File::open(file_path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut samples = Vec::with_capacity(num_samples);
    let mut n: u64 = 0;
    let ts = Instant::now();

    while samples.len() < num_samples {
        let buf = reader.fill_buf()?;
        let len = buf.len();
        if len == 0 {
            break;
        }
        let take = usize::min(len, num_samples - samples.len());
        samples.extend(buf[..take].iter().map(|&b| b as i8));
        reader.consume(take);
        n += 1;
    }

    if samples.len() < num_samples {
        log::warn!(
            "{}: requested {} samples, only {} available",
            file_path.display(),
            num_samples,
            samples.len()
        );
    }
    log::info!(
        "{}: {} -- read {} samples in {} msec ({} read ops)",
        file_path.display(),
        ByteSize::b(file_len),
        format!("{}", samples.len()).yellow(),
        ts.elapsed().as_millis(),
        n
    );

    Ok(samples)
}
