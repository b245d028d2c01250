use colored::Colorize;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use structopt::StructOpt;

use gnss_acq::acquisition::Acquisition;
use gnss_acq::gold_code::print_gold_codes;
use gnss_acq::plots::{plot_correlation, plot_remove_old_graph};
use gnss_acq::recording::read_i8_samples;
use gnss_acq::settings::Settings;
use gnss_acq::types::AcquisitionResult;

#[derive(StructOpt, Debug)]
#[structopt(name = "gnss-acq", about = "GPS L1 C/A acquisition on a raw IF capture")]
struct Options {
    #[structopt(long, default_value = "data/gioveAandB_short.bin")]
    file: PathBuf,
    #[structopt(long, default_value = "16367600")]
    fs: f64,
    #[structopt(long, default_value = "4130400")]
    fi: f64,
    /// total doppler search band in kHz
    #[structopt(long, default_value = "14")]
    search_band: f64,
    #[structopt(long, default_value = "2.5")]
    threshold: f64,
    /// amount of capture to load
    #[structopt(long, default_value = "40")]
    duration_msec: usize,
    /// search this PRN only
    #[structopt(long)]
    prn: Option<usize>,
    /// worker threads, 0 for the sequential search
    #[structopt(short = "j", long, default_value = "0")]
    jobs: usize,
    #[structopt(long)]
    json: bool,
    #[structopt(long)]
    plot: bool,
    #[structopt(long)]
    print_codes: bool,
}

fn print_results(results: &[AcquisitionResult]) {
    println!("{}", "ACQUISITION RESULTS".bold());
    if results.is_empty() {
        println!("No satellites detected.");
        return;
    }
    println!("Satellites Found: {}", format!("{}", results.len()).yellow());
    println!("PRN  Carrier(Hz)  Doppler(Hz)  CodePhase  Ratio");
    for r in results {
        println!(
            "{}  {:11.0}  {:11.0}  {:9}  {}",
            format!("{:3}", r.prn).yellow(),
            r.carrier_hz,
            r.doppler_hz,
            r.code_phase,
            format!("{:5.2}", r.peak_ratio).green()
        );
    }
}

fn run(opt: Options) -> Result<(), Box<dyn Error>> {
    if opt.print_codes {
        print_gold_codes();
        return Ok(());
    }

    let settings = Settings {
        sampling_freq: opt.fs,
        if_freq: opt.fi,
        acq_search_band_khz: opt.search_band,
        acq_threshold: opt.threshold,
        ..Settings::default()
    };
    let acq = Acquisition::new(settings)?;

    let num_samples = (settings.sampling_freq * opt.duration_msec as f64 * 1e-3) as usize;
    let raw = read_i8_samples(&opt.file, num_samples)?;
    if raw.len() > acq.samples_per_code() {
        log::debug!(
            "{} samples beyond the first code period are not integrated",
            raw.len() - acq.samples_per_code()
        );
    }

    if let Some(prn) = opt.prn {
        let (decision, corr) = acq.trace_prn(prn, &raw)?;
        if opt.json {
            println!("{}", serde_json::to_string_pretty(&decision)?);
        } else {
            let result = AcquisitionResult::from_decision(&decision, settings.if_freq);
            print_results(result.as_slice());
        }
        if opt.plot && decision.acquired {
            plot_correlation(prn, decision.carrier_hz, &corr)?;
        }
        return Ok(());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || {
        log::warn!("interrupted, stopping after the current PRN");
        cancel_handler.store(true, Ordering::SeqCst);
    })?;

    let results = if opt.jobs == 0 {
        acq.process_with_cancel(&raw, &cancel)?
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(opt.jobs).build()?;
        pool.install(|| acq.process_parallel_with_cancel(&raw, &cancel))?
    };

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    if opt.plot {
        plot_remove_old_graph()?;
        for r in &results {
            let (decision, corr) = acq.trace_prn(r.prn, &raw)?;
            plot_correlation(r.prn, decision.carrier_hz, &corr)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Options::from_args();

    log::info!(
        "gnss-acq: file: {} fs={} fi={}",
        opt.file.display(),
        opt.fs,
        opt.fi
    );

    if let Err(e) = run(opt) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
