use glob::glob;
use plotters::prelude::*;
use std::error::Error;

const PLOT_FONT_SIZE: u32 = 15;
const PLOT_SIZE_X: u32 = 600;
const PLOT_SIZE_Y: u32 = 300;
pub const PLOT_FOLDER: &str = "plots";

pub fn plot_remove_old_graph() -> Result<(), Box<dyn Error>> {
    let pattern = format!("{}/*.png", PLOT_FOLDER);

    for path in glob(&pattern)? {
        let path = path?;
        log::info!("Removing chart: {:?}", path.display());
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Correlation function of the winning doppler bin, normalized to its peak.
pub fn plot_correlation(prn: usize, carrier_hz: f64, corr: &[f64]) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(PLOT_FOLDER)?;
    let file_name = format!("{}/sat-{}-acquisition.png", PLOT_FOLDER, prn);
    let root_area = BitMapBackend::new(&file_name, (PLOT_SIZE_X, PLOT_SIZE_Y)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let peak = corr.iter().fold(0.0f64, |acc, &v| acc.max(v));
    if corr.is_empty() || peak <= 0.0 {
        return Ok(());
    }

    let mut ctx = ChartBuilder::on(&root_area)
        .set_label_area_size(LabelAreaPosition::Left, 40)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .caption(
            format!("sat {}: correlation at {:.0} Hz", prn, carrier_hz),
            ("sans-serif", PLOT_FONT_SIZE),
        )
        .build_cartesian_2d(0..corr.len(), 0.0..1.05)?;

    ctx.configure_mesh().x_desc("code phase (samples)").draw()?;

    ctx.draw_series(LineSeries::new(
        corr.iter().enumerate().map(|(idx, v)| (idx, v / peak)),
        &BLUE,
    ))?;

    root_area.present()?;
    log::info!("sat {}: wrote {}", prn, file_name);
    Ok(())
}
