use log::{debug, info, warn};
use crate::config::defs::{PipelineError, PlotConfig};
use crate::utils::fastq::collect;
use crate::utils::file::ensure_dir;
use crate::utils::histogram::{bin_histogram, render_labels};
use crate::utils::plotting::{plot_read_lengths, ChartStyle};
use crate::utils::stats::{summarize, SummaryStatistics};


/// Read length distribution: collect, summarize, bin, then plot or print.
///
/// # Arguments
///
/// * `config` - Validated plot options.
///
/// # Returns
/// The summary statistics shown on the plot.
///
pub fn run(config: &PlotConfig) -> Result<SummaryStatistics, PipelineError> {
    if !config.outputs.is_empty() {
        ensure_dir(&config.outdir).map_err(|e| {
            PipelineError::IOError(format!("Can't create directory {}: {}", config.outdir.display(), e))
        })?;
    }

    info!("Working on {}...", config.fastq.display());
    let sample = collect(&config.fastq)?;
    debug!("Collected {} read lengths", sample.len());

    let stats = summarize(&sample);
    let histogram = bin_histogram(&sample, config.bin_width, config.xmax)?;
    if histogram.excluded_reads() > 0 {
        warn!(
            "{} reads longer than the x-axis maximum are left out of the histogram",
            histogram.excluded_reads()
        );
    }
    let ticks = render_labels(&histogram, config.tick_stride)?;
    let metrics = stats.report_lines();

    if config.outputs.is_empty() {
        println!("{}", config.fastq.display());
        for line in &metrics {
            println!("{}", line);
        }
        return Ok(stats);
    }

    let title = config.fastq.display().to_string();
    let style = ChartStyle {
        title: &title,
        color: config.color,
        width_px: config.width_px,
        height_px: config.height_px,
    };
    for (path, format) in &config.outputs {
        info!("  Creating {}...", path.display());
        plot_read_lengths(&histogram, &ticks, &metrics, &style, path, *format)
            .map_err(|e| PipelineError::Plot(format!("{}: {}", path.display(), e)))?;
    }

    Ok(stats)
}
