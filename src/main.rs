use std::env;
use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use log::{self, LevelFilter, debug, info, error};
use env_logger::Builder;
use seqplot::cli::{parse, Module};
use seqplot::config::defs::{ConvertConfig, PipelineError, PlotConfig, RunConfig};
use seqplot::pipelines::fastq_update;
use seqplot::pipelines::read_len_plot;


fn main() -> Result<()> {
    let run_start = Instant::now();

    let args = parse();

    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let dir = env::current_dir()?;
    debug!("The current directory is {:?}", dir);

    let run_config = RunConfig {
        cwd: dir,
        args,
    };

    if let Err(e) = match &run_config.args.module {
        Module::ReadLenPlot(_) => read_len_plot_run(&run_config),
        Module::Convert(_) => fastq_update_run(&run_config),
    } {
        error!("{} at {} milliseconds.", e, run_start.elapsed().as_millis());
        std::process::exit(1);
    }

    debug!("Run complete: {} milliseconds.", run_start.elapsed().as_millis());
    Ok(())
}


fn read_len_plot_run(run_config: &RunConfig) -> Result<(), PipelineError> {
    let Module::ReadLenPlot(args) = &run_config.args.module else {
        return Err(PipelineError::InvalidConfig("Expected read-len-plot arguments".to_string()));
    };
    let config = PlotConfig::from_args(args, &run_config.cwd)?;
    let stats = read_len_plot::run(&config)?;
    info!("{} reads, {} bases", stats.count, stats.total);
    Ok(())
}

fn fastq_update_run(run_config: &RunConfig) -> Result<(), PipelineError> {
    let Module::Convert(args) = &run_config.args.module else {
        return Err(PipelineError::InvalidConfig("Expected convert arguments".to_string()));
    };
    if args.formats {
        println!("{}", fastq_update::supported_formats());
        return Ok(());
    }
    let config = ConvertConfig::from_args(args)?;
    let count = fastq_update::run(&config)?;
    info!("Converted {} records to {}", count, config.output.display());
    Ok(())
}
