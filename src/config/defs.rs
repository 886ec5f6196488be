use std::path::{Path, PathBuf};
use clap::ValueEnum;
use plotters::style::RGBColor;
use thiserror::Error;
use crate::cli::Arguments;
use crate::cli::args::{ConvertArgs, PlotArgs};
use crate::utils::file::extension_remover;
use crate::utils::histogram::bin_count;
use crate::utils::plotting::{parse_color, ImageFormat};

// Static Parameters
pub const DEFAULT_BIN_WIDTH: u64 = 1000;
pub const DEFAULT_TICK_STRIDE: usize = 5;
pub const DEFAULT_COLOR: &str = "green";
pub const DEFAULT_HEIGHT_IN: f64 = 10.8;
pub const DEFAULT_WIDTH_IN: f64 = 19.2;
pub const PIXELS_PER_INCH: f64 = 100.0;
pub const BASES_PER_MEGABASE: f64 = 1_000_000.0;
pub const N_METRIC_FRACTIONS: [f64; 3] = [0.5, 0.75, 0.9];
pub const MAX_HISTOGRAM_BINS: usize = 1_000_000;

pub const GZIP_EXT: &str = "gz";
pub const FASTA_TAG: &str = "fasta";
pub const FASTQ_TAG: &str = "fastq";
pub const CONVERTED_SUFFIX: &str = "_converted";
pub const FASTA_LINE_WIDTH: usize = 60;


#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No sequence records found in {0}")]
    EmptyInput(String),

    #[error("I/O error: {0}")]
    IOError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid FASTQ format: {0}")]
    InvalidFastqFormat(String),

    #[error("Plotting failed: {0}")]
    Plot(String),
}


/// Sequence encodings the convert module can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeqFormat {
    Fasta,
    #[value(name = "fasta-2line")]
    Fasta2Line,
    #[value(alias = "fastq-sanger")]
    Fastq,
    FastqIllumina,
    FastqSolexa,
}

impl SeqFormat {
    pub fn has_qualities(&self) -> bool {
        !matches!(self, SeqFormat::Fasta | SeqFormat::Fasta2Line)
    }

    /// File extension used when deriving a default output name.
    pub fn extension(&self) -> &'static str {
        if self.has_qualities() { FASTQ_TAG } else { FASTA_TAG }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SeqFormat::Fasta => "FASTA, sequence wrapped at 60 columns",
            SeqFormat::Fasta2Line => "FASTA, one sequence line per record",
            SeqFormat::Fastq => "FASTQ, Phred+33 qualities (alias: fastq-sanger)",
            SeqFormat::FastqIllumina => "FASTQ, Phred+64 qualities (Illumina 1.3-1.7)",
            SeqFormat::FastqSolexa => "FASTQ, Solexa+64 qualities (early Solexa/Illumina)",
        }
    }

    pub fn name(&self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}


pub struct RunConfig {
    pub cwd: PathBuf,
    pub args: Arguments,
}


/// Validated options for the read-length plot module.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub fastq: PathBuf,
    pub outdir: PathBuf,
    pub outputs: Vec<(PathBuf, ImageFormat)>,
    pub color: RGBColor,
    pub height_px: u32,
    pub width_px: u32,
    pub xmax: Option<u64>,
    pub tick_stride: usize,
    pub bin_width: u64,
}

impl PlotConfig {
    pub fn from_args(args: &PlotArgs, cwd: &Path) -> Result<Self, PipelineError> {
        if args.ticks == 0 {
            return Err(PipelineError::InvalidConfig("--ticks must be at least 1".to_string()));
        }
        if args.bin_size == 0 {
            return Err(PipelineError::InvalidConfig("--bin-size must be at least 1".to_string()));
        }
        if let Some(xmax) = args.xmax {
            bin_count(xmax, args.bin_size)?;
        }

        let height_px = inches_to_pixels(args.height, "--height")?;
        let width_px = inches_to_pixels(args.width, "--width")?;
        let color = parse_color(&args.color)?;

        let outdir = if args.outdir.is_absolute() {
            args.outdir.clone()
        } else {
            cwd.join(&args.outdir)
        };

        let mut outputs = Vec::with_capacity(args.output.len());
        for name in &args.output {
            let path = outdir.join(name);
            let format = ImageFormat::from_path(&path)?;
            outputs.push((path, format));
        }

        Ok(PlotConfig {
            fastq: args.fastq.clone(),
            outdir,
            outputs,
            color,
            height_px,
            width_px,
            xmax: args.xmax,
            tick_stride: args.ticks,
            bin_width: args.bin_size,
        })
    }
}

fn inches_to_pixels(inches: f64, flag: &str) -> Result<u32, PipelineError> {
    if !inches.is_finite() || inches <= 0.0 {
        return Err(PipelineError::InvalidConfig(format!("{} must be a positive number of inches, got {}", flag, inches)));
    }
    Ok((inches * PIXELS_PER_INCH).round().max(1.0) as u32)
}


/// Validated options for the convert module.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub encode: SeqFormat,
    pub nencode: SeqFormat,
    pub output: PathBuf,
}

impl ConvertConfig {
    pub fn from_args(args: &ConvertArgs) -> Result<Self, PipelineError> {
        let input = args.input.clone()
            .ok_or_else(|| PipelineError::InvalidConfig("Input sequence file (-i) required".to_string()))?;
        let encode = args.encode
            .ok_or_else(|| PipelineError::InvalidConfig("Input sequence encoding (-e) required".to_string()))?;
        let nencode = args.nencode;

        if nencode.has_qualities() && !encode.has_qualities() {
            return Err(PipelineError::InvalidConfig(format!(
                "Cannot convert {} to {}: input has no quality scores",
                encode.name(),
                nencode.name()
            )));
        }

        let output = match &args.output {
            Some(out) => out.clone(),
            None => default_output_path(&input, nencode),
        };

        Ok(ConvertConfig { input, encode, nencode, output })
    }
}

/// `<dir>/<stem>_converted.<ext>`, where the stem drops a trailing `.gz` and one sequence extension.
pub fn default_output_path(input: &Path, nencode: SeqFormat) -> PathBuf {
    let (stem, _) = extension_remover(input);
    let file_name = stem
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sequences".to_string());
    let converted = format!("{}{}.{}", file_name, CONVERTED_SUFFIX, nencode.extension());
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(converted),
        _ => PathBuf::from(".").join(converted),
    }
}
