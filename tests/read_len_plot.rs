use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::tempdir;

use seqplot::config::defs::{
    ConvertConfig, PipelineError, PlotConfig, SeqFormat, DEFAULT_BIN_WIDTH, DEFAULT_COLOR,
    DEFAULT_HEIGHT_IN, DEFAULT_TICK_STRIDE, DEFAULT_WIDTH_IN,
};
use seqplot::cli::args::PlotArgs;
use seqplot::pipelines::{fastq_update, read_len_plot};
use seqplot::utils::fastq::collect;
use seqplot::utils::histogram::bin_histogram;
use seqplot::utils::stats::summarize;


fn fastq_text(lengths: &[usize]) -> String {
    let mut text = String::new();
    for (i, &len) in lengths.iter().enumerate() {
        text.push_str(&format!("@read{} sample=1\n{}\n+\n{}\n", i, "A".repeat(len), "I".repeat(len)));
    }
    text
}

fn write_gz(path: &Path, contents: &str) -> Result<()> {
    let mut encoder = GzEncoder::new(File::create(path)?, Compression::default());
    encoder.write_all(contents.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

fn plot_args(fastq: PathBuf, outdir: PathBuf) -> PlotArgs {
    PlotArgs {
        help: None,
        fastq,
        output: Vec::new(),
        outdir,
        color: DEFAULT_COLOR.to_string(),
        height: DEFAULT_HEIGHT_IN,
        width: DEFAULT_WIDTH_IN,
        xmax: None,
        ticks: DEFAULT_TICK_STRIDE,
        bin_size: DEFAULT_BIN_WIDTH,
    }
}


#[test]
fn test_plain_and_gzipped_fastq_give_same_sample() -> Result<()> {
    let dir = tempdir()?;
    let lengths = [100, 200, 300, 400];
    let plain = dir.path().join("reads.fastq");
    let gz = dir.path().join("reads.fastq.gz");
    fs::write(&plain, fastq_text(&lengths))?;
    write_gz(&gz, &fastq_text(&lengths))?;

    let plain_sample = collect(&plain)?;
    let gz_sample = collect(&gz)?;
    assert_eq!(plain_sample, gz_sample);
    assert_eq!(plain_sample.lengths(), &[100, 200, 300, 400]);

    let stats = summarize(&gz_sample);
    assert_eq!((stats.total, stats.mean, stats.n50, stats.n75, stats.n90), (1000, 250, 300, 200, 200));
    Ok(())
}

#[test]
fn test_histogram_mass_matches_total() -> Result<()> {
    let dir = tempdir()?;
    let lengths: Vec<usize> = (1..=60).map(|i| i * 733 % 9_000 + 50).collect();
    let path = dir.path().join("long.fq");
    fs::write(&path, fastq_text(&lengths))?;

    let sample = collect(&path)?;
    let stats = summarize(&sample);
    let hist = bin_histogram(&sample, 1000, None)?;
    assert!((hist.total_megabases() * 1_000_000.0 - stats.total as f64).abs() < 1e-6);
    assert_eq!(hist.bins().len() as u64, stats.maximum / 1000 + 1);
    Ok(())
}

#[test]
fn test_empty_fastq_is_an_error() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.fastq");
    fs::write(&path, "")?;
    assert!(matches!(collect(&path), Err(PipelineError::EmptyInput(_))));

    let config = PlotConfig::from_args(&plot_args(path, dir.path().to_path_buf()), dir.path())?;
    assert!(matches!(read_len_plot::run(&config), Err(PipelineError::EmptyInput(_))));
    Ok(())
}

#[test]
fn test_missing_fastq_is_io_error() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.fastq");
    assert!(matches!(collect(&missing), Err(PipelineError::IOError(msg)) if msg.contains("nope.fastq")));
    Ok(())
}

#[test]
fn test_plot_without_outputs_reports_statistics() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("reads.fastq");
    fs::write(&path, fastq_text(&[150, 950, 1050]))?;
    let outdir = dir.path().join("not_created");

    let config = PlotConfig::from_args(&plot_args(path, outdir.clone()), dir.path())?;
    let stats = read_len_plot::run(&config)?;
    assert_eq!(stats.count, 3);
    assert_eq!(stats.maximum, 1050);
    assert!(!outdir.exists());
    Ok(())
}

#[test]
fn test_plot_writes_svg_and_png_into_new_outdir() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("reads.fastq");
    fs::write(&path, fastq_text(&[150, 950, 1050, 12_000, 7_000]))?;

    let mut args = plot_args(path, PathBuf::from("out/nested"));
    args.output = vec!["a.svg".to_string(), "a.png".to_string()];
    let config = PlotConfig::from_args(&args, dir.path())?;
    let stats = read_len_plot::run(&config)?;
    assert_eq!(stats.n50, 12_000);

    let outdir = dir.path().join("out").join("nested");
    assert!(outdir.is_dir());
    let svg = outdir.join("a.svg");
    let png = outdir.join("a.png");
    assert!(fs::metadata(&png)?.len() > 0);

    let svg_text = fs::read_to_string(&svg)?;
    assert!(svg_text.contains("<svg"));
    assert!(svg_text.contains("N50:"));
    assert!(svg_text.contains("12,000"));
    Ok(())
}

#[test]
fn test_convert_illumina_fastq_to_sanger_and_fasta() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("raw_R1.fastq.gz");
    write_gz(&input, "@r1 desc\nACGT\n+\nhh@B\n@r2\nGG\n+\nhh\n")?;

    let sanger = ConvertConfig {
        input: input.clone(),
        encode: SeqFormat::FastqIllumina,
        nencode: SeqFormat::Fastq,
        output: dir.path().join("raw_R1_converted.fastq"),
    };
    assert_eq!(fastq_update::run(&sanger)?, 2);
    assert_eq!(
        fs::read_to_string(&sanger.output)?,
        "@r1 desc\nACGT\n+\nII!#\n@r2\nGG\n+\nII\n"
    );

    let fasta = ConvertConfig {
        input,
        encode: SeqFormat::FastqIllumina,
        nencode: SeqFormat::Fasta2Line,
        output: dir.path().join("raw_R1.fa"),
    };
    fastq_update::run(&fasta)?;
    assert_eq!(fs::read_to_string(&fasta.output)?, ">r1 desc\nACGT\n>r2\nGG\n");
    Ok(())
}

#[test]
fn test_supported_formats_table_lists_every_format() {
    let table = fastq_update::supported_formats();
    for name in ["fasta", "fasta-2line", "fastq", "fastq-illumina", "fastq-solexa"] {
        assert!(table.contains(name), "missing {}", name);
    }
}
