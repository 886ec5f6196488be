use std::path::PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use crate::config::defs::{
    SeqFormat, DEFAULT_BIN_WIDTH, DEFAULT_COLOR, DEFAULT_HEIGHT_IN, DEFAULT_TICK_STRIDE, DEFAULT_WIDTH_IN,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "seqplot", version, about = "Read length plots and sequence format conversion", arg_required_else_help = true)]
pub struct Arguments {

    #[arg(short = 'v', long = "verbose", action, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub module: Module,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Module {
    /// Plot the read length distribution of a FASTQ dataset
    #[command(disable_help_flag = true, arg_required_else_help = true)]
    ReadLenPlot(PlotArgs),

    /// Convert between sequence file formats
    #[command(arg_required_else_help = true)]
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {

    // -h is taken by --height
    #[arg(long, action = ArgAction::Help, help = "Print help")]
    pub help: Option<bool>,

    #[arg(short = 'f', long = "fastq", help = "FASTQ file to plot (GZIP files are supported)")]
    pub fastq: PathBuf,

    #[arg(short = 'o', long = "output", num_args = 0.., help = "Save plot to specified output file(s); png, jpg, bmp and svg are supported. Metrics are printed to stdout otherwise.")]
    pub output: Vec<String>,

    #[arg(short = 'd', long = "outdir", default_value = "./")]
    pub outdir: PathBuf,

    #[arg(short = 'c', long = "color", default_value = DEFAULT_COLOR, help = "Bar color; a name (red, darkorange...) or #rrggbb")]
    pub color: String,

    #[arg(short = 'h', long = "height", default_value_t = DEFAULT_HEIGHT_IN, help = "Figure height in inches")]
    pub height: f64,

    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_WIDTH_IN, help = "Figure width in inches")]
    pub width: f64,

    #[arg(short = 'x', long = "xmax", help = "Max X-axis value in bp [default: longest read]")]
    pub xmax: Option<u64>,

    #[arg(short = 't', long = "ticks", default_value_t = DEFAULT_TICK_STRIDE, help = "Label every N bins")]
    pub ticks: usize,

    #[arg(short = 'b', long = "bin-size", default_value_t = DEFAULT_BIN_WIDTH, help = "Histogram bin width in bp")]
    pub bin_size: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {

    #[arg(short = 'i', long = "input", required_unless_present = "formats", help = "Input sequence file")]
    pub input: Option<PathBuf>,

    #[arg(short = 'e', long = "encode", value_enum, required_unless_present = "formats", help = "Input sequence encoding")]
    pub encode: Option<SeqFormat>,

    #[arg(short = 'n', long = "nencode", value_enum, default_value = "fastq", help = "Output sequence encoding")]
    pub nencode: SeqFormat,

    #[arg(short = 'o', long = "output", help = "Output file name [default: <input>_converted.<ext>]")]
    pub output: Option<PathBuf>,

    #[arg(short = 'f', long = "formats", action, help = "Show supported formats")]
    pub formats: bool,
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_consistent() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn test_parse_plot_args() {
        let args = Arguments::try_parse_from([
            "seqplot", "read-len-plot", "-f", "reads.fastq.gz", "-o", "a.svg", "b.png", "-h", "5", "-x", "50000",
        ]).unwrap();
        match args.module {
            Module::ReadLenPlot(plot) => {
                assert_eq!(plot.fastq, PathBuf::from("reads.fastq.gz"));
                assert_eq!(plot.output, vec!["a.svg", "b.png"]);
                assert_eq!(plot.height, 5.0);
                assert_eq!(plot.width, DEFAULT_WIDTH_IN);
                assert_eq!(plot.xmax, Some(50000));
                assert_eq!(plot.ticks, DEFAULT_TICK_STRIDE);
            }
            other => panic!("unexpected module {:?}", other),
        }
    }

    #[test]
    fn test_bare_output_flag_means_no_files() {
        let args = Arguments::try_parse_from(["seqplot", "read-len-plot", "-f", "reads.fastq", "-o"]).unwrap();
        match args.module {
            Module::ReadLenPlot(plot) => assert!(plot.output.is_empty()),
            other => panic!("unexpected module {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_formats_only() {
        let args = Arguments::try_parse_from(["seqplot", "convert", "-f"]).unwrap();
        match args.module {
            Module::Convert(convert) => {
                assert!(convert.formats);
                assert!(convert.input.is_none());
                assert_eq!(convert.nencode, SeqFormat::Fastq);
            }
            other => panic!("unexpected module {:?}", other),
        }
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Arguments::try_parse_from(["seqplot", "convert", "-e", "fastq-illumina"]).is_err());
    }
}
