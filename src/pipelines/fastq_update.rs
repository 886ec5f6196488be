use log::{debug, info};
use crate::config::defs::{ConvertConfig, PipelineError, SeqFormat};
use crate::utils::fastx::{sequence_reader, write_record};
use crate::utils::file::open_writer;


/// Table printed by `convert --formats`.
pub fn supported_formats() -> String {
    let mut table = String::from("Supported Sequence Encoding Types\n---------------------------------\nr = read, w = write\n\n");
    for format in [
        SeqFormat::Fasta,
        SeqFormat::Fasta2Line,
        SeqFormat::Fastq,
        SeqFormat::FastqIllumina,
        SeqFormat::FastqSolexa,
    ] {
        table.push_str(&format!("rw  {:<16}{}\n", format.name(), format.description()));
    }
    table
}

/// Converts a sequence file between encodings.
///
/// # Arguments
///
/// * `config` - Validated conversion options.
///
/// # Returns
/// Number of records written.
///
pub fn run(config: &ConvertConfig) -> Result<u64, PipelineError> {
    info!(
        "Converting {} ({}) to {} ({})",
        config.input.display(),
        config.encode.name(),
        config.output.display(),
        config.nencode.name()
    );

    let reader = sequence_reader(&config.input, config.encode)
        .map_err(|e| PipelineError::IOError(format!("Cannot read {}: {}", config.input.display(), e)))?;
    let mut writer = open_writer(&config.output)
        .map_err(|e| PipelineError::IOError(format!("Cannot create {}: {}", config.output.display(), e)))?;

    let count = reader.for_each_record(|record| {
        write_record(&mut writer, &record, config.encode, config.nencode)
    })?;

    writer.finish()
        .map_err(|e| PipelineError::IOError(format!("Failed writing {}: {}", config.output.display(), e)))?;

    if count == 0 {
        return Err(PipelineError::EmptyInput(config.input.display().to_string()));
    }
    debug!("Wrote {} records", count);
    Ok(count)
}
