use std::io::{self, BufRead, BufReader};
use std::path::Path;
use crate::config::defs::PipelineError;
use crate::utils::file::open_reader;
use crate::utils::stats::ReadLengthSample;

const LINES_PER_RECORD: usize = 4;
const SEQUENCE_LINE: usize = 2;

/// Collects read lengths from 4-line FASTQ records.
///
/// Only line position matters: the second line of every group of four is
/// taken as the sequence and its whitespace-trimmed length recorded. No
/// other validation is done.
///
/// # Arguments
///
/// * `reader` - Buffered FASTQ text.
///
/// # Returns
/// io::Result<Vec<u64>>: one length per record, in file order.
///
pub fn read_lengths<R: BufRead>(mut reader: R) -> io::Result<Vec<u64>> {
    let mut lengths = Vec::new();
    let mut line = Vec::new();
    let mut line_counter = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_counter += 1;
        if line_counter == SEQUENCE_LINE {
            lengths.push(line.trim_ascii().len() as u64);
        } else if line_counter == LINES_PER_RECORD {
            line_counter = 0;
        }
    }

    Ok(lengths)
}

/// Builds the read length sample for a plain or gzipped FASTQ.
///
/// # Arguments
///
/// * `path` - FASTQ path.
///
/// # Returns
/// ReadLengthSample, or EmptyInput if the file holds no records.
///
pub fn collect(path: &Path) -> Result<ReadLengthSample, PipelineError> {
    let reader = open_reader(path)
        .map_err(|e| PipelineError::IOError(format!("Cannot read {}: {}", path.display(), e)))?;
    let lengths = read_lengths(BufReader::new(reader))
        .map_err(|e| PipelineError::IOError(format!("Failed reading {}: {}", path.display(), e)))?;
    ReadLengthSample::new(lengths, &path.display().to_string())
}
