use seq_io::fasta::{Reader as FastaReader, OwnedRecord as FastaOwnedRecord};
use seq_io::fastq::{Reader as FastqReader, OwnedRecord as FastqOwnedRecord};
use std::io::{self, Write};
use std::path::Path;
use crate::config::defs::{PipelineError, SeqFormat, FASTA_LINE_WIDTH};
use crate::utils::file::{open_reader, FileReader};
use crate::utils::quality;


/// Defines FASTA and FASTQ as part of a unified FASTX structure.
#[derive(Clone, Debug, PartialEq)]
pub enum SequenceRecord {
    Fasta {
        id: String,
        desc: Option<String>,
        seq: Vec<u8>,
    },
    Fastq {
        id: String,
        desc: Option<String>,
        seq: Vec<u8>,
        qual: Vec<u8>,
    },
}

/// Maps id and seq to the correct file type.
impl SequenceRecord {
    pub fn id(&self) -> &str {
        match self {
            SequenceRecord::Fasta { id, .. } => id,
            SequenceRecord::Fastq { id, .. } => id,
        }
    }

    pub fn seq(&self) -> &[u8] {
        match self {
            SequenceRecord::Fasta { seq, .. } => seq,
            SequenceRecord::Fastq { seq, .. } => seq,
        }
    }
}

impl From<FastaOwnedRecord> for SequenceRecord {
    fn from(record: FastaOwnedRecord) -> Self {
        let (id, desc) = parse_header(&record.head, '>');
        SequenceRecord::Fasta {
            id,
            desc,
            seq: record.seq,
        }
    }
}

impl From<FastqOwnedRecord> for SequenceRecord {
    fn from(record: FastqOwnedRecord) -> Self {
        let (id, desc) = parse_header(&record.head, '@');
        SequenceRecord::Fastq {
            id,
            desc,
            seq: record.seq,
            qual: record.qual,
        }
    }
}


/// Enum to hold either FASTA or FASTQ reader
pub enum SequenceReader {
    Fasta(FastaReader<FileReader>),
    Fastq(FastqReader<FileReader>),
}

/// Creates a SequenceReader for a plain or gzipped file in the given encoding.
///
/// # Arguments
///
/// * `path` - Valid path to a fastx file.
/// * `format` - Declared encoding; decides which parser is used.
///
/// # Returns
/// io::Result<SequenceReader>
///
pub fn sequence_reader(path: &Path, format: SeqFormat) -> io::Result<SequenceReader> {
    let reader = open_reader(path)?;
    if format.has_qualities() {
        Ok(SequenceReader::Fastq(FastqReader::new(reader)))
    } else {
        Ok(SequenceReader::Fasta(FastaReader::new(reader)))
    }
}

impl SequenceReader {
    /// Drains the reader, handing each record to `f`.
    pub fn for_each_record<F>(self, mut f: F) -> Result<u64, PipelineError>
    where
        F: FnMut(SequenceRecord) -> Result<(), PipelineError>,
    {
        let mut counter = 0;
        match self {
            SequenceReader::Fasta(reader) => {
                for result in reader.into_records() {
                    let record = result.map_err(|e| PipelineError::InvalidFastqFormat(e.to_string()))?;
                    f(record.into())?;
                    counter += 1;
                }
            }
            SequenceReader::Fastq(reader) => {
                for result in reader.into_records() {
                    let record = result.map_err(|e| PipelineError::InvalidFastqFormat(e.to_string()))?;
                    f(record.into())?;
                    counter += 1;
                }
            }
        }
        Ok(counter)
    }
}


/// Parses a FASTX header.
///
///
/// # Arguments
///
/// * `head` - Header line of a FASTX record.
/// * 'prefix' - Leading, defining character of the header. > for FASTA, @ for FASTQ.
///
/// # Returns
/// Tuple: (id, desc) split of header on whitespace.
///
fn parse_header(head: &[u8], prefix: char) -> (String, Option<String>) {
    let head_str = String::from_utf8_lossy(head).into_owned();
    let parts: Vec<&str> = head_str.splitn(2, |c: char| c.is_whitespace()).collect();
    let id = parts[0].trim_start_matches(prefix).to_string();
    let desc = parts.get(1).map(|s| s.to_string()).filter(|s| !s.is_empty());
    (id, desc)
}


/// Writes a FASTA record, wrapping the sequence at `line_width` columns (0 = no wrapping).
pub fn write_fasta_record<W: Write>(
    writer: &mut W,
    id: &str,
    desc: Option<&str>,
    seq: &[u8],
    line_width: usize,
) -> io::Result<()> {
    // Write header
    writer.write_all(b">")?;
    writer.write_all(id.as_bytes())?;
    if let Some(desc) = desc {
        writer.write_all(b" ")?;
        writer.write_all(desc.as_bytes())?;
    }
    writer.write_all(b"\n")?;

    if line_width == 0 || seq.is_empty() {
        writer.write_all(seq)?;
        writer.write_all(b"\n")?;
        return Ok(());
    }
    for chunk in seq.chunks(line_width) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

pub fn write_fastq_record<W: Write>(
    writer: &mut W,
    id: &str,
    desc: Option<&str>,
    seq: &[u8],
    qual: &[u8],
) -> io::Result<()> {
    // Write header
    writer.write_all(b"@")?;
    writer.write_all(id.as_bytes())?;
    if let Some(desc) = desc {
        writer.write_all(b" ")?;
        writer.write_all(desc.as_bytes())?;
    }
    writer.write_all(b"\n")?;

    // Write sequence
    writer.write_all(seq)?;
    writer.write_all(b"\n")?;

    // Write separator
    writer.write_all(b"+")?;
    writer.write_all(b"\n")?;

    // Write quality scores
    writer.write_all(qual)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Writes a record in the target encoding, re-encoding qualities as needed.
///
/// # Arguments
///
/// * `writer` - Output sink.
/// * `record` - Parsed record.
/// * `from` - Encoding the record was read as.
/// * `to` - Encoding to write.
///
pub fn write_record<W: Write>(
    writer: &mut W,
    record: &SequenceRecord,
    from: SeqFormat,
    to: SeqFormat,
) -> Result<(), PipelineError> {
    let io_err = |e: io::Error| PipelineError::IOError(e.to_string());
    match (record, to) {
        (SequenceRecord::Fasta { id, desc, seq }, SeqFormat::Fasta)
        | (SequenceRecord::Fastq { id, desc, seq, .. }, SeqFormat::Fasta) => {
            write_fasta_record(writer, id, desc.as_deref(), seq, FASTA_LINE_WIDTH).map_err(io_err)
        }
        (SequenceRecord::Fasta { id, desc, seq }, SeqFormat::Fasta2Line)
        | (SequenceRecord::Fastq { id, desc, seq, .. }, SeqFormat::Fasta2Line) => {
            write_fasta_record(writer, id, desc.as_deref(), seq, 0).map_err(io_err)
        }
        (SequenceRecord::Fastq { id, desc, seq, qual }, _) => {
            if qual.len() != seq.len() {
                return Err(PipelineError::InvalidFastqFormat(format!(
                    "Record {} has {} bases but {} quality scores",
                    id,
                    seq.len(),
                    qual.len()
                )));
            }
            let qual = quality::convert(qual, from, to)?;
            write_fastq_record(writer, id, desc.as_deref(), seq, &qual).map_err(io_err)
        }
        (SequenceRecord::Fasta { id, .. }, _) => Err(PipelineError::InvalidConfig(format!(
            "Record {} has no quality scores for {} output",
            id,
            to.name()
        ))),
    }
}
