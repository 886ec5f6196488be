use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use crate::config::defs::{FASTA_TAG, FASTQ_TAG, GZIP_EXT};

const SEQUENCE_EXTS: &[&'static str] = &[FASTA_TAG, FASTQ_TAG, "fa", "fna", "faa", "fq", "fas"];

/// Enum to hold either an uncompressed or gzipped file reader
pub enum FileReader {
    Uncompressed(BufReader<File>),
    Gzipped(BufReader<MultiGzDecoder<File>>),
}

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            FileReader::Uncompressed(r) => r.read(buf),
            FileReader::Gzipped(r) => r.read(buf),
        }
    }
}

/// Enum to hold either an uncompressed or gzipped file writer
pub enum FileWriter {
    Uncompressed(BufWriter<File>),
    Gzipped(GzEncoder<BufWriter<File>>),
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileWriter::Uncompressed(w) => w.write(buf),
            FileWriter::Gzipped(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileWriter::Uncompressed(w) => w.flush(),
            FileWriter::Gzipped(w) => w.flush(),
        }
    }
}

impl FileWriter {
    /// Flushes buffers and writes the gzip trailer, if any.
    pub fn finish(self) -> io::Result<()> {
        match self {
            FileWriter::Uncompressed(mut w) => w.flush(),
            FileWriter::Gzipped(w) => w.finish()?.flush(),
        }
    }
}

/// Checks whether a file is gzip compressed by trying to decode its first byte.
/// Anything the decoder rejects is treated as plain text.
pub fn is_gzipped(path: &Path) -> io::Result<bool> {
    let file = File::open(path)?;
    let mut decoder = MultiGzDecoder::new(file);
    let mut buffer = [0u8; 1];
    Ok(decoder.read(&mut buffer).is_ok())
}

/// Opens a plain or gzipped file for buffered reading.
pub fn open_reader(path: &Path) -> io::Result<FileReader> {
    let gzipped = is_gzipped(path)?;
    let file = File::open(path)?;
    let reader = if gzipped {
        FileReader::Gzipped(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        FileReader::Uncompressed(BufReader::new(file))
    };
    Ok(reader)
}

/// Creates a writer, gzipping the output when the path ends in `.gz`.
pub fn open_writer(path: &Path) -> io::Result<FileWriter> {
    let file = BufWriter::new(File::create(path)?);
    let gzipped = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(GZIP_EXT))
        .unwrap_or(false);
    let writer = if gzipped {
        FileWriter::Gzipped(GzEncoder::new(file, Compression::default()))
    } else {
        FileWriter::Uncompressed(file)
    };
    Ok(writer)
}

/// Makes sure an output directory exists, creating parents as needed.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}

/// Splits a trailing `.gz` and a known sequence extension off a path.
///
/// # Arguments
///
/// * `path` - Sequence file path, e.g. `reads_R1.fastq.gz`.
///
/// # Returns
/// (path without the extensions, extensions removed in file order)
///
pub fn extension_remover(path: &Path) -> (PathBuf, Vec<String>) {
    let mut stem = path.to_path_buf();
    let mut extensions = Vec::new();

    if let Some(ext) = stem.extension().map(|e| e.to_string_lossy().into_owned()) {
        if ext.eq_ignore_ascii_case(GZIP_EXT) {
            stem.set_extension("");
            extensions.push(ext);
        }
    }

    if let Some(ext) = stem.extension().map(|e| e.to_string_lossy().into_owned()) {
        if SEQUENCE_EXTS.iter().any(|&e| e.eq_ignore_ascii_case(&ext)) {
            stem.set_extension("");
            extensions.insert(0, ext);
        }
    }

    (stem, extensions)
}
