use crate::config::defs::{PipelineError, SeqFormat};

const SANGER_OFFSET: u8 = 33;
const ILLUMINA_OFFSET: u8 = 64;
const SOLEXA_OFFSET: u8 = 64;
const SANGER_MAX: u8 = 93;
const ILLUMINA_MAX: u8 = 62;
const SOLEXA_MIN: i32 = -5;
const SOLEXA_MAX: i32 = 62;

fn phred33(score: u8) -> u8 {
    score.min(SANGER_MAX) + SANGER_OFFSET
}

fn phred64(score: u8) -> u8 {
    score.min(ILLUMINA_MAX) + ILLUMINA_OFFSET
}

/// Solexa log-odds score to Phred, `10 * log10(10^(q/10) + 1)`.
pub fn solexa_to_phred(solexa: i32) -> u8 {
    let phred = 10.0 * (10f64.powf(solexa as f64 / 10.0) + 1.0).log10();
    phred.round() as u8
}

/// Phred to Solexa, `10 * log10(10^(q/10) - 1)`, clamped to the encodable range.
pub fn phred_to_solexa(phred: u8) -> i32 {
    if phred == 0 {
        return SOLEXA_MIN;
    }
    let solexa = 10.0 * (10f64.powf(phred as f64 / 10.0) - 1.0).log10();
    (solexa.round() as i32).clamp(SOLEXA_MIN, SOLEXA_MAX)
}

/// Decodes an ASCII quality string to Phred scores.
pub fn decode(qual: &[u8], format: SeqFormat) -> Result<Vec<u8>, PipelineError> {
    let (offset, lowest) = match format {
        SeqFormat::Fastq => (SANGER_OFFSET as i32, 0),
        SeqFormat::FastqIllumina => (ILLUMINA_OFFSET as i32, 0),
        SeqFormat::FastqSolexa => (SOLEXA_OFFSET as i32, SOLEXA_MIN),
        SeqFormat::Fasta | SeqFormat::Fasta2Line => {
            return Err(PipelineError::InvalidConfig(format!("{} has no quality scores", format.name())));
        }
    };

    qual.iter()
        .map(|&c| {
            let score = c as i32 - offset;
            if score < lowest {
                return Err(PipelineError::InvalidFastqFormat(format!(
                    "Quality character '{}' is out of range for {}",
                    (c as char).escape_default(),
                    format.name()
                )));
            }
            Ok(match format {
                SeqFormat::FastqSolexa => solexa_to_phred(score),
                _ => score.min(u8::MAX as i32) as u8,
            })
        })
        .collect()
}

/// Encodes Phred scores as an ASCII quality string.
pub fn encode(scores: &[u8], format: SeqFormat) -> Result<Vec<u8>, PipelineError> {
    match format {
        SeqFormat::Fastq => Ok(scores.iter().map(|&q| phred33(q)).collect()),
        SeqFormat::FastqIllumina => Ok(scores.iter().map(|&q| phred64(q)).collect()),
        SeqFormat::FastqSolexa => Ok(scores
            .iter()
            .map(|&q| (phred_to_solexa(q) + SOLEXA_OFFSET as i32) as u8)
            .collect()),
        SeqFormat::Fasta | SeqFormat::Fasta2Line => {
            Err(PipelineError::InvalidConfig(format!("{} has no quality scores", format.name())))
        }
    }
}

/// Re-encodes a quality string between FASTQ flavours.
pub fn convert(qual: &[u8], from: SeqFormat, to: SeqFormat) -> Result<Vec<u8>, PipelineError> {
    if from == to {
        return Ok(qual.to_vec());
    }
    encode(&decode(qual, from)?, to)
}
