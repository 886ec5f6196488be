/// Read length statistics: N-metrics, mean, median and the metrics text block.
use crate::config::defs::{PipelineError, N_METRIC_FRACTIONS};


/// Read lengths in the order they were encountered. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadLengthSample {
    lengths: Vec<u64>,
}

impl ReadLengthSample {
    /// Wraps collected lengths, refusing an empty collection.
    ///
    /// # Arguments
    ///
    /// * `lengths` - One length per read, in file order.
    /// * `source` - Where the lengths came from; used in the error message.
    pub fn new(lengths: Vec<u64>, source: &str) -> Result<Self, PipelineError> {
        if lengths.is_empty() {
            return Err(PipelineError::EmptyInput(source.to_string()));
        }
        Ok(ReadLengthSample { lengths })
    }

    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn max(&self) -> u64 {
        self.lengths.iter().copied().max().unwrap_or(0)
    }

    /// Working copy sorted longest first; the sample itself keeps file order.
    pub fn sorted_descending(&self) -> Vec<u64> {
        let mut sorted = self.lengths.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub count: usize,
    pub total: u64,
    pub minimum: u64,
    pub maximum: u64,
    pub mean: u64,
    pub median: u64,
    pub n50: u64,
    pub n75: u64,
    pub n90: u64,
}


/// Helper function to compute Nx (e.g., N50, N75)
///
/// # Arguments
///
/// - `lengths`: Lengths sorted longest first
/// - `fraction`: The threshold i.e. the '50' in N50.
///
/// # Returns
///
/// The length at which the running sum first reaches `fraction` of the total.
pub fn compute_nx(lengths: &[u64], fraction: f64) -> u64 {
    let total: u64 = lengths.iter().sum();
    let target = (total as f64 * fraction).ceil() as u64;
    let mut cumsum = 0;
    for &len in lengths {
        cumsum += len;
        if cumsum >= target {
            return len;
        }
    }
    0
}

/// Summarizes a sample.
///
/// The median is read from the longest-first copy at index `round(count / 2)`,
/// ties to even, which is not the textbook median for even counts.
pub fn summarize(sample: &ReadLengthSample) -> SummaryStatistics {
    let lengths = sample.lengths();
    let count = lengths.len();
    let total: u64 = lengths.iter().sum();
    let minimum = lengths.iter().copied().min().unwrap_or(0);
    let maximum = lengths.iter().copied().max().unwrap_or(0);
    let mean = (total as f64 / count as f64).round_ties_even() as u64;

    let sorted = sample.sorted_descending();
    let median_location = ((count as f64) / 2.0).round_ties_even() as usize;
    let median = sorted[median_location.min(count - 1)];

    let [n50, n75, n90] = N_METRIC_FRACTIONS.map(|fraction| compute_nx(&sorted, fraction));

    SummaryStatistics {
        count,
        total,
        minimum,
        maximum,
        mean,
        median,
        n50,
        n75,
        n90,
    }
}

/// Formats an integer with comma thousands separators, `1234567` -> `1,234,567`.
pub fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl SummaryStatistics {
    /// The metrics block shown on the plot, values right-justified to a common width.
    pub fn report_lines(&self) -> Vec<String> {
        let rows = [
            ("Total bases", with_thousands(self.total)),
            ("# reads", with_thousands(self.count as u64)),
            ("Longest", with_thousands(self.maximum)),
            ("Shortest", with_thousands(self.minimum)),
            ("Average", with_thousands(self.mean)),
            ("Median", with_thousands(self.median)),
            ("N50", with_thousands(self.n50)),
            ("N75", with_thousands(self.n75)),
            ("N90", with_thousands(self.n90)),
        ];
        let width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0) + 1;
        rows.iter()
            .map(|(label, value)| format!("{}: {:>width$}", label, value, width = width))
            .collect()
    }
}
