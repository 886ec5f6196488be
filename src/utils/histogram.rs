use crate::config::defs::{PipelineError, BASES_PER_MEGABASE, MAX_HISTOGRAM_BINS};
use crate::utils::stats::ReadLengthSample;


/// One fixed-width bucket of read lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub index: usize,
    pub label: String,
    /// Sum of the lengths of all reads in the bucket, in Mb.
    pub megabases: f64,
}

/// Total bases per read-length bucket, contiguous from bin 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadLengthHistogram {
    bin_width: u64,
    bins: Vec<HistogramBin>,
    excluded_reads: usize,
}

/// Axis configuration for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMarks {
    pub positions: Vec<usize>,
    pub labels: Vec<String>,
}

impl ReadLengthHistogram {
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn bin_width(&self) -> u64 {
        self.bin_width
    }

    /// Reads longer than the histogram's upper bound.
    pub fn excluded_reads(&self) -> usize {
        self.excluded_reads
    }

    pub fn total_megabases(&self) -> f64 {
        self.bins.iter().map(|b| b.megabases).sum()
    }

    pub fn max_megabases(&self) -> f64 {
        self.bins.iter().map(|b| b.megabases).fold(0.0, f64::max)
    }
}

/// Lower bound of a bin in kb: `3k`, or `2.5k` for widths that are not whole kb.
pub fn bin_label(index: usize, bin_width: u64) -> String {
    let lower = index as u64 * bin_width;
    if lower % 1000 == 0 {
        format!("{}k", lower / 1000)
    } else {
        format!("{}k", lower as f64 / 1000.0)
    }
}

/// Number of buckets needed to cover `0..=max_value`, capped at `MAX_HISTOGRAM_BINS`.
pub fn bin_count(max_value: u64, bin_width: u64) -> Result<usize, PipelineError> {
    if bin_width == 0 {
        return Err(PipelineError::InvalidConfig("Histogram bin width must be positive".to_string()));
    }
    (max_value / bin_width)
        .checked_add(1)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n <= MAX_HISTOGRAM_BINS)
        .ok_or_else(|| {
            PipelineError::InvalidConfig(format!(
                "An x-axis maximum of {} bp with {} bp bins needs more than {} bins",
                max_value, bin_width, MAX_HISTOGRAM_BINS
            ))
        })
}

/// Bins read lengths into buckets of `bin_width` bp, summing megabases per bucket.
///
/// # Arguments
///
/// * `sample` - Read lengths.
/// * `bin_width` - Bucket width in bp; must be positive.
/// * `max_value` - Upper axis bound in bp. Defaults to the longest read. Reads past the
///   last bucket are left out of the histogram.
///
/// # Returns
/// A histogram with `max_value / bin_width + 1` buckets, empty ones at zero.
///
pub fn bin_histogram(
    sample: &ReadLengthSample,
    bin_width: u64,
    max_value: Option<u64>,
) -> Result<ReadLengthHistogram, PipelineError> {
    let max_value = max_value.unwrap_or_else(|| sample.max());
    let num_bins = bin_count(max_value, bin_width)?;

    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|index| HistogramBin {
            index,
            label: bin_label(index, bin_width),
            megabases: 0.0,
        })
        .collect();

    let mut excluded_reads = 0;
    for &length in sample.lengths() {
        let bin_loc = (length / bin_width) as usize;
        match bins.get_mut(bin_loc) {
            Some(bin) => bin.megabases += length as f64 / BASES_PER_MEGABASE,
            None => excluded_reads += 1,
        }
    }

    Ok(ReadLengthHistogram {
        bin_width,
        bins,
        excluded_reads,
    })
}

/// Picks every `tick_stride`-th bin, starting at bin 0, as an axis tick.
pub fn render_labels(histogram: &ReadLengthHistogram, tick_stride: usize) -> Result<TickMarks, PipelineError> {
    if tick_stride == 0 {
        return Err(PipelineError::InvalidConfig("Tick spacing must be at least one bin".to_string()));
    }

    let (positions, labels) = histogram
        .bins()
        .iter()
        .step_by(tick_stride)
        .map(|bin| (bin.index, bin.label.clone()))
        .unzip();

    Ok(TickMarks { positions, labels })
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lengths: &[u64]) -> ReadLengthSample {
        ReadLengthSample::new(lengths.to_vec(), "test").unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_bins_with_explicit_max() {
        let hist = bin_histogram(&sample(&[150, 950, 1050]), 1000, Some(2000)).unwrap();
        let bins = hist.bins();
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].label, "0k");
        assert_eq!(bins[1].label, "1k");
        assert_eq!(bins[2].label, "2k");
        assert!(close(bins[0].megabases, 0.0011));
        assert!(close(bins[1].megabases, 0.00105));
        assert_eq!(bins[2].megabases, 0.0);
        assert_eq!(hist.excluded_reads(), 0);
    }

    #[test]
    fn test_default_max_covers_longest_read() {
        let lengths = [3_200, 12, 7_999, 8_000, 450, 15_001];
        let hist = bin_histogram(&sample(&lengths), 1000, None).unwrap();
        assert_eq!(hist.bins().len(), 16);
        let total: u64 = lengths.iter().sum();
        assert!((hist.total_megabases() * 1_000_000.0 - total as f64).abs() < 1e-6);
        assert!(hist.bins().iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_reads_past_max_are_excluded() {
        let hist = bin_histogram(&sample(&[100, 1500, 200]), 1000, Some(500)).unwrap();
        assert_eq!(hist.bins().len(), 1);
        assert!(close(hist.total_megabases(), 0.0003));
        assert_eq!(hist.excluded_reads(), 1);
    }

    #[test]
    fn test_max_below_bin_width_gives_single_bin() {
        let hist = bin_histogram(&sample(&[5_000]), 1000, Some(10)).unwrap();
        assert_eq!(hist.bins().len(), 1);
        assert_eq!(hist.bins()[0].megabases, 0.0);
    }

    #[test]
    fn test_zero_bin_width_is_rejected() {
        assert!(matches!(bin_histogram(&sample(&[1]), 0, None), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_max_is_rejected() {
        let reads = sample(&[100]);
        assert!(matches!(bin_histogram(&reads, 1, Some(u64::MAX)), Err(PipelineError::InvalidConfig(_))));
        assert!(matches!(
            bin_histogram(&reads, 1000, Some(10_000_000_000_000)),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bin_count_limit() {
        assert_eq!(bin_count(0, 1).unwrap(), 1);
        assert_eq!(bin_count(MAX_HISTOGRAM_BINS as u64 - 1, 1).unwrap(), MAX_HISTOGRAM_BINS);
        assert!(bin_count(MAX_HISTOGRAM_BINS as u64, 1).is_err());
    }

    #[test]
    fn test_fractional_kb_labels() {
        assert_eq!(bin_label(0, 500), "0k");
        assert_eq!(bin_label(3, 500), "1.5k");
        assert_eq!(bin_label(4, 500), "2k");
    }

    #[test]
    fn test_render_labels_strides() {
        let hist = bin_histogram(&sample(&[11_500]), 1000, None).unwrap();
        let ticks = render_labels(&hist, 5).unwrap();
        assert_eq!(ticks.positions, vec![0, 5, 10]);
        assert_eq!(ticks.labels, vec!["0k", "5k", "10k"]);

        let every = render_labels(&hist, 1).unwrap();
        assert_eq!(every.positions.len(), hist.bins().len());
        assert!(render_labels(&hist, 0).is_err());
    }
}
