/// Default number of equal-width histogram bins for the population CDF.
pub const DEFAULT_NUM_BINS: usize = 20;

/// Empirical distribution of pass ratios across the cataloged population,
/// summarized as `num_bins` equal-width bins over `[min, max]`.
///
/// `bins[i]` is the right edge of bin `i`; `cdf[i]` the fraction of the
/// population at or below that edge. Both slices always have the same
/// length, `cdf` is monotone non-decreasing, and when non-empty the last
/// entry of `cdf` is exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileModel {
    bins: Vec<f64>,
    cdf: Vec<f64>,
}

impl PercentileModel {
    /// A model with no population behind it; every lookup is 0.
    pub fn empty() -> Self {
        Self {
            bins: Vec::new(),
            cdf: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Builds the distribution from the population's pass ratios.
    ///
    /// A population that is empty or has a single distinct value gives no
    /// spread to rank against, so the empty model comes back and callers
    /// rank everything at 0 rather than dividing by a zero-width range.
    pub fn build(ratios: &[f64], num_bins: usize) -> Self {
        let samples: Vec<f64> = ratios.iter().copied().filter(|r| r.is_finite()).collect();
        if samples.is_empty() || num_bins == 0 {
            return Self::empty();
        }
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= min {
            return Self::empty();
        }

        let width = (max - min) / num_bins as f64;
        let mut counts = vec![0usize; num_bins];
        for sample in &samples {
            let mut index = ((sample - min) / width) as usize;
            if index >= num_bins {
                index = num_bins - 1;
            }
            counts[index] += 1;
        }

        let population = samples.len() as f64;
        let mut bins = Vec::with_capacity(num_bins);
        let mut cdf = Vec::with_capacity(num_bins);
        let mut running = 0usize;
        for (i, count) in counts.iter().enumerate() {
            running += count;
            bins.push(min + width * (i + 1) as f64);
            cdf.push(running as f64 / population);
        }
        // pin the last edge to the true maximum against rounding drift
        bins[num_bins - 1] = max;

        Self { bins, cdf }
    }

    /// Percentile of `value` within the population, in `[0, 100]`.
    ///
    /// Values below the first edge clamp to 0 and values above the last
    /// clamp to 100; in between, the CDF is linearly interpolated.
    pub fn percentile(&self, value: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let index = self.bins.partition_point(|edge| *edge < value);
        if index == 0 {
            return 0.0;
        }
        if index == self.bins.len() {
            return 100.0;
        }
        let (lo_edge, hi_edge) = (self.bins[index - 1], self.bins[index]);
        let (lo_cdf, hi_cdf) = (self.cdf[index - 1], self.cdf[index]);
        let fraction = (value - lo_edge) / (hi_edge - lo_edge);
        100.0 * (lo_cdf + (hi_cdf - lo_cdf) * fraction)
    }
}
