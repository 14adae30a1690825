//! Binning of visible samples

use std::ops::Range;

use crate::common::ValueRange;

/// Bins used for normalized volumes
pub const DEFAULT_BINS: usize = 100;

/// Equal-width histogram over a closed domain.
///
/// Bin `i` covers `<low + i*w; low + (i+1)*w)`, the last bin also holds `high`.
/// Samples outside the domain and `NaN`s are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    domain: ValueRange,
    counts: Vec<usize>,
    skipped: usize,
}

impl Histogram {
    /// # Panics
    /// If `bins` is zero or the domain is empty
    pub fn new(domain: ValueRange, bins: usize) -> Histogram {
        assert!(bins > 0, "histogram needs at least one bin");
        assert!(
            !domain.is_empty() && domain.span() > 0.0,
            "histogram domain must have positive span"
        );
        Histogram {
            domain,
            counts: vec![0; bins],
            skipped: 0,
        }
    }

    /// Histogram of normalized samples, 100 bins over `<0;1>`
    pub fn normalized() -> Histogram {
        Histogram::new(ValueRange::unit(), DEFAULT_BINS)
    }

    pub fn from_samples(
        domain: ValueRange,
        bins: usize,
        samples: impl IntoIterator<Item = f32>,
    ) -> Histogram {
        let mut hist = Histogram::new(domain, bins);
        hist.extend(samples);
        hist
    }

    /// Index of bin holding `val`
    pub fn bin_index(&self, val: f32) -> Option<usize> {
        if !self.domain.contains(val) {
            return None;
        }
        let n = self.counts.len();
        let pos = (val - self.domain.low) / self.domain.span() * n as f32;
        Some(usize::min(pos as usize, n - 1))
    }

    pub fn add(&mut self, val: f32) {
        match self.bin_index(val) {
            Some(i) => self.counts[i] += 1,
            None => self.skipped += 1,
        }
    }

    pub fn extend(&mut self, samples: impl IntoIterator<Item = f32>) {
        for val in samples {
            self.add(val);
        }
    }

    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.skipped = 0;
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn domain(&self) -> ValueRange {
        self.domain
    }

    pub fn bin_width(&self) -> f32 {
        self.domain.span() / self.counts.len() as f32
    }

    /// Bounds of bin `i`
    pub fn bin_range(&self, i: usize) -> Range<f32> {
        let w = self.bin_width();
        let low = self.domain.low + i as f32 * w;
        low..low + w
    }

    /// Samples counted in bins
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Samples outside the domain
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Count in the fullest bin
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
