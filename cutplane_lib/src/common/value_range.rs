use std::ops::RangeInclusive;

/// Closed range of sample values.
///
/// Used as histogram domain and to track extremes of volume data.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    pub fn new(low: f32, high: f32) -> ValueRange {
        ValueRange { low, high }
    }

    /// Constructs new, empty range.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Range of normalized samples, `<0;1>`
    pub fn unit() -> ValueRange {
        ValueRange::new(0.0, 1.0)
    }

    /// Minimal range containing every sample.
    /// `NaN` samples are skipped.
    pub fn from_samples(iter: impl IntoIterator<Item = f32>) -> ValueRange {
        let mut range = ValueRange::empty();
        for val in iter {
            range.extend(val);
        }
        range
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: f32) {
        if val.is_nan() {
            return;
        }

        if self.is_empty() {
            self.low = val;
            self.high = val;
            return;
        }

        self.low = f32::min(self.low, val);
        self.high = f32::max(self.high, val);
    }

    /// Check if value is inside the range, bounds included.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    /// Distance between bounds, zero for empty range
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.high - self.low
        }
    }

    /// Map `val` into `<0;1>` relative to the range.
    /// Degenerate ranges map everything to zero.
    pub fn normalize(&self, val: f32) -> f32 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            (val - self.low) / span
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::empty()
    }
}

/// Unlocks simple syntax:
/// ```
/// # use cutplane_lib::common::ValueRange;
/// let range: ValueRange = (0.0..=1.0).into();
/// assert!(range.contains(1.0));
/// ```
impl From<RangeInclusive<f32>> for ValueRange {
    fn from(range: RangeInclusive<f32>) -> Self {
        ValueRange::new(*range.start(), *range.end())
    }
}
