use indexmap::IndexSet;

use crate::error::{ChartError, ChartResult};

/// Discrete categories → evenly spaced pixel bands.
///
/// Duplicate categories collapse onto the band of their first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range_start: f64, range_end: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band range must be finite".to_owned(),
            ));
        }

        let mut scale = Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range_start,
            range_end,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            offset: range_start,
        };
        scale.rescale();
        Ok(scale)
    }

    /// Sets inner and outer padding, as a fraction of the step, in one call.
    pub fn with_padding(mut self, padding: f64) -> ChartResult<Self> {
        if !padding.is_finite() || !(0.0..=1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.padding_inner = padding;
        self.padding_outer = padding;
        self.rescale();
        Ok(self)
    }

    #[must_use]
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Band start for `category`, or `None` when the category is unknown.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .get_index_of(category)
            .map(|index| self.offset + self.step * index as f64)
    }

    /// Band center for `category`.
    #[must_use]
    pub fn center(&self, category: &str) -> Option<f64> {
        self.position(category)
            .map(|start| start + self.bandwidth * 0.5)
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let reversed = self.range_end < self.range_start;
        let (start, stop) = if reversed {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };

        let denominator = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.step = (stop - start) / denominator;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
        let leading = (stop - start - self.step * (n - self.padding_inner)) * self.align;
        self.offset = start + leading;

        if reversed && n > 0.0 {
            self.offset += self.step * (n - 1.0);
            self.step = -self.step;
        }
    }
}
