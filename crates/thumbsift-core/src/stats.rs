//! Mean/stddev outlier rejection shared by both filtering passes of the
//! frame-selection pipeline.

use serde::Serialize;

use crate::error::{Result, ThumbsiftError};

/// Population mean and standard deviation of a set of scalars, with the
/// one-sigma band around the mean.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatBounds {
    pub mean: f64,
    pub stddev: f64,
    pub lower: f64,
    pub upper: f64,
}

impl StatBounds {
    /// Compute bounds with divisor N. Fails on empty input.
    ///
    /// When every value is identical the band collapses onto that value
    /// exactly, so rounding in the mean can never push an input outside it.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ThumbsiftError::EmptyInput);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return Ok(Self::collapsed(min));
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let stddev = var.sqrt();

        Ok(Self {
            mean,
            stddev,
            lower: mean - stddev,
            upper: mean + stddev,
        })
    }

    fn collapsed(value: f64) -> Self {
        Self {
            mean: value,
            stddev: 0.0,
            lower: value,
            upper: value,
        }
    }

    /// Inclusive band test.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Output of [`OutlierFilter::apply`]: borrowed survivors plus the bounds
/// that decided them.
#[derive(Debug)]
pub struct Filtered<'a, T> {
    pub retained: Vec<&'a T>,
    pub bounds: StatBounds,
}

impl<T> Filtered<'_, T> {
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }
}

/// Keeps the items whose extracted scalar lies within one population
/// standard deviation of the mean.
pub struct OutlierFilter<F> {
    extract: F,
    sort_ascending: bool,
}

impl<F> OutlierFilter<F> {
    pub fn new(extract: F) -> Self {
        Self {
            extract,
            sort_ascending: false,
        }
    }

    /// Return survivors sorted ascending by the scalar instead of in input
    /// order. The sort is stable, so equal scalars keep their input order.
    pub fn sorted(mut self) -> Self {
        self.sort_ascending = true;
        self
    }

    pub fn apply<'a, T>(&self, items: &'a [T]) -> Result<Filtered<'a, T>>
    where
        F: Fn(&T) -> f64,
    {
        let values: Vec<f64> = items.iter().map(&self.extract).collect();
        let bounds = StatBounds::from_values(&values)?;

        let mut retained: Vec<(&'a T, f64)> = items
            .iter()
            .zip(values)
            .filter(|(_, v)| bounds.contains(*v))
            .collect();

        if self.sort_ascending {
            retained.sort_by(|a, b| a.1.total_cmp(&b.1));
        }

        Ok(Filtered {
            retained: retained.into_iter().map(|(item, _)| item).collect(),
            bounds,
        })
    }
}
