//! Median degree value as emitted per event.

use std::fmt;

use crate::MEDIAN_PRECISION;

/// Degree of a participant: number of active edge endpoints it occupies.
pub type Degree = u32;

/// A median of the degree distribution.
///
/// Always a whole number or a half, since it is either one degree or the
/// mean of two. Displays as fixed-point with `MEDIAN_PRECISION` digits.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Median(f64);

impl Median {
    /// Median of an empty graph.
    pub const ZERO: Self = Self(0.0);

    /// Median of an odd-sized distribution: the middle degree.
    pub fn single(degree: Degree) -> Self {
        Self(f64::from(degree))
    }

    /// Median of an even-sized distribution: mean of the two middle degrees.
    pub fn between(lower: Degree, upper: Degree) -> Self {
        Self((f64::from(lower) + f64::from(upper)) / 2.0)
    }

    /// The numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<Degree> for Median {
    fn from(degree: Degree) -> Self {
        Self::single(degree)
    }
}

impl fmt::Display for Median {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", MEDIAN_PRECISION, self.0)
    }
}
