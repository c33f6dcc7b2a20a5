//! Finite binary64 values used throughout the level model.

use std::hash::{Hash, Hasher};

use thiserror::Error;

/// `f64` restricted to finite values, with total ordering and hashing.
///
/// Beats, lanes, sizes, alphas and timescales in the output model all use
/// this wrapper: entities are sorted by beat and guide anchors are keyed
/// by beat in a hash map, neither of which tolerates NaN. Negative zero
/// is normalized to positive zero on construction so numerically equal
/// positions land in the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
#[repr(transparent)]
pub struct FinF64(f64);

impl Eq for FinF64 {}

impl PartialOrd for FinF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FinF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for FinF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<FinF64> for f64 {
    fn from(value: FinF64) -> Self {
        value.as_f64()
    }
}

/// Error type for `FinF64::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("finite number expected: {0}")]
pub struct TryFromFloatError(pub(crate) f64);

impl TryFrom<f64> for FinF64 {
    type Error = TryFromFloatError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(TryFromFloatError(value));
        }
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }
}

impl std::fmt::Display for FinF64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FinF64 {
    /// Creates a new `FinF64` from `f64` if `float` is finite, otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn new(float: f64) -> Option<Self> {
        Self::try_from(float).ok()
    }

    /// Gets the internal value.
    #[inline]
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Wraps a value known to be finite. Callers guarantee finiteness.
    pub(crate) const fn new_unchecked(value: f64) -> Self {
        Self(value)
    }
}
