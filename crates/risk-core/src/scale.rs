//! Ordinal likelihood × impact scale used as heatmap axes.

use serde::Serialize;
use std::ops::RangeInclusive;

use crate::errors::CoreError;

/// Upper bound on axis length; keeps the dense matrix renderable.
const MAX_POINTS: i64 = 100;

/// Inclusive ordinal scale shared by the likelihood and impact axes.
///
/// Constructed through [`Scale::new`], which rejects empty or non-positive
/// ranges, so every `Scale` in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scale {
    min: i64,
    max: i64,
}

impl Scale {
    /// The 1–5 scale used by the reference data.
    pub const DEFAULT: Self = Self { min: 1, max: 5 };

    /// Build a scale spanning `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` if `min < 1`, `min > max`, or the
    /// range is longer than 100 points.
    pub fn new(min: i64, max: i64) -> Result<Self, CoreError> {
        if min < 1 {
            return Err(CoreError::invalid_filter(
                "scale",
                format!("lower bound must be at least 1, got {min}"),
            ));
        }
        if min > max {
            return Err(CoreError::invalid_filter(
                "scale",
                format!("lower bound {min} exceeds upper bound {max}"),
            ));
        }
        if max - min + 1 > MAX_POINTS {
            return Err(CoreError::invalid_filter(
                "scale",
                format!("range {min}..={max} exceeds {MAX_POINTS} points"),
            ));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(self) -> i64 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> i64 {
        self.max
    }

    /// Number of points on one axis.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn size(self) -> usize {
        (self.max - self.min + 1) as usize
    }

    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub const fn points(self) -> RangeInclusive<i64> {
        self.min..=self.max
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::DEFAULT
    }
}
