use std::ops::{Add, Sub};

use crate::foundation::error::{GlyphfolioError, GlyphfolioResult};

/// A point in time or a duration, in milliseconds.
///
/// Render clocks report fractional milliseconds, so this wraps an `f64`. Values produced by the
/// engine are always finite.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Millis(pub f64);

impl Millis {
    pub const ZERO: Millis = Millis(0.0);

    pub fn new(ms: f64) -> Self {
        Self(ms)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    pub fn as_secs(self) -> f64 {
        self.0 / 1000.0
    }

    /// `self - earlier`, clamped at zero.
    pub fn since(self, earlier: Millis) -> Millis {
        Millis((self.0 - earlier.0).max(0.0))
    }

    pub fn max(self, other: Millis) -> Millis {
        Millis(self.0.max(other.0))
    }

    pub fn min(self, other: Millis) -> Millis {
        Millis(self.0.min(other.0))
    }

    pub(crate) fn total_cmp(&self, other: &Millis) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

impl Sub for Millis {
    type Output = Millis;

    fn sub(self, rhs: Millis) -> Millis {
        Millis(self.0 - rhs.0)
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}ms", self.0)
    }
}

/// Display refresh rate as a rational number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> GlyphfolioResult<Self> {
        if den == 0 {
            return Err(GlyphfolioError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GlyphfolioError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Time between two consecutive refreshes.
    pub fn frame_interval(self) -> Millis {
        Millis(1000.0 * f64::from(self.den) / f64::from(self.num))
    }

    pub fn from_interval(interval: Millis) -> GlyphfolioResult<Self> {
        if !(interval.0.is_finite() && interval.0 > 0.0) {
            return Err(GlyphfolioError::validation("frame interval must be > 0"));
        }
        // Microsecond resolution is plenty for refresh rates.
        let den = (interval.0 * 1000.0).round().max(1.0) as u32;
        Ok(Self { num: 1_000_000, den })
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
