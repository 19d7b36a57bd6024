use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Millis,
    foundation::error::{GlyphfolioError, GlyphfolioResult},
};

/// Per-level offsets for staggered start delays, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerBases {
    pub section_ms: f64,
    pub subsection_ms: f64,
    pub item_ms: f64,
    pub field_ms: f64,
}

impl Default for StaggerBases {
    fn default() -> Self {
        Self {
            section_ms: 300.0,
            subsection_ms: 150.0,
            item_ms: 50.0,
            field_ms: 150.0,
        }
    }
}

impl StaggerBases {
    pub fn validate(&self) -> GlyphfolioResult<()> {
        for (name, v) in [
            ("section_ms", self.section_ms),
            ("subsection_ms", self.subsection_ms),
            ("item_ms", self.item_ms),
            ("field_ms", self.field_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GlyphfolioError::validation(format!(
                    "stagger {name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        Ok(())
    }
}

/// Maps a position in the page to a start delay. Every delay is zero when animations are skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stagger {
    pub bases: StaggerBases,
    pub skip: bool,
}

impl Stagger {
    pub fn new(bases: StaggerBases, skip: bool) -> Self {
        Self { bases, skip }
    }

    pub fn delay(&self, section: u32, sub: u32, item: u32) -> Millis {
        if self.skip {
            return Millis::ZERO;
        }
        let b = &self.bases;
        Millis(
            f64::from(section) * b.section_ms
                + f64::from(sub) * b.subsection_ms
                + f64::from(item) * b.item_ms,
        )
    }

    /// Delay of a section's first-level entry.
    pub fn section(&self, section: u32) -> Millis {
        self.delay(section, 0, 0)
    }

    pub fn field_delay(&self, section: u32, field: u32) -> Millis {
        if self.skip {
            return Millis::ZERO;
        }
        Millis(f64::from(section) * self.bases.section_ms + f64::from(field) * self.bases.field_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/stagger.rs"]
mod tests;
