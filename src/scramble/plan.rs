use crate::{
    foundation::core::Millis,
    foundation::error::{GlyphfolioError, GlyphfolioResult},
    foundation::rng::Rng64,
    scramble::pool::ScramblePool,
};

/// Rendered in place of characters whose gibberish time has not come yet.
pub const BLANK: char = '\u{00A0}';

/// How characters move from placeholder to scrambled to revealed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingVariant {
    /// Left-to-right gibberish sweep followed by a lagging reveal wave. Glyphs are picked once.
    NonCycled { sweep_ms: f64, lag_ms: f64 },
    /// Reveal driven by overall progress; unrevealed glyphs are re-rolled every frame.
    Cycled { duration_ms: f64 },
    /// One character at a time, each flickering for `char_ms` before settling.
    Typewriter { char_ms: f64 },
}

impl Default for TimingVariant {
    fn default() -> Self {
        Self::NonCycled {
            sweep_ms: 400.0,
            lag_ms: 3800.0,
        }
    }
}

impl TimingVariant {
    pub fn cycled() -> Self {
        Self::Cycled { duration_ms: 800.0 }
    }

    pub fn typewriter() -> Self {
        Self::Typewriter { char_ms: 30.0 }
    }

    /// Every parameter must be finite. Only the sweep may be zero: the reveal window of each
    /// character has to stay non-empty.
    pub fn validate(&self) -> GlyphfolioResult<()> {
        let params = match self {
            Self::NonCycled { sweep_ms, lag_ms } => {
                vec![("sweep_ms", *sweep_ms, true), ("lag_ms", *lag_ms, false)]
            }
            Self::Cycled { duration_ms } => vec![("duration_ms", *duration_ms, false)],
            Self::Typewriter { char_ms } => vec![("char_ms", *char_ms, false)],
        };
        for (name, v, zero_ok) in params {
            let ok = v.is_finite() && if zero_ok { v >= 0.0 } else { v > 0.0 };
            if !ok {
                let bound = if zero_ok { ">= 0" } else { "> 0" };
                return Err(GlyphfolioError::validation(format!(
                    "timing {name} must be finite and {bound} (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// Whether unrevealed glyphs get a fresh random pick on every frame.
    pub fn rerolls_each_frame(&self) -> bool {
        matches!(self, Self::Cycled { .. } | Self::Typewriter { .. })
    }

    fn omits_pending(&self) -> bool {
        matches!(self, Self::Typewriter { .. })
    }
}

/// Timeline of a single character.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CharacterState {
    pub original: char,
    pub scrambled: char,
    pub gibberish_at: Millis,
    pub reveal_at: Millis,
}

/// Frozen per-character timeline for one target text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScramblePlan {
    pub text: String,
    pub variant: TimingVariant,
    pub states: Vec<CharacterState>,
    pub total: Millis,
}

impl ScramblePlan {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Visible text `elapsed` after the animation started.
    ///
    /// `rng` is only consulted by variants that re-roll each frame.
    pub fn frame_at(&self, elapsed: Millis, pool: &ScramblePool, rng: &mut Rng64) -> String {
        if elapsed >= self.total {
            return self.text.clone();
        }

        let reroll = self.variant.rerolls_each_frame();
        let omit = self.variant.omits_pending();
        let mut out = String::with_capacity(self.text.len() + self.states.len());
        for s in &self.states {
            if elapsed >= s.reveal_at {
                out.push(s.original);
            } else if elapsed >= s.gibberish_at {
                let glyph = if reroll {
                    pool.scramble(s.original, rng)
                } else {
                    s.scrambled
                };
                out.push(glyph);
            } else if !omit {
                out.push(BLANK);
            }
        }
        out
    }

    /// Number of characters showing their final glyph at `elapsed`.
    pub fn revealed_count(&self, elapsed: Millis) -> usize {
        self.states.iter().filter(|s| elapsed >= s.reveal_at).count()
    }
}

/// Build the timeline for `text`. Glyph picks are drawn from `rng` once, here.
pub fn build_plan(
    text: &str,
    variant: TimingVariant,
    pool: &ScramblePool,
    rng: &mut Rng64,
) -> ScramblePlan {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let states: Vec<CharacterState> = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let (gibberish_at, reveal_at) = thresholds(variant, i, len);
            CharacterState {
                original: c,
                scrambled: pool.scramble(c, rng),
                gibberish_at: Millis(gibberish_at),
                reveal_at: Millis(reveal_at),
            }
        })
        .collect();

    let total = states.last().map(|s| s.reveal_at).unwrap_or(Millis::ZERO);

    ScramblePlan {
        text: text.to_string(),
        variant,
        states,
        total,
    }
}

fn thresholds(variant: TimingVariant, i: usize, len: usize) -> (f64, f64) {
    // Only called with i < len, so len > 0 here.
    let frac = i as f64 / len as f64;
    let next = (i + 1) as f64 / len as f64;
    match variant {
        TimingVariant::NonCycled { sweep_ms, lag_ms } => {
            let g = frac * sweep_ms;
            (g, g + lag_ms)
        }
        TimingVariant::Cycled { duration_ms } => (0.0, next * duration_ms),
        TimingVariant::Typewriter { char_ms } => (i as f64 * char_ms, (i + 1) as f64 * char_ms),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scramble/plan.rs"]
mod tests;
