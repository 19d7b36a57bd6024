use crate::foundation::{
    error::{GlyphfolioError, GlyphfolioResult},
    rng::Rng64,
};

pub const CYRILLIC: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";
pub const SYMBOLS: &str = "!<>-_[]{}—=+*^?#@;: ";
pub const GREEK: &str = "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ";
pub const LATIN: &str = "&%$#@ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const GLITCH: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?~`";

/// Punctuation that keeps its shape during a reveal. Whitespace is always immutable as well.
pub const DEFAULT_IMMUTABLE: &[char] = &[
    ' ', '.', ':', ';', ',', '!', '?', '\'', '"', '`', '-', '_', '(', ')', '[', ']', '{', '}', '/',
    '\\', '@', '•', '⫻', '—', '⁝', '›', '&',
];

/// Which substitute glyphs a reveal draws from.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolChoice {
    #[default]
    Cyrillic,
    Symbols,
    Greek,
    Latin,
    Glitch,
    Custom(String),
}

impl PoolChoice {
    pub fn glyphs(&self) -> &str {
        match self {
            Self::Cyrillic => CYRILLIC,
            Self::Symbols => SYMBOLS,
            Self::Greek => GREEK,
            Self::Latin => LATIN,
            Self::Glitch => GLITCH,
            Self::Custom(s) => s,
        }
    }
}

/// Glyph pool plus the immutable set, resolved once per configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScramblePool {
    glyphs: Vec<char>,
    immutable: Vec<char>,
}

impl ScramblePool {
    pub fn new(choice: &PoolChoice, immutable_extra: &str) -> GlyphfolioResult<Self> {
        let glyphs: Vec<char> = choice.glyphs().chars().collect();
        if glyphs.is_empty() {
            return Err(GlyphfolioError::validation("scramble pool must not be empty"));
        }

        let mut immutable = DEFAULT_IMMUTABLE.to_vec();
        immutable.extend(immutable_extra.chars());
        immutable.sort_unstable();
        immutable.dedup();

        Ok(Self { glyphs, immutable })
    }

    pub fn is_immutable(&self, c: char) -> bool {
        c.is_whitespace() || self.immutable.binary_search(&c).is_ok()
    }

    /// Substitute for `c`: itself when immutable, otherwise a random pool glyph.
    pub fn scramble(&self, c: char, rng: &mut Rng64) -> char {
        if self.is_immutable(c) {
            return c;
        }
        rng.pick(&self.glyphs).copied().unwrap_or(c)
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for ScramblePool {
    fn default() -> Self {
        let mut immutable = DEFAULT_IMMUTABLE.to_vec();
        immutable.sort_unstable();
        Self {
            glyphs: CYRILLIC.chars().collect(),
            immutable,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scramble/pool.rs"]
mod tests;
