//! Light/dark preference, persisted as a single word.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{GlyphfolioError, GlyphfolioResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Label of the toggle control: the theme it would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "LIGHT",
            Self::Light => "DARK",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the preference lives.
pub trait ThemeStore {
    fn load(&self) -> GlyphfolioResult<Option<Theme>>;
    fn save(&self, theme: Theme) -> GlyphfolioResult<()>;
}

impl<S: ThemeStore + ?Sized> ThemeStore for Box<S> {
    fn load(&self) -> GlyphfolioResult<Option<Theme>> {
        (**self).load()
    }

    fn save(&self, theme: Theme) -> GlyphfolioResult<()> {
        (**self).save(theme)
    }
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: RefCell<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<Theme>) -> Self {
        Self {
            value: RefCell::new(initial),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> GlyphfolioResult<Option<Theme>> {
        Ok(*self.value.borrow())
    }

    fn save(&self, theme: Theme) -> GlyphfolioResult<()> {
        *self.value.borrow_mut() = Some(theme);
        Ok(())
    }
}

/// One-word file, by default under the user's config directory.
#[derive(Clone, Debug)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("glyphfolio").join("theme"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> GlyphfolioResult<Option<Theme>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GlyphfolioError::storage(format!(
                    "read '{}': {e}",
                    self.path.display()
                )));
            }
        };
        match Theme::parse(&raw) {
            Some(t) => Ok(Some(t)),
            None => {
                tracing::warn!(
                    path = %self.path.display(),
                    value = raw.trim(),
                    "ignoring unknown theme value"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, theme: Theme) -> GlyphfolioResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GlyphfolioError::storage(format!("create '{}': {e}", parent.display()))
            })?;
        }
        std::fs::write(&self.path, theme.as_str())
            .map_err(|e| GlyphfolioError::storage(format!("write '{}': {e}", self.path.display())))
    }
}

/// Best guess at the terminal background from `COLORFGBG` (`fg;bg`, bg 7 or 15 is light).
pub fn system_preference() -> Theme {
    preference_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

pub fn preference_from_colorfgbg(value: Option<&str>) -> Theme {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7 | 15) => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Current theme plus its persistence. Storage failures only ever degrade to memory.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    theme: Theme,
    persisted: bool,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Saved preference, else `fallback` (normally [`system_preference`]).
    pub fn init(store: S, fallback: Theme) -> Self {
        let theme = match store.load() {
            Ok(Some(t)) => t,
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, "theme storage unavailable, using default");
                fallback
            }
        };
        Self {
            store,
            theme,
            persisted: true,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// False once a save has failed; the theme still changes in memory.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        match self.store.save(theme) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                tracing::warn!(error = %e, "could not persist theme, keeping it in memory");
                self.persisted = false;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/theme.rs"]
mod tests;
