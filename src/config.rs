use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    driver::frame::DriverSettings,
    foundation::core::{Fps, Millis},
    foundation::error::{GlyphfolioError, GlyphfolioResult},
    foundation::rng::Rng64,
    reveal::component::DEFAULT_FLASH_MS,
    resume::loader::DEFAULT_CACHE_TTL_SECS,
    scramble::plan::TimingVariant,
    scramble::pool::{PoolChoice, ScramblePool},
    sequence::phase::PhaseTimings,
    sequence::staged::StagedTimings,
    sequence::stagger::{Stagger, StaggerBases},
};

pub const ENV_SKIP_ANIMATION: &str = "GLYPHFOLIO_SKIP_ANIMATION";
pub const ENV_RESUME_LINK: &str = "RESUME_JSON_LINK";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub variant: TimingVariant,
    pub pool: PoolChoice,
    /// Extra characters that never scramble, on top of whitespace and the default punctuation.
    pub immutable_extra: String,
    pub flash_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            variant: TimingVariant::default(),
            pool: PoolChoice::default(),
            immutable_extra: String::new(),
            flash_ms: DEFAULT_FLASH_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    /// Base URL (or directory) holding `resume.json` and `resume-backup.json`.
    pub link: Option<String>,
    pub cache_ttl_secs: u64,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            link: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Everything tunable, threaded explicitly through the page and its components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Show final text immediately, without timers.
    pub skip_animation: bool,
    /// Fixed seed for glyph picks. `None` draws from the system clock.
    pub seed: Option<u64>,
    pub frame_interval_ms: f64,
    pub reveal: RevealConfig,
    pub stagger: StaggerBases,
    pub phase: PhaseTimings,
    pub staged: StagedTimings,
    pub resume: ResumeConfig,
    pub theme_path: Option<PathBuf>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            skip_animation: false,
            seed: None,
            frame_interval_ms: Fps::default().frame_interval().as_f64(),
            reveal: RevealConfig::default(),
            stagger: StaggerBases::default(),
            phase: PhaseTimings::default(),
            staged: StagedTimings::default(),
            resume: ResumeConfig::default(),
            theme_path: None,
        }
    }
}

impl FolioConfig {
    pub fn from_json_str(s: &str) -> GlyphfolioResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &std::path::Path) -> GlyphfolioResult<Self> {
        use anyhow::Context as _;

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Apply `GLYPHFOLIO_SKIP_ANIMATION` and `RESUME_JSON_LINK` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|k| std::env::var(k).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(skip) = lookup(ENV_SKIP_ANIMATION).and_then(|v| parse_flag(&v)) {
            self.skip_animation = skip;
        }
        if let Some(link) = lookup(ENV_RESUME_LINK).filter(|v| !v.trim().is_empty()) {
            self.resume.link = Some(link);
        }
    }

    pub fn validate(&self) -> GlyphfolioResult<()> {
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return Err(GlyphfolioError::validation(format!(
                "frame_interval_ms must be > 0 (got {})",
                self.frame_interval_ms
            )));
        }
        if !(self.reveal.flash_ms.is_finite() && self.reveal.flash_ms >= 0.0) {
            return Err(GlyphfolioError::validation("reveal.flash_ms must be >= 0"));
        }
        if self.reveal.pool.glyphs().is_empty() {
            return Err(GlyphfolioError::validation("reveal.pool must not be empty"));
        }
        self.reveal.variant.validate()?;
        self.stagger.validate()?;
        self.phase.validate()?;
        self.staged.validate()?;
        Ok(())
    }

    pub fn fps(&self) -> GlyphfolioResult<Fps> {
        Fps::from_interval(Millis(self.frame_interval_ms))
    }

    pub fn pool(&self) -> GlyphfolioResult<ScramblePool> {
        ScramblePool::new(&self.reveal.pool, &self.reveal.immutable_extra)
    }

    pub fn driver_settings(&self) -> GlyphfolioResult<DriverSettings> {
        Ok(DriverSettings {
            variant: self.reveal.variant,
            pool: Arc::new(self.pool()?),
            skip: self.skip_animation,
        })
    }

    pub fn stagger(&self) -> Stagger {
        Stagger::new(self.stagger, self.skip_animation)
    }

    /// The configured seed, or one fresh entropy draw. Draw once per page and derive every
    /// instance from it with [`Rng64::for_key`] so siblings never share a stream.
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| Rng64::from_entropy().next_u64())
    }

    /// Generator for a single instance named `key`: reproducible when a seed is configured.
    pub fn rng_for(&self, key: &str) -> Rng64 {
        Rng64::for_key(self.base_seed(), key)
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
