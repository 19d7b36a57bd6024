use std::{cell::RefCell, collections::HashMap, path::Path, process::Command};

use serde::Serialize;

use crate::{
    driver::clock::Clock,
    foundation::core::Millis,
    foundation::error::{GlyphfolioError, GlyphfolioResult},
    resume::{backup::embedded_resume, model::ResumeData},
};

pub const PRIMARY_DOCUMENT: &str = "resume.json";
pub const SECONDARY_DOCUMENT: &str = "resume-backup.json";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;

/// Retrieves a document body by URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String> {
        (**self).fetch(url)
    }
}

impl<F: Fetch + ?Sized> Fetch for Box<F> {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String> {
        (**self).fetch(url)
    }
}

pub fn is_curl_on_path() -> bool {
    Command::new("curl")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// HTTP(S) through the system `curl` binary. Non-2xx responses are failures.
#[derive(Clone, Debug)]
pub struct CurlFetch {
    pub timeout_secs: u64,
}

impl Default for CurlFetch {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Fetch for CurlFetch {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String> {
        use anyhow::Context as _;

        let out = Command::new("curl")
            .args(["--silent", "--show-error", "--fail", "--location", "--max-time"])
            .arg(self.timeout_secs.to_string())
            .arg(url)
            .output()
            .context("failed to run curl (is it installed and on PATH?)")?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(GlyphfolioError::data(format!(
                "fetch '{url}' failed ({}): {}",
                out.status,
                stderr.trim()
            )));
        }
        String::from_utf8(out.stdout)
            .map_err(|e| GlyphfolioError::data(format!("fetch '{url}': body is not utf-8: {e}")))
    }
}

/// Local files, addressed either by plain path or `file://` URL.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetch;

impl Fetch for FileFetch {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String> {
        use anyhow::Context as _;

        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        Ok(body)
    }
}

/// Picks [`FileFetch`] or [`CurlFetch`] from the URL scheme.
#[derive(Clone, Debug, Default)]
pub struct AutoFetch {
    pub http: CurlFetch,
}

impl Fetch for AutoFetch {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String> {
        if url.starts_with("http://") || url.starts_with("https://") {
            self.http.fetch(url)
        } else {
            FileFetch.fetch(url)
        }
    }
}

/// Successful bodies are reused until they are `ttl` old. Failures are never cached.
#[derive(Debug)]
pub struct CachedFetch<F, C> {
    inner: F,
    clock: C,
    ttl: Millis,
    entries: RefCell<HashMap<String, (Millis, String)>>,
}

impl<F: Fetch, C: Clock> CachedFetch<F, C> {
    pub fn new(inner: F, clock: C, ttl_secs: u64) -> Self {
        Self {
            inner,
            clock,
            ttl: Millis::from_secs(ttl_secs as f64),
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn invalidate(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<F: Fetch, C: Clock> Fetch for CachedFetch<F, C> {
    fn fetch(&self, url: &str) -> GlyphfolioResult<String> {
        let now = self.clock.now();
        if let Some((at, body)) = self.entries.borrow().get(url)
            && now.since(*at) < self.ttl
        {
            tracing::trace!(url, "resume cache hit");
            return Ok(body.clone());
        }

        tracing::info!(url, "fetching resume data");
        let body = self.inner.fetch(url)?;
        self.entries
            .borrow_mut()
            .insert(url.to_string(), (now, body.clone()));
        Ok(body)
    }
}

/// Which source produced a loaded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeOrigin {
    Primary,
    Secondary,
    Embedded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadedResume {
    pub data: ResumeData,
    pub origin: ResumeOrigin,
}

/// Loads `<base>/resume.json`, then `<base>/resume-backup.json`, then the embedded document.
#[derive(Debug)]
pub struct ResumeLoader<F> {
    base: Option<String>,
    fetch: F,
}

impl<F: Fetch> ResumeLoader<F> {
    pub fn new(base: Option<String>, fetch: F) -> Self {
        let base = base
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty());
        Self { base, fetch }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Never fails; the embedded document is the last resort.
    #[tracing::instrument(skip(self), fields(base = ?self.base))]
    pub fn load(&self) -> LoadedResume {
        let Some(base) = self.base.as_deref() else {
            tracing::error!("resume link is not set, using embedded resume");
            return embedded();
        };

        for (doc, origin) in [
            (PRIMARY_DOCUMENT, ResumeOrigin::Primary),
            (SECONDARY_DOCUMENT, ResumeOrigin::Secondary),
        ] {
            let url = format!("{base}/{doc}");
            match self.fetch_valid(&url) {
                Ok(data) => {
                    tracing::info!(%url, "resume data passed validation");
                    return LoadedResume { data, origin };
                }
                Err(e) => tracing::warn!(%url, error = %e, "resume source failed"),
            }
        }

        tracing::warn!("all resume sources failed, using embedded resume");
        embedded()
    }

    fn fetch_valid(&self, url: &str) -> GlyphfolioResult<ResumeData> {
        let body = self.fetch.fetch(url)?;
        ResumeData::from_json_str(&body)
    }
}

fn embedded() -> LoadedResume {
    LoadedResume {
        data: embedded_resume(),
        origin: ResumeOrigin::Embedded,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resume/loader.rs"]
mod tests;
