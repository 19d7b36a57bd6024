use serde::{Deserialize, Serialize};

use crate::{
    driver::scheduler::{OwnerId, Scheduler, TimerHandle, WakeKind, Wakeup},
    foundation::core::Millis,
    foundation::error::{GlyphfolioError, GlyphfolioResult},
};

/// Page-wide readiness. Ordered; only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Structural lines and dividers are drawing.
    #[default]
    Lines,
    /// Text reveals may start.
    Text,
    /// Everything is in place, interactive controls included.
    Interactive,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Text => "text",
            Self::Interactive => "interactive",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offsets from mount at which each phase begins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTimings {
    pub text_at_ms: f64,
    pub interactive_at_ms: f64,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            text_at_ms: 2000.0,
            interactive_at_ms: 6000.0,
        }
    }
}

impl PhaseTimings {
    pub fn validate(&self) -> GlyphfolioResult<()> {
        for (name, v) in [
            ("text_at_ms", self.text_at_ms),
            ("interactive_at_ms", self.interactive_at_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GlyphfolioError::validation(format!(
                    "phase {name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if self.interactive_at_ms < self.text_at_ms {
            return Err(GlyphfolioError::validation(
                "phase interactive_at_ms must not precede text_at_ms",
            ));
        }
        Ok(())
    }
}

/// Drives `lines -> text -> interactive` off two one-shot timers armed at mount.
#[derive(Debug)]
pub struct PhaseSequencer {
    owner: OwnerId,
    timings: PhaseTimings,
    skip: bool,
    phase: Phase,
    pending: Vec<(TimerHandle, Phase)>,
    mounted: bool,
}

impl PhaseSequencer {
    pub fn new(owner: OwnerId, timings: PhaseTimings, skip: bool) -> Self {
        Self {
            owner,
            timings,
            skip,
            phase: if skip { Phase::Interactive } else { Phase::Lines },
            pending: Vec::new(),
            mounted: false,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn text_phase_active(&self) -> bool {
        self.skip || self.phase >= Phase::Text
    }

    pub fn interactive_phase_active(&self) -> bool {
        self.skip || self.phase == Phase::Interactive
    }

    /// Arm the phase timers. Only the first call has an effect.
    pub fn mount(&mut self, sched: &mut Scheduler) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.skip {
            return;
        }

        let text = sched.set_timeout(self.owner, Millis(self.timings.text_at_ms));
        let interactive = sched.set_timeout(self.owner, Millis(self.timings.interactive_at_ms));
        self.pending = vec![(text, Phase::Text), (interactive, Phase::Interactive)];
    }

    /// Returns true when the phase moved.
    pub fn wake(&mut self, wakeup: &Wakeup) -> bool {
        let WakeKind::Timer(handle) = wakeup.kind else {
            return false;
        };
        let Some(pos) = self.pending.iter().position(|(h, _)| *h == handle) else {
            tracing::trace!(owner = self.owner.0, ?wakeup, "stale phase wakeup ignored");
            return false;
        };
        let (_, target) = self.pending.swap_remove(pos);
        self.advance(target)
    }

    /// Move to `target` if it is ahead of the current phase.
    pub fn advance(&mut self, target: Phase) -> bool {
        if target <= self.phase {
            return false;
        }
        tracing::debug!(from = %self.phase, to = %target, "phase advanced");
        self.phase = target;
        true
    }

    pub fn dispose(&mut self, sched: &mut Scheduler) {
        for (h, _) in self.pending.drain(..) {
            sched.clear_timeout(h);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/phase.rs"]
mod tests;
