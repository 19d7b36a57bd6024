use serde::{Deserialize, Serialize};

use crate::{
    driver::scheduler::{OwnerId, Scheduler, TimerHandle, WakeKind, Wakeup},
    foundation::core::Millis,
    foundation::error::{GlyphfolioError, GlyphfolioResult},
    sequence::phase::Phase,
};

/// Mount offsets of the page's delayed blocks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagedTimings {
    /// Vertical divider between the two panes.
    pub divider_ms: f64,
    pub footer_ms: f64,
    /// First header action; later ones follow every `action_step_ms`.
    pub action_ms: f64,
    pub action_step_ms: f64,
}

impl Default for StagedTimings {
    fn default() -> Self {
        Self {
            divider_ms: 400.0,
            footer_ms: 4500.0,
            action_ms: 6200.0,
            action_step_ms: 200.0,
        }
    }
}

impl StagedTimings {
    pub fn validate(&self) -> GlyphfolioResult<()> {
        for (name, v) in [
            ("divider_ms", self.divider_ms),
            ("footer_ms", self.footer_ms),
            ("action_ms", self.action_ms),
            ("action_step_ms", self.action_step_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GlyphfolioError::validation(format!(
                    "staged {name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        Ok(())
    }

    pub fn action(&self, index: u32) -> Millis {
        Millis(self.action_ms + f64::from(index) * self.action_step_ms)
    }
}

/// A block that appears on its own timer after mount, independent of the phase.
///
/// The style only says which phase the block visually belongs to.
#[derive(Debug)]
pub struct StagedBlock {
    owner: OwnerId,
    style: Phase,
    delay: Millis,
    skip: bool,
    timer: Option<TimerHandle>,
    visible: bool,
}

impl StagedBlock {
    pub fn new(owner: OwnerId, style: Phase, delay: Millis, skip: bool) -> Self {
        Self {
            owner,
            style,
            delay,
            skip,
            timer: None,
            visible: false,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn style(&self) -> Phase {
        self.style
    }

    pub fn delay(&self) -> Millis {
        self.delay
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn mount(&mut self, sched: &mut Scheduler) {
        if self.visible || self.timer.is_some() {
            return;
        }
        if self.skip {
            self.visible = true;
            return;
        }
        self.timer = Some(sched.set_timeout(self.owner, self.delay));
    }

    pub fn wake(&mut self, wakeup: &Wakeup) -> bool {
        match (self.timer, wakeup.kind) {
            (Some(t), WakeKind::Timer(h)) if t == h => {
                self.timer = None;
                self.visible = true;
                tracing::trace!(owner = self.owner.0, style = %self.style, "staged block shown");
                true
            }
            _ => false,
        }
    }

    pub fn dispose(&mut self, sched: &mut Scheduler) {
        if let Some(t) = self.timer.take() {
            sched.clear_timeout(t);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/staged.rs"]
mod tests;
