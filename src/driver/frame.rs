use std::sync::Arc;

use crate::{
    driver::scheduler::{FrameHandle, OwnerId, Scheduler, TimerHandle, WakeKind, Wakeup},
    foundation::core::Millis,
    foundation::rng::Rng64,
    scramble::plan::{ScramblePlan, TimingVariant, build_plan},
    scramble::pool::ScramblePool,
};

/// Everything a driver needs besides its text.
#[derive(Clone, Debug)]
pub struct DriverSettings {
    pub variant: TimingVariant,
    pub pool: Arc<ScramblePool>,
    /// Jump straight to the final text without scheduling anything.
    pub skip: bool,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            variant: TimingVariant::default(),
            pool: Arc::new(ScramblePool::default()),
            skip: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverState {
    Idle,
    Waiting {
        timer: TimerHandle,
    },
    Running {
        started_at: Option<Millis>,
        frame: FrameHandle,
    },
    Complete,
}

/// Transition reported back to the owner of a driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverEvent {
    /// The start delay elapsed; frames are now being requested.
    Started,
    /// A new frame was rendered.
    Advanced,
    /// The final text is showing. Reported once per text value.
    Completed,
}

/// Per-instance reveal state machine: `idle -> waiting -> running -> complete`.
///
/// A driver only reacts to wakeups carrying the exact timer or frame handle it is waiting on,
/// so anything that fires after a reset or a cancel falls through as a no-op.
#[derive(Debug)]
pub struct FrameDriver {
    owner: OwnerId,
    settings: DriverSettings,
    rng: Rng64,
    plan: ScramblePlan,
    state: DriverState,
    frame_text: String,
    generation: u64,
}

impl FrameDriver {
    pub fn new(owner: OwnerId, text: &str, settings: DriverSettings, mut rng: Rng64) -> Self {
        let plan = build_plan(text, settings.variant, &settings.pool, &mut rng);
        Self {
            owner,
            settings,
            rng,
            plan,
            state: DriverState::Idle,
            frame_text: String::new(),
            generation: 0,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn text(&self) -> &str {
        &self.plan.text
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    pub fn plan(&self) -> &ScramblePlan {
        &self.plan
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Bumped on every text change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_idle(&self) -> bool {
        self.state == DriverState::Idle
    }

    pub fn is_complete(&self) -> bool {
        self.state == DriverState::Complete
    }

    pub fn started_at(&self) -> Option<Millis> {
        match self.state {
            DriverState::Running { started_at, .. } => started_at,
            _ => None,
        }
    }

    /// Current visible text, or `None` while nothing has been revealed yet.
    pub fn output(&self) -> Option<&str> {
        match self.state {
            DriverState::Idle | DriverState::Waiting { .. } => None,
            DriverState::Running { .. } => Some(&self.frame_text),
            DriverState::Complete => Some(&self.plan.text),
        }
    }

    /// Swap the target text. Identical text is a no-op; anything else cancels pending work,
    /// rebuilds the plan and returns to `idle`.
    pub fn set_text(&mut self, text: &str, sched: &mut Scheduler) -> bool {
        if text == self.plan.text {
            return false;
        }
        self.cancel(sched);
        self.plan = build_plan(text, self.settings.variant, &self.settings.pool, &mut self.rng);
        self.state = DriverState::Idle;
        self.frame_text.clear();
        self.generation += 1;
        tracing::debug!(
            owner = self.owner.0,
            generation = self.generation,
            "reveal text changed"
        );
        true
    }

    /// Leave `idle`. Has no effect in any other state.
    pub fn start(&mut self, delay: Millis, sched: &mut Scheduler) -> Option<DriverEvent> {
        if self.state != DriverState::Idle {
            return None;
        }

        if self.settings.skip || self.plan.is_empty() {
            self.state = DriverState::Complete;
            return Some(DriverEvent::Completed);
        }

        let timer = sched.set_timeout(self.owner, delay);
        self.state = DriverState::Waiting { timer };
        tracing::trace!(owner = self.owner.0, %delay, "reveal waiting");
        None
    }

    pub fn wake(&mut self, wakeup: &Wakeup, sched: &mut Scheduler) -> Option<DriverEvent> {
        match (self.state, wakeup.kind) {
            (DriverState::Waiting { timer }, WakeKind::Timer(h)) if h == timer => {
                self.render_frame(Millis::ZERO);
                self.state = DriverState::Running {
                    started_at: None,
                    frame: sched.request_frame(self.owner),
                };
                tracing::trace!(owner = self.owner.0, "reveal running");
                Some(DriverEvent::Started)
            }
            (DriverState::Running { started_at, frame }, WakeKind::Frame(h)) if h == frame => {
                let start = started_at.unwrap_or(wakeup.at);
                let elapsed = wakeup.at.since(start);
                if elapsed >= self.plan.total {
                    self.state = DriverState::Complete;
                    self.frame_text.clear();
                    tracing::debug!(owner = self.owner.0, %elapsed, "reveal complete");
                    return Some(DriverEvent::Completed);
                }

                self.render_frame(elapsed);
                self.state = DriverState::Running {
                    started_at: Some(start),
                    frame: sched.request_frame(self.owner),
                };
                Some(DriverEvent::Advanced)
            }
            _ => {
                tracing::trace!(owner = self.owner.0, ?wakeup, "stale wakeup ignored");
                None
            }
        }
    }

    fn render_frame(&mut self, elapsed: Millis) {
        self.frame_text = self
            .plan
            .frame_at(elapsed, &self.settings.pool, &mut self.rng);
    }

    /// Drop any pending timer or frame request. A completed driver stays complete.
    pub fn cancel(&mut self, sched: &mut Scheduler) {
        match self.state {
            DriverState::Waiting { timer } => {
                sched.clear_timeout(timer);
                self.state = DriverState::Idle;
            }
            DriverState::Running { frame, .. } => {
                sched.cancel_frame(frame);
                self.frame_text.clear();
                self.state = DriverState::Idle;
            }
            DriverState::Idle | DriverState::Complete => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/frame.rs"]
mod tests;
