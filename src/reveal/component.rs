use std::fmt;

use serde::Serialize;

use crate::{
    driver::frame::{DriverEvent, DriverSettings, DriverState, FrameDriver},
    driver::scheduler::{OwnerId, Scheduler, Wakeup},
    foundation::core::Millis,
    foundation::rng::Rng64,
};

/// How long the start-of-animation flash hint lasts.
pub const DEFAULT_FLASH_MS: f64 = 400.0;

/// Inputs of a single render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealProps {
    pub text: String,
    /// Start delay, read when the gate opens. Later changes do not reschedule.
    pub delay: Millis,
    /// Nothing starts while this is false.
    pub gate: bool,
    pub bracket: bool,
}

impl RevealProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: Millis::ZERO,
            gate: true,
            bracket: false,
        }
    }

    pub fn delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    pub fn gate(mut self, gate: bool) -> Self {
        self.gate = gate;
        self
    }

    pub fn bracket(mut self, bracket: bool) -> Self {
        self.bracket = bracket;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Laid out at full size but not painted.
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealStatus {
    Idle,
    Waiting,
    Running,
    Complete,
}

impl From<DriverState> for RevealStatus {
    fn from(s: DriverState) -> Self {
        match s {
            DriverState::Idle => Self::Idle,
            DriverState::Waiting { .. } => Self::Waiting,
            DriverState::Running { .. } => Self::Running,
            DriverState::Complete => Self::Complete,
        }
    }
}

/// What a reveal shows right now.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealOutput {
    pub text: String,
    pub visibility: Visibility,
    pub bracket: bool,
    pub status: RevealStatus,
    pub flash: bool,
}

impl RevealOutput {
    /// `text` with the static delimiters applied.
    pub fn display_text(&self) -> String {
        if self.bracket {
            format!("[{}]", self.text)
        } else {
            self.text.clone()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

type CompleteFn = Box<dyn FnMut(&str)>;

/// A labelled piece of text that decodes itself once its gate opens.
///
/// Rendering is idempotent: the same props render to the same output and never register a
/// second timer. A text change starts over from scratch.
pub struct RevealComponent {
    driver: FrameDriver,
    bracket: bool,
    flash: Millis,
    running_since: Option<Millis>,
    notified: Option<u64>,
    on_complete: Option<CompleteFn>,
}

impl fmt::Debug for RevealComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealComponent")
            .field("driver", &self.driver)
            .field("bracket", &self.bracket)
            .field("running_since", &self.running_since)
            .field("notified", &self.notified)
            .finish_non_exhaustive()
    }
}

impl RevealComponent {
    pub fn new(owner: OwnerId, text: &str, settings: DriverSettings, rng: Rng64) -> Self {
        Self {
            driver: FrameDriver::new(owner, text, settings, rng),
            bracket: false,
            flash: Millis(DEFAULT_FLASH_MS),
            running_since: None,
            notified: None,
            on_complete: None,
        }
    }

    pub fn with_flash(mut self, flash: Millis) -> Self {
        self.flash = flash;
        self
    }

    /// Called with the final text each time a text value finishes revealing.
    pub fn on_complete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.driver.owner()
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn is_complete(&self) -> bool {
        self.driver.is_complete()
    }

    /// Reconcile with `props` and return the current view.
    pub fn render(&mut self, props: &RevealProps, sched: &mut Scheduler) -> RevealOutput {
        self.bracket = props.bracket;
        if self.driver.set_text(&props.text, sched) {
            self.running_since = None;
        }

        if self.driver.is_idle() && (props.gate || self.skips()) {
            let ev = self.driver.start(props.delay, sched);
            self.handle(ev, sched.now());
        }

        self.output(sched.now())
    }

    /// Forward a wakeup. Returns true when the visible output changed.
    pub fn wake(&mut self, wakeup: &Wakeup, sched: &mut Scheduler) -> bool {
        let ev = self.driver.wake(wakeup, sched);
        self.handle(ev, wakeup.at)
    }

    /// Cancel pending work. Completed text stays complete.
    pub fn dispose(&mut self, sched: &mut Scheduler) {
        self.driver.cancel(sched);
        if !self.driver.is_complete() {
            self.running_since = None;
        }
    }

    pub fn output(&self, now: Millis) -> RevealOutput {
        let status = RevealStatus::from(self.driver.state());
        let (text, visibility) = match self.driver.output() {
            Some(frame) => (frame.to_string(), Visibility::Visible),
            None => (self.driver.text().to_string(), Visibility::Hidden),
        };
        let flash = self
            .running_since
            .is_some_and(|since| now.since(since) < self.flash);

        RevealOutput {
            text,
            visibility,
            bracket: self.bracket,
            status,
            flash,
        }
    }

    fn skips(&self) -> bool {
        self.driver.settings().skip
    }

    fn handle(&mut self, ev: Option<DriverEvent>, at: Millis) -> bool {
        match ev {
            None => false,
            Some(DriverEvent::Started) => {
                self.running_since = Some(at);
                true
            }
            Some(DriverEvent::Advanced) => true,
            Some(DriverEvent::Completed) => {
                self.notify_complete();
                true
            }
        }
    }

    fn notify_complete(&mut self) {
        let generation = self.driver.generation();
        if self.notified == Some(generation) {
            return;
        }
        self.notified = Some(generation);
        if let Some(f) = self.on_complete.as_mut() {
            f(self.driver.text());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/component.rs"]
mod tests;
