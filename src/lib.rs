#![forbid(unsafe_code)]
//! Text decode/reveal animation engine for an animated resume page.
//!
//! A [`ScramblePlan`] freezes per-character timing for one string, a [`FrameDriver`] walks it
//! frame by frame on a deterministic [`Scheduler`], and [`RevealComponent`]s wrap drivers with
//! gating, visibility and completion. The [`ProfilePage`] wires many reveals to a
//! [`PhaseSequencer`] and [`Stagger`] delays computed from [`ResumeData`].

pub mod config;
pub mod driver;
pub mod foundation;
pub mod page;
pub mod resume;
pub mod reveal;
pub mod scramble;
pub mod sequence;
pub mod theme;

pub use config::FolioConfig;
pub use driver::clock::{Clock, ManualClock, MonotonicClock};
pub use driver::frame::{DriverEvent, DriverSettings, DriverState, FrameDriver};
pub use driver::scheduler::{OwnerId, Scheduler, Wakeup};
pub use foundation::core::{Fps, Millis};
pub use foundation::error::{GlyphfolioError, GlyphfolioResult};
pub use foundation::rng::Rng64;
pub use page::profile::{PageSnapshot, ProfilePage};
pub use resume::loader::{LoadedResume, ResumeLoader, ResumeOrigin};
pub use resume::model::ResumeData;
pub use reveal::component::{RevealComponent, RevealOutput, RevealProps, Visibility};
pub use reveal::content::Inline;
pub use scramble::plan::{BLANK, CharacterState, ScramblePlan, TimingVariant, build_plan};
pub use scramble::pool::{PoolChoice, ScramblePool};
pub use sequence::phase::{Phase, PhaseSequencer, PhaseTimings};
pub use sequence::stagger::{Stagger, StaggerBases};
pub use theme::{Theme, ThemeController};
