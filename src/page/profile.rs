use std::{cell::Cell, rc::Rc};

use serde::Serialize;

use crate::{
    config::FolioConfig,
    driver::scheduler::{OwnerId, Scheduler, Wakeup},
    foundation::core::Millis,
    foundation::error::GlyphfolioResult,
    foundation::rng::Rng64,
    page::layout::{Layout, Piece, Region, build_layout},
    reveal::content::Inline,
    resume::model::ResumeData,
    reveal::component::{RevealComponent, RevealOutput, RevealProps},
    sequence::phase::{Phase, PhaseSequencer},
    sequence::staged::StagedBlock,
    theme::Theme,
};

const PHASE_OWNER: OwnerId = OwnerId(0);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotView {
    pub key: String,
    pub region: Region,
    /// `None` while the slot's block has not mounted yet.
    pub output: Option<RevealOutput>,
    /// The current frame put back into the slot's outermost styled span.
    pub content: Option<Inline>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockView {
    pub key: String,
    pub style: Phase,
    pub visible: bool,
}

/// Everything visible on the page at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub at: Millis,
    pub phase: Phase,
    pub interactive: bool,
    pub completed: usize,
    pub blocks: Vec<BlockView>,
    pub slots: Vec<SlotView>,
}

impl PageSnapshot {
    pub fn slot(&self, key: &str) -> Option<&SlotView> {
        self.slots.iter().find(|s| s.key == key)
    }

    pub fn block(&self, key: &str) -> Option<&BlockView> {
        self.blocks.iter().find(|b| b.key == key)
    }
}

#[derive(Debug)]
struct Slot {
    props: RevealProps,
    component: RevealComponent,
}

/// The whole animated profile, driven by its own virtual event loop.
///
/// Owner ids: `0` is the phase sequencer, then one per staged block, then one per slot.
#[derive(Debug)]
pub struct ProfilePage {
    layout: Layout,
    sched: Scheduler,
    phase: PhaseSequencer,
    blocks: Vec<StagedBlock>,
    slots: Vec<Slot>,
    completed: Rc<Cell<usize>>,
}

impl ProfilePage {
    /// Lay out `data` and mount everything at time zero.
    pub fn mount(data: &ResumeData, config: &FolioConfig, theme: Theme) -> GlyphfolioResult<Self> {
        config.validate()?;
        let skip = config.skip_animation;
        let settings = config.driver_settings()?;
        let layout = build_layout(data, &config.stagger(), &config.staged, theme);

        let mut sched = Scheduler::new(config.fps()?);
        let mut phase = PhaseSequencer::new(PHASE_OWNER, config.phase, skip);
        phase.mount(&mut sched);

        let block_base = 1u32;
        let mut blocks: Vec<StagedBlock> = layout
            .blocks
            .iter()
            .enumerate()
            .map(|(i, b)| StagedBlock::new(OwnerId(block_base + i as u32), b.style, b.delay, skip))
            .collect();
        for b in &mut blocks {
            b.mount(&mut sched);
        }

        let slot_base = block_base + blocks.len() as u32;
        let seed = config.base_seed();
        let completed = Rc::new(Cell::new(0usize));
        let slots = layout
            .slots
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let text = spec.text();
                let counter = Rc::clone(&completed);
                let component = RevealComponent::new(
                    OwnerId(slot_base + i as u32),
                    &text,
                    settings.clone(),
                    Rng64::for_key(seed, &spec.key),
                )
                .with_flash(Millis(config.reveal.flash_ms))
                .on_complete(move |_| counter.set(counter.get() + 1));
                Slot {
                    props: RevealProps::new(text)
                        .delay(spec.delay)
                        .bracket(spec.bracket)
                        .gate(false),
                    component,
                }
            })
            .collect();

        tracing::debug!(
            slots = layout.slots.len(),
            blocks = layout.blocks.len(),
            skip,
            "profile page mounted"
        );

        let mut page = Self {
            layout,
            sched,
            phase,
            blocks,
            slots,
            completed,
        };
        page.render_all();
        Ok(page)
    }

    pub fn now(&self) -> Millis {
        self.sched.now()
    }

    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.sched
    }

    /// Number of reveals that have finished.
    pub fn completed(&self) -> usize {
        self.completed.get()
    }

    /// Earliest instant anything is scheduled for.
    pub fn next_event_at(&mut self) -> Option<Millis> {
        self.sched.next_event_at()
    }

    /// Every block shown and every reveal finished in the interactive phase.
    pub fn is_settled(&self) -> bool {
        self.phase.interactive_phase_active()
            && self.blocks.iter().all(StagedBlock::is_visible)
            && self.slots.iter().all(|s| s.component.is_complete())
    }

    /// Run the event loop up to `t`, re-rendering after every dispatch. Returns the number of
    /// wakeups delivered.
    #[tracing::instrument(skip(self), fields(from = %self.sched.now()))]
    pub fn advance_to(&mut self, t: Millis) -> usize {
        let mut delivered = 0;
        while let Some(batch) = self.sched.step(t) {
            for w in &batch {
                self.dispatch(w);
            }
            delivered += batch.len();
            self.render_all();
        }
        tracing::trace!(delivered, now = %self.sched.now(), "advanced");
        delivered
    }

    /// Advance until settled, giving up at `limit`. Returns the instant the page settled.
    pub fn run_until_settled(&mut self, limit: Millis) -> Option<Millis> {
        while !self.is_settled() {
            let next = self.sched.next_event_at()?;
            if next > limit {
                self.advance_to(limit);
                return None;
            }
            self.advance_to(next);
        }
        Some(self.sched.now())
    }

    /// Cancel every pending timer and frame request.
    pub fn dispose(&mut self) {
        self.phase.dispose(&mut self.sched);
        for b in &mut self.blocks {
            b.dispose(&mut self.sched);
        }
        for s in &mut self.slots {
            s.component.dispose(&mut self.sched);
        }
    }

    fn dispatch(&mut self, w: &Wakeup) {
        let id = w.owner.0 as usize;
        if w.owner == PHASE_OWNER {
            self.phase.wake(w);
            return;
        }
        let block_end = 1 + self.blocks.len();
        if id < block_end {
            self.blocks[id - 1].wake(w);
            return;
        }
        match self.slots.get_mut(id - block_end) {
            Some(slot) => {
                slot.component.wake(w, &mut self.sched);
            }
            None => tracing::warn!(?w, "wakeup for unknown owner"),
        }
    }

    fn slot_mounted(&self, i: usize) -> bool {
        self.layout.slots[i]
            .block
            .is_none_or(|b| self.blocks[b].is_visible())
    }

    fn render_all(&mut self) {
        let gate = self.phase.text_phase_active();
        for i in 0..self.slots.len() {
            if !self.slot_mounted(i) {
                continue;
            }
            let slot = &mut self.slots[i];
            slot.props.gate = gate;
            slot.component.render(&slot.props, &mut self.sched);
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let now = self.sched.now();
        PageSnapshot {
            at: now,
            phase: self.phase.phase(),
            interactive: self.phase.interactive_phase_active(),
            completed: self.completed.get(),
            blocks: self
                .layout
                .blocks
                .iter()
                .zip(&self.blocks)
                .map(|(spec, b)| BlockView {
                    key: spec.key.clone(),
                    style: spec.style,
                    visible: b.is_visible(),
                })
                .collect(),
            slots: self
                .layout
                .slots
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    let output = self
                        .slot_mounted(i)
                        .then(|| self.slots[i].component.output(now));
                    SlotView {
                        key: spec.key.clone(),
                        region: spec.region,
                        content: output.as_ref().map(|o| spec.content.rewrap(&o.text)),
                        output,
                    }
                })
                .collect(),
        }
    }

    /// Plain-text rendering of the page. Hidden reveals keep their width as blanks.
    pub fn render_text(&self) -> String {
        let now = self.sched.now();
        let mut out = String::new();
        for line in &self.layout.lines {
            let mut parts = Vec::new();
            for item in &line.items {
                if item.block.is_some_and(|b| !self.blocks[b].is_visible()) {
                    continue;
                }
                let part = match &item.piece {
                    Piece::Text(t) => t.clone(),
                    Piece::Slot(i) => {
                        let o = self.slots[*i].component.output(now);
                        let shown = o.display_text();
                        if o.is_visible() {
                            shown
                        } else {
                            " ".repeat(shown.chars().count())
                        }
                    }
                };
                parts.push(part);
            }
            if parts.is_empty() {
                continue;
            }
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/profile.rs"]
mod tests;
