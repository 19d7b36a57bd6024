use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use crate::foundation::core::{Fps, Millis};

/// Identifies whoever registered a timer or frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeKind {
    Timer(TimerHandle),
    Frame(FrameHandle),
}

/// A fired timer or served frame request, routed back to its owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wakeup {
    pub owner: OwnerId,
    pub kind: WakeKind,
    pub at: Millis,
}

/// Registration counters, mostly useful to assert on in tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub timers_set: u64,
    pub timers_cleared: u64,
    pub timers_fired: u64,
    pub frames_requested: u64,
    pub frames_cancelled: u64,
    pub frames_served: u64,
}

#[derive(Debug)]
struct TimerEntry {
    due: Millis,
    seq: u64,
    owner: OwnerId,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Single-threaded virtual event loop: one-shot timers plus per-refresh frame callbacks.
///
/// Determinism rules:
/// - timers fire in due order, ties broken by registration order;
/// - frame requests are served together on the first refresh tick at or after `now`;
/// - when a timer and a tick fall on the same instant, the timer goes first;
/// - requests made while a tick is being served wait for the following tick.
#[derive(Debug)]
pub struct Scheduler {
    now: Millis,
    interval: Millis,
    next_seq: u64,
    timers: BinaryHeap<Reverse<TimerEntry>>,
    live_timers: HashSet<u64>,
    frames: Vec<(FrameHandle, OwnerId)>,
    last_tick: Option<Millis>,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new(fps: Fps) -> Self {
        Self::starting_at(fps, Millis::ZERO)
    }

    pub fn starting_at(fps: Fps, now: Millis) -> Self {
        Self {
            now,
            interval: fps.frame_interval(),
            next_seq: 0,
            timers: BinaryHeap::new(),
            live_timers: HashSet::new(),
            frames: Vec::new(),
            last_tick: None,
            stats: SchedulerStats::default(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn frame_interval(&self) -> Millis {
        self.interval
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn pending_timers(&self) -> usize {
        self.live_timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_idle(&self) -> bool {
        self.live_timers.is_empty() && self.frames.is_empty()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_seq;
        self.next_seq += 1;
        id
    }

    /// One-shot timer due `delay` from now. Negative delays fire as soon as possible.
    pub fn set_timeout(&mut self, owner: OwnerId, delay: Millis) -> TimerHandle {
        let seq = self.next_id();
        let due = self.now + delay.max(Millis::ZERO);
        self.timers.push(Reverse(TimerEntry { due, seq, owner }));
        self.live_timers.insert(seq);
        self.stats.timers_set += 1;
        TimerHandle(seq)
    }

    /// Returns false when the timer already fired or was cleared.
    pub fn clear_timeout(&mut self, handle: TimerHandle) -> bool {
        let removed = self.live_timers.remove(&handle.0);
        if removed {
            self.stats.timers_cleared += 1;
        }
        removed
    }

    pub fn request_frame(&mut self, owner: OwnerId) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push((handle, owner));
        self.stats.frames_requested += 1;
        handle
    }

    /// Returns false when the request was already served or cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(h, _)| *h != handle);
        let removed = self.frames.len() != before;
        if removed {
            self.stats.frames_cancelled += 1;
        }
        removed
    }

    fn next_tick(&self) -> Millis {
        let i = self.interval.0;
        let mut tick = Millis((self.now.0 / i).ceil() * i);
        if tick < self.now {
            tick = tick + self.interval;
        }
        if let Some(last) = self.last_tick
            && tick <= last
        {
            tick = last + self.interval;
        }
        tick
    }

    fn peek_timer(&mut self) -> Option<Millis> {
        while let Some(Reverse(top)) = self.timers.peek() {
            if self.live_timers.contains(&top.seq) {
                return Some(top.due);
            }
            self.timers.pop();
        }
        None
    }

    /// Earliest instant something is scheduled for.
    pub fn next_event_at(&mut self) -> Option<Millis> {
        let timer = self.peek_timer();
        let frame = (!self.frames.is_empty()).then(|| self.next_tick());
        match (timer, frame) {
            (Some(t), Some(f)) => Some(t.min(f)),
            (t, f) => t.or(f),
        }
    }

    /// Advance to the next event at or before `until` and return its wakeups.
    ///
    /// Returns `None` (after moving `now` to `until`) once nothing else is due in the window.
    pub fn step(&mut self, until: Millis) -> Option<Vec<Wakeup>> {
        let timer = self.peek_timer().filter(|t| *t <= until);
        let frame = (!self.frames.is_empty())
            .then(|| self.next_tick())
            .filter(|f| *f <= until);

        let fire_timer = match (timer, frame) {
            (Some(t), Some(f)) => t <= f,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => {
                self.now = self.now.max(until);
                return None;
            }
        };

        if fire_timer {
            let Reverse(entry) = self.timers.pop()?;
            self.live_timers.remove(&entry.seq);
            self.now = self.now.max(entry.due);
            self.stats.timers_fired += 1;
            return Some(vec![Wakeup {
                owner: entry.owner,
                kind: WakeKind::Timer(TimerHandle(entry.seq)),
                at: self.now,
            }]);
        }

        let tick = frame?;
        self.now = tick;
        self.last_tick = Some(tick);
        let served = std::mem::take(&mut self.frames);
        self.stats.frames_served += served.len() as u64;
        Some(
            served
                .into_iter()
                .map(|(h, owner)| Wakeup {
                    owner,
                    kind: WakeKind::Frame(h),
                    at: tick,
                })
                .collect(),
        )
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Fps::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/scheduler.rs"]
mod tests;
