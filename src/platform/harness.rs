//! Headless deterministic platform
//!
//! One struct implements all three seams: a timer wheel ordered by
//! (due time, insertion order), a recording scene that remembers every
//! entity's last position/visibility/text, and a scripted tilt source. The
//! demo binary drives a whole session through it; the scenario tests assert
//! against its records.

use std::collections::HashMap;

use super::{
    EntityHandle, EntityKind, Repeat, Scene, Scheduler, TiltSensor, TimerEvent, TimerHandle,
};
use crate::sim::TiltSample;

/// Last-known state of one scene entity.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub size: u32,
    pub color: u32,
    pub pos: (i32, i32),
    pub visible: bool,
    pub text: String,
}

#[derive(Debug)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: u64,
    seq: u64,
    repeat: Repeat,
    period_ms: u32,
    event: TimerEvent,
}

/// Deterministic in-memory host.
#[derive(Debug, Default)]
pub struct Harness {
    now_ms: u64,
    seq: u64,
    next_timer: u32,
    timers: Vec<PendingTimer>,
    next_entity: u32,
    entities: HashMap<EntityHandle, EntityRecord>,
    tilt: TiltSample,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move the simulated clock forward. Due timers are delivered through
    /// [`Harness::pop_due`], one at a time, so the caller can dispatch each
    /// into the game before the next fires.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Script the sample the sensor seam will return.
    pub fn set_tilt(&mut self, sample: TiltSample) {
        self.tilt = sample;
    }

    /// Earliest due timer event, if any. Repeating timers re-arm themselves
    /// with the same handle; one-shots are retired.
    pub fn pop_due(&mut self) -> Option<TimerEvent> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= self.now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        match self.timers[idx].repeat {
            Repeat::Once => {
                let timer = self.timers.swap_remove(idx);
                Some(timer.event)
            }
            Repeat::Forever => {
                let timer = &mut self.timers[idx];
                timer.due_ms += timer.period_ms as u64;
                timer.seq = self.seq;
                self.seq += 1;
                Some(timer.event)
            }
        }
    }

    /// Pending timers as (event, due time) pairs, for assertions.
    pub fn pending(&self) -> Vec<(TimerEvent, u64)> {
        self.timers.iter().map(|t| (t.event, t.due_ms)).collect()
    }

    pub fn pending_count(&self, event: TimerEvent) -> usize {
        self.timers.iter().filter(|t| t.event == event).count()
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&EntityRecord> {
        self.entities.get(&handle)
    }

    /// Texts of all visible labels, for HUD assertions.
    pub fn visible_label_texts(&self) -> Vec<&str> {
        self.entities
            .values()
            .filter(|e| e.kind == EntityKind::Label && e.visible)
            .map(|e| e.text.as_str())
            .collect()
    }
}

impl Scene for Harness {
    fn create(&mut self, kind: EntityKind, size: u32, color: u32) -> EntityHandle {
        let handle = EntityHandle(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(
            handle,
            EntityRecord {
                kind,
                size,
                color,
                pos: (0, 0),
                visible: true,
                text: String::new(),
            },
        );
        handle
    }

    fn set_position(&mut self, handle: EntityHandle, x: i32, y: i32) {
        match self.entities.get_mut(&handle) {
            Some(e) => e.pos = (x, y),
            None => log::warn!("set_position on unknown entity {handle:?}"),
        }
    }

    fn set_visible(&mut self, handle: EntityHandle, visible: bool) {
        match self.entities.get_mut(&handle) {
            Some(e) => e.visible = visible,
            None => log::warn!("set_visible on unknown entity {handle:?}"),
        }
    }

    fn set_text(&mut self, handle: EntityHandle, text: &str) {
        match self.entities.get_mut(&handle) {
            Some(e) => {
                e.text.clear();
                e.text.push_str(text);
            }
            None => log::warn!("set_text on unknown entity {handle:?}"),
        }
    }

    fn destroy(&mut self, handle: EntityHandle) {
        if self.entities.remove(&handle).is_none() {
            log::warn!("destroy on unknown entity {handle:?}");
        }
    }
}

impl Scheduler for Harness {
    fn schedule(&mut self, delay_ms: u32, repeat: Repeat, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.timers.push(PendingTimer {
            handle,
            due_ms: self.now_ms + delay_ms as u64,
            seq: self.seq,
            repeat,
            period_ms: delay_ms,
            event,
        });
        self.seq += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}

impl TiltSensor for Harness {
    fn read_tilt(&mut self) -> TiltSample {
        self.tilt
    }
}
