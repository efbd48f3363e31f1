//! Seams for the external collaborators
//!
//! The core never talks to a concrete GUI toolkit, timer dispatcher or I2C
//! bus; it consumes the three traits here. Timer callbacks carry no captured
//! state: the scheduler hands back a plain [`TimerEvent`] value and the host
//! dispatches it into the game with the platform context, so "which callback
//! was that" is data, not a closure.

pub mod harness;

use std::sync::atomic::{AtomicU32, Ordering};

use crate::sim::TiltSample;

/// What kind of scene entity to create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ball,
    Obstacle,
    Bonus,
    Label,
}

/// Opaque renderer entity id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u32);

/// Opaque scheduler timer id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// Whether a timer fires once or until cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

/// The timers the game registers. The scheduler returns these as values when
/// they come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 20 ms movement tick
    Movement,
    /// 1000 ms score accrual
    Score,
    /// 2000 ms obstacle spawn
    ObstacleSpawn,
    /// One-shot bonus respawn
    BonusRespawn,
    /// One-shot GameOver -> Menu delay
    ReturnToMenu,
}

/// Renderer primitives the core is allowed to use.
pub trait Scene {
    fn create(&mut self, kind: EntityKind, size: u32, color: u32) -> EntityHandle;
    fn set_position(&mut self, handle: EntityHandle, x: i32, y: i32);
    fn set_visible(&mut self, handle: EntityHandle, visible: bool);
    fn set_text(&mut self, handle: EntityHandle, text: &str);
    fn destroy(&mut self, handle: EntityHandle);
}

/// Cooperative periodic-callback dispatcher. No two callbacks run
/// concurrently; every tick runs to completion before the next fires.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, repeat: Repeat, event: TimerEvent) -> TimerHandle;
    /// Cancelling an unknown or already-fired handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Accelerometer sample source. Implementations return the last-known or
/// zero sample when the underlying transaction is incomplete; the core
/// tolerates a stale reading by flattening that tick's movement.
pub trait TiltSensor {
    fn read_tilt(&mut self) -> TiltSample;
}

/// Everything the game needs from the host, as one bound.
pub trait Platform: Scene + Scheduler + TiltSensor {}

impl<T: Scene + Scheduler + TiltSensor> Platform for T {}

/// An owned timer slot: at most one live handle, armed and released through
/// one discipline so a stale handle can never be cancelled twice.
#[derive(Debug, Default)]
pub struct TimerSlot(Option<TimerHandle>);

impl TimerSlot {
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Cancel any previous handle, then schedule. The slot therefore never
    /// holds two live timers.
    pub fn arm(
        &mut self,
        scheduler: &mut impl Scheduler,
        delay_ms: u32,
        repeat: Repeat,
        event: TimerEvent,
    ) {
        self.cancel(scheduler);
        self.0 = Some(scheduler.schedule(delay_ms, repeat, event));
    }

    /// Cancel and release the handle. No-op on an empty slot.
    pub fn cancel(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.0.take() {
            scheduler.cancel(handle);
        }
    }

    /// Release the handle without cancelling, for a one-shot that already
    /// fired (the dispatcher retired it).
    pub fn expire(&mut self) {
        self.0 = None;
    }

    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }
}

/// Lock-free latest-tilt-sample cell for handing samples from a sensor task
/// to the game task. Both axes pack into one word, so a reader always sees a
/// coherent pair; no lock, no torn 16-bit reads.
#[derive(Debug, Default)]
pub struct TiltSnapshot(AtomicU32);

impl TiltSnapshot {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn publish(&self, sample: TiltSample) {
        let word = ((sample.x as u16 as u32) << 16) | sample.y as u16 as u32;
        self.0.store(word, Ordering::Release);
    }

    pub fn latest(&self) -> TiltSample {
        let word = self.0.load(Ordering::Acquire);
        TiltSample {
            x: (word >> 16) as u16 as i16,
            y: word as u16 as i16,
        }
    }
}

impl TiltSensor for &TiltSnapshot {
    fn read_tilt(&mut self) -> TiltSample {
        self.latest()
    }
}
