//! Owned, cancellable tick timer for the game loop
//!
//! A [`TickSchedule`] runs at most one timer task at a time. Each arming gets
//! a fresh generation number and the task tags every tick with it, so a tick
//! that was already queued when the timer was re-armed or cancelled is
//! dropped instead of advancing the game a second time.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::direction::Direction;
use super::state::Position;

/// Everything the tick timer depends on. The timer is re-armed whenever any
/// of it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleKey {
    /// Tick period, or `None` when the board must not advance
    pub period: Option<Duration>,
    pub direction: Direction,
    pub food: Position,
    pub game_over: bool,
    pub tutorial_done: bool,
}

pub struct TickSchedule {
    tx: mpsc::UnboundedSender<u64>,
    rx: mpsc::UnboundedReceiver<u64>,
    task: Option<JoinHandle<()>>,
    generation: u64,
    last_key: Option<ScheduleKey>,
}

impl TickSchedule {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            task: None,
            generation: 0,
            last_key: None,
        }
    }

    /// Re-arm or cancel the timer if `key` differs from the last one seen.
    /// Returns true when the timer was touched.
    pub fn sync(&mut self, key: ScheduleKey) -> bool {
        if self.last_key == Some(key) {
            return false;
        }
        self.last_key = Some(key);

        match key.period {
            Some(period) => self.arm(period),
            None => self.cancel(),
        }
        true
    }

    /// Start ticking every `period`, first tick one period from now.
    /// Any previous timer is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, period: Duration) {
        self.stop_task();
        self.generation += 1;

        let generation = self.generation;
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(generation).is_err() {
                    break;
                }
            }
        }));
        log::trace!("tick timer armed at {:?} (generation {})", period, generation);
    }

    /// Stop ticking. Ticks already queued are discarded.
    pub fn cancel(&mut self) {
        if self.task.is_some() {
            log::trace!("tick timer cancelled (generation {})", self.generation);
        }
        self.stop_task();
        self.generation += 1;
    }

    /// Cancel and forget the last key, so the next `sync` always re-arms
    pub fn reset(&mut self) {
        self.cancel();
        self.last_key = None;
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the next tick of the current arming.
    ///
    /// Never resolves while the timer is cancelled. Safe to use as a
    /// `tokio::select!` branch.
    pub async fn tick(&mut self) {
        loop {
            match self.rx.recv().await {
                Some(generation) if generation == self.generation && self.task.is_some() => {
                    return;
                }
                Some(_) => continue,
                None => std::future::pending::<()>().await,
            }
        }
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TickSchedule {
    fn drop(&mut self) {
        self.stop_task();
    }
}
