//! Tick divider / task fan-out.
//!
//! Every hardware tick enters here exactly once.  Each registered task
//! owns a counter; when the counter reaches the task's divider the
//! scheduler notifies the [`TaskDelegate`] and restarts the count.
//!
//! ```text
//!   tick ──▶ Scheduler ──┬─ every 10 ─▶ Tachometer
//!                        ├─ every  1 ─▶ Control
//!                        ├─ every  5 ─▶ LocalInterface
//!                        └─ every  1 ─▶ DeadlineTimer
//! ```
//!
//! Tasks run in registration order within a tick.

use crate::app::ports::{Task, TaskDelegate};
use crate::config::ControllerConfig;
use log::info;

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of registered tasks (stack-allocated).
const MAX_TASKS: usize = 4;

#[derive(Debug, Clone, Copy)]
struct TaskSlot {
    task: Task,
    every_ticks: u32,
    elapsed_ticks: u32,
}

/// The scheduler engine.
pub struct Scheduler {
    slots: heapless::Vec<TaskSlot, MAX_TASKS>,
    ticks: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Empty scheduler; see [`from_config`](Self::from_config) for the
    /// standard task set.
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
            ticks: 0,
        }
    }

    /// Standard task set, in run order.
    pub fn from_config(config: &ControllerConfig) -> Self {
        let mut sched = Self::new();
        // Four slots, four tasks: registration cannot fail.
        let _ = sched.add(Task::Tachometer, config.tachometer_every_ticks);
        let _ = sched.add(Task::Control, 1);
        let _ = sched.add(Task::LocalInterface, config.interface_every_ticks);
        let _ = sched.add(Task::DeadlineTimer, 1);
        sched
    }

    /// Register `task` to run every `every_ticks` ticks.  Returns the
    /// slot index, or `None` if the table is full.  A divider of 0 is
    /// treated as 1.
    pub fn add(&mut self, task: Task, every_ticks: u32) -> Option<usize> {
        let slot = TaskSlot {
            task,
            every_ticks: every_ticks.max(1),
            elapsed_ticks: 0,
        };
        self.slots.push(slot).ok()?;
        info!("Scheduler: {task:?} every {} tick(s)", slot.every_ticks);
        Some(self.slots.len() - 1)
    }

    /// Advance by one tick and run every task that is due.
    pub fn tick(&mut self, delegate: &mut dyn TaskDelegate) {
        self.ticks += 1;
        for slot in self.slots.iter_mut() {
            slot.elapsed_ticks += 1;
            if slot.elapsed_ticks >= slot.every_ticks {
                slot.elapsed_ticks = 0;
                delegate.run_task(slot.task);
            }
        }
    }

    /// Ticks seen since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn task_count(&self) -> usize {
        self.slots.len()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
