//! Deferred task scheduling
//!
//! The controller never holds closures over itself. It schedules a [`TaskId`]
//! and the runtime hands that id back through `Controller::fire` once the
//! task is due. A cancelled id that still fires is ignored by the controller.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

pub trait Scheduler {
    /// Fire `id` once after `delay`.
    fn schedule_once(&mut self, id: TaskId, delay: Duration);

    /// Fire `id` every `interval` until cancelled.
    fn schedule_repeating(&mut self, id: TaskId, interval: Duration);

    /// Stop `id` from firing again. Unknown ids are ignored.
    fn cancel(&mut self, id: TaskId);
}
