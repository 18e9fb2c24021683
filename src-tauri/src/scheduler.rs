//! Tokio-backed scheduler
//!
//! Timers run on the async runtime; when one is due, the task id is handed
//! back to the controller on the main thread.

use std::collections::HashMap;
use std::time::Duration;
use tauri::async_runtime::{self, JoinHandle};
use tauri::{AppHandle, Manager};
use tokio::time::MissedTickBehavior;

use switchboard_core::{Scheduler, TaskId};

use crate::state::ShellState;

pub struct TauriScheduler {
    app: AppHandle,
    tasks: HashMap<TaskId, JoinHandle<()>>,
}

impl TauriScheduler {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            tasks: HashMap::new(),
        }
    }

    fn track(&mut self, id: TaskId, handle: JoinHandle<()>) {
        self.tasks.retain(|_, task| !task.inner().is_finished());
        if let Some(previous) = self.tasks.insert(id, handle) {
            previous.abort();
        }
    }
}

fn fire_on_main_thread(app: &AppHandle, id: TaskId) {
    let handle = app.clone();
    let result = app.run_on_main_thread(move || {
        if let Some(state) = handle.try_state::<ShellState>() {
            state.with_controller(|controller| controller.fire(id));
        }
    });
    if let Err(e) = result {
        tracing::warn!(task = %id, error = %e, "Failed to dispatch task");
    }
}

impl Scheduler for TauriScheduler {
    fn schedule_once(&mut self, id: TaskId, delay: Duration) {
        let app = self.app.clone();
        let handle = async_runtime::spawn(async move {
            tokio::time::sleep(delay).await;
            fire_on_main_thread(&app, id);
        });
        self.track(id, handle);
    }

    fn schedule_repeating(&mut self, id: TaskId, interval: Duration) {
        let app = self.app.clone();
        let handle = async_runtime::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                fire_on_main_thread(&app, id);
            }
        });
        self.track(id, handle);
    }

    fn cancel(&mut self, id: TaskId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
        }
    }
}
