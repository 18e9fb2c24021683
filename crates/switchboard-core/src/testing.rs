//! In-memory window host and virtual-clock scheduler for controller tests

use std::collections::HashMap;
use std::time::Duration;

use switchboard_registry::AccountRegistry;

use crate::channel::ControlEvent;
use crate::config::Config;
use crate::error::CoreError;
use crate::factory::SessionWindowSpec;
use crate::geometry::{Position, Rect, Size};
use crate::lifecycle::Controller;
use crate::menu::MenuModel;
use crate::scheduler::{Scheduler, TaskId};
use crate::window::{WindowHost, WindowId, WindowKind, WindowRequest};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    Open(WindowKind, WindowId),
    OpenSession(String),
    Close(WindowId),
}

/// Records every call and tracks which windows are alive.
pub struct RecordingHost {
    pub ops: Vec<HostOp>,
    pub requests: Vec<WindowRequest>,
    pub sessions: Vec<SessionWindowSpec>,
    pub live: HashMap<WindowId, WindowKind>,
    pub titles: HashMap<WindowId, String>,
    pub title_writes: usize,
    pub focused: Vec<WindowId>,
    pub bounds: Vec<(WindowId, Position, Size)>,
    pub menus: Vec<MenuModel>,
    pub events: Vec<ControlEvent>,
    pub work_area: Option<Rect>,
    pub fail_sessions: bool,
    next_id: u64,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            requests: Vec::new(),
            sessions: Vec::new(),
            live: HashMap::new(),
            titles: HashMap::new(),
            title_writes: 0,
            focused: Vec::new(),
            bounds: Vec::new(),
            menus: Vec::new(),
            events: Vec::new(),
            work_area: Some(Rect::new(0.0, 25.0, 1440.0, 875.0)),
            fail_sessions: false,
            next_id: 0,
        }
    }
}

impl RecordingHost {
    fn next_label(&mut self, kind: WindowKind) -> WindowId {
        self.next_id += 1;
        WindowId::new(format!("{kind}-{}", self.next_id))
    }

    pub fn live_count(&self, kind: WindowKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    pub fn assert_single_per_kind(&self) {
        for kind in [WindowKind::Selection, WindowKind::Loading, WindowKind::Main] {
            assert!(
                self.live_count(kind) <= 1,
                "{} live {kind} windows",
                self.live_count(kind)
            );
        }
    }

    pub fn opened_requests(&self) -> &[WindowRequest] {
        &self.requests
    }

    pub fn title_of(&self, id: &WindowId) -> Option<&str> {
        self.titles.get(id).map(String::as_str)
    }

    /// The user closes a window; no notification reaches the controller.
    pub fn user_close(&mut self, id: &WindowId) {
        self.live.remove(id);
    }

    /// Page content renames its window.
    pub fn page_set_title(&mut self, id: &WindowId, title: &str) {
        self.titles.insert(id.clone(), title.to_string());
    }
}

impl WindowHost for RecordingHost {
    fn open(&mut self, request: &WindowRequest) -> Result<WindowId> {
        let id = self.next_label(request.kind);
        self.live.insert(id.clone(), request.kind);
        self.requests.push(request.clone());
        self.ops.push(HostOp::Open(request.kind, id.clone()));
        Ok(id)
    }

    fn open_session(&mut self, spec: &SessionWindowSpec) -> Result<WindowId> {
        if self.fail_sessions {
            return Err(CoreError::Host("webview creation failed".to_string()));
        }
        let id = self.next_label(WindowKind::Main);
        self.live.insert(id.clone(), WindowKind::Main);
        self.sessions.push(spec.clone());
        self.ops.push(HostOp::OpenSession(spec.account.clone()));
        Ok(id)
    }

    fn close(&mut self, id: &WindowId) {
        self.live.remove(id);
        self.ops.push(HostOp::Close(id.clone()));
    }

    fn focus(&mut self, id: &WindowId) {
        self.focused.push(id.clone());
    }

    fn is_alive(&self, id: &WindowId) -> bool {
        self.live.contains_key(id)
    }

    fn set_title(&mut self, id: &WindowId, title: &str) {
        self.title_writes += 1;
        self.titles.insert(id.clone(), title.to_string());
    }

    fn set_bounds(&mut self, id: &WindowId, position: Position, size: Size) {
        self.bounds.push((id.clone(), position, size));
    }

    fn primary_work_area(&self) -> Option<Rect> {
        self.work_area
    }

    fn install_menu(&mut self, menu: &MenuModel) {
        self.menus.push(menu.clone());
    }

    fn emit(&mut self, event: &ControlEvent) {
        self.events.push(event.clone());
    }
}

struct Scheduled {
    due: u64,
    seq: u64,
    id: TaskId,
    interval: Option<u64>,
}

/// Virtual clock in milliseconds.
#[derive(Default)]
pub struct ManualScheduler {
    pub now: u64,
    queue: Vec<Scheduled>,
    seq: u64,
}

impl ManualScheduler {
    fn push(&mut self, id: TaskId, due: u64, interval: Option<u64>) {
        self.seq += 1;
        self.queue.push(Scheduled {
            due,
            seq: self.seq,
            id,
            interval,
        });
    }

    /// Pop the earliest task due at or before `until`, advancing the clock.
    pub fn pop_due(&mut self, until: u64) -> Option<TaskId> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(index, _)| index)?;

        let task = self.queue.remove(index);
        self.now = task.due;
        if let Some(interval) = task.interval {
            self.push(task.id, task.due + interval, Some(interval));
        }
        Some(task.id)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

fn millis(duration: Duration) -> u64 {
    (duration.as_millis() as u64).max(1)
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, id: TaskId, delay: Duration) {
        let due = self.now + delay.as_millis() as u64;
        self.push(id, due, None);
    }

    fn schedule_repeating(&mut self, id: TaskId, interval: Duration) {
        let interval = millis(interval);
        self.push(id, self.now + interval, Some(interval));
    }

    fn cancel(&mut self, id: TaskId) {
        self.queue.retain(|task| task.id != id);
    }
}

pub type TestController = Controller<RecordingHost, ManualScheduler>;

pub struct Harness {
    pub controller: TestController,
    pub _dir: tempfile::TempDir,
}

/// Controller over a fresh registry holding exactly `accounts`.
pub fn harness(accounts: &[&str]) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().to_path_buf());

    let entries: Vec<String> = accounts
        .iter()
        .map(|name| format!("{:?}: \"persist:{name}\"", name))
        .collect();
    std::fs::write(&config.registry_path, format!("{{{}}}", entries.join(", "))).unwrap();

    let registry = AccountRegistry::load(&config.registry_path);
    assert_eq!(registry.names(), accounts);

    let controller = Controller::new(
        config,
        registry,
        RecordingHost::default(),
        ManualScheduler::default(),
    )
    .unwrap();

    Harness {
        controller,
        _dir: dir,
    }
}

/// Advance the virtual clock by `ms`, firing every task that comes due.
pub fn run_for(controller: &mut TestController, ms: u64) {
    let until = controller.scheduler_mut().now + ms;
    while let Some(id) = controller.scheduler_mut().pop_due(until) {
        controller.fire(id);
    }
    controller.scheduler_mut().now = until;
}
