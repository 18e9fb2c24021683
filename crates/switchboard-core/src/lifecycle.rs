//! Window Lifecycle Controller
//!
//! ```text
//! NoWindow ──ready/activate──▶ Selecting
//!    ▲                            │ select/switch
//!    │ main closed /              ▼
//!    │ creation failed        Switching ──deferred open──▶ Active
//!    │                            ▲                          │
//!    └────────────────────────────┴──────── switch ──────────┘
//! ```
//!
//! The controller exclusively owns the selection, loading and main window
//! slots. At most one window of each kind is referenced at a time, and a slot
//! is always cleared before its window is replaced.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use switchboard_registry::AccountRegistry;

use crate::channel::ControlEvent;
use crate::config::Config;
use crate::factory::SessionWindowFactory;
use crate::geometry::{Position, Size};
use crate::menu::{build_menu, MenuCommand};
use crate::scheduler::{Scheduler, TaskId};
use crate::window::{WindowHost, WindowId, WindowKind, WindowRequest};
use crate::Result;

const SELECTION_PAGE: &str = "selection.html";
const LOADING_PAGE: &str = "loading.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    NoWindow,
    Selecting,
    /// Loading window up, next main window pending
    Switching,
    Active,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::NoWindow => "no-window",
            LifecycleState::Selecting => "selecting",
            LifecycleState::Switching => "switching",
            LifecycleState::Active => "active",
        };
        f.write_str(name)
    }
}

/// Whether closing the last window should end the process on `os`
/// (a `std::env::consts::OS` value). macOS apps stay alive in the dock.
pub fn exits_when_all_windows_closed(os: &str) -> bool {
    os != "macos"
}

/// Work a scheduled task performs when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    OpenMain { account: String },
    PinTitle { window: WindowId },
}

#[derive(Debug)]
struct MainWindow {
    id: WindowId,
    account: String,
    title: String,
    title_timer: TaskId,
}

pub struct Controller<H: WindowHost, S: Scheduler> {
    config: Config,
    registry: AccountRegistry,
    factory: SessionWindowFactory,
    host: H,
    scheduler: S,
    selection: Option<WindowId>,
    loading: Option<WindowId>,
    main: Option<MainWindow>,
    /// Live main windows; never more than one
    active: HashSet<WindowId>,
    /// Deferred main-window creation, if one is waiting
    pending_switch: Option<TaskId>,
    tasks: HashMap<TaskId, Task>,
    next_task: u64,
}

impl<H: WindowHost, S: Scheduler> Controller<H, S> {
    pub fn new(config: Config, registry: AccountRegistry, host: H, scheduler: S) -> Result<Self> {
        let factory = SessionWindowFactory::from_config(&config)?;

        Ok(Self {
            config,
            registry,
            factory,
            host,
            scheduler,
            selection: None,
            loading: None,
            main: None,
            active: HashSet::new(),
            pending_switch: None,
            tasks: HashMap::new(),
            next_task: 0,
        })
    }

    /// Current state, derived from the owned window slots.
    pub fn state(&self) -> LifecycleState {
        if self.pending_switch.is_some() {
            LifecycleState::Switching
        } else if self.main.is_some() {
            LifecycleState::Active
        } else if self.selection.is_some() {
            LifecycleState::Selecting
        } else {
            LifecycleState::NoWindow
        }
    }

    // ---------------------------------------------------------------------
    // Platform signals
    // ---------------------------------------------------------------------

    /// Application finished launching.
    pub fn on_ready(&mut self) {
        tracing::info!("Application ready");
        self.show_selection();
    }

    /// Application re-activated (dock click and similar).
    pub fn on_activate(&mut self, has_visible_windows: bool) {
        if has_visible_windows || self.state() != LifecycleState::NoWindow {
            return;
        }
        tracing::debug!("Activated with no windows, showing selection");
        self.show_selection();
    }

    /// The toolkit reports that a window is gone.
    ///
    /// Windows the controller closed itself were already released, so their
    /// notifications fall through as no-ops.
    pub fn on_window_destroyed(&mut self, id: &WindowId) {
        if self.main.as_ref().is_some_and(|main| &main.id == id) {
            tracing::info!(window = %id, "Main window closed");
            self.release_main();
        } else if self.selection.as_ref() == Some(id) {
            tracing::debug!(window = %id, "Selection window closed");
            self.selection = None;
        } else if self.loading.as_ref() == Some(id) {
            tracing::debug!(window = %id, "Loading window closed");
            self.loading = None;
        } else {
            tracing::debug!(window = %id, "Ignoring close of released window");
        }
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    /// Show the selection window, focusing it if it already exists.
    pub fn show_selection(&mut self) {
        if let Some(id) = self.selection.clone() {
            if self.host.is_alive(&id) {
                self.host.focus(&id);
                return;
            }
            self.selection = None;
        }

        let size = self.config.selection_size;
        let request = WindowRequest {
            kind: WindowKind::Selection,
            page: SELECTION_PAGE,
            title: self.config.app_title.clone(),
            size,
            position: self.centered(size),
            resizable: false,
        };

        match self.host.open(&request) {
            Ok(id) => {
                tracing::info!(window = %id, "Opened selection window");
                self.selection = Some(id);
            }
            Err(e) => tracing::error!(error = %e, "Failed to open selection window"),
        }
    }

    /// Leave the current account and go back to the selection window.
    pub fn return_to_selection(&mut self) {
        self.cancel_pending_switch();
        self.close_loading();
        self.close_main();
        self.show_selection();
    }

    /// Selection-window pick. Same sequence as [`Self::switch_account`].
    pub fn select_account(&mut self, account: &str) {
        self.switch_account(account);
    }

    /// Tear down whatever is showing and open `account` after the loading delay.
    ///
    /// A newer request cancels a pending one, so the last request wins.
    pub fn switch_account(&mut self, account: &str) {
        let account = account.trim();
        tracing::info!(account = %account, "Switching account");

        self.cancel_pending_switch();
        self.close_main();
        self.close_selection();

        // Always a fresh loading window
        self.close_loading();
        let size = self.config.loading_size;
        let request = WindowRequest {
            kind: WindowKind::Loading,
            page: LOADING_PAGE,
            title: self.config.app_title.clone(),
            size,
            position: self.centered(size),
            resizable: false,
        };
        match self.host.open(&request) {
            Ok(id) => self.loading = Some(id),
            Err(e) => tracing::warn!(error = %e, "Failed to open loading window"),
        }

        let task = self.add_task(Task::OpenMain {
            account: account.to_string(),
        });
        self.scheduler.schedule_once(task, self.config.loading_delay);
        self.pending_switch = Some(task);
    }

    pub fn handle_menu(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::ReturnToSelection => self.return_to_selection(),
            MenuCommand::SwitchAccount(account) => self.switch_account(&account),
        }
    }

    /// Resize and re-center the selection window. No-op without one.
    pub fn adjust_window_size(&mut self, width: f64, height: f64) {
        let Some(id) = self.selection.clone() else {
            tracing::debug!("No selection window to resize");
            return;
        };
        if !self.host.is_alive(&id) {
            self.selection = None;
            return;
        }

        let size = Size::new(width, height);
        let position = self
            .centered(size)
            .unwrap_or_else(|| Position::new(0.0, 0.0));
        self.host.set_bounds(&id, position, size);
    }

    // ---------------------------------------------------------------------
    // Registry commands
    // ---------------------------------------------------------------------

    pub fn account_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn add_account(&mut self, name: &str) -> Vec<String> {
        let names = self.registry.add(name);
        self.host.emit(&ControlEvent::AccountsUpdated(names.clone()));
        self.refresh_menu();
        names
    }

    /// Delete an account. The active main window is left running even if it
    /// belongs to the deleted account.
    pub fn delete_account(&mut self, name: &str) -> bool {
        match self.registry.delete(name) {
            Ok(()) => {
                self.host
                    .emit(&ControlEvent::AccountsUpdated(self.registry.names()));
                self.refresh_menu();
                true
            }
            Err(e) => {
                tracing::warn!(account = %name, error = %e, "Account deletion rejected");
                self.host.emit(&ControlEvent::DeleteAccountError(e.to_string()));
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Scheduled work
    // ---------------------------------------------------------------------

    /// Run the task behind `id`. Cancelled or unknown ids are ignored.
    pub fn fire(&mut self, id: TaskId) {
        let Some(task) = self.tasks.get(&id).cloned() else {
            tracing::debug!(task = %id, "Ignoring stale task");
            return;
        };

        match task {
            Task::OpenMain { account } => {
                self.tasks.remove(&id);
                if self.pending_switch == Some(id) {
                    self.pending_switch = None;
                }
                self.open_main(&account);
            }
            Task::PinTitle { window } => self.pin_title(id, &window),
        }
    }

    fn open_main(&mut self, account: &str) {
        // Only reachable through a switch, which already released the old one.
        self.close_main();

        let (id, spec) = match self.factory.create(&mut self.host, &self.registry, account) {
            Ok(created) => created,
            Err(_) => {
                self.close_loading();
                return;
            }
        };

        let title_timer = self.add_task(Task::PinTitle { window: id.clone() });
        self.active.insert(id.clone());
        self.host.set_title(&id, &spec.title);
        self.main = Some(MainWindow {
            id,
            account: spec.account,
            title: spec.title,
            title_timer,
        });
        self.refresh_menu();
        self.scheduler
            .schedule_repeating(title_timer, self.config.title_interval);

        self.close_selection();
        self.close_loading();

        tracing::info!(account = %account, "Account active");
    }

    fn pin_title(&mut self, task: TaskId, window: &WindowId) {
        let live = self
            .main
            .as_ref()
            .filter(|main| &main.id == window && main.title_timer == task)
            .map(|main| main.title.clone());

        match live {
            Some(title) if self.host.is_alive(window) => self.host.set_title(window, &title),
            Some(_) => {
                tracing::debug!(window = %window, "Main window vanished");
                self.release_main();
            }
            None => {
                self.tasks.remove(&task);
                self.scheduler.cancel(task);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Slot management
    // ---------------------------------------------------------------------

    fn add_task(&mut self, task: Task) -> TaskId {
        self.next_task += 1;
        let id = TaskId::new(self.next_task);
        self.tasks.insert(id, task);
        id
    }

    fn cancel_pending_switch(&mut self) {
        if let Some(task) = self.pending_switch.take() {
            tracing::debug!(task = %task, "Cancelling pending switch");
            self.tasks.remove(&task);
            self.scheduler.cancel(task);
        }
    }

    /// Forget the main window: leave the active set, stop its timer.
    fn release_main(&mut self) -> Option<WindowId> {
        let main = self.main.take()?;
        self.active.remove(&main.id);
        self.tasks.remove(&main.title_timer);
        self.scheduler.cancel(main.title_timer);
        Some(main.id)
    }

    /// Close the main window without running its closed handler.
    fn close_main(&mut self) {
        if let Some(id) = self.release_main() {
            tracing::debug!(window = %id, "Closing main window");
            if self.host.is_alive(&id) {
                self.host.close(&id);
            }
        }
    }

    fn close_selection(&mut self) {
        if let Some(id) = self.selection.take() {
            if self.host.is_alive(&id) {
                self.host.close(&id);
            }
        }
    }

    fn close_loading(&mut self) {
        if let Some(id) = self.loading.take() {
            if self.host.is_alive(&id) {
                self.host.close(&id);
            }
        }
    }

    fn refresh_menu(&mut self) {
        let Some(main) = &self.main else {
            return;
        };
        let menu = build_menu(
            &self.config.app_title,
            &self.registry.names(),
            Some(&main.account),
        );
        self.host.install_menu(&menu);
    }

    fn centered(&self, size: Size) -> Option<Position> {
        self.host.primary_work_area().map(|area| area.center(size))
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Account bound to the live main window.
    pub fn active_account(&self) -> Option<&str> {
        self.main.as_ref().map(|main| main.account.as_str())
    }

    pub fn active_windows(&self) -> &HashSet<WindowId> {
        &self.active
    }

    pub fn selection_window(&self) -> Option<&WindowId> {
        self.selection.as_ref()
    }

    pub fn loading_window(&self) -> Option<&WindowId> {
        self.loading.as_ref()
    }

    pub fn main_window(&self) -> Option<&WindowId> {
        self.main.as_ref().map(|main| &main.id)
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuModel;
    use crate::testing::{harness, run_for, Harness, HostOp};

    fn switch_targets(menu: &MenuModel) -> Vec<String> {
        menu.switch_targets().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_exit_policy() {
        assert!(exits_when_all_windows_closed("linux"));
        assert!(exits_when_all_windows_closed("windows"));
        assert!(!exits_when_all_windows_closed("macos"));
    }

    #[test]
    fn test_ready_opens_selection_once() {
        let Harness { mut controller, _dir } = harness(&["a", "b"]);

        controller.on_ready();
        let first = controller.selection_window().cloned().unwrap();
        controller.on_ready();

        assert_eq!(controller.state(), LifecycleState::Selecting);
        assert_eq!(controller.selection_window(), Some(&first));
        assert_eq!(controller.host().live_count(WindowKind::Selection), 1);
        assert_eq!(controller.host().focused, vec![first]);
    }

    #[test]
    fn test_selection_is_centered_in_work_area() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.on_ready();

        let request = controller.host().opened_requests()[0].clone();
        let area = controller.host().work_area.unwrap();
        assert_eq!(request.position, Some(area.center(request.size)));
    }

    #[test]
    fn test_select_account_reaches_active_after_delay() {
        let Harness { mut controller, _dir } = harness(&["a", "b"]);
        controller.on_ready();

        controller.select_account("a");
        assert_eq!(controller.state(), LifecycleState::Switching);
        assert!(controller.selection_window().is_none());
        assert!(controller.loading_window().is_some());
        assert_eq!(controller.host().live_count(WindowKind::Main), 0);

        run_for(&mut controller, 499);
        assert_eq!(controller.state(), LifecycleState::Switching);

        run_for(&mut controller, 1);
        assert_eq!(controller.state(), LifecycleState::Active);
        assert_eq!(controller.active_account(), Some("a"));
        assert!(controller.loading_window().is_none());

        let host = controller.host();
        assert_eq!(host.live_count(WindowKind::Main), 1);
        assert_eq!(host.live_count(WindowKind::Loading), 0);
        assert_eq!(host.live_count(WindowKind::Selection), 0);
        assert_eq!(host.sessions[0].partition_id, "persist:a");

        let menu = host.menus.last().unwrap();
        assert_eq!(switch_targets(menu), vec!["a", "b"]);
    }

    #[test]
    fn test_switch_destroys_old_before_registering_new() {
        let Harness { mut controller, _dir } = harness(&["a", "b"]);
        controller.select_account("a");
        run_for(&mut controller, 500);
        let window_a = controller.main_window().cloned().unwrap();

        controller.switch_account("b");
        // Old window is out of the active set before anything new exists.
        assert!(controller.active_windows().is_empty());
        assert!(!controller.host().is_alive(&window_a));

        run_for(&mut controller, 500);
        let window_b = controller.main_window().cloned().unwrap();
        assert_eq!(controller.active_account(), Some("b"));
        assert_eq!(controller.active_windows().len(), 1);
        assert!(controller.active_windows().contains(&window_b));

        let ops = &controller.host().ops;
        let closed_a = ops
            .iter()
            .position(|op| op == &HostOp::Close(window_a.clone()))
            .unwrap();
        let opened_b = ops
            .iter()
            .position(|op| op == &HostOp::OpenSession("b".into()))
            .unwrap();
        assert!(closed_a < opened_b);
    }

    #[test]
    fn test_at_most_one_window_of_each_kind() {
        let Harness { mut controller, _dir } = harness(&["a", "b", "c"]);
        controller.on_ready();

        for account in ["a", "b", "c", "a"] {
            controller.switch_account(account);
            controller.host().assert_single_per_kind();
            run_for(&mut controller, 200);
            controller.host().assert_single_per_kind();
            controller.show_selection();
            controller.host().assert_single_per_kind();
            run_for(&mut controller, 400);
            controller.host().assert_single_per_kind();
        }
    }

    #[test]
    fn test_rapid_switch_last_request_wins() {
        let Harness { mut controller, _dir } = harness(&["a", "b", "c"]);

        controller.switch_account("a");
        run_for(&mut controller, 200);
        controller.switch_account("b");
        run_for(&mut controller, 200);
        controller.switch_account("c");
        run_for(&mut controller, 1000);

        assert_eq!(controller.active_account(), Some("c"));
        assert_eq!(controller.host().sessions.len(), 1);
        assert_eq!(controller.host().live_count(WindowKind::Main), 1);
        assert_eq!(controller.host().live_count(WindowKind::Loading), 0);
    }

    #[test]
    fn test_select_trims_account_name() {
        let Harness { mut controller, _dir } = harness(&["a"]);

        controller.select_account("  a ");
        run_for(&mut controller, 500);

        assert_eq!(controller.active_account(), Some("a"));
        assert_eq!(controller.host().sessions[0].partition_id, "persist:a");
    }

    #[test]
    fn test_unknown_account_aborts_to_no_window() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.on_ready();

        controller.select_account("ghost");
        run_for(&mut controller, 500);

        assert_eq!(controller.state(), LifecycleState::NoWindow);
        assert!(controller.loading_window().is_none());
        let host = controller.host();
        assert_eq!(host.live_count(WindowKind::Main), 0);
        assert_eq!(host.live_count(WindowKind::Loading), 0);
        // No automatic fallback to the selection window
        assert_eq!(host.live_count(WindowKind::Selection), 0);
    }

    #[test]
    fn test_host_failure_aborts_to_no_window() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.host_mut().fail_sessions = true;

        controller.select_account("a");
        run_for(&mut controller, 500);

        assert_eq!(controller.state(), LifecycleState::NoWindow);
        assert_eq!(controller.host().live_count(WindowKind::Loading), 0);
    }

    #[test]
    fn test_return_to_selection_from_active() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.select_account("a");
        run_for(&mut controller, 500);
        let main = controller.main_window().cloned().unwrap();

        controller.return_to_selection();

        assert_eq!(controller.state(), LifecycleState::Selecting);
        assert!(!controller.host().is_alive(&main));
        assert!(controller.active_windows().is_empty());

        // The suppressed close notification must not disturb the new state.
        controller.on_window_destroyed(&main);
        assert_eq!(controller.state(), LifecycleState::Selecting);
    }

    #[test]
    fn test_return_to_selection_cancels_pending_switch() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.select_account("a");
        run_for(&mut controller, 100);

        controller.return_to_selection();
        run_for(&mut controller, 1000);

        assert_eq!(controller.state(), LifecycleState::Selecting);
        assert_eq!(controller.host().live_count(WindowKind::Main), 0);
        assert_eq!(controller.host().live_count(WindowKind::Loading), 0);
    }

    #[test]
    fn test_user_closing_main_goes_to_no_window() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.select_account("a");
        run_for(&mut controller, 500);
        let main = controller.main_window().cloned().unwrap();

        controller.host_mut().user_close(&main);
        controller.on_window_destroyed(&main);

        assert_eq!(controller.state(), LifecycleState::NoWindow);
        assert!(controller.active_windows().is_empty());
        assert_eq!(controller.host().live_count(WindowKind::Selection), 0);
        assert_eq!(controller.scheduler_mut().pending(), 0);
    }

    #[test]
    fn test_title_timer_pins_title_and_stops_with_window() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.select_account("a");
        run_for(&mut controller, 500);
        let main = controller.main_window().cloned().unwrap();

        controller.host_mut().page_set_title(&main, "3 unread messages");
        run_for(&mut controller, 5);
        assert_eq!(
            controller.host().title_of(&main),
            Some("Switchboard - a")
        );

        // Window disappears without a destroyed notification: the next tick
        // notices and cancels itself.
        controller.host_mut().user_close(&main);
        run_for(&mut controller, 5);
        assert_eq!(controller.state(), LifecycleState::NoWindow);
        assert_eq!(controller.scheduler_mut().pending(), 0);

        let titles_before = controller.host().title_writes;
        run_for(&mut controller, 100);
        assert_eq!(controller.host().title_writes, titles_before);
    }

    #[test]
    fn test_stale_task_is_ignored() {
        let Harness { mut controller, _dir } = harness(&["a"]);
        controller.fire(TaskId::new(999));
        assert_eq!(controller.state(), LifecycleState::NoWindow);
    }

    #[test]
    fn test_activate_reopens_selection_only_when_idle() {
        let Harness { mut controller, _dir } = harness(&["a"]);

        controller.on_activate(false);
        assert_eq!(controller.state(), LifecycleState::Selecting);

        controller.select_account("a");
        run_for(&mut controller, 500);
        controller.on_activate(false);
        assert_eq!(controller.state(), LifecycleState::Active);
        assert_eq!(controller.host().live_count(WindowKind::Selection), 0);
    }

    #[test]
    fn test_adjust_window_size_recenters_selection() {
        let Harness { mut controller, _dir } = harness(&["a"]);

        controller.adjust_window_size(600.0, 400.0);
        assert!(controller.host().bounds.is_empty());

        controller.on_ready();
        controller.adjust_window_size(600.0, 400.0);

        let area = controller.host().work_area.unwrap();
        let (id, position, size) = controller.host().bounds.last().cloned().unwrap();
        assert_eq!(Some(&id), controller.selection_window());
        assert_eq!(size, Size::new(600.0, 400.0));
        assert_eq!(position, area.center(size));
    }

    #[test]
    fn test_delete_active_account_keeps_window() {
        let Harness { mut controller, _dir } = harness(&["a", "b"]);
        controller.select_account("a");
        run_for(&mut controller, 500);

        assert!(controller.delete_account("a"));

        assert_eq!(controller.account_names(), vec!["b"]);
        assert_eq!(
            controller.host().events.last(),
            Some(&ControlEvent::AccountsUpdated(vec!["b".to_string()]))
        );
        assert_eq!(controller.state(), LifecycleState::Active);
        assert_eq!(controller.active_account(), Some("a"));
        assert_eq!(controller.host().live_count(WindowKind::Main), 1);

        let menu = controller.host().menus.last().unwrap();
        assert_eq!(switch_targets(menu), vec!["b"]);
    }

    #[test]
    fn test_delete_last_account_rejected() {
        let Harness { mut controller, _dir } = harness(&["only"]);

        assert!(!controller.delete_account("only"));

        assert_eq!(controller.registry().names().len(), 1);
        assert!(matches!(
            controller.host().events.last(),
            Some(ControlEvent::DeleteAccountError(_))
        ));
    }

    #[test]
    fn test_names_match_persisted_file() {
        let Harness { mut controller, _dir } = harness(&["a", "b"]);

        controller.add_account("c");
        controller.delete_account("a");

        let on_disk = AccountRegistry::load(controller.registry().path());
        let Some(ControlEvent::AccountsUpdated(emitted)) = controller.host().events.last() else {
            panic!("expected accounts-updated");
        };
        assert_eq!(&on_disk.names(), emitted);
        assert_eq!(emitted, &vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_menu_rebuilt_on_registry_change_only_when_active() {
        let Harness { mut controller, _dir } = harness(&["a"]);

        controller.add_account("b");
        assert!(controller.host().menus.is_empty());

        controller.select_account("a");
        run_for(&mut controller, 500);
        controller.add_account("c");

        let menu = controller.host().menus.last().unwrap();
        assert_eq!(switch_targets(menu), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_menu_switch_command() {
        let Harness { mut controller, _dir } = harness(&["a", "b"]);
        controller.select_account("a");
        run_for(&mut controller, 500);

        controller.handle_menu(MenuCommand::SwitchAccount("b".to_string()));
        run_for(&mut controller, 500);
        assert_eq!(controller.active_account(), Some("b"));

        controller.handle_menu(MenuCommand::ReturnToSelection);
        assert_eq!(controller.state(), LifecycleState::Selecting);
    }
}
