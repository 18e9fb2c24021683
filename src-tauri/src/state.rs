//! Application state management
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tauri::{AppHandle, Manager};

use switchboard_core::{
    AccountRegistry, CommandKind, CommandResult, Config, ControlChannel, Controller, CoreError,
    Result,
};

use crate::host::TauriHost;
use crate::scheduler::TauriScheduler;

pub type ShellController = Controller<TauriHost, TauriScheduler>;
pub type ShellChannel = ControlChannel<TauriHost, TauriScheduler>;

/// Controller and control channel, shared with every command and event
/// handler. All access happens on the main thread.
pub struct ShellState {
    controller: Mutex<ShellController>,
    channel: RwLock<ShellChannel>,
}

impl ShellState {
    pub fn new(app: &AppHandle) -> Result<Self> {
        let data_dir = app
            .path()
            .app_data_dir()
            .map_err(|e| CoreError::Config(format!("no app data directory: {e}")))?;
        let config = Config::new(data_dir);

        let registry = AccountRegistry::load(&config.registry_path);
        let controller = Controller::new(
            config,
            registry,
            TauriHost::new(app.clone()),
            TauriScheduler::new(app.clone()),
        )?;

        Ok(Self {
            controller: Mutex::new(controller),
            channel: RwLock::new(ShellChannel::new()),
        })
    }

    /// Install the built-in control handlers. Repeated calls replace them.
    pub fn register_handlers(&self) {
        self.channel.write().register_defaults();
    }

    pub fn with_controller<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut ShellController) -> T,
    {
        let mut controller = self.controller.lock();
        f(&mut controller)
    }

    /// Like [`Self::with_controller`], but skips `f` when the controller is
    /// already busy further up the stack.
    pub fn try_with_controller<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut ShellController),
    {
        match self.controller.try_lock() {
            Some(mut controller) => {
                f(&mut controller);
                true
            }
            None => false,
        }
    }

    pub fn command_kind(&self, command: &str) -> Option<CommandKind> {
        self.channel.read().kind(command)
    }

    pub fn dispatch(&self, command: &str, payload: Value) -> CommandResult<Value> {
        let channel = self.channel.read();
        let mut controller = self.controller.lock();
        channel.dispatch(&mut controller, command, payload)
    }
}

/// Run a control command on the main thread and wait for its result.
///
/// Window creation from inside an IPC handler can deadlock on some
/// platforms, so commands hop to the event loop like timers and menus do.
pub async fn dispatch_on_main_thread(
    app: AppHandle,
    command: String,
    payload: Value,
) -> CommandResult<Value> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    let handle = app.clone();

    let scheduled = app.run_on_main_thread(move || {
        let result = match handle.try_state::<ShellState>() {
            Some(state) => state.dispatch(&command, payload),
            None => CommandResult::err("Shell not initialized".to_string()),
        };
        let _ = tx.send(result);
    });
    if let Err(e) = scheduled {
        return CommandResult::err(e.to_string());
    }

    rx.await
        .unwrap_or_else(|_| CommandResult::err("Command dropped".to_string()))
}
