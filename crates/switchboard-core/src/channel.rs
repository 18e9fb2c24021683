//! Control Channel
//!
//! Named commands from the UI surfaces, routed to the lifecycle controller.
//! Handlers are keyed by command name; registering a name again replaces the
//! previous handler. Nothing thrown by a handler crosses the channel: every
//! call resolves to a [`CommandResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::CoreError;
use crate::lifecycle::Controller;
use crate::scheduler::Scheduler;
use crate::window::WindowHost;
use crate::Result;

/// Wire names of the built-in commands and events.
pub mod commands {
    pub const GET_ACCOUNTS: &str = "get-accounts";
    pub const GET_STATE: &str = "get-state";
    pub const ADD_ACCOUNT: &str = "add-account";
    pub const DELETE_ACCOUNT: &str = "delete-account";
    pub const SELECT_ACCOUNT: &str = "select-account";
    pub const ADJUST_WINDOW_SIZE: &str = "adjust-window-size";

    pub const ACCOUNTS_UPDATED: &str = "accounts-updated";
    pub const DELETE_ACCOUNT_ERROR: &str = "delete-account-error";
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Events pushed from the controller to every UI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    AccountsUpdated(Vec<String>),
    DeleteAccountError(String),
}

impl ControlEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ControlEvent::AccountsUpdated(_) => commands::ACCOUNTS_UPDATED,
            ControlEvent::DeleteAccountError(_) => commands::DELETE_ACCOUNT_ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Caller waits for a value
    Request,
    /// Caller does not wait; effects arrive as events
    FireAndForget,
}

pub type Handler<H, S> = fn(&mut Controller<H, S>, Value) -> Result<Value>;

pub struct ControlChannel<H: WindowHost, S: Scheduler> {
    handlers: HashMap<String, (CommandKind, Handler<H, S>)>,
}

impl<H: WindowHost, S: Scheduler> ControlChannel<H, S> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Channel with every built-in command registered.
    pub fn with_default_handlers() -> Self {
        let mut channel = Self::new();
        channel.register_defaults();
        channel
    }

    /// (Re-)register the built-in commands. Safe to call repeatedly.
    pub fn register_defaults(&mut self) {
        self.register(commands::GET_ACCOUNTS, CommandKind::Request, get_accounts);
        self.register(commands::GET_STATE, CommandKind::Request, get_state);
        self.register(commands::ADD_ACCOUNT, CommandKind::FireAndForget, add_account);
        self.register(commands::DELETE_ACCOUNT, CommandKind::FireAndForget, delete_account);
        self.register(commands::SELECT_ACCOUNT, CommandKind::FireAndForget, select_account);
        self.register(
            commands::ADJUST_WINDOW_SIZE,
            CommandKind::FireAndForget,
            adjust_window_size,
        );
    }

    /// Register `handler` under `name`, replacing any existing handler.
    /// Returns whether a previous handler was replaced.
    pub fn register(&mut self, name: &str, kind: CommandKind, handler: Handler<H, S>) -> bool {
        let replaced = self
            .handlers
            .insert(name.to_string(), (kind, handler))
            .is_some();
        if replaced {
            tracing::debug!(command = %name, "Replaced control handler");
        }
        replaced
    }

    pub fn kind(&self, name: &str) -> Option<CommandKind> {
        self.handlers.get(name).map(|(kind, _)| *kind)
    }

    /// Run the handler for `name`.
    pub fn dispatch(
        &self,
        controller: &mut Controller<H, S>,
        name: &str,
        payload: Value,
    ) -> CommandResult<Value> {
        let Some((_, handler)) = self.handlers.get(name) else {
            tracing::warn!(command = %name, "Unknown control command");
            return CommandResult::err(CoreError::UnknownCommand(name.to_string()).to_string());
        };

        match handler(controller, payload) {
            Ok(value) => CommandResult::ok(value),
            Err(e) => {
                tracing::warn!(command = %name, error = %e, "Control command failed");
                CommandResult::err(e.to_string())
            }
        }
    }
}

impl<H: WindowHost, S: Scheduler> Default for ControlChannel<H, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Account payload: either a bare string or `{ "name": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AccountPayload {
    Bare(String),
    Named { name: String },
}

impl AccountPayload {
    fn into_name(self) -> String {
        match self {
            AccountPayload::Bare(name) | AccountPayload::Named { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SizePayload {
    width: f64,
    height: f64,
}

fn account_name(payload: Value) -> Result<String> {
    Ok(serde_json::from_value::<AccountPayload>(payload)?.into_name())
}

fn get_accounts<H: WindowHost, S: Scheduler>(
    controller: &mut Controller<H, S>,
    _payload: Value,
) -> Result<Value> {
    Ok(serde_json::to_value(controller.account_names())?)
}

fn get_state<H: WindowHost, S: Scheduler>(
    controller: &mut Controller<H, S>,
    _payload: Value,
) -> Result<Value> {
    Ok(serde_json::to_value(controller.state())?)
}

fn add_account<H: WindowHost, S: Scheduler>(
    controller: &mut Controller<H, S>,
    payload: Value,
) -> Result<Value> {
    controller.add_account(&account_name(payload)?);
    Ok(Value::Null)
}

fn delete_account<H: WindowHost, S: Scheduler>(
    controller: &mut Controller<H, S>,
    payload: Value,
) -> Result<Value> {
    let deleted = controller.delete_account(&account_name(payload)?);
    Ok(Value::Bool(deleted))
}

fn select_account<H: WindowHost, S: Scheduler>(
    controller: &mut Controller<H, S>,
    payload: Value,
) -> Result<Value> {
    controller.select_account(&account_name(payload)?);
    Ok(Value::Null)
}

fn adjust_window_size<H: WindowHost, S: Scheduler>(
    controller: &mut Controller<H, S>,
    payload: Value,
) -> Result<Value> {
    let SizePayload { width, height } = serde_json::from_value(payload)?;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(CoreError::InvalidPayload(format!("window size {width}x{height}")));
    }
    controller.adjust_window_size(width, height);
    Ok(Value::Null)
}
