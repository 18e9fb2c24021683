//! Control channel commands
//!
//! Both commands are async: the handler itself runs on the main thread
//! through [`dispatch_on_main_thread`].
use serde_json::Value;
use tauri::{AppHandle, Manager};

use switchboard_core::{CommandKind, CommandResult};

use crate::state::{dispatch_on_main_thread, ShellState};

/// Request/response command, e.g. `get-accounts`.
#[tauri::command]
pub async fn control_request(
    app: AppHandle,
    command: String,
    payload: Option<Value>,
) -> CommandResult<Value> {
    let kind = app
        .try_state::<ShellState>()
        .and_then(|state| state.command_kind(&command));
    if kind != Some(CommandKind::Request) {
        return CommandResult::err(format!("Not a request command: {command}"));
    }

    dispatch_on_main_thread(app, command, payload.unwrap_or(Value::Null)).await
}

/// Fire-and-forget command, e.g. `select-account`. Effects arrive as events.
#[tauri::command]
pub async fn control_send(
    app: AppHandle,
    command: String,
    payload: Option<Value>,
) -> CommandResult<()> {
    let result = dispatch_on_main_thread(app, command, payload.unwrap_or(Value::Null)).await;
    match result.error {
        Some(error) => CommandResult::err(error),
        None => CommandResult::ok(()),
    }
}
