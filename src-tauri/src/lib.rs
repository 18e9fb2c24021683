//! Switchboard - Tauri Application
//!
//! One selection window, one loading window and at most one account window,
//! all owned by the core lifecycle controller. Each account window runs in
//! its own storage partition.

mod commands;
mod host;
mod menu;
mod scheduler;
mod state;

use state::ShellState;
use tauri::{AppHandle, Manager, RunEvent};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    switchboard_core::init_logging();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let state = ShellState::new(app.handle())?;
            state.register_handlers();
            app.manage(state);

            app.on_menu_event(menu::handle_menu_event);

            tracing::info!("Switchboard started");

            app.state::<ShellState>()
                .with_controller(|controller| controller.on_ready());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::control::control_request,
            commands::control::control_send,
        ])
        .build(tauri::generate_context!())
        .expect("error while building Switchboard");

    app.run(on_run_event);
}

#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
fn on_run_event(app: &AppHandle, event: RunEvent) {
    match event {
        // No exit code means the last window closed on its own.
        RunEvent::ExitRequested { code: None, api, .. }
            if !switchboard_core::exits_when_all_windows_closed(std::env::consts::OS) =>
        {
            api.prevent_exit();
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            if let Some(state) = app.try_state::<ShellState>() {
                state.with_controller(|controller| controller.on_activate(has_visible_windows));
            }
        }
        _ => {}
    }
}
