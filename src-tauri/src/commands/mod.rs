//! Tauri IPC Commands
//!
//! The bundled pages reach the lifecycle controller only through the
//! control channel exposed here.

pub mod control;

/// Label of the single child webview inside a shell window.
pub fn content_webview_label(window_label: &str) -> String {
    format!("content-{window_label}")
}
