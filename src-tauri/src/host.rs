//! Tauri implementation of the controller's window seam
//!
//! Every shell window is a plain window with one child webview, labelled
//! `content-<window>`. Account windows load the remote service with a data
//! directory of their own; the bundled pages load from the app frontend.

use tauri::webview::{NewWindowResponse, WebviewBuilder};
use tauri::window::{Window, WindowBuilder};
use tauri::{AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, WebviewUrl, WindowEvent};
use tauri_plugin_opener::OpenerExt;

use switchboard_core::{
    ControlEvent, CoreError, MenuModel, Position, Rect, Result, SessionWindowSpec, Size,
    WindowHost, WindowId, WindowKind, WindowRequest,
};

use crate::commands::content_webview_label;
use crate::state::ShellState;

pub struct TauriHost {
    app: AppHandle,
    next_id: u64,
}

impl TauriHost {
    pub fn new(app: AppHandle) -> Self {
        Self { app, next_id: 0 }
    }

    /// Labels are never reused, so a window still being torn down cannot
    /// collide with its replacement.
    fn next_label(&mut self, kind: WindowKind) -> String {
        self.next_id += 1;
        format!("{kind}-{}", self.next_id)
    }

    fn window(&self, id: &WindowId) -> Option<Window> {
        self.app.get_window(id.as_str())
    }
}

fn host_error(e: tauri::Error) -> CoreError {
    CoreError::Host(e.to_string())
}

/// Report toolkit-initiated destruction back to the controller.
///
/// Windows the controller destroys itself are reported while it is still
/// locked; those notifications are dropped.
fn watch_destroyed(app: &AppHandle, window: &Window) {
    let app = app.clone();
    let id = WindowId::new(window.label());

    window.on_window_event(move |event| {
        if !matches!(event, WindowEvent::Destroyed) {
            return;
        }
        let Some(state) = app.try_state::<ShellState>() else {
            return;
        };
        if !state.try_with_controller(|controller| controller.on_window_destroyed(&id)) {
            tracing::debug!(window = %id, "Destroyed during controller call, ignoring");
        }
    });
}

impl WindowHost for TauriHost {
    fn open(&mut self, request: &WindowRequest) -> Result<WindowId> {
        let label = self.next_label(request.kind);

        let mut builder = WindowBuilder::new(&self.app, &label)
            .title(&request.title)
            .inner_size(request.size.width, request.size.height)
            .resizable(request.resizable)
            .focused(true);
        builder = match request.position {
            Some(position) => builder.position(position.x, position.y),
            None => builder.center(),
        };
        let window = builder.build().map_err(host_error)?;

        let ui_webview = WebviewBuilder::new(
            content_webview_label(&label),
            WebviewUrl::App(request.page.into()),
        )
        .auto_resize();

        if let Err(e) = window.add_child(
            ui_webview,
            LogicalPosition::new(0.0, 0.0),
            LogicalSize::new(request.size.width, request.size.height),
        ) {
            let _ = window.destroy();
            return Err(host_error(e));
        }

        watch_destroyed(&self.app, &window);
        tracing::debug!(window = %label, kind = %request.kind, "Opened shell window");

        Ok(WindowId::new(label))
    }

    fn open_session(&mut self, spec: &SessionWindowSpec) -> Result<WindowId> {
        let label = self.next_label(WindowKind::Main);

        if let Err(e) = std::fs::create_dir_all(&spec.data_dir) {
            tracing::warn!(
                path = %spec.data_dir.display(),
                error = %e,
                "Cannot create partition directory"
            );
        }

        let window = WindowBuilder::new(&self.app, &label)
            .title(&spec.title)
            .inner_size(spec.size.width, spec.size.height)
            .min_inner_size(spec.min_size.width, spec.min_size.height)
            .center()
            .build()
            .map_err(host_error)?;

        let window_for_title = window.clone();
        let pinned_title = spec.title.clone();
        let app_for_links = self.app.clone();

        let content = WebviewBuilder::new(
            content_webview_label(&label),
            WebviewUrl::External(spec.url.clone()),
        )
        .auto_resize()
        .enable_clipboard_access()
        .data_directory(spec.data_dir.clone())
        .on_document_title_changed(move |_webview, _title| {
            // Pages do not get to rename the shell window.
            let _ = window_for_title.set_title(&pinned_title);
        })
        .on_new_window(move |url, _features| {
            if let Err(e) = app_for_links.opener().open_url(url.as_str(), None::<&str>) {
                tracing::warn!(url = %url, error = %e, "Failed to open external link");
            }
            NewWindowResponse::Deny
        });

        #[cfg(target_os = "macos")]
        let content = content
            .data_store_identifier(switchboard_core::partition_store_id(&spec.partition_id));

        if let Err(e) = window.add_child(
            content,
            LogicalPosition::new(0.0, 0.0),
            LogicalSize::new(spec.size.width, spec.size.height),
        ) {
            tracing::error!(window = %label, error = %e, "Failed to create content webview");
            let _ = window.destroy();
            return Err(host_error(e));
        }

        watch_destroyed(&self.app, &window);

        Ok(WindowId::new(label))
    }

    fn close(&mut self, id: &WindowId) {
        if let Some(window) = self.window(id) {
            if let Err(e) = window.destroy() {
                tracing::warn!(window = %id, error = %e, "Failed to destroy window");
            }
        }
    }

    fn focus(&mut self, id: &WindowId) {
        if let Some(window) = self.window(id) {
            let _ = window.unminimize();
            let _ = window.show();
            let _ = window.set_focus();
        }
    }

    fn is_alive(&self, id: &WindowId) -> bool {
        self.window(id).is_some()
    }

    fn set_title(&mut self, id: &WindowId, title: &str) {
        let Some(window) = self.window(id) else {
            return;
        };
        if window.title().ok().as_deref() != Some(title) {
            let _ = window.set_title(title);
        }
    }

    fn set_bounds(&mut self, id: &WindowId, position: Position, size: Size) {
        if let Some(window) = self.window(id) {
            let _ = window.set_size(LogicalSize::new(size.width, size.height));
            let _ = window.set_position(LogicalPosition::new(position.x, position.y));
        }
    }

    fn primary_work_area(&self) -> Option<Rect> {
        let monitor = self.app.primary_monitor().ok().flatten()?;
        let scale = monitor.scale_factor();
        let area = monitor.work_area();

        Some(Rect::new(
            f64::from(area.position.x) / scale,
            f64::from(area.position.y) / scale,
            f64::from(area.size.width) / scale,
            f64::from(area.size.height) / scale,
        ))
    }

    fn install_menu(&mut self, menu: &MenuModel) {
        match crate::menu::build_native_menu(&self.app, menu) {
            Ok(native) => {
                if let Err(e) = self.app.set_menu(native) {
                    tracing::error!(error = %e, "Failed to install menu");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to build menu"),
        }
    }

    fn emit(&mut self, event: &ControlEvent) {
        let result = match event {
            ControlEvent::AccountsUpdated(names) => self.app.emit(event.name(), names),
            ControlEvent::DeleteAccountError(reason) => self.app.emit(event.name(), reason),
        };
        if let Err(e) = result {
            tracing::warn!(event = %event.name(), error = %e, "Failed to emit event");
        }
    }
}
