//! Window seam between the lifecycle controller and the windowing toolkit

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::channel::ControlEvent;
use crate::factory::SessionWindowSpec;
use crate::geometry::{Position, Rect, Size};
use crate::menu::MenuModel;
use crate::Result;

/// Toolkit-level window label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Selection,
    Loading,
    Main,
}

impl WindowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::Selection => "selection",
            WindowKind::Loading => "loading",
            WindowKind::Main => "main",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shell-owned window showing one of the bundled pages.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRequest {
    pub kind: WindowKind,
    /// Bundled page, relative to the frontend root
    pub page: &'static str,
    pub title: String,
    pub size: Size,
    /// `None` lets the toolkit place the window
    pub position: Option<Position>,
    pub resizable: bool,
}

/// Everything the controller needs from the windowing toolkit.
///
/// Implementations must not call back into the controller from inside these
/// methods; closing a window here is a controller decision and its destroyed
/// notification is expected to be dropped.
pub trait WindowHost {
    fn open(&mut self, request: &WindowRequest) -> Result<WindowId>;

    /// Open a content window bound to an isolated partition.
    fn open_session(&mut self, spec: &SessionWindowSpec) -> Result<WindowId>;

    fn close(&mut self, id: &WindowId);

    fn focus(&mut self, id: &WindowId);

    fn is_alive(&self, id: &WindowId) -> bool;

    fn set_title(&mut self, id: &WindowId, title: &str);

    fn set_bounds(&mut self, id: &WindowId, position: Position, size: Size);

    /// Visible work area of the primary display, if known.
    fn primary_work_area(&self) -> Option<Rect>;

    /// Replace the application menu wholesale.
    fn install_menu(&mut self, menu: &MenuModel);

    /// Broadcast a control-channel event to every UI surface.
    fn emit(&mut self, event: &ControlEvent);
}
