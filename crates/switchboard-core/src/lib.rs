//! Switchboard Core
//!
//! Owns every window the shell shows and the account registry behind them.
//! The Tauri layer only implements [`WindowHost`] and [`Scheduler`]; all
//! lifecycle decisions are made here.

mod channel;
mod config;
mod error;
mod factory;
mod geometry;
mod lifecycle;
mod menu;
mod scheduler;
mod window;

#[cfg(test)]
mod testing;

pub use channel::{
    commands, CommandKind, CommandResult, ControlChannel, ControlEvent, Handler,
};
pub use config::Config;
pub use error::CoreError;
pub use factory::{
    partition_data_dir, partition_store_id, pinned_title, SessionWindowFactory, SessionWindowSpec,
};
pub use geometry::{Position, Rect, Size};
pub use lifecycle::{exits_when_all_windows_closed, Controller, LifecycleState};
pub use menu::{build_menu, MenuCommand, MenuEntry, MenuModel, PredefinedItem, Submenu};
pub use scheduler::{Scheduler, TaskId};
pub use window::{WindowHost, WindowId, WindowKind, WindowRequest};

pub use switchboard_registry::{AccountEntry, AccountRegistry, RegistryError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
