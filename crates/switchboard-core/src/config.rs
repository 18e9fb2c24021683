//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::geometry::Size;

const DEFAULT_SERVICE_URL: &str = "https://example.com/";
const SERVICE_URL_ENV: &str = "SWITCHBOARD_SERVICE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the account registry file
    pub registry_path: PathBuf,
    /// Root directory for per-partition webview data
    pub partitions_dir: PathBuf,
    /// Web service loaded in every main window
    pub service_url: String,
    /// Application name, used as the prefix of pinned titles
    pub app_title: String,
    /// Minimum time the loading window stays up before the main window opens
    pub loading_delay: Duration,
    /// Period of the main-window title re-assertion
    pub title_interval: Duration,
    pub selection_size: Size,
    pub loading_size: Size,
    pub main_size: Size,
    pub main_min_size: Size,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let service_url = std::env::var(SERVICE_URL_ENV)
            .ok()
            .filter(|raw| match url::Url::parse(raw) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Ignoring invalid {}", SERVICE_URL_ENV);
                    false
                }
            })
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        Self {
            registry_path: data_dir.join("accounts.json"),
            partitions_dir: data_dir.join("partitions"),
            service_url,
            app_title: "Switchboard".to_string(),
            loading_delay: Duration::from_millis(500),
            title_interval: Duration::from_millis(5),
            selection_size: Size::new(420.0, 560.0),
            loading_size: Size::new(320.0, 200.0),
            main_size: Size::new(1200.0, 800.0),
            main_min_size: Size::new(800.0, 600.0),
        }
    }
}
