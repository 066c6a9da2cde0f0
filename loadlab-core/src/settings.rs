use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Connection and behavior settings of the dashboard, kept in a TOML
/// file next to the drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub api_url: String,
    pub policy_api_url: String,
    pub grafana_url: Option<String>,
    pub request_timeout_secs: u64,
    /// Keep `maxRps` and the curve control points on submitted
    /// workloads. The backend ignores them; stripping them produces the
    /// minimal wire document.
    pub include_curve_metadata: bool,
    pub draft_dir: PathBuf,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5001/api".to_string(),
            policy_api_url: "http://localhost:8001/api".to_string(),
            grafana_url: None,
            request_timeout_secs: 30,
            include_curve_metadata: true,
            draft_dir: PathBuf::from("drafts"),
        }
    }
}

pub fn load_settings_file(path: &Path) -> Result<DashboardSettings, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read settings file '{}': {e}", path.display()))?;
    toml::from_str(&data)
        .map_err(|e| format!("Failed to parse settings file '{}': {e}", path.display()))
}

pub fn save_settings_file(path: &Path, settings: &DashboardSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let data = toml::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    std::fs::write(path, data)
        .map_err(|e| format!("Failed to write settings file '{}': {e}", path.display()))
}

/// Loads the settings file, writing the defaults on first run so the
/// file is there to edit.
pub fn load_or_create_settings(path: &Path) -> DashboardSettings {
    match load_settings_file(path) {
        Ok(settings) => settings,
        Err(_) => {
            let defaults = DashboardSettings::default();
            let _ = save_settings_file(path, &defaults);
            defaults
        }
    }
}
