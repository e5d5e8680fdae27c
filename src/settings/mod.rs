// src/settings/mod.rs

pub mod io;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sheets::directives::DEFAULT_SHEET_NAME;

pub const ENV_LISTEN: &str = "FORMSHEET_LISTEN";
pub const ENV_DATABASE: &str = "FORMSHEET_DB";
pub const ENV_DEFAULT_SHEET: &str = "FORMSHEET_DEFAULT_SHEET";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub listen_addr: String,
    /// `None` resolves to `formsheet.db` in the platform data directory.
    pub database_path: Option<PathBuf>,
    pub default_sheet_name: String,
    /// Field that receives the server-side submission timestamp.
    pub timestamp_field: String,
    pub max_body_bytes: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            database_path: None,
            default_sheet_name: DEFAULT_SHEET_NAME.to_string(),
            timestamp_field: "date".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppSettings {
    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_LISTEN).filter(|v| !v.is_empty()) {
            self.listen_addr = addr;
        }
        if let Some(path) = lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(name) = lookup(ENV_DEFAULT_SHEET).filter(|v| !v.is_empty()) {
            self.default_sheet_name = name;
        }
    }

    /// Database file to open, falling back to the platform data directory.
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(io::default_database_path)
    }
}
