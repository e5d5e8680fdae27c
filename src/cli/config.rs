// src/cli/config.rs
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::settings::io::{get_config_path, save_settings_to_file};
use crate::settings::AppSettings;

/// Write `settings` to `path`, or to the default settings location when `None`.
/// An existing file is only replaced with `force`.
pub fn run(settings: &AppSettings, path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path().context("locating the settings directory")?,
    };
    if target.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", target.display());
    }
    save_settings_to_file(settings, &target)
        .with_context(|| format!("writing {}", target.display()))?;
    println!("Wrote settings to {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::io::load_settings_from_file;

    #[test]
    fn test_writes_then_refuses_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formsheet").join("settings.json");
        let settings = AppSettings {
            default_sheet_name: "Responses".into(),
            ..AppSettings::default()
        };

        assert_eq!(run(&settings, Some(&path), false).unwrap(), path);
        let loaded: AppSettings = load_settings_from_file(Some(&path)).unwrap();
        assert_eq!(loaded, settings);

        assert!(run(&AppSettings::default(), Some(&path), false).is_err());
        run(&AppSettings::default(), Some(&path), true).unwrap();
        let loaded: AppSettings = load_settings_from_file(Some(&path)).unwrap();
        assert_eq!(loaded.default_sheet_name, "Sheet1");
    }
}
