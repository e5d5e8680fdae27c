use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "formsheet";
const APPLICATION: &str = "formsheet";
const CONFIG_FILE: &str = "settings.json";
const DATABASE_FILE: &str = "formsheet.db";

fn project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            "Could not determine project directories for formsheet.",
        )
    })
}

pub fn get_config_path() -> io::Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}

/// `formsheet.db` in the platform data directory, or the working directory
/// when no home directory can be determined.
pub fn default_database_path() -> PathBuf {
    match project_dirs() {
        Ok(dirs) => dirs.data_dir().join(DATABASE_FILE),
        Err(_) => PathBuf::from(DATABASE_FILE),
    }
}

/// Load settings from `path`, or from the default config location when `None`.
/// A missing file yields the defaults.
pub fn load_settings_from_file<T: for<'de> serde::de::Deserialize<'de> + Default>(
    path: Option<&Path>,
) -> io::Result<T> {
    let config_file = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };
    info!("Settings: Attempting to load settings from {:?}", config_file);
    match fs::File::open(&config_file) {
        Ok(file) => {
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(settings) => {
                    info!("Settings: Successfully deserialized settings.");
                    Ok(settings)
                }
                Err(e) => {
                    error!("Settings: Failed to parse settings file {:?}: {}", &config_file, e);
                    Err(io::Error::new(
                        ErrorKind::InvalidData,
                        format!("Failed to parse settings file: {}", e),
                    ))
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Settings: Settings file not found at {:?}. Returning default.", config_file);
            Ok(Default::default())
        }
        Err(e) => {
            error!("Settings: Failed to open settings file {:?}: {}", &config_file, e);
            Err(e)
        }
    }
}

pub fn save_settings_to_file<T: serde::Serialize>(settings: &T, path: &Path) -> io::Result<()> {
    info!("Settings: Saving settings to {:?}", path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("Settings: writing settings");
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("Settings: Failed to serialize settings to {:?}: {}", path, e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    Ok(())
}
