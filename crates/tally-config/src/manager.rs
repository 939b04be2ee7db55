use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError, SessionStore};

/// Overrides the base directory holding config and session files.
pub const HOME_ENV: &str = "TALLY_HOME";
const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";
const TMP_SUFFIX: &str = "tmp";

/// Handles persistence of [`Config`] and locates the session file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    session_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf, session_path: PathBuf) -> Self {
        Self {
            config_path,
            session_path,
        }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE), base.join(SESSION_FILE)))
    }

    /// `$TALLY_HOME`, else the platform config directory.
    pub fn default_base_dir() -> Result<PathBuf, ConfigError> {
        if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        dirs::config_dir()
            .map(|dir| dir.join("tally"))
            .ok_or_else(|| {
                ConfigError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no configuration directory available; set {HOME_ENV}"),
                ))
            })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_base_dir(Self::default_base_dir()?)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.session_path.clone())
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Loads the stored config and applies environment overrides on top.
    pub fn load_effective(&self) -> Result<Config, ConfigError> {
        let mut config = self.load()?;
        config.apply_env();
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_replacing(&self.config_path, &json)
    }
}

/// Writes to a sibling temp file, then renames it over `path`.
pub(crate) fn write_replacing(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
