use std::{fs, io, path::PathBuf};

use tally_domain::Session;

use crate::{manager::write_replacing, ConfigError};

/// Keeps the CLI signed in across invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Option<Session>, ConfigError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|err| ConfigError::Serde(err.to_string()))
    }

    pub fn save(&self, session: &Session) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_replacing(&self.path, &json)
    }

    /// Forgets the stored session. Clearing twice is not an error.
    pub fn clear(&self) -> Result<(), ConfigError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
