use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::AppError;
use ruxtab::Limits;

/// JSON configuration file driving a conversion or merge.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    target_tuning: Option<Vec<String>>,
    max_fret: Option<u8>,
    bass_max_fret: Option<u8>,
    melody_min_fret: Option<u8>,
    hand_separation: Option<u8>,
}

impl Config {
    pub fn read_config(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|err| {
            AppError::ConfigError(format!("could not open configuration {path:?}: {err}"))
        })?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|err| {
            AppError::ConfigError(format!("could not read configuration {path:?}: {err}"))
        })?;
        Ok(config)
    }

    /// The one required key: note labels of the target tuning.
    pub fn target_tuning(&self) -> Result<&[String], AppError> {
        self.target_tuning
            .as_deref()
            .ok_or_else(|| AppError::ConfigMissingKey("target_tuning".to_string()))
    }

    /// Allocator limits, defaulted where the file stays silent.
    pub fn limits(&self) -> Limits {
        let defaults = Limits::default();
        Limits {
            max_fret: self.max_fret.unwrap_or(defaults.max_fret),
            bass_max_fret: self.bass_max_fret.unwrap_or(defaults.bass_max_fret),
            melody_min_fret: self.melody_min_fret.unwrap_or(defaults.melody_min_fret),
            hand_separation: self.hand_separation.unwrap_or(defaults.hand_separation),
        }
    }
}
