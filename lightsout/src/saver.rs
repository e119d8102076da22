//! Save and restore settings and statistics.
//!
//! Both are stored as JSON files in a data directory by using [`serde`].

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use lights_out::{settings::Settings, statistics::Statistics};
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot access {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path:?} is not valid: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads and writes the files in a single data directory.
pub struct Saver {
    settings_file: PathBuf,
    statistics_file: PathBuf,
}

impl Saver {
    pub fn new(data_dir: &Path) -> Self {
        let settings_file = data_dir.join("settings.json");
        let statistics_file = data_dir.join("statistics.json");
        debug!("Settings file: {settings_file:?}, statistics file: {statistics_file:?}");
        Self {
            settings_file,
            statistics_file,
        }
    }

    /// Returns [`None`] if nothing was saved yet.
    pub fn load_settings(&self) -> Result<Option<Settings>, SaveError> {
        load(&self.settings_file)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), SaveError> {
        save(&self.settings_file, settings)
    }

    /// Returns [`None`] if nothing was saved yet.
    pub fn load_statistics(&self) -> Result<Option<Statistics>, SaveError> {
        load(&self.statistics_file)
    }

    pub fn save_statistics(&self, statistics: &Statistics) -> Result<(), SaveError> {
        save(&self.statistics_file, statistics)
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SaveError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SaveError::Io {
                path: path.to_owned(),
                source,
            })
        }
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| SaveError::Json {
            path: path.to_owned(),
            source,
        })
}

fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), SaveError> {
    let io_error = |source: io::Error| SaveError::Io {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| SaveError::Json {
        path: path.to_owned(),
        source,
    })?;
    writer.flush().map_err(io_error)
}
