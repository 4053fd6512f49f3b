// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Configuration for the solution-source factory.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use super::SourceError;

/// Which backend to use and where it lives. Loadable from a TOML file;
/// everything has a default so an empty config is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalAccessConfig {
    /// Backend selector; one of the [`SourceType`](super::SourceType)
    /// names.
    #[serde(default = "default_source")]
    pub source: String,

    /// The file a parset-backed source persists to.
    #[serde(default = "default_parset_file")]
    pub parset: PathBuf,
}

fn default_source() -> String {
    "parset".to_string()
}

fn default_parset_file() -> PathBuf {
    PathBuf::from("result.dat")
}

impl Default for CalAccessConfig {
    fn default() -> CalAccessConfig {
        CalAccessConfig {
            source: default_source(),
            parset: default_parset_file(),
        }
    }
}

impl CalAccessConfig {
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<CalAccessConfig, SourceError> {
        let file = file.as_ref();
        debug!("Reading calibration-access config from {}", file.display());
        let contents = std::fs::read_to_string(file).map_err(|err| SourceError::ConfigIo {
            file: file.display().to_string(),
            err,
        })?;
        toml::from_str(&contents).map_err(|err| SourceError::ConfigToml {
            file: file.display().to_string(),
            err,
        })
    }
}
