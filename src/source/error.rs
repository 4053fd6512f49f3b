// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with building and using solution sources.

use thiserror::Error;

use crate::parset::ParsetError;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unknown calibration source type '{got}'; supported types are: {supported}")]
    UnknownSourceType { got: String, supported: String },

    #[error("No calibration solution with ID {id}; this source only has solution 0")]
    UnknownId { id: i64 },

    #[error(transparent)]
    Parset(#[from] ParsetError),

    #[error("Couldn't read config file {file}: {err}")]
    ConfigIo { file: String, err: std::io::Error },

    #[error("Couldn't decode toml structure from {file}:\n{err}")]
    ConfigToml { file: String, err: toml::de::Error },
}
