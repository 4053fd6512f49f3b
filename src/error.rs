// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all calaccess-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalAccessError {
    #[error("{0}")]
    Index(#[from] crate::types::JonesIndexError),

    #[error("{0}")]
    Name(#[from] crate::naming::NameError),

    #[error("{0}")]
    Accessor(#[from] crate::accessor::AccessorError),

    #[error("{0}")]
    Parset(#[from] crate::parset::ParsetError),

    #[error("{0}")]
    Source(#[from] crate::source::SourceError),
}
