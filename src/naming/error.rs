// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with encoding and decoding parameter names.

use thiserror::Error;

use crate::types::JonesIndexError;

#[derive(Error, Debug)]
pub enum NameError {
    #[error("Parameter name should be in the form [bp.]{{gain|leakage}}.<product>.<antenna>.<beam>; got '{name}'")]
    BadForm { name: String },

    #[error("Only gain and leakage parameters are supported; got category '{category}' in '{name}'")]
    UnknownCategory { category: String, name: String },

    #[error("Unrecognised polarisation product '{product}' in '{name}'")]
    UnrecognisedProduct { product: String, name: String },

    #[error("Couldn't parse '{token}' as an antenna or beam ID in '{name}'")]
    BadIndex { token: String, name: String },

    #[error(transparent)]
    Index(#[from] JonesIndexError),

    #[error("Expected a dot-separated channel tag at the end of '{name}'")]
    NoChannelTag { name: String },

    #[error("Parameter name '{name}' ends with a dot")]
    TrailingDot { name: String },

    #[error("Couldn't parse '{token}' as a channel number in '{name}'")]
    BadChannel { token: String, name: String },
}
