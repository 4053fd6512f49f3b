// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading or writing parset files.

use thiserror::Error;

use crate::naming::NameError;

#[derive(Error, Debug)]
pub enum ParsetError {
    #[error("Line {line_num} of the parset has no '=' separator: '{line}'")]
    NoEquals { line_num: usize, line: String },

    #[error("Line {line_num} of the parset isn't keyed by a calibration parameter name: {err}")]
    BadKey {
        line_num: usize,
        #[source]
        err: NameError,
    },

    #[error("Line {line_num} of the parset has an unparseable complex value '{value}'")]
    BadValue { line_num: usize, value: String },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
