// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with writing calibration terms.

use thiserror::Error;

use crate::types::Pol;

#[derive(Error, Debug)]
pub enum AccessorError {
    #[error("{axis} index {got} is out of range for this accessor (size {size})")]
    IndexOutOfRange {
        axis: &'static str,
        got: usize,
        size: usize,
    },

    #[error("Bandpass terms carry parallel-hand gains only; {pol} has no term element to update")]
    BandpassLeakage { pol: Pol },
}
