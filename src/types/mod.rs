// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Value types shared by the calibration accessors: the antenna/beam index
//! that identifies a calibratable element, the gain and leakage term pairs
//! with their validity flags, and the polarisation products that label the
//! elements of a Jones matrix.


use marlu::c64;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Identifies a single calibratable element: one antenna/beam combination.
///
/// Both indices fit in a signed 16-bit integer; that bound comes from the
/// storage formats the parameters end up in. Ordering is antenna-major,
/// then beam, so the index can be used directly as an ordered map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JonesIndex {
    antenna: i16,
    beam: i16,
}

impl JonesIndex {
    /// Make an index from already-vetted IDs. No range check is done here;
    /// use the `TryFrom<(u32, u32)>` impl when the IDs come from outside.
    pub const fn new(antenna: i16, beam: i16) -> JonesIndex {
        JonesIndex { antenna, beam }
    }

    pub const fn antenna(self) -> i16 {
        self.antenna
    }

    pub const fn beam(self) -> i16 {
        self.beam
    }
}

impl TryFrom<(u32, u32)> for JonesIndex {
    type Error = JonesIndexError;

    fn try_from((antenna, beam): (u32, u32)) -> Result<JonesIndex, JonesIndexError> {
        if antenna > i16::MAX as u32 {
            return Err(JonesIndexError::Antenna(antenna));
        }
        if beam > i16::MAX as u32 {
            return Err(JonesIndexError::Beam(beam));
        }
        Ok(JonesIndex {
            antenna: antenna as i16,
            beam: beam as i16,
        })
    }
}

#[derive(Error, Debug)]
pub enum JonesIndexError {
    #[error("Antenna ID {0} doesn't fit in a Jones index; it must be less than 32768")]
    Antenna(u32),

    #[error("Beam ID {0} doesn't fit in a Jones index; it must be less than 32768")]
    Beam(u32),
}

/// A pair of parallel-hand complex gains (g1 for X, g2 for Y), each with its
/// own validity flag. Gains and bandpass terms are both carried this way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JonesJTerm {
    pub g1: c64,
    pub g1_valid: bool,
    pub g2: c64,
    pub g2_valid: bool,
}

impl JonesJTerm {
    pub fn new(g1: c64, g1_valid: bool, g2: c64, g2_valid: bool) -> JonesJTerm {
        JonesJTerm {
            g1,
            g1_valid,
            g2,
            g2_valid,
        }
    }
}

impl Default for JonesJTerm {
    /// Unit gains, both flagged invalid.
    fn default() -> JonesJTerm {
        JonesJTerm {
            g1: c64::new(1.0, 0.0),
            g1_valid: false,
            g2: c64::new(1.0, 0.0),
            g2_valid: false,
        }
    }
}

/// A pair of cross-hand leakage terms (d12 and d21), each with its own
/// validity flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JonesDTerm {
    pub d12: c64,
    pub d12_valid: bool,
    pub d21: c64,
    pub d21_valid: bool,
}

impl JonesDTerm {
    pub fn new(d12: c64, d12_valid: bool, d21: c64, d21_valid: bool) -> JonesDTerm {
        JonesDTerm {
            d12,
            d12_valid,
            d21,
            d21_valid,
        }
    }
}

impl Default for JonesDTerm {
    /// Zero leakages, both flagged invalid.
    fn default() -> JonesDTerm {
        JonesDTerm {
            d12: c64::new(0.0, 0.0),
            d12_valid: false,
            d21: c64::new(0.0, 0.0),
            d21_valid: false,
        }
    }
}

/// The polarisation products that label the elements of a 2x2 Jones matrix:
/// the parallel-hand gains (XX -> g11, YY -> g22) and the cross-hand
/// leakages (XY -> d12, YX -> d21). Nothing else is calibratable here, so
/// nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Pol {
    XX,
    XY,
    YX,
    YY,
}
