// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Jones-matrix-oriented views over calibration parameters.
//!
//! The [`SolutionRead`] and [`SolutionWrite`] traits split the surface that
//! calibration appliers consume from the surface that solvers populate.
//! Backends only supply the per-term accessors; the 2x2 matrix assembly,
//! validity logic and per-element updates are provided here so that every
//! backend behaves identically.

mod adapter;
mod cached;
mod error;
mod mem;
#[cfg(test)]
mod tests;

pub use adapter::ChanAdapter;
pub use cached::CachedCalSolutionAccessor;
pub use error::AccessorError;
pub use mem::MemCalSolutionAccessor;

use marlu::{c64, Jones};

use crate::types::{JonesDTerm, JonesIndex, JonesJTerm, Pol};

/// The read side of a calibration solution. Only the three term accessors
/// are backend-specific; the matrix assembly and validity queries are
/// provided on top of them.
///
/// A term that was never stored comes back with its validity flags false;
/// missing data is the expected "not yet calibrated" state, not an error.
pub trait SolutionRead {
    /// The frequency-independent gain pair for this antenna/beam.
    fn gain(&self, index: JonesIndex) -> JonesJTerm;

    /// The leakage pair for this antenna/beam.
    fn leakage(&self, index: JonesIndex) -> JonesDTerm;

    /// The bandpass gain pair for this antenna/beam at one spectral channel.
    fn bandpass(&self, index: JonesIndex, chan: u32) -> JonesJTerm;

    /// The full 2x2 Jones matrix
    /// `[[g1, d12*g1], [-(d21*g2), g2]]`,
    /// with defaults substituted for anything undefined so that a partially
    /// calibrated element degrades to a no-op correction rather than an
    /// error. See [`jones_and_validity`](SolutionRead::jones_and_validity)
    /// for the substitution rules.
    fn jones(&self, index: JonesIndex, chan: u32) -> Jones<f64> {
        self.jones_and_validity(index, chan).0
    }

    /// [`jones`](SolutionRead::jones) plus the flag that
    /// [`jones_valid`](SolutionRead::jones_valid) would report. All three
    /// share this one code path, so matrix and flag can never disagree.
    ///
    /// Only fully-valid term pairs contribute: if either gain element is
    /// invalid, both diagonal entries fall back to 1+0i, and the leakage
    /// products are used only when the leakage pair and the gain pair are
    /// all valid (otherwise the off-diagonal entries are 0+0i).
    fn jones_and_validity(&self, index: JonesIndex, _chan: u32) -> (Jones<f64>, bool) {
        let g = self.gain(index);
        let d = self.leakage(index);
        let gain_ok = g.g1_valid && g.g2_valid;
        let leakage_ok = d.d12_valid && d.d21_valid;

        let g1 = if gain_ok { g.g1 } else { c64::new(1.0, 0.0) };
        let g2 = if gain_ok { g.g2 } else { c64::new(1.0, 0.0) };
        let (j01, j10) = if gain_ok && leakage_ok {
            (d.d12 * g1, -(d.d21 * g2))
        } else {
            (c64::new(0.0, 0.0), c64::new(0.0, 0.0))
        };

        (Jones::from([g1, j01, j10, g2]), gain_ok && leakage_ok)
    }

    /// True when all four parameters behind the matrix (both gains, both
    /// leakages) are defined and valid.
    fn jones_valid(&self, index: JonesIndex, chan: u32) -> bool {
        self.jones_and_validity(index, chan).1
    }

    /// Stricter than [`jones_valid`](SolutionRead::jones_valid): the
    /// bandpass pair at `chan` must be valid as well.
    fn jones_all_valid(&self, index: JonesIndex, chan: u32) -> bool {
        let bp = self.bandpass(index, chan);
        self.jones_valid(index, chan) && bp.g1_valid && bp.g2_valid
    }
}

/// The write side. Elements whose validity flag is false are not stored, so
/// "explicitly invalid" and "never set" are indistinguishable on read-back.
pub trait SolutionWrite: SolutionRead {
    fn set_gain(&mut self, index: JonesIndex, gains: JonesJTerm) -> Result<(), AccessorError>;

    fn set_leakage(&mut self, index: JonesIndex, leakages: JonesDTerm)
        -> Result<(), AccessorError>;

    fn set_bandpass(
        &mut self,
        index: JonesIndex,
        bp: JonesJTerm,
        chan: u32,
    ) -> Result<(), AccessorError>;

    /// Update a single element of the frequency-independent Jones matrix,
    /// leaving the partner element of its term as it was.
    fn set_jones_element(
        &mut self,
        index: JonesIndex,
        pol: Pol,
        value: c64,
    ) -> Result<(), AccessorError> {
        match pol {
            Pol::XX => {
                let mut g = self.gain(index);
                g.g1 = value;
                g.g1_valid = true;
                self.set_gain(index, g)
            }
            Pol::YY => {
                let mut g = self.gain(index);
                g.g2 = value;
                g.g2_valid = true;
                self.set_gain(index, g)
            }
            Pol::XY => {
                let mut d = self.leakage(index);
                d.d12 = value;
                d.d12_valid = true;
                self.set_leakage(index, d)
            }
            Pol::YX => {
                let mut d = self.leakage(index);
                d.d21 = value;
                d.d21_valid = true;
                self.set_leakage(index, d)
            }
        }
    }

    /// Update a single bandpass element at one spectral channel. Bandpass
    /// terms carry parallel-hand gains, so only XX and YY can be routed
    /// through a term here; backends with element-wise storage may accept
    /// the leakage products too.
    fn set_bandpass_element(
        &mut self,
        index: JonesIndex,
        pol: Pol,
        chan: u32,
        value: c64,
    ) -> Result<(), AccessorError> {
        match pol {
            Pol::XX => {
                let mut bp = self.bandpass(index, chan);
                bp.g1 = value;
                bp.g1_valid = true;
                self.set_bandpass(index, bp, chan)
            }
            Pol::YY => {
                let mut bp = self.bandpass(index, chan);
                bp.g2 = value;
                bp.g2_valid = true;
                self.set_bandpass(index, bp, chan)
            }
            Pol::XY | Pol::YX => Err(AccessorError::BandpassLeakage { pol }),
        }
    }
}
