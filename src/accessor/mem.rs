// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cube-backed accessor: fixed-shape arrays of terms with parallel
//! validity cubes. Suited to dense solutions where every antenna/beam is
//! expected to be present, at the cost of declaring the shape up front.

use marlu::c64;
use ndarray::Array3;

use super::{AccessorError, SolutionRead, SolutionWrite};
use crate::types::{JonesDTerm, JonesIndex, JonesJTerm};

/// Gains and leakages live in `(2, nant, nbeam)` cubes (the leading axis
/// separates the two elements of a pair); bandpasses in
/// `(2 * nchan, nant, nbeam)`, channel-major. Reads outside the declared
/// shape degrade to invalid terms; writes outside it fail.
pub struct MemCalSolutionAccessor {
    gains: Array3<c64>,
    gains_valid: Array3<bool>,
    leakages: Array3<c64>,
    leakages_valid: Array3<bool>,
    bandpasses: Array3<c64>,
    bandpasses_valid: Array3<bool>,
    nchan: usize,
}

impl MemCalSolutionAccessor {
    pub fn new(nant: usize, nbeam: usize, nchan: usize) -> MemCalSolutionAccessor {
        MemCalSolutionAccessor {
            gains: Array3::from_elem((2, nant, nbeam), c64::new(1.0, 0.0)),
            gains_valid: Array3::from_elem((2, nant, nbeam), false),
            leakages: Array3::from_elem((2, nant, nbeam), c64::new(0.0, 0.0)),
            leakages_valid: Array3::from_elem((2, nant, nbeam), false),
            bandpasses: Array3::from_elem((2 * nchan, nant, nbeam), c64::new(1.0, 0.0)),
            bandpasses_valid: Array3::from_elem((2 * nchan, nant, nbeam), false),
            nchan,
        }
    }

    /// The declared shape: (antennas, beams, channels).
    pub fn shape(&self) -> (usize, usize, usize) {
        let dim = self.gains.dim();
        (dim.1, dim.2, self.nchan)
    }

    /// In-range antenna/beam position, or None so reads can degrade.
    fn position(&self, index: JonesIndex) -> Option<(usize, usize)> {
        let ant = usize::try_from(index.antenna()).ok()?;
        let beam = usize::try_from(index.beam()).ok()?;
        let (nant, nbeam, _) = self.shape();
        (ant < nant && beam < nbeam).then_some((ant, beam))
    }

    /// Like [`position`](Self::position), but an error for writes.
    fn checked_position(&self, index: JonesIndex) -> Result<(usize, usize), AccessorError> {
        let (nant, nbeam, _) = self.shape();
        let ant = usize::try_from(index.antenna()).unwrap_or(usize::MAX);
        if ant >= nant {
            return Err(AccessorError::IndexOutOfRange {
                axis: "antenna",
                got: ant,
                size: nant,
            });
        }
        let beam = usize::try_from(index.beam()).unwrap_or(usize::MAX);
        if beam >= nbeam {
            return Err(AccessorError::IndexOutOfRange {
                axis: "beam",
                got: beam,
                size: nbeam,
            });
        }
        Ok((ant, beam))
    }

    fn checked_chan(&self, chan: u32) -> Result<usize, AccessorError> {
        let chan = chan as usize;
        if chan >= self.nchan {
            return Err(AccessorError::IndexOutOfRange {
                axis: "channel",
                got: chan,
                size: self.nchan,
            });
        }
        Ok(chan)
    }
}

impl SolutionRead for MemCalSolutionAccessor {
    fn gain(&self, index: JonesIndex) -> JonesJTerm {
        match self.position(index) {
            Some((ant, beam)) => JonesJTerm {
                g1: self.gains[(0, ant, beam)],
                g1_valid: self.gains_valid[(0, ant, beam)],
                g2: self.gains[(1, ant, beam)],
                g2_valid: self.gains_valid[(1, ant, beam)],
            },
            None => JonesJTerm::default(),
        }
    }

    fn leakage(&self, index: JonesIndex) -> JonesDTerm {
        match self.position(index) {
            Some((ant, beam)) => JonesDTerm {
                d12: self.leakages[(0, ant, beam)],
                d12_valid: self.leakages_valid[(0, ant, beam)],
                d21: self.leakages[(1, ant, beam)],
                d21_valid: self.leakages_valid[(1, ant, beam)],
            },
            None => JonesDTerm::default(),
        }
    }

    fn bandpass(&self, index: JonesIndex, chan: u32) -> JonesJTerm {
        let chan = chan as usize;
        match self.position(index) {
            Some((ant, beam)) if chan < self.nchan => JonesJTerm {
                g1: self.bandpasses[(2 * chan, ant, beam)],
                g1_valid: self.bandpasses_valid[(2 * chan, ant, beam)],
                g2: self.bandpasses[(2 * chan + 1, ant, beam)],
                g2_valid: self.bandpasses_valid[(2 * chan + 1, ant, beam)],
            },
            _ => JonesJTerm::default(),
        }
    }
}

impl SolutionWrite for MemCalSolutionAccessor {
    fn set_gain(&mut self, index: JonesIndex, gains: JonesJTerm) -> Result<(), AccessorError> {
        let (ant, beam) = self.checked_position(index)?;
        if gains.g1_valid {
            self.gains[(0, ant, beam)] = gains.g1;
            self.gains_valid[(0, ant, beam)] = true;
        }
        if gains.g2_valid {
            self.gains[(1, ant, beam)] = gains.g2;
            self.gains_valid[(1, ant, beam)] = true;
        }
        Ok(())
    }

    fn set_leakage(
        &mut self,
        index: JonesIndex,
        leakages: JonesDTerm,
    ) -> Result<(), AccessorError> {
        let (ant, beam) = self.checked_position(index)?;
        if leakages.d12_valid {
            self.leakages[(0, ant, beam)] = leakages.d12;
            self.leakages_valid[(0, ant, beam)] = true;
        }
        if leakages.d21_valid {
            self.leakages[(1, ant, beam)] = leakages.d21;
            self.leakages_valid[(1, ant, beam)] = true;
        }
        Ok(())
    }

    fn set_bandpass(
        &mut self,
        index: JonesIndex,
        bp: JonesJTerm,
        chan: u32,
    ) -> Result<(), AccessorError> {
        let (ant, beam) = self.checked_position(index)?;
        let chan = self.checked_chan(chan)?;
        if bp.g1_valid {
            self.bandpasses[(2 * chan, ant, beam)] = bp.g1;
            self.bandpasses_valid[(2 * chan, ant, beam)] = true;
        }
        if bp.g2_valid {
            self.bandpasses[(2 * chan + 1, ant, beam)] = bp.g2;
            self.bandpasses_valid[(2 * chan + 1, ant, beam)] = true;
        }
        Ok(())
    }
}
