// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Access layers for radio-interferometry calibration solutions.

Per-antenna/per-beam Jones-matrix terms (gains, cross-polarisation
leakages, bandpasses) are stored as individually-named complex parameters
in a flat cache; the accessors here reassemble them into 2x2 Jones
matrices with validity tracking, and the naming scheme is reversible so
the same strings serve as the interchange format when a cache is
persisted.
 */

pub mod accessor;
pub mod error;
pub mod naming;
pub mod params;
pub mod parset;
pub mod source;
pub mod types;

// Re-exports.
pub use accessor::{
    CachedCalSolutionAccessor, ChanAdapter, MemCalSolutionAccessor, SolutionRead, SolutionWrite,
};
pub use error::CalAccessError;
pub use params::ParamCache;
pub use source::{CalAccessConfig, CalSolutionSource, SourceType};
pub use types::{JonesDTerm, JonesIndex, JonesJTerm, Pol};

// External re-exports.
pub use marlu::{c64, Jones};
