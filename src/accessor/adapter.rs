// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An adapter that shifts the spectral channel of bandpass requests by a
//! fixed offset. Handy when a consumer works in a sub-band's local channel
//! numbering but the solution was solved over the full band.

use super::SolutionRead;
use crate::types::{JonesDTerm, JonesIndex, JonesJTerm};

pub struct ChanAdapter<A> {
    inner: A,
    offset: u32,
}

impl<A> ChanAdapter<A> {
    /// Wrap `inner` so that a request for channel `c` is served from its
    /// channel `c + offset`.
    pub fn new(inner: A, offset: u32) -> ChanAdapter<A> {
        ChanAdapter { inner, offset }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: SolutionRead> SolutionRead for ChanAdapter<A> {
    fn gain(&self, index: JonesIndex) -> JonesJTerm {
        self.inner.gain(index)
    }

    fn leakage(&self, index: JonesIndex) -> JonesDTerm {
        self.inner.leakage(index)
    }

    fn bandpass(&self, index: JonesIndex, chan: u32) -> JonesJTerm {
        self.inner.bandpass(index, chan + self.offset)
    }
}
