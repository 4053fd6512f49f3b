// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The store-backed accessor: a Jones-matrix view over a flat
//! [`ParamCache`], keyed by the canonical parameter names.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use marlu::c64;

use super::{AccessorError, SolutionRead, SolutionWrite};
use crate::naming;
use crate::params::ParamCache;
use crate::types::{JonesDTerm, JonesIndex, JonesJTerm, Pol};

/// Presents whole gain/leakage/bandpass terms on top of individually-named
/// complex parameters.
///
/// The cache is the only persistent state and it is explicitly shareable:
/// an accessor either owns a fresh store ([`new`](Self::new)) or holds a
/// caller-supplied handle ([`with_cache`](Self::with_cache)), in which case
/// every holder of the handle observes the same mutations. Validity is
/// presence: an element is valid exactly when its name is in the store, and
/// invalid elements are never written.
pub struct CachedCalSolutionAccessor {
    cache: Rc<RefCell<ParamCache>>,
}

impl CachedCalSolutionAccessor {
    /// An accessor over its own empty store.
    pub fn new() -> CachedCalSolutionAccessor {
        CachedCalSolutionAccessor {
            cache: Rc::new(RefCell::new(ParamCache::new())),
        }
    }

    /// An accessor over a shared store.
    pub fn with_cache(cache: Rc<RefCell<ParamCache>>) -> CachedCalSolutionAccessor {
        CachedCalSolutionAccessor { cache }
    }

    /// Direct read access to the underlying store.
    pub fn cache(&self) -> Ref<'_, ParamCache> {
        self.cache.borrow()
    }

    /// Direct write access to the underlying store.
    pub fn cache_mut(&self) -> RefMut<'_, ParamCache> {
        self.cache.borrow_mut()
    }

    /// Another handle onto the same store.
    pub fn share(&self) -> Rc<RefCell<ParamCache>> {
        Rc::clone(&self.cache)
    }
}

impl Default for CachedCalSolutionAccessor {
    fn default() -> CachedCalSolutionAccessor {
        CachedCalSolutionAccessor::new()
    }
}

impl SolutionRead for CachedCalSolutionAccessor {
    fn gain(&self, index: JonesIndex) -> JonesJTerm {
        let cache = self.cache.borrow();
        let g1 = cache.value(&naming::param_name(index, Pol::XX, false));
        let g2 = cache.value(&naming::param_name(index, Pol::YY, false));
        JonesJTerm {
            g1: g1.unwrap_or(c64::new(1.0, 0.0)),
            g1_valid: g1.is_some(),
            g2: g2.unwrap_or(c64::new(1.0, 0.0)),
            g2_valid: g2.is_some(),
        }
    }

    fn leakage(&self, index: JonesIndex) -> JonesDTerm {
        let cache = self.cache.borrow();
        let d12 = cache.value(&naming::param_name(index, Pol::XY, false));
        let d21 = cache.value(&naming::param_name(index, Pol::YX, false));
        JonesDTerm {
            d12: d12.unwrap_or(c64::new(0.0, 0.0)),
            d12_valid: d12.is_some(),
            d21: d21.unwrap_or(c64::new(0.0, 0.0)),
            d21_valid: d21.is_some(),
        }
    }

    fn bandpass(&self, index: JonesIndex, chan: u32) -> JonesJTerm {
        let cache = self.cache.borrow();
        let g1 = cache.value(&naming::add_channel_info(
            &naming::param_name(index, Pol::XX, true),
            chan,
        ));
        let g2 = cache.value(&naming::add_channel_info(
            &naming::param_name(index, Pol::YY, true),
            chan,
        ));
        JonesJTerm {
            g1: g1.unwrap_or(c64::new(1.0, 0.0)),
            g1_valid: g1.is_some(),
            g2: g2.unwrap_or(c64::new(1.0, 0.0)),
            g2_valid: g2.is_some(),
        }
    }
}

impl SolutionWrite for CachedCalSolutionAccessor {
    fn set_gain(&mut self, index: JonesIndex, gains: JonesJTerm) -> Result<(), AccessorError> {
        let mut cache = self.cache.borrow_mut();
        if gains.g1_valid {
            cache.set(&naming::param_name(index, Pol::XX, false), gains.g1);
        }
        if gains.g2_valid {
            cache.set(&naming::param_name(index, Pol::YY, false), gains.g2);
        }
        Ok(())
    }

    fn set_leakage(
        &mut self,
        index: JonesIndex,
        leakages: JonesDTerm,
    ) -> Result<(), AccessorError> {
        let mut cache = self.cache.borrow_mut();
        if leakages.d12_valid {
            cache.set(&naming::param_name(index, Pol::XY, false), leakages.d12);
        }
        if leakages.d21_valid {
            cache.set(&naming::param_name(index, Pol::YX, false), leakages.d21);
        }
        Ok(())
    }

    fn set_bandpass(
        &mut self,
        index: JonesIndex,
        bp: JonesJTerm,
        chan: u32,
    ) -> Result<(), AccessorError> {
        let mut cache = self.cache.borrow_mut();
        if bp.g1_valid {
            let name = naming::add_channel_info(&naming::param_name(index, Pol::XX, true), chan);
            cache.set(&name, bp.g1);
        }
        if bp.g2_valid {
            let name = naming::add_channel_info(&naming::param_name(index, Pol::YY, true), chan);
            cache.set(&name, bp.g2);
        }
        Ok(())
    }

    // The flat store holds elements individually, so the per-element writers
    // go straight to the named parameter instead of round-tripping a term.

    fn set_jones_element(
        &mut self,
        index: JonesIndex,
        pol: Pol,
        value: c64,
    ) -> Result<(), AccessorError> {
        self.cache
            .borrow_mut()
            .set(&naming::param_name(index, pol, false), value);
        Ok(())
    }

    fn set_bandpass_element(
        &mut self,
        index: JonesIndex,
        pol: Pol,
        chan: u32,
        value: c64,
    ) -> Result<(), AccessorError> {
        let name = naming::add_channel_info(&naming::param_name(index, pol, true), chan);
        self.cache.borrow_mut().set(&name, value);
        Ok(())
    }
}
