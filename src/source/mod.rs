// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where calibration solutions come from.
//!
//! A solution source hands out accessors onto its parameter store and does
//! the solution-ID bookkeeping. The backends here (in-memory, parset file)
//! each manage a single, time-independent solution; the ID plumbing exists
//! so that consumers written against multi-solution stores work unchanged.

mod config;
mod error;

pub use config::CalAccessConfig;
pub use error::SourceError;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use itertools::Itertools;
use log::{info, warn};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::accessor::CachedCalSolutionAccessor;
use crate::params::ParamCache;
use crate::parset;

lazy_static::lazy_static! {
    pub(crate) static ref SOURCE_TYPES: String = SourceType::iter().join(", ");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum SourceType {
    /// Solutions held only in memory.
    #[strum(serialize = "memory")]
    Memory,

    /// Solutions persisted to a parset file.
    #[strum(serialize = "parset")]
    Parset,
}

#[derive(Debug)]
enum Backend {
    Memory,
    Parset { file: PathBuf },
}

/// The closed set of solution-source backends behind one API.
#[derive(Debug)]
pub struct CalSolutionSource {
    backend: Backend,
    cache: Rc<RefCell<ParamCache>>,
    first_solution: bool,
}

impl CalSolutionSource {
    /// A source over a fresh, empty in-memory store.
    pub fn memory() -> CalSolutionSource {
        CalSolutionSource {
            backend: Backend::Memory,
            cache: Rc::new(RefCell::new(ParamCache::new())),
            first_solution: true,
        }
    }

    /// A source persisted to a parset file. The file is loaded when it
    /// exists; otherwise the source starts empty and the file appears on
    /// the first [`flush`](Self::flush).
    pub fn parset<P: Into<PathBuf>>(file: P) -> Result<CalSolutionSource, SourceError> {
        let file = file.into();
        let cache = if file.exists() {
            parset::read(&file)?
        } else {
            info!(
                "Parset file {} doesn't exist yet; starting with an empty solution",
                file.display()
            );
            ParamCache::new()
        };
        Ok(CalSolutionSource {
            backend: Backend::Parset { file },
            cache: Rc::new(RefCell::new(cache)),
            first_solution: true,
        })
    }

    /// The factory: build the backend a config asks for.
    pub fn from_config(config: &CalAccessConfig) -> Result<CalSolutionSource, SourceError> {
        let source_type =
            SourceType::from_str(&config.source).map_err(|_| SourceError::UnknownSourceType {
                got: config.source.clone(),
                supported: SOURCE_TYPES.clone(),
            })?;
        match source_type {
            SourceType::Memory => {
                info!("Using in-memory calibration solutions");
                Ok(CalSolutionSource::memory())
            }
            SourceType::Parset => {
                info!(
                    "Using calibration solutions from parset file {}",
                    config.parset.display()
                );
                CalSolutionSource::parset(config.parset.clone())
            }
        }
    }

    pub fn source_type(&self) -> SourceType {
        match self.backend {
            Backend::Memory => SourceType::Memory,
            Backend::Parset { .. } => SourceType::Parset,
        }
    }

    /// The ID of the most recent solution. These backends hold exactly one.
    pub fn most_recent_solution(&self) -> i64 {
        0
    }

    /// The ID of the solution valid at `time` (seconds since MJD 0). With a
    /// single time-independent solution, every time maps to it.
    pub fn solution_id(&self, _time: f64) -> i64 {
        0
    }

    /// An ID under which to store a new solution. Always 0 here; asking
    /// more than once means the previous solution gets overwritten, which
    /// is worth a warning in case a time-dependent source was intended.
    pub fn new_solution_id(&mut self, time: f64) -> i64 {
        if self.first_solution {
            self.first_solution = false;
        } else {
            warn!(
                "This source holds a single calibration solution; the solution for time {time} \
                 will overwrite the previous one"
            );
        }
        0
    }

    /// An accessor onto the solution with the given ID. The accessor shares
    /// the source's store, so writes through it are what
    /// [`flush`](Self::flush) persists.
    pub fn solution(&self, id: i64) -> Result<CachedCalSolutionAccessor, SourceError> {
        if id != 0 {
            return Err(SourceError::UnknownId { id });
        }
        Ok(CachedCalSolutionAccessor::with_cache(Rc::clone(&self.cache)))
    }

    /// Persist the store. A no-op for memory sources.
    pub fn flush(&self) -> Result<(), SourceError> {
        match &self.backend {
            Backend::Memory => Ok(()),
            Backend::Parset { file } => {
                parset::write(file, &self.cache.borrow())?;
                Ok(())
            }
        }
    }
}
