// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parset-format persistence for calibration parameters.
//!
//! One parameter per line, `name = [re, im]` (a bare real is also accepted
//! on read). Keys are the canonical parameter names, optionally
//! channel-tagged for bandpass entries; anything else is rejected with the
//! line it came from. Blank lines and `#` comments are skipped.

mod error;
#[cfg(test)]
mod tests;

pub use error::ParsetError;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use marlu::c64;
use num_complex::Complex;

use crate::naming::{self, NameError};
use crate::params::ParamCache;

/// Read a parameter cache from a parset file.
pub fn read<P: AsRef<Path>>(file: P) -> Result<ParamCache, ParsetError> {
    let file = file.as_ref();
    let reader = BufReader::new(File::open(file)?);
    let mut cache = ParamCache::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = trimmed.split_once('=').ok_or_else(|| ParsetError::NoEquals {
            line_num,
            line: trimmed.to_string(),
        })?;
        let key = key.trim();
        validate_key(key).map_err(|err| ParsetError::BadKey { line_num, err })?;
        let value = value.trim();
        let value = parse_complex(value).ok_or_else(|| ParsetError::BadValue {
            line_num,
            value: value.to_string(),
        })?;
        cache.set(key, value);
    }

    debug!(
        "Read {} calibration parameters from {}",
        cache.len(),
        file.display()
    );
    Ok(cache)
}

/// Write a parameter cache as a parset file, one entry per line in
/// enumeration order. A written file reads back equal.
pub fn write<P: AsRef<Path>>(file: P, cache: &ParamCache) -> Result<(), ParsetError> {
    let file = file.as_ref();
    let mut out = BufWriter::new(File::create(file)?);
    for (name, value) in cache.iter() {
        writeln!(out, "{name} = [{}, {}]", value.re, value.im)?;
    }
    out.flush()?;

    debug!(
        "Wrote {} calibration parameters to {}",
        cache.len(),
        file.display()
    );
    Ok(())
}

/// A legal key is a parameter name, or a channel-tagged bandpass name.
fn validate_key(key: &str) -> Result<(), NameError> {
    match naming::parse_param(key) {
        Ok(_) => Ok(()),
        Err(e) => {
            if naming::bp_param(key) {
                let (_chan, base) = naming::extract_channel_info(key)?;
                naming::parse_param(&base).map(|_| ())
            } else {
                Err(e)
            }
        }
    }
}

/// `[re, im]`, or a bare real with zero imaginary part.
fn parse_complex(s: &str) -> Option<c64> {
    if let Some(stripped) = s.strip_prefix('[') {
        let inner = stripped.strip_suffix(']')?;
        let (re, im) = inner.split_once(',')?;
        Some(Complex::new(re.trim().parse().ok()?, im.trim().parse().ok()?))
    } else {
        Some(Complex::new(s.parse().ok()?, 0.0))
    }
}
