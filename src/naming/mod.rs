// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameter-naming scheme.
//!
//! Every calibratable term is stored under a canonical string name of the
//! form `[bp.]{gain|leakage}.{g11|g22|d12|d21}.<antenna>.<beam>`, with a
//! trailing `.<channel>` appended for per-channel bandpass parameters. The
//! same names are used wherever the parameters travel (the in-memory cache,
//! parset files), so encoding and decoding must round-trip exactly.

mod error;

pub use error::NameError;

use crate::types::{JonesIndex, Pol};

/// The literal that marks a frequency-dependent (bandpass) parameter.
pub const BP_PREFIX: &str = "bp.";

/// Form the canonical name for a parameter.
///
/// XX and YY map to the parallel-hand gains g11 and g22; XY and YX map to
/// the cross-hand leakages d12 and d21. Set `bp` for the bandpass flavour of
/// the parameter.
pub fn param_name(index: JonesIndex, pol: Pol, bp: bool) -> String {
    let (category, product) = match pol {
        Pol::XX => ("gain", "g11"),
        Pol::YY => ("gain", "g22"),
        Pol::XY => ("leakage", "d12"),
        Pol::YX => ("leakage", "d21"),
    };
    format!(
        "{}{category}.{product}.{}.{}",
        if bp { BP_PREFIX } else { "" },
        index.antenna(),
        index.beam()
    )
}

/// The reverse of [`param_name`]: recover the antenna/beam index and the
/// polarisation product from a name. A bandpass prefix is ignored if
/// present; use [`bp_param`] to query it. Malformed names fail outright,
/// never partially.
pub fn parse_param(name: &str) -> Result<(JonesIndex, Pol), NameError> {
    // Prefix detection is a pure literal test, not a grammar check.
    let stripped = name.strip_prefix(BP_PREFIX).unwrap_or(name);

    let tokens: Vec<&str> = stripped.split('.').collect();
    if tokens.len() != 4 || tokens.iter().any(|t| t.is_empty()) {
        return Err(NameError::BadForm {
            name: name.to_string(),
        });
    }

    let pol = match (tokens[0], tokens[1]) {
        ("gain", "g11") => Pol::XX,
        ("gain", "g22") => Pol::YY,
        ("leakage", "d12") => Pol::XY,
        ("leakage", "d21") => Pol::YX,
        ("gain", product) | ("leakage", product) => {
            return Err(NameError::UnrecognisedProduct {
                product: product.to_string(),
                name: name.to_string(),
            })
        }
        (category, _) => {
            return Err(NameError::UnknownCategory {
                category: category.to_string(),
                name: name.to_string(),
            })
        }
    };

    // The codec itself doesn't bound the IDs; the index conversion does.
    let antenna: u32 = parse_id(tokens[2], name)?;
    let beam: u32 = parse_id(tokens[3], name)?;
    let index = JonesIndex::try_from((antenna, beam))?;

    Ok((index, pol))
}

fn parse_id(token: &str, name: &str) -> Result<u32, NameError> {
    token.parse().map_err(|_| NameError::BadIndex {
        token: token.to_string(),
        name: name.to_string(),
    })
}

/// Does this name denote a bandpass parameter? A pure prefix test; any name
/// that happens to start with the literal counts.
pub fn bp_param(name: &str) -> bool {
    name.starts_with(BP_PREFIX)
}

/// Append a spectral channel to a name. Purely textual; the caller is
/// responsible for `name` being a legal parameter name.
pub fn add_channel_info(name: &str, chan: u32) -> String {
    format!("{name}.{chan}")
}

/// The reverse of [`add_channel_info`]: split off the channel after the last
/// dot and return it with the base name. No check is made that the remaining
/// base is itself a legal parameter name.
pub fn extract_channel_info(name: &str) -> Result<(u32, String), NameError> {
    let (base, chan) = name.rsplit_once('.').ok_or_else(|| NameError::NoChannelTag {
        name: name.to_string(),
    })?;
    if chan.is_empty() {
        return Err(NameError::TrailingDot {
            name: name.to_string(),
        });
    }
    let chan: u32 = chan.parse().map_err(|_| NameError::BadChannel {
        token: chan.to_string(),
        name: name.to_string(),
    })?;
    Ok((chan, base.to_string()))
}
