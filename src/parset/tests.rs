// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write as _;

use approx::assert_abs_diff_eq;
use indoc::indoc;
use marlu::c64;

use super::*;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn read_a_simple_parset() {
    let file = write_temp(indoc! {"
        # calibration result
        gain.g11.0.0 = [1.1, 0.1]
        gain.g22.0.0 = [1.05, -0.1]

        leakage.d12.0.0 = [0.13, -0.12]
        leakage.d21.0.0 = [-0.14, 0.11]
        bp.gain.g11.0.0.15 = [0.9, 0.0]
        gain.g11.1.0 = 2.5
    "});

    let cache = read(file.path()).unwrap();
    assert_eq!(cache.len(), 6);
    assert_abs_diff_eq!(
        cache.value("gain.g11.0.0").unwrap(),
        c64::new(1.1, 0.1),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        cache.value("bp.gain.g11.0.0.15").unwrap(),
        c64::new(0.9, 0.0),
        epsilon = 1e-12
    );
    // The bare-real form gets a zero imaginary part.
    assert_abs_diff_eq!(
        cache.value("gain.g11.1.0").unwrap(),
        c64::new(2.5, 0.0),
        epsilon = 1e-12
    );
}

#[test]
fn written_files_read_back_equal() {
    let mut cache = ParamCache::new();
    cache.set("gain.g11.3.4", c64::new(1.25, -0.5));
    cache.set("gain.g22.3.4", c64::new(0.75, 0.25));
    cache.set("leakage.d12.3.4", c64::new(0.01, 0.0));
    cache.set("bp.gain.g11.3.4.0", c64::new(1.0, 0.0));
    cache.set("bp.gain.g22.3.4.19", c64::new(0.875, 0.125));

    let file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    write(file.path(), &cache).unwrap();
    let from_disk = read(file.path()).unwrap();

    assert_eq!(from_disk.len(), cache.len());
    for (name, value) in cache.iter() {
        assert_eq!(from_disk.value(name), Some(value), "{name}");
    }
}

#[test]
fn malformed_lines_carry_their_line_number() {
    let file = write_temp(indoc! {"
        gain.g11.0.0 = [1.1, 0.1]
        this line has no separator
    "});
    assert!(matches!(
        read(file.path()),
        Err(ParsetError::NoEquals { line_num: 2, .. })
    ));

    let file = write_temp("gain.g11.0.0 = [not, complex]\n");
    assert!(matches!(
        read(file.path()),
        Err(ParsetError::BadValue { line_num: 1, .. })
    ));
}

#[test]
fn keys_must_be_parameter_names() {
    let file = write_temp("frequency.start = [1.4e9, 0.0]\n");
    assert!(matches!(
        read(file.path()),
        Err(ParsetError::BadKey { line_num: 1, .. })
    ));

    // A channel tag is only legal on a bandpass key.
    let file = write_temp("gain.g11.0.0.15 = [1.0, 0.0]\n");
    assert!(matches!(
        read(file.path()),
        Err(ParsetError::BadKey { line_num: 1, .. })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read(dir.path().join("nonexistent.parset"));
    assert!(matches!(result, Err(ParsetError::IO(_))));
}
