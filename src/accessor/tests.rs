// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use marlu::{c64, Jones};

use super::*;
use crate::naming;
use crate::params::ParamCache;
use crate::types::{JonesDTerm, JonesIndex, JonesJTerm, Pol};

/// 5 antennas x 4 beams, all four Jones elements plus a flat 20-channel
/// bandpass for the parallel hands: 5 x 4 x (4 + 2 x 20) = 880 parameters.
fn populate(acc: &mut impl SolutionWrite) {
    for ant in 0..5 {
        for beam in 0..4 {
            let index = JonesIndex::new(ant, beam);
            let tag = f64::from(ant) / 100.0 + f64::from(beam) / 1000.0;
            acc.set_jones_element(index, Pol::XX, c64::new(1.1 + tag, 0.1))
                .unwrap();
            acc.set_jones_element(index, Pol::YY, c64::new(1.1, -0.1 - tag))
                .unwrap();
            acc.set_jones_element(index, Pol::XY, c64::new(0.1 + tag, -0.1))
                .unwrap();
            acc.set_jones_element(index, Pol::YX, c64::new(-0.1, 0.1 + tag))
                .unwrap();

            for chan in 0..20 {
                acc.set_bandpass_element(index, Pol::XX, chan, c64::new(1.0, 0.0))
                    .unwrap();
                acc.set_bandpass_element(index, Pol::YY, chan, c64::new(1.0, 0.0))
                    .unwrap();
            }
        }
    }
}

fn check_populated(acc: &impl SolutionRead) {
    for ant in 0..5 {
        for beam in 0..4 {
            let index = JonesIndex::new(ant, beam);
            let tag = f64::from(ant) / 100.0 + f64::from(beam) / 1000.0;
            let g11 = c64::new(1.1 + tag, 0.1);
            let g22 = c64::new(1.1, -0.1 - tag);
            let d12 = c64::new(0.1 + tag, -0.1);
            let d21 = c64::new(-0.1, 0.1 + tag);

            assert!(acc.jones_valid(index, 0));
            assert!(acc.jones_all_valid(index, 0));
            let jones = acc.jones(index, 0);
            assert_abs_diff_eq!(
                jones,
                Jones::from([g11, d12 * g11, -(d21 * g22), g22]),
                epsilon = 1e-12
            );
            // The matrix is frequency-independent; the channel only selects
            // the bandpass terms.
            assert_abs_diff_eq!(acc.jones(index, 10), jones, epsilon = 1e-12);

            let gain = acc.gain(index);
            assert!(gain.g1_valid && gain.g2_valid);
            assert_abs_diff_eq!(gain.g1, g11, epsilon = 1e-12);
            assert_abs_diff_eq!(gain.g2, g22, epsilon = 1e-12);

            let leakage = acc.leakage(index);
            assert!(leakage.d12_valid && leakage.d21_valid);
            assert_abs_diff_eq!(leakage.d12, d12, epsilon = 1e-12);
            assert_abs_diff_eq!(leakage.d21, d21, epsilon = 1e-12);

            for chan in 0..20 {
                let bp = acc.bandpass(index, chan);
                assert!(bp.g1_valid && bp.g2_valid);
                assert_abs_diff_eq!(bp.g1, c64::new(1.0, 0.0), epsilon = 1e-12);
                assert_abs_diff_eq!(bp.g2, c64::new(1.0, 0.0), epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn cached_write_then_read() {
    let mut acc = CachedCalSolutionAccessor::new();
    populate(&mut acc);
    assert_eq!(acc.cache().len(), 880);
    check_populated(&acc);
}

#[test]
fn shared_cache_reference_semantics() {
    let store = Rc::new(RefCell::new(ParamCache::new()));
    let mut acc = CachedCalSolutionAccessor::with_cache(Rc::clone(&store));
    populate(&mut acc);
    assert_eq!(acc.cache().len(), 880);
    assert_eq!(store.borrow().len(), 880);
    check_populated(&acc);

    // Every name is visible with the same value through both handles.
    for (name, value) in store.borrow().iter() {
        assert!(acc.cache().has(name));
        assert_eq!(acc.cache().value(name), Some(value));
    }

    // Mutations through a second accessor over the same store are seen by
    // the first, and vice versa.
    let mut acc2 = CachedCalSolutionAccessor::with_cache(acc.share());
    let index = JonesIndex::new(4, 3);
    acc2.set_jones_element(index, Pol::XX, c64::new(9.0, 9.0))
        .unwrap();
    assert_eq!(acc.gain(index).g1, c64::new(9.0, 9.0));
}

#[test]
fn partially_defined_terms_fall_back_to_defaults() {
    let index = JonesIndex::new(0, 0);
    let mut acc = CachedCalSolutionAccessor::new();

    // Only the valid elements land in the store.
    let gains = JonesJTerm::new(c64::new(1.1, 0.1), true, c64::new(1.05, -0.1), false);
    assert_eq!(acc.cache().len(), 0);
    acc.set_gain(index, gains).unwrap();
    assert_eq!(acc.cache().len(), 1);
    let leakages = JonesDTerm::new(c64::new(0.13, -0.12), false, c64::new(-0.14, 0.11), true);
    acc.set_leakage(index, leakages).unwrap();
    assert_eq!(acc.cache().len(), 2);

    assert!(!acc.jones_valid(index, 0));
    assert!(!acc.jones_all_valid(index, 0));

    // Both gains have to be valid before either is used, so even the valid
    // g1 is replaced by one; the lone valid d21 is likewise zeroed.
    let jones = acc.jones(index, 0);
    assert_abs_diff_eq!(jones, Jones::identity(), epsilon = 1e-12);

    // Removing the two stored parameters behaves exactly like never having
    // written them.
    let g11_name = naming::param_name(index, Pol::XX, false);
    let d21_name = naming::param_name(index, Pol::YX, false);
    assert!(acc.cache().has(&g11_name));
    assert!(acc.cache().has(&d21_name));
    acc.cache_mut().remove(&g11_name);
    acc.cache_mut().remove(&d21_name);

    assert!(!acc.jones_valid(index, 0));
    assert!(!acc.jones_all_valid(index, 0));
    assert_abs_diff_eq!(acc.jones(index, 0), Jones::identity(), epsilon = 1e-12);
    let gain = acc.gain(index);
    assert!(!gain.g1_valid && !gain.g2_valid);
}

#[test]
fn matrix_and_validity_always_agree() {
    let index = JonesIndex::new(0, 0);
    for g1_valid in [false, true] {
        for g2_valid in [false, true] {
            for d12_valid in [false, true] {
                for d21_valid in [false, true] {
                    let mut acc = CachedCalSolutionAccessor::new();
                    acc.set_gain(
                        index,
                        JonesJTerm::new(c64::new(1.1, 0.1), g1_valid, c64::new(1.05, -0.1), g2_valid),
                    )
                    .unwrap();
                    acc.set_leakage(
                        index,
                        JonesDTerm::new(
                            c64::new(0.13, -0.12),
                            d12_valid,
                            c64::new(-0.14, 0.11),
                            d21_valid,
                        ),
                    )
                    .unwrap();

                    let jones = acc.jones(index, 0);
                    let valid = acc.jones_valid(index, 0);
                    let (matrix, flag) = acc.jones_and_validity(index, 0);
                    assert_eq!(valid, flag);
                    assert_abs_diff_eq!(jones, matrix, epsilon = 1e-12);
                    assert_eq!(valid, g1_valid && g2_valid && d12_valid && d21_valid);
                }
            }
        }
    }
}

#[test]
fn element_writers_match_term_writers() {
    let mut by_element = CachedCalSolutionAccessor::new();
    populate(&mut by_element);

    let mut by_term = CachedCalSolutionAccessor::new();
    for ant in 0..5 {
        for beam in 0..4 {
            let index = JonesIndex::new(ant, beam);
            let tag = f64::from(ant) / 100.0 + f64::from(beam) / 1000.0;
            by_term
                .set_gain(
                    index,
                    JonesJTerm::new(c64::new(1.1 + tag, 0.1), true, c64::new(1.1, -0.1 - tag), true),
                )
                .unwrap();
            by_term
                .set_leakage(
                    index,
                    JonesDTerm::new(
                        c64::new(0.1 + tag, -0.1),
                        true,
                        c64::new(-0.1, 0.1 + tag),
                        true,
                    ),
                )
                .unwrap();
            for chan in 0..20 {
                by_term
                    .set_bandpass(
                        index,
                        JonesJTerm::new(c64::new(1.0, 0.0), true, c64::new(1.0, 0.0), true),
                        chan,
                    )
                    .unwrap();
            }
        }
    }

    assert_eq!(by_element.cache().len(), by_term.cache().len());
    for (name, value) in by_element.cache().iter() {
        assert_eq!(by_term.cache().value(name), Some(value), "{name}");
    }
}

#[test]
fn mem_accessor_round_trips_terms() {
    let mut acc = MemCalSolutionAccessor::new(3, 2, 4);
    assert_eq!(acc.shape(), (3, 2, 4));
    let index = JonesIndex::new(2, 1);

    acc.set_gain(
        index,
        JonesJTerm::new(c64::new(1.2, 0.2), true, c64::new(0.9, -0.1), true),
    )
    .unwrap();
    acc.set_leakage(
        index,
        JonesDTerm::new(c64::new(0.05, 0.0), true, c64::new(-0.02, 0.01), true),
    )
    .unwrap();
    acc.set_bandpass(
        index,
        JonesJTerm::new(c64::new(0.8, 0.0), true, c64::new(0.85, 0.0), true),
        3,
    )
    .unwrap();

    let gain = acc.gain(index);
    assert!(gain.g1_valid && gain.g2_valid);
    assert_abs_diff_eq!(gain.g1, c64::new(1.2, 0.2), epsilon = 1e-12);
    let leakage = acc.leakage(index);
    assert!(leakage.d12_valid && leakage.d21_valid);
    let bp = acc.bandpass(index, 3);
    assert!(bp.g1_valid && bp.g2_valid);
    assert_abs_diff_eq!(bp.g2, c64::new(0.85, 0.0), epsilon = 1e-12);
    // Other channels were never written.
    assert!(!acc.bandpass(index, 0).g1_valid);

    assert!(acc.jones_valid(index, 3));
    let g1 = c64::new(1.2, 0.2);
    let g2 = c64::new(0.9, -0.1);
    let d12 = c64::new(0.05, 0.0);
    let d21 = c64::new(-0.02, 0.01);
    assert_abs_diff_eq!(
        acc.jones(index, 3),
        Jones::from([g1, d12 * g1, -(d21 * g2), g2]),
        epsilon = 1e-12
    );
}

#[test]
fn mem_accessor_enforces_its_shape() {
    let mut acc = MemCalSolutionAccessor::new(3, 2, 4);

    // Out-of-range reads degrade to invalid terms.
    assert!(!acc.gain(JonesIndex::new(3, 0)).g1_valid);
    assert!(!acc.leakage(JonesIndex::new(0, 2)).d12_valid);
    assert!(!acc.bandpass(JonesIndex::new(0, 0), 4).g1_valid);
    assert_abs_diff_eq!(
        acc.jones(JonesIndex::new(20, 20), 0),
        Jones::identity(),
        epsilon = 1e-12
    );

    // Out-of-range writes are errors.
    let term = JonesJTerm::new(c64::new(1.0, 0.0), true, c64::new(1.0, 0.0), true);
    assert!(matches!(
        acc.set_gain(JonesIndex::new(3, 0), term),
        Err(AccessorError::IndexOutOfRange { axis: "antenna", got: 3, size: 3 })
    ));
    assert!(matches!(
        acc.set_bandpass(JonesIndex::new(0, 0), term, 4),
        Err(AccessorError::IndexOutOfRange { axis: "channel", got: 4, size: 4 })
    ));
}

#[test]
fn mem_accessor_uses_the_provided_element_writers() {
    // The cube accessor doesn't override the per-element writers, so this
    // exercises the read-modify-write defaults.
    let mut acc = MemCalSolutionAccessor::new(2, 1, 2);
    let index = JonesIndex::new(1, 0);

    acc.set_jones_element(index, Pol::XX, c64::new(2.0, 0.0))
        .unwrap();
    let gain = acc.gain(index);
    assert!(gain.g1_valid && !gain.g2_valid);

    acc.set_jones_element(index, Pol::YY, c64::new(3.0, 0.0))
        .unwrap();
    let gain = acc.gain(index);
    assert!(gain.g1_valid && gain.g2_valid);
    assert_abs_diff_eq!(gain.g1, c64::new(2.0, 0.0), epsilon = 1e-12);
    assert_abs_diff_eq!(gain.g2, c64::new(3.0, 0.0), epsilon = 1e-12);

    acc.set_bandpass_element(index, Pol::XX, 1, c64::new(0.5, 0.0))
        .unwrap();
    assert!(acc.bandpass(index, 1).g1_valid);

    // Bandpass terms have no leakage elements to route through.
    assert!(matches!(
        acc.set_bandpass_element(index, Pol::XY, 0, c64::new(0.1, 0.0)),
        Err(AccessorError::BandpassLeakage { pol: Pol::XY })
    ));
}

#[test]
fn chan_adapter_offsets_bandpass_requests() {
    let mut acc = CachedCalSolutionAccessor::new();
    let index = JonesIndex::new(0, 0);
    for chan in 5..8 {
        acc.set_bandpass_element(index, Pol::XX, chan, c64::new(0.9, 0.0))
            .unwrap();
        acc.set_bandpass_element(index, Pol::YY, chan, c64::new(0.95, 0.0))
            .unwrap();
    }
    acc.set_jones_element(index, Pol::XX, c64::new(1.0, 0.0))
        .unwrap();

    let adapter = ChanAdapter::new(acc, 5);
    assert_eq!(adapter.offset(), 5);

    // Channel 0 through the adapter is channel 5 underneath.
    let bp = adapter.bandpass(index, 0);
    assert!(bp.g1_valid && bp.g2_valid);
    assert_abs_diff_eq!(bp.g1, c64::new(0.9, 0.0), epsilon = 1e-12);
    assert!(adapter.bandpass(index, 2).g1_valid);
    assert!(!adapter.bandpass(index, 3).g1_valid);

    // Frequency-independent terms pass through untouched.
    assert!(adapter.gain(index).g1_valid);
    assert!(!adapter.gain(index).g2_valid);

    let inner = adapter.into_inner();
    assert!(inner.bandpass(index, 5).g1_valid);
}
