//! Stress tests for the thread-safe wrapper.
//!
//! Many threads hammer one shared `SyncRandom` with a mix of scalar draws,
//! batch operations, weighted sampling and reseeds. Nothing here asserts
//! about the values' sequence (interleaving is unspecified); the guarantees
//! under test are: no panic, no torn word, every result within its
//! documented bounds. Run under a race detector (miri/tsan builds) for the
//! full effect.

use std::sync::Arc;
use std::thread;

use randkit::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn mixed_operations_under_contention() {
    init_tracing();

    let rng = Arc::new(SyncRandom::with_seed(1234));
    let mut handles = Vec::new();

    for thread_index in 0..8usize {
        let rng = Arc::clone(&rng);
        handles.push(thread::spawn(move || {
            for iteration in 0..2_000usize {
                match (thread_index + iteration) % 8 {
                    0 => {
                        let value = rng.range_i64(-100, 100);
                        assert!((-100..=100).contains(&value));
                    }
                    1 => {
                        let value = rng.bounded_i64(97).unwrap();
                        assert!((0..97).contains(&value));
                    }
                    2 => {
                        let value = rng.next_f64();
                        assert!((0.0..1.0).contains(&value));
                    }
                    3 => {
                        let index = rng.weighted_u64(&[1, 2, 3, 4]).unwrap();
                        assert!(index < 4);
                    }
                    4 => {
                        let mut buf = [0u8; 16];
                        assert_eq!(rng.fill_bytes(&mut buf), 16);
                    }
                    5 => {
                        let mut values = [1i64, 2, 3, 4, 5];
                        rng.shuffle_slice(&mut values);
                        values.sort_unstable();
                        assert_eq!(values, [1, 2, 3, 4, 5]);
                    }
                    6 => {
                        let mut perm = rng.permutation(9);
                        perm.sort_unstable();
                        assert_eq!(perm, (0..9).collect::<Vec<_>>());
                    }
                    _ => {
                        let mut values = [0u32; 11];
                        rng.fill_u32(&mut values, 5, 15);
                        for value in values {
                            assert!((5..=15).contains(&value));
                        }
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn draws_survive_concurrent_reseeding() {
    let rng = Arc::new(SyncRandom::new(Mt64::seed_from_u64(5489)));
    let mut handles = Vec::new();

    // One writer thread keeps resetting the stream...
    {
        let rng = Arc::clone(&rng);
        handles.push(thread::spawn(move || {
            for seed in 0..200i64 {
                rng.reseed(seed);
                thread::yield_now();
            }
        }));
    }

    // ...while readers keep drawing. Every draw must still be in bounds; a
    // reseed between two draws is fine, a torn state is not.
    for _ in 0..4 {
        let rng = Arc::clone(&rng);
        handles.push(thread::spawn(move || {
            for _ in 0..5_000 {
                let value = rng.range_u64(10, 20);
                assert!((10..=20).contains(&value));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn weighted_sampling_is_serialized_with_scalar_draws() {
    // The weighted path goes through the same write lock as everything
    // else (see DESIGN.md), so mixing it with scalar draws must never
    // panic or yield an out-of-range index.
    let rng = Arc::new(SyncRandom::with_seed(4321));
    let weights = Arc::new(vec![2.0f64, 2.0, 2.0, 4.0]);
    let mut handles = Vec::new();

    for _ in 0..4 {
        let rng = Arc::clone(&rng);
        let weights = Arc::clone(&weights);
        handles.push(thread::spawn(move || {
            for _ in 0..5_000 {
                let index = rng.weighted_f64(&weights).unwrap();
                assert!(index < weights.len());
            }
        }));
    }
    for _ in 0..4 {
        let rng = Arc::clone(&rng);
        handles.push(thread::spawn(move || {
            for _ in 0..5_000 {
                let _ = rng.next_u64();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn snapshots_can_race_with_draws() {
    let rng = Arc::new(SyncRandom::with_seed(7));
    let mut handles = Vec::new();

    for _ in 0..2 {
        let rng = Arc::clone(&rng);
        handles.push(thread::spawn(move || {
            for _ in 0..2_000 {
                // Read-locked: may run concurrently with other snapshots.
                let snapshot = rng.snapshot();
                let mut resumed = Random::new(snapshot);
                let value = resumed.bounded_i64(100).unwrap();
                assert!((0..100).contains(&value));
            }
        }));
    }
    for _ in 0..4 {
        let rng = Arc::clone(&rng);
        handles.push(thread::spawn(move || {
            for _ in 0..2_000 {
                let _ = rng.next_u64();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
