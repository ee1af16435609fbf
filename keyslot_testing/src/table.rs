//! Utilities for testing hash table implementations against the shared contract.
use keyslot_core::{HashTable, Key, KeySlotError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

/// Asserts that the derived statistics of `table` agree with its counters.
pub fn assert_consistent_stats<T: HashTable>(table: &T) {
    assert_eq!(table.size(), table.insertions() - table.deletions());
    assert!(table.size() <= table.insertions());

    let insertions = table.insertions();
    if insertions == 0 {
        assert_eq!(table.average_probes(), 1.0);
        assert_eq!(table.collision_rate(), 0.0);
    } else {
        let ratio = table.collisions() as f64 / insertions as f64;
        assert!((table.average_probes() - (1.0 + ratio)).abs() < 1e-9);
        assert!((table.collision_rate() - 100.0 * ratio).abs() < 1e-9);
    }
    assert!(
        (table.load_factor() - table.size() as f64 / table.capacity() as f64).abs() < 1e-9
    );
}

/// Tests a freshly built table.
pub fn test_empty_table<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(7);

    assert_eq!(table.capacity(), 7);
    assert!(table.is_empty());
    assert_eq!(table.find(3), None);
    assert!(!table.delete(3));
    assert_eq!(table.deletions(), 0);
    assert_eq!(table.occupancy(), vec![0; 7]);
    assert_consistent_stats(&table);
}

/// Tests that a key can live in the table at most once.
pub fn test_duplicate_insert<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(10);

    assert_eq!(table.insert(42), Ok(true));
    assert_eq!(table.insert(42), Ok(false));
    assert_eq!(table.insertions(), 1);
    assert_eq!(table.size(), 1);
    assert_eq!(table.duplicates(), 1);

    assert!(table.delete(42));
    assert_eq!(table.find(42), None);
    assert_eq!(table.insert(42), Ok(true));
    assert_eq!(table.find(42), Some(42));
    assert_eq!(table.size(), 1);
    assert_consistent_stats(&table);
}

/// Tests keys at the edges of the key domain.
pub fn test_extreme_keys<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(11);
    let keys = [Key::MIN, Key::MAX, 0, -1, 1, Key::MIN + 1];

    for key in keys {
        assert_eq!(table.insert(key), Ok(true), "Key: {}", key);
    }
    for key in keys {
        assert_eq!(table.find(key), Some(key), "Key: {}", key);
    }
    for key in keys {
        assert!(table.delete(key), "Key: {}", key);
    }
    assert!(table.is_empty());
    assert_consistent_stats(&table);
}

/// Tests a random sequence of operations against [`HashSet`] as the model.
///
/// Keys come from a range wider than the capacity, so open-addressing tables may run full:
/// a refused insert must leave the model untouched.
pub fn test_against_model<T: HashTable, F: Fn(usize) -> T>(factory: F, seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut table = factory(31);
    let mut model = HashSet::new();

    for _ in 0..2000 {
        let key: Key = rng.random_range(-40..=40);
        match rng.random_range(0..3) {
            0 => match table.insert(key) {
                Ok(inserted) => assert_eq!(inserted, model.insert(key), "Key: {}", key),
                Err(KeySlotError::TableFull { capacity }) => {
                    assert_eq!(capacity, 31);
                    assert!(!model.contains(&key), "Key: {}", key);
                }
                Err(err) => panic!("Unexpected error: {}", err),
            },
            1 => assert_eq!(table.delete(key), model.remove(&key), "Key: {}", key),
            _ => assert_eq!(
                table.find(key),
                model.contains(&key).then_some(key),
                "Key: {}",
                key
            ),
        }
        assert_eq!(table.size(), model.len());
    }

    for key in -40..=40 {
        assert_eq!(table.find(key), model.get(&key).copied(), "Key: {}", key);
    }
    assert_consistent_stats(&table);
}

/// Tests that the occupancy view agrees with the live keys.
pub fn test_occupancy<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(13);
    for key in [5, 18, 31, -8, 100, 7] {
        table.insert(key).unwrap();
    }
    table.delete(31);

    let occupancy = table.occupancy();
    assert_eq!(occupancy.len(), table.capacity());
    assert_eq!(occupancy.iter().sum::<usize>(), table.size());
}

/// Tests that the dump lists live keys and counters.
pub fn test_print_lists_keys<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(8);
    for key in [1234, -5678, 9012] {
        table.insert(key).unwrap();
    }
    table.delete(9012);

    let mut out = Vec::new();
    table.print(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("1234"), "{}", out);
    assert!(out.contains("-5678"), "{}", out);
    assert!(!out.contains("9012"), "{}", out);
    assert!(out.contains("insertions  : 3"), "{}", out);
    assert!(out.contains("deletions   : 1"), "{}", out);
    assert!(out.ends_with('\n'));
}

/// Tests that tracing doesn't change any outcome.
pub fn test_verbosity_invariance<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut quiet = factory(9);
    let mut chatty = factory(9);
    chatty.set_verbose(2);
    assert_eq!(chatty.verbose(), 2);

    for key in [3, 12, 21, 12, 30, -6] {
        assert_eq!(quiet.insert(key), chatty.insert(key));
    }
    for key in [12, 99, 21] {
        assert_eq!(quiet.delete(key), chatty.delete(key));
        assert_eq!(quiet.find(key), chatty.find(key));
    }
    assert_eq!(quiet.collisions(), chatty.collisions());
    assert_eq!(quiet.insertions(), chatty.insertions());
    assert_eq!(quiet.deletions(), chatty.deletions());
    assert_eq!(quiet.duplicates(), chatty.duplicates());
}

/// Tests that a two-slot table refuses a third key.
pub fn test_fills_up<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(2);

    assert_eq!(table.insert(7), Ok(true));
    assert_eq!(table.insert(9), Ok(true));
    assert_eq!(
        table.insert(11),
        Err(KeySlotError::TableFull { capacity: 2 })
    );
    assert_eq!(table.size(), 2);
    assert_eq!(table.find(7), Some(7));
    assert_eq!(table.find(9), Some(9));
    assert_eq!(table.find(11), None);
    // A duplicate is still detected in a full table.
    assert_eq!(table.insert(9), Ok(false));
}

/// Tests that a deleted slot is reused without disturbing other keys.
pub fn test_tombstone_reuse<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(11);
    for key in [4, 15, 26] {
        table.insert(key).unwrap();
    }
    let duplicates = table.duplicates();

    assert!(table.delete(15));
    assert_eq!(table.insert(15), Ok(true));
    assert_eq!(table.duplicates(), duplicates);
    assert_eq!(table.size(), 3);
    for key in [4, 15, 26] {
        assert_eq!(table.find(key), Some(key));
    }
    assert_eq!(table.occupancy().iter().sum::<usize>(), 3);
}

/// Tests that deletions never hide keys placed further down a probe sequence.
pub fn test_delete_keeps_others_reachable<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(13);
    let keys: Vec<Key> = (0..10).map(|i| i * 13 + 2).collect();
    let mut placed = Vec::new();
    for &key in &keys {
        if table.insert(key).is_ok() {
            placed.push(key);
        }
    }

    for key in placed.iter().step_by(2) {
        assert!(table.delete(*key), "Key: {}", key);
    }
    for (i, key) in placed.iter().enumerate() {
        let expected = (i % 2 == 1).then_some(*key);
        assert_eq!(table.find(*key), expected, "Key: {}", key);
    }
}

/// Tests growing a table that ran full.
pub fn test_grow_after_full<T: HashTable, F: Fn(usize) -> T>(factory: F) {
    let mut table = factory(3);
    let mut placed = Vec::new();
    for key in 0..100 {
        match table.insert(key) {
            Ok(true) => placed.push(key),
            Ok(false) => unreachable!(),
            Err(_) => break,
        }
    }
    assert!(!placed.is_empty());

    table.grow().unwrap();
    assert_eq!(table.capacity(), 7);
    assert_eq!(table.insertions(), placed.len());
    assert_eq!(table.deletions(), 0);
    assert_eq!(table.duplicates(), 0);
    for &key in &placed {
        assert_eq!(table.find(key), Some(key), "Key: {}", key);
    }
    assert_eq!(table.insert(1000), Ok(true));
    assert_consistent_stats(&table);
}

/// Generates tests of the shared contract for a table factory `|capacity| -> table`.
#[macro_export]
macro_rules! generate_table_tests {
    ($suffix:ident, $factory:expr) => {
        $crate::compose_idents!(test_fn = [test_empty_table_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_empty_table($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_duplicate_insert_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_duplicate_insert($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_extreme_keys_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_extreme_keys($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_against_model_, $suffix]; {
            #[test]
            fn test_fn() {
                for seed in [1, 2, 3] {
                    $crate::test_against_model($factory, seed);
                }
            }
        });
        $crate::compose_idents!(test_fn = [test_occupancy_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_occupancy($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_print_lists_keys_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_print_lists_keys($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_verbosity_invariance_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_verbosity_invariance($factory);
            }
        });
    };
}

/// Generates tests specific to open-addressing tables.
#[macro_export]
macro_rules! generate_open_addressing_tests {
    ($suffix:ident, $factory:expr) => {
        $crate::compose_idents!(test_fn = [test_fills_up_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_fills_up($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_tombstone_reuse_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_tombstone_reuse($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_delete_keeps_others_reachable_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_delete_keeps_others_reachable($factory);
            }
        });
        $crate::compose_idents!(test_fn = [test_grow_after_full_, $suffix]; {
            #[test]
            fn test_fn() {
                $crate::test_grow_after_full($factory);
            }
        });
    };
}
