use log::LevelFilter;
use rand::Rng;
use rbtree_collections::red_black_tree::{RedBlackMap, RedBlackMultiset, RedBlackSet, RedBlackTree};
use rbtree_collections::Error;
use simplelog::{Config, SimpleLogger};
use std::collections::{BTreeMap, BTreeSet};

const NUM_OF_OPERATIONS: usize = 100_000;

fn setup() {
    let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());
}

#[test]
fn int_test_red_black_map() {
    setup();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = RedBlackMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 10_000u32);
        let val = rng.gen::<u32>();

        match rng.gen_range(0, 3) {
            0 => assert_eq!(map.remove(&key), expected.remove(&key).map(|val| (key, val))),
            1 => {
                let inserted = !expected.contains_key(&key);
                expected.entry(key).or_insert(val);
                assert_eq!(map.insert(key, val).1, inserted);
            },
            _ => {
                let assigned = expected.insert(key, val).is_none();
                assert_eq!(map.insert_or_assign(key, val).1, assigned);
            },
        }
        assert_eq!(map.len(), expected.len());
    }

    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );

    for key in 0..10_000u32 {
        assert_eq!(map.get(&key), expected.get(&key));
        assert_eq!(
            map.lower_bound(&key).key(),
            expected.range(key..).next().map(|pair| pair.0),
        );
        assert_eq!(
            map.upper_bound(&key).key(),
            expected.range(key + 1..).next().map(|pair| pair.0),
        );
        if !expected.contains_key(&key) {
            assert_eq!(map.at(&key), Err(Error::KeyNotFound));
        }
    }

    assert_eq!(map.first(), expected.iter().next());
    assert_eq!(map.last(), expected.iter().next_back());
}

#[test]
fn int_test_red_black_set() {
    setup();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let val = rng.gen_range(0, 5_000u32);
        if rng.gen() {
            assert_eq!(set.insert(val).1, expected.insert(val));
        } else {
            assert_eq!(set.remove(&val).is_some(), expected.remove(&val));
        }
    }

    assert_eq!(set.len(), expected.len());
    assert_eq!(
        set.iter().rev().collect::<Vec<&u32>>(),
        expected.iter().rev().collect::<Vec<&u32>>(),
    );

    let mut values: Vec<u32> = expected.iter().cloned().collect();
    rng.shuffle(&mut values);
    for val in values {
        assert_eq!(set.remove(&val), Some(val));
    }
    assert!(set.is_empty());
    assert_eq!(set.first(), None);
    assert!(set.begin().is_end());
}

#[test]
fn int_test_red_black_multiset() {
    setup();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut multiset = RedBlackMultiset::new();
    let mut expected: Vec<u32> = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS / 10 {
        let val = rng.gen_range(0, 500u32);
        if rng.gen_range(0, 3) > 0 {
            multiset.insert(val);
            let index = expected.iter().position(|other| *other > val).unwrap_or(expected.len());
            expected.insert(index, val);
        } else {
            let removed = match expected.binary_search(&val) {
                Ok(_) => {
                    let index = expected.iter().position(|other| *other == val).unwrap();
                    Some(expected.remove(index))
                },
                Err(_) => None,
            };
            assert_eq!(multiset.remove(&val), removed);
        }
    }

    assert_eq!(multiset.len(), expected.len());
    assert_eq!(
        multiset.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    for val in 0..500u32 {
        assert_eq!(
            multiset.count(&val),
            expected.iter().filter(|other| **other == val).count(),
        );
    }
}

#[test]
fn int_test_red_black_tree_cursor_walk() {
    setup();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut expected: Vec<u32> = (0..10_000).map(|_| rng.gen_range(0, 1_000)).collect();
    let tree: RedBlackTree<u32> = expected.iter().cloned().collect();
    expected.sort();

    let mut cursor = tree.begin();
    for val in &expected {
        assert_eq!(cursor.get(), Some(val));
        cursor.move_next();
    }
    assert_eq!(cursor, tree.end());

    for val in expected.iter().rev() {
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(val));
    }
    cursor.move_prev();
    assert!(cursor.is_end());
}
