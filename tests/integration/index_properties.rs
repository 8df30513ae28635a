use inotree::index::BTreeIndex;
use inotree::types::NodeId;
use proptest::collection::hash_set;
use proptest::prelude::*;
use std::collections::HashSet;

fn build(keys: &[NodeId], t: usize) -> BTreeIndex<NodeId> {
    let mut index = BTreeIndex::new(t);
    for &key in keys {
        index.insert(key, key.wrapping_mul(31));
        index.verify().expect("index stays balanced after every insert");
    }
    index
}

proptest! {
    #[test]
    fn traversal_is_ascending(keys in hash_set(0u64..10_000, 0..300), t in 2usize..6) {
        let keys: Vec<NodeId> = keys.into_iter().collect();
        let index = build(&keys, t);
        let mut expected = keys.clone();
        expected.sort_unstable();
        let traversed: Vec<NodeId> = index.keys().collect();
        prop_assert_eq!(traversed, expected);
        prop_assert_eq!(index.len(), keys.len());
    }

    #[test]
    fn search_finds_exactly_inserted(
        keys in hash_set(0u64..2_000, 1..200),
        queries in proptest::collection::vec(0u64..2_000, 0..100),
    ) {
        let inserted: Vec<NodeId> = keys.iter().copied().collect();
        let index = build(&inserted, 3);
        for key in &inserted {
            prop_assert_eq!(index.search(*key), Some(&key.wrapping_mul(31)));
        }
        let present: HashSet<NodeId> = keys;
        for query in queries {
            prop_assert_eq!(index.search(query).is_some(), present.contains(&query));
        }
    }

    #[test]
    fn height_is_logarithmic(count in 1usize..2_000) {
        let keys: Vec<NodeId> = (1..=count as NodeId).collect();
        let index = build(&keys, 3);
        // Every non-root node holds at least t-1 = 2 keys, so fan-out is >= 3.
        let bound = (((count as f64 + 1.0) / 2.0).log(3.0) + 1e-9).floor() as usize + 1;
        prop_assert!(index.height() <= bound, "height {} > bound {}", index.height(), bound);
    }
}

#[test]
fn reference_sequence_splits_root() {
    let index = build(&[10, 20, 5, 6, 12, 30, 7, 17], 3);
    assert_eq!(
        index.keys().collect::<Vec<_>>(),
        vec![5, 6, 7, 10, 12, 17, 20, 30]
    );
    assert!(index.root_splits() >= 1);
}

#[test]
fn descending_inserts_stay_balanced() {
    let keys: Vec<NodeId> = (1..=500).rev().collect();
    let index = build(&keys, 3);
    assert_eq!(index.keys().next(), Some(1));
    assert_eq!(index.keys().last(), Some(500));
    assert_eq!(index.stats().entries, 500);
}
