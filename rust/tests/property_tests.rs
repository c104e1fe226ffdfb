use dafindex::DafIndex;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Remove(u8, u8),
    RemoveAll(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..32, 0u8..4).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (0u8..32, 0u8..4).prop_map(|(k, v)| Op::Remove(k, v)),
        1 => (0u8..32).prop_map(Op::RemoveAll),
    ]
}

fn apply(index: &mut DafIndex<u8, u8>, model: &mut BTreeMap<u8, Vec<u8>>, op: &Op) {
    match *op {
        Op::Insert(k, v) => {
            let values = model.entry(k).or_default();
            let fresh = !values.contains(&v);
            if fresh {
                values.push(v);
            }
            assert_eq!(index.insert(k, v), fresh);
        }
        Op::Remove(k, v) => {
            let expected = match model.get_mut(&k) {
                Some(values) => match values.iter().position(|x| *x == v) {
                    Some(pos) => {
                        values.remove(pos);
                        if values.is_empty() {
                            model.remove(&k);
                        }
                        true
                    }
                    None => false,
                },
                None => false,
            };
            assert_eq!(index.remove(&k, &v), expected);
        }
        Op::RemoveAll(k) => {
            assert_eq!(index.remove_all(&k), model.remove(&k).is_some());
        }
    }
}

proptest! {
    #[test]
    fn test_invariants_hold_after_any_sequence(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut index = DafIndex::new(10).unwrap();
        let mut model = BTreeMap::new();

        for op in &ops {
            apply(&mut index, &mut model, op);
            prop_assert!(index.check_invariants_detailed().is_ok());
        }

        prop_assert_eq!(index.unique_keys(), model.len());
        prop_assert_eq!(index.len(), model.values().map(Vec::len).sum::<usize>());
        prop_assert_eq!(index.existence().len(), model.len());
    }

    #[test]
    fn test_iteration_is_sorted_and_complete(pairs in prop::collection::vec((any::<i16>(), any::<u8>()), 0..200)) {
        let index = DafIndex::from_pairs(10, pairs.iter().copied()).unwrap();
        let keys: Vec<i16> = index.keys().copied().collect();

        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(keys.len(), index.len());
        for (key, value) in &pairs {
            prop_assert!(index.lookup_exact(key, value));
        }
    }

    #[test]
    fn test_chain_keeps_insertion_order(values in prop::collection::vec(any::<u16>(), 1..50)) {
        let mut index = DafIndex::new(10).unwrap();
        let mut expected = Vec::new();
        for value in &values {
            if index.insert(0u8, *value) {
                expected.push(*value);
            }
        }
        let stored: Vec<u16> = index.get_all(&0).copied().collect();
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn test_lookup_any_agrees_with_tree(ops in prop::collection::vec(op_strategy(), 0..200), probe in 0u8..32) {
        let mut index = DafIndex::new(10).unwrap();
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&mut index, &mut model, op);
        }
        prop_assert_eq!(index.lookup_any(&probe), index.tree().lookup_any(&probe));
        prop_assert_eq!(index.lookup_any(&probe), model.contains_key(&probe));
    }
}
