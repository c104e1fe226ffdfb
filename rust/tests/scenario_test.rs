//! End-to-end walk through a typical session on a small index.

use dafindex::{DafError, DafIndex, Entry};

fn build() -> DafIndex<i32, i32> {
    let mut index = DafIndex::new(12).unwrap();
    let pairs = [
        (3, 1),
        (4, 1),
        (1, 1),
        (1, 2),
        (1, 3),
        (2, 1),
        (2, 1),
        (5, 1),
        (5, 2),
        (7, 1),
        (7, 2),
        (9, 1),
        (9, 2),
        (11, 1),
    ];
    let accepted: Vec<bool> = pairs.iter().map(|&(k, v)| index.insert(k, v)).collect();
    // Only the repeated (2, 1) is rejected.
    assert_eq!(accepted.iter().filter(|ok| !**ok).count(), 1);
    assert!(!accepted[6]);
    index
}

#[test]
fn test_session() {
    let mut index = build();
    assert_eq!(index.len(), 13);
    assert_eq!(index.unique_keys(), 8);

    assert!(!index.remove(&11, &2));
    assert!(index.remove_all(&9));

    assert!(index.lookup_any(&7));
    assert!(index.lookup_exact(&7, &1));
    assert!(!index.lookup_exact(&7, &3));
    assert_eq!(index.get_all(&7).copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(index.min_key(), Some(&1));
    assert_eq!(index.max_key(), Some(&11));

    let items: Vec<(i32, i32)> = index.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(
        items,
        vec![
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (3, 1),
            (4, 1),
            (5, 1),
            (5, 2),
            (7, 1),
            (7, 2),
            (11, 1),
        ]
    );
    assert!(index.check_invariants());
}

#[test]
fn test_removing_last_key_moves_max() {
    let mut index = build();
    index.remove_all(&9);
    assert!(index.remove(&11, &1));
    assert_eq!(index.max_key(), Some(&7));
    assert!(!index.lookup_any(&11));
}

#[test]
fn test_missing_lookups_are_not_errors() {
    let index = build();
    assert!(!index.lookup_any(&100));
    assert!(!index.lookup_exact(&100, &1));
    assert_eq!(index.get_all(&100).count(), 0);

    let empty = DafIndex::<i32, i32>::default();
    assert_eq!(empty.min_key(), None);
    assert_eq!(empty.max_key(), None);
    assert_eq!(empty.iter().count(), 0);
}

#[test]
fn test_absent_parts_are_rejected_before_insert() {
    let mut index = build();
    let inputs: Vec<(Option<i32>, Option<i32>)> =
        vec![(None, Some(1)), (Some(1), None), (Some(20), Some(1))];

    let mut errors = Vec::new();
    for input in inputs {
        match Entry::try_from(input) {
            Ok(entry) => assert!(index.insert_entry(entry)),
            Err(err) => errors.push(err),
        }
    }

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(DafError::is_invalid_argument));
    assert_eq!(index.len(), 14);
    assert!(index.lookup_any(&20));
}

#[test]
fn test_invalid_capacity() {
    let err = DafIndex::<i32, i32>::new(9).unwrap_err();
    assert!(err.is_configuration_error());
    assert_eq!(
        err.to_string(),
        "Invalid configuration: Capacity 9 is invalid (minimum required: 10)"
    );
}
