use super::*;
use std::cell::Cell;
use std::rc::Rc;

/// Counters shared with the callbacks of a test map.
#[derive(Default)]
struct Tally {
    key_frees: Cell<usize>,
    value_frees: Cell<usize>,
    copies_left: Cell<Option<usize>>,
}

impl Tally {
    fn take_copy(&self) -> bool {
        match self.copies_left.get() {
            Some(0) => false,
            Some(n) => {
                self.copies_left.set(Some(n - 1));
                true
            }
            None => true,
        }
    }
}

fn tracked_map(tally: &Rc<Tally>) -> OrderedMap<i32, String, FnOps<i32, String>> {
    let (a, b, c, d) = (
        Rc::clone(tally),
        Rc::clone(tally),
        Rc::clone(tally),
        Rc::clone(tally),
    );
    OrderedMap::from_callbacks(
        FnOps::builder()
            .copy_key(move |k: &i32| a.take_copy().then_some(*k))
            .copy_value(move |v: &String| b.take_copy().then(|| v.clone()))
            .free_key(move |_k: i32| c.key_frees.set(c.key_frees.get() + 1))
            .free_value(move |_v: String| d.value_frees.set(d.value_frees.get() + 1))
            .compare_keys(|x: &i32, y: &i32| x.cmp(y)),
    )
    .unwrap()
}

fn keys_of<V, O: EntryOps<i32, V>>(map: &OrderedMap<i32, V, O>) -> Vec<i32> {
    map.keys().copied().collect()
}

#[test]
fn test_new_map_is_empty() {
    let map: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(map.size(), 0);
    assert!(map.is_empty());
    assert_eq!(map.first_key(), None);
    assert_eq!(map.keys().next(), None);
}

#[test]
fn test_from_callbacks_requires_every_callback() {
    let result = OrderedMap::<i32, i32, _>::from_callbacks(
        FnOps::builder()
            .copy_key(|k: &i32| Some(*k))
            .copy_value(|v: &i32| Some(*v))
            .compare_keys(|a: &i32, b: &i32| a.cmp(b)),
    );
    assert_eq!(result.unwrap_err(), MapError::InvalidConfiguration("free_key"));
}

#[test]
fn test_insert_keeps_keys_sorted() {
    let mut map = OrderedMap::new();
    for key in [5, 1, 9, 3, 7] {
        assert_eq!(map.insert_or_update(&key, &(key * 10)), Ok(Insertion::Inserted));
    }
    assert_eq!(keys_of(&map), vec![1, 3, 5, 7, 9]);
    assert_eq!(map.get(&7), Some(&70));
    assert!(map.is_strictly_ascending());
}

#[test]
fn test_update_replaces_value_and_frees_old_once() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);

    map.insert_or_update(&3, &"first".to_string()).unwrap();
    let outcome = map.insert_or_update(&3, &"second".to_string()).unwrap();

    assert_eq!(outcome, Insertion::Updated);
    assert_eq!(map.size(), 1);
    assert_eq!(map.get(&3).map(String::as_str), Some("second"));
    assert_eq!(tally.value_frees.get(), 1);
    assert_eq!(tally.key_frees.get(), 0);
}

#[test]
fn test_failed_insert_leaves_map_unchanged() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    map.insert_or_update(&1, &"one".to_string()).unwrap();

    // Key copy succeeds, value copy fails: the key copy must be released.
    tally.copies_left.set(Some(1));
    let result = map.insert_or_update(&2, &"two".to_string());

    assert_eq!(result, Err(MapError::OutOfMemory));
    assert_eq!(keys_of(&map), vec![1]);
    assert_eq!(tally.key_frees.get(), 1);
    assert_eq!(tally.value_frees.get(), 0);
}

#[test]
fn test_failed_update_keeps_old_value() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    map.insert_or_update(&1, &"one".to_string()).unwrap();

    tally.copies_left.set(Some(0));
    assert_eq!(
        map.insert_or_update(&1, &"uno".to_string()),
        Err(MapError::OutOfMemory)
    );
    assert_eq!(map.get(&1).map(String::as_str), Some("one"));
    assert_eq!(tally.value_frees.get(), 0);
}

#[test]
fn test_contains_and_get_after_remove() {
    let mut map = OrderedMap::new();
    map.insert_or_update(&4, &"four").unwrap();
    map.insert_or_update(&2, &"two").unwrap();

    assert!(map.contains(&4));
    map.remove(&4).unwrap();
    assert!(!map.contains(&4));
    assert_eq!(map.get(&4), None);
    assert_eq!(map.size(), 1);
}

#[test]
fn test_remove_errors() {
    let mut map: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(map.remove(&1), Err(MapError::InvalidArgument));

    map.insert_or_update(&1, &1).unwrap();
    assert_eq!(map.remove(&2), Err(MapError::ItemNotFound));
    assert_eq!(map.size(), 1);
}

#[test]
fn test_remove_frees_key_and_value() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    map.insert_or_update(&1, &"a".to_string()).unwrap();
    map.insert_or_update(&2, &"b".to_string()).unwrap();

    map.remove(&1).unwrap();
    assert_eq!(tally.key_frees.get(), 1);
    assert_eq!(tally.value_frees.get(), 1);
}

#[test]
fn test_iteration_is_restartable() {
    let mut map = OrderedMap::new();
    for key in [3, 1, 2] {
        map.insert_or_update(&key, &()).unwrap();
    }
    let first: Vec<_> = map.keys().copied().collect();
    let second: Vec<_> = map.keys().copied().collect();
    assert_eq!(first, second);
    assert_eq!(map.keys().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(map.keys().len(), 3);
}

#[test]
fn test_key_snapshot_allows_removal_while_walking() {
    let mut map = OrderedMap::new();
    for key in 1..=6 {
        map.insert_or_update(&key, &(key % 2 == 0)).unwrap();
    }
    for key in map.key_snapshot().unwrap() {
        if map.get(&key) == Some(&false) {
            map.remove(&key).unwrap();
        }
    }
    assert_eq!(keys_of(&map), vec![2, 4, 6]);
}

#[test]
fn test_key_snapshot_failure_frees_partial_keys() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    for key in 1..=3 {
        map.insert_or_update(&key, &key.to_string()).unwrap();
    }
    tally.copies_left.set(Some(2));
    assert_eq!(map.key_snapshot(), Err(MapError::OutOfMemory));
    assert_eq!(tally.key_frees.get(), 2);
}

#[test]
fn test_copy_is_independent() {
    let mut original = OrderedMap::new();
    for key in [2, 8, 5] {
        original.insert_or_update(&key, &vec![key]).unwrap();
    }

    let mut copy = original.copy().unwrap();
    assert_eq!(keys_of(&copy), keys_of(&original));
    assert_eq!(copy.size(), original.size());

    copy.insert_or_update(&5, &vec![0]).unwrap();
    copy.remove(&2).unwrap();
    copy.insert_or_update(&1, &vec![1]).unwrap();

    assert_eq!(keys_of(&original), vec![2, 5, 8]);
    assert_eq!(original.get(&5), Some(&vec![5]));
}

#[test]
fn test_failed_copy_releases_partial_copy() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    for key in 1..=3 {
        map.insert_or_update(&key, &key.to_string()).unwrap();
    }

    // Two entries copy fully, the third key copies but its value does not.
    tally.copies_left.set(Some(5));
    assert!(matches!(map.copy(), Err(MapError::OutOfMemory)));
    assert_eq!(tally.key_frees.get(), 3);
    assert_eq!(tally.value_frees.get(), 2);
    assert_eq!(map.size(), 3);
}

#[test]
fn test_clear_frees_everything_and_map_stays_usable() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    for key in 1..=4 {
        map.insert_or_update(&key, &key.to_string()).unwrap();
    }

    map.clear();
    assert_eq!(map.size(), 0);
    assert_eq!(tally.key_frees.get(), 4);
    assert_eq!(tally.value_frees.get(), 4);

    map.insert_or_update(&10, &"ten".to_string()).unwrap();
    assert_eq!(keys_of(&map), vec![10]);
}

#[test]
fn test_destroy_and_drop_free_entries() {
    let tally = Rc::new(Tally::default());
    let mut map = tracked_map(&tally);
    map.insert_or_update(&1, &"a".to_string()).unwrap();
    map.insert_or_update(&2, &"b".to_string()).unwrap();
    map.destroy();
    assert_eq!(tally.key_frees.get(), 2);
    assert_eq!(tally.value_frees.get(), 2);

    let empty = tracked_map(&tally);
    drop(empty);
    assert_eq!(tally.key_frees.get(), 2);
}

#[test]
fn test_custom_order_is_respected() {
    let mut map = OrderedMap::from_callbacks(
        FnOps::builder()
            .copy_key(|k: &i32| Some(*k))
            .copy_value(|v: &i32| Some(*v))
            .free_key(|_| {})
            .free_value(|_| {})
            .compare_keys(|a: &i32, b: &i32| b.cmp(a)),
    )
    .unwrap();
    for key in [1, 3, 2] {
        map.insert_or_update(&key, &key).unwrap();
    }
    assert_eq!(keys_of(&map), vec![3, 2, 1]);
    assert!(map.is_strictly_ascending());
}

#[test]
fn test_get_mut_changes_value_only() {
    let mut map = OrderedMap::new();
    map.insert_or_update(&1, &10).unwrap();
    if let Some(value) = map.get_mut(&1) {
        *value += 5;
    }
    assert_eq!(map.get(&1), Some(&15));
    assert_eq!(map.get_mut(&2), None);
}

#[test]
fn test_debug_lists_entries_in_order() {
    let mut map = OrderedMap::new();
    map.insert_or_update(&2, &"b").unwrap();
    map.insert_or_update(&1, &"a").unwrap();
    assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b"}"#);
}
