use arbitrary::{unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeSet;

fn forward<T: Clone>(set: &Set<T>) -> Vec<T> {
    let mut values = vec![];
    let mut cursor = set.begin();
    while cursor != set.end() {
        values.push(cursor.get().unwrap().clone());
        cursor.move_next().unwrap();
    }
    values
}

fn backward<T: Clone>(set: &Set<T>) -> Vec<T> {
    let mut values = vec![];
    let mut cursor = set.end();
    while cursor != set.begin() {
        cursor.move_prev().unwrap();
        values.push(cursor.get().unwrap().clone());
    }
    values
}

#[test]
fn test_set_scenario() {
    let mut set: Set<i32> = Set::new();
    for value in [5, 3, 8, 1, 4, 7, 9].iter() {
        let cursor = set.insert(*value);
        assert_eq!(*cursor.get().unwrap(), *value);
    }

    assert_eq!(set.len(), 7);
    assert_eq!(forward(&set), vec![1, 3, 4, 5, 7, 8, 9]);
    assert!(set.search(&6) == set.end());
    assert!(set.search(&8) != set.end());
    assert_eq!(*set.search(&8).get().unwrap(), 8);

    assert!(set.insert(5).is_end());
    assert_eq!(set.len(), 7);
    set.validate().unwrap();
}

#[test]
fn test_set_empty() {
    let set: Set<u64> = Set::default();

    assert!(set.is_empty());
    assert!(set.begin() == set.end());
    assert!(set.begin().is_end());
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.iter().next(), None);
    assert_eq!(format!("{:?}", set), "{}");

    let mut cursor = set.end();
    match cursor.get() {
        Err(Error::OutOfRange(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match cursor.move_next() {
        Err(Error::OutOfRange(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match cursor.move_prev() {
        Err(Error::OutOfRange(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert!(cursor.is_end());
}

#[test]
fn test_set_cursor() {
    let set: Set<u32> = (1..=5).map(|v| v * 10).collect();

    // post-increment hands back the old position.
    let mut cursor = set.begin();
    let old = cursor.fetch_next().unwrap();
    assert_eq!(*old.get().unwrap(), 10);
    assert_eq!(*cursor.get().unwrap(), 20);

    // pre-increment up to end, then no further.
    for _i in 0..4 {
        cursor.move_next().unwrap();
    }
    assert!(cursor == set.end());
    assert!(cursor.move_next().is_err());
    assert!(cursor.fetch_next().is_err());
    assert!(cursor.get().is_err());

    // post-decrement from end.
    let old = cursor.fetch_prev().unwrap();
    assert!(old.is_end());
    assert_eq!(*cursor.get().unwrap(), 50);

    let mut cursor = set.search(&30);
    cursor.move_prev().unwrap();
    assert_eq!(*cursor.get().unwrap(), 20);
    cursor.move_prev().unwrap();
    assert_eq!(*cursor.get().unwrap(), 10);
    assert!(cursor == set.begin());

    // decrement at minimal value fails and leaves the cursor alone.
    match cursor.move_prev() {
        Err(Error::OutOfRange(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert!(cursor.fetch_prev().is_err());
    assert_eq!(*cursor.get().unwrap(), 10);
    assert!(cursor == set.begin());
}

#[test]
fn test_set_round_trip() {
    let mut set: Set<u16> = Set::new();
    let mut btset: BTreeSet<u16> = BTreeSet::new();
    for i in 0..500_u16 {
        let value = i.wrapping_mul(7919) % 1024;
        set.insert(value);
        btset.insert(value);
    }

    let asc: Vec<u16> = btset.iter().cloned().collect();
    let desc: Vec<u16> = btset.iter().rev().cloned().collect();
    assert_eq!(forward(&set), asc);
    assert_eq!(backward(&set), desc);
    assert_eq!(set.iter().cloned().collect::<Vec<u16>>(), asc);
    assert_eq!(set.iter().rev().cloned().collect::<Vec<u16>>(), desc);

    // walking back from end reaches begin, then refuses to go further.
    let mut cursor = set.end();
    for _i in 0..set.len() {
        cursor.move_prev().unwrap();
    }
    assert!(cursor == set.begin());
    assert_eq!(cursor.get().unwrap(), set.first().unwrap());
    assert!(cursor.move_prev().is_err());
}

#[test]
fn test_set_iter_both_ends() {
    let set: Set<u8> = (1..=6).collect();

    let mut iter = set.iter();
    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&6));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    let mut n = 0;
    for value in &set {
        n += 1;
        assert_eq!(*value, n);
    }
    assert_eq!(n, 6);
}

#[test]
fn test_set_position() {
    let mut set: Set<i32> = Set::new();
    set.extend(vec![10, 20, 30]);

    let position = set.search(&20).position();
    assert!(position.is_some());
    for value in 0..100 {
        set.insert(value * 3 + 1);
    }

    // positions survive unrelated insertions.
    let cursor = set.cursor_at(position);
    assert_eq!(*cursor.get().unwrap(), 20);
    assert!(cursor == set.search(&20));
    assert!(set.cursor_at(None) == set.end());
    set.validate().unwrap();
}

#[test]
fn test_set_clone() {
    let mut set: Set<String> = Set::new();
    set.insert("b".to_string());
    set.insert("a".to_string());
    set.insert("c".to_string());

    let mut copy = set.clone();
    assert_eq!(format!("{:?}", copy), r#"{"a", "b", "c"}"#);
    copy.insert("d".to_string());
    copy.validate().unwrap();

    assert_eq!(copy.len(), 4);
    assert_eq!(set.len(), 3);
    assert!(!set.contains("d"));
    assert!(copy.contains("d"));
    assert_eq!(forward(&set), vec!["a", "b", "c"]);

    let moved = std::mem::take(&mut set);
    assert!(set.is_empty());
    assert!(set.begin() == set.end());
    assert_eq!(moved.len(), 3);
    assert_eq!(moved.first().map(|s| s.as_str()), Some("a"));
    assert_eq!(moved.last().map(|s| s.as_str()), Some("c"));

    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(moved.len(), 3);
}

#[test]
fn test_set() {
    let seed: u64 = random();
    // let seed: u64 = 7105948271043982715;
    println!("test_set {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut set: Set<u8> = Set::new();
    let mut btset: BTreeSet<u8> = BTreeSet::new();

    let mut counts = [0_usize; 11];

    for _i in 0..200_000 {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op<u8> = uns.arbitrary().unwrap();
        // println!("test_set op -- {:?}", op);
        match op {
            Op::Len => {
                counts[0] += 1;
                assert_eq!(set.len(), btset.len());
            }
            Op::IsEmpty => {
                counts[1] += 1;
                assert_eq!(set.is_empty(), btset.is_empty());
            }
            Op::Insert(value) => {
                counts[2] += 1;
                let added = !set.insert(value).is_end();
                assert_eq!(added, btset.insert(value), "insert {}", value);
            }
            Op::Search(value) => {
                counts[3] += 1;
                let cursor = set.search(&value);
                match (cursor.get().ok(), btset.get(&value)) {
                    (None, None) => (),
                    (Some(v), Some(r)) => assert_eq!(v, r, "for value {}", value),
                    (None, Some(_)) => panic!("search no value {} in set", value),
                    (Some(_), None) => panic!("search no value {} in btset", value),
                }
            }
            Op::Validate => {
                counts[4] += 1;
                set.validate().unwrap();
            }
            Op::Iter => {
                counts[5] += 1;
                let a: Vec<u8> = set.iter().cloned().collect();
                let b: Vec<u8> = btset.iter().cloned().collect();
                assert_eq!(a, b);
            }
            Op::Reverse => {
                counts[6] += 1;
                let a: Vec<u8> = set.iter().rev().cloned().collect();
                let b: Vec<u8> = btset.iter().rev().cloned().collect();
                assert_eq!(a, b);
            }
            Op::Walk => {
                counts[7] += 1;
                let a = backward(&set);
                let b: Vec<u8> = btset.iter().rev().cloned().collect();
                assert_eq!(a, b);
            }
            Op::Ends => {
                counts[8] += 1;
                assert_eq!(set.first(), btset.iter().next());
                assert_eq!(set.last(), btset.iter().next_back());
            }
            Op::Extend(values) => {
                counts[9] += 1;
                set.extend(values.clone());
                btset.extend(values);
            }
            Op::Dup => {
                counts[10] += 1;
                let copy = set.clone();
                copy.validate().unwrap();
                assert_eq!(forward(&copy), forward(&set));
            }
        }
    }

    let a: Vec<u8> = set.iter().cloned().collect();
    let b: Vec<u8> = btset.iter().cloned().collect();
    assert_eq!(a, b);
    set.validate().unwrap();

    println!("counts {:?} len:{}/{}", counts, set.len(), btset.len());
}

#[derive(Debug, Arbitrary)]
enum Op<T> {
    Len,
    IsEmpty,
    Insert(T),
    Search(T),
    Validate,
    Iter,
    Reverse,
    Walk,
    Ends,
    Extend(Vec<T>),
    Dup,
}
