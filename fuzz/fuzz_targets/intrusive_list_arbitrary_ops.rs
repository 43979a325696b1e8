#![no_main]

use evictkit::ds::IntrusiveList;
use libfuzzer_sys::fuzz_target;

// Arbitrary push/pop/remove/move sequences, including stale handles.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut ids = Vec::new();
    let mut foreign: IntrusiveList<u32> = IntrusiveList::new();
    let foreign_id = foreign.push_back(0);

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0] % 8, pair[1]);
        let value = u32::from(arg);
        match op {
            0 => {
                let id = list.push_front(value);
                ids.push(id);
                assert_eq!(list.front(), Some(&value));
            },
            1 => {
                let id = list.push_back(value);
                ids.push(id);
                assert_eq!(list.back(), Some(&value));
            },
            2 => {
                let before = list.len();
                match list.pop_front() {
                    Some(_) => assert_eq!(list.len(), before - 1),
                    None => assert!(list.is_empty()),
                }
            },
            3 => {
                let before = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), before - 1),
                    None => assert!(list.is_empty()),
                }
            },
            4 if !ids.is_empty() => {
                let id = ids[usize::from(arg) % ids.len()];
                let live = list.contains(id);
                assert_eq!(list.remove(id).is_some(), live);
                assert!(!list.contains(id));
            },
            5 if !ids.is_empty() => {
                let id = ids[usize::from(arg) % ids.len()];
                if list.move_to_front(id) {
                    assert_eq!(list.front_id(), Some(id));
                }
            },
            6 => {
                assert!(!list.contains(foreign_id));
                assert!(list.take(foreign_id).is_err());
            },
            7 if arg == 0 => {
                list.clear();
                assert!(list.is_empty());
            },
            _ => {},
        }
        assert!(list.check_invariants().is_ok());
        assert_eq!(list.iter().count(), list.len());
    }
});
