// Copyright (c) 2025 Ad Locator Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Integration tests for the location store.
//! Covers the public API end to end, including readers running while the
//! tree is being replaced.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use ad_locator_lib::LocationStore;

const GENERATION_A: &str = "A0: /\nA1: alpha\nA2: alpha/beta\nA3: alpha/beta/gamma";
const GENERATION_B: &str = "B0: /\nB1: ALPHA\nB2: alpha/Beta\nB3: alpha / beta / gamma";

fn generation(prefix: char) -> Vec<String> {
    (0..4).map(|level| format!("{prefix}{level}")).collect()
}

#[test]
fn test_ancestor_aggregation() {
    let store = LocationStore::new();
    store.reload("R: /\nB: ru/svrd\nA: ru/svrd/revda");

    let revda = store.search("/ru/svrd/revda");
    for name in ["R", "B", "A"] {
        assert!(revda.contains(name), "missing {name}");
    }

    let svrd = store.search("/ru/svrd");
    assert!(svrd.contains("R") && svrd.contains("B"));
    assert!(!svrd.contains("A"));

    assert_eq!(store.search("/").into_sorted(), vec!["R"]);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let store = LocationStore::new();
    let stats = store.reload("no colon here\n: x\nGood: x\nEmpty:\n");

    assert_eq!(stats.declarations, 1);
    assert_eq!(stats.skipped_lines, 3);
    assert_eq!(store.search("/x").into_sorted(), vec!["Good"]);
    assert!(store.search("/").is_empty());
}

#[test]
fn test_reload_visible_to_later_searches() {
    let store = LocationStore::new();
    store.reload("A: x");
    store.reload("B: y");

    assert!(store.search("x").is_empty());
    assert!(store.search("y").contains("B"));
}

#[test]
fn test_concurrent_searches_see_whole_generations() {
    const READER_COUNT: usize = 8;
    const RELOADS: usize = 200;

    let store = Arc::new(LocationStore::new());
    store.reload(GENERATION_A);

    let expected_a = generation('A');
    let expected_b = generation('B');
    let start_barrier = Arc::new(Barrier::new(READER_COUNT + 1));
    let done = Arc::new(AtomicBool::new(false));
    let observations = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::with_capacity(READER_COUNT);
    for reader_id in 0..READER_COUNT {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&start_barrier);
        let done = Arc::clone(&done);
        let observations = Arc::clone(&observations);
        let (expected_a, expected_b) = (expected_a.clone(), expected_b.clone());

        handles.push(thread::spawn(move || -> Result<(), String> {
            barrier.wait();
            loop {
                let finished = done.load(Ordering::SeqCst);
                let found = store.search("/alpha/beta/gamma").into_sorted();
                if found != expected_a && found != expected_b {
                    return Err(format!("reader {reader_id} saw a mixed tree: {found:?}"));
                }

                let root = store.search("/").into_sorted();
                if root != ["A0"] && root != ["B0"] {
                    return Err(format!("reader {reader_id} saw root {root:?}"));
                }
                observations.fetch_add(1, Ordering::SeqCst);

                if finished {
                    return Ok(());
                }
            }
        }));
    }

    start_barrier.wait();
    for round in 0..RELOADS {
        if round % 2 == 0 {
            store.reload(GENERATION_B);
        } else {
            store.reload(GENERATION_A);
        }
    }
    done.store(true, Ordering::SeqCst);

    for (i, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => panic!("Reader {i} reported error: {e}"),
            Err(e) => panic!("Reader {i} panicked: {e:?}"),
        }
    }

    // RELOADS is even, so generation A is active again
    assert_eq!(store.search("/alpha/beta/gamma").into_sorted(), expected_a);
    assert!(observations.load(Ordering::SeqCst) >= READER_COUNT);
}

#[test]
fn test_concurrent_reloads_leave_one_complete_tree() {
    const WRITER_COUNT: usize = 4;

    let store = Arc::new(LocationStore::new());
    let barrier = Arc::new(Barrier::new(WRITER_COUNT));

    let handles: Vec<_> = (0..WRITER_COUNT)
        .map(|writer| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let text = format!("W{writer}: /\nW{writer}: shared/leaf");
                for _ in 0..50 {
                    store.reload(&text);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let root = store.search("/").into_sorted();
    assert_eq!(root.len(), 1);
    assert_eq!(store.search("/shared/leaf").into_sorted(), root);
    assert_eq!(store.snapshot().node_count(), 3);
}
