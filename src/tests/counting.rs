extern crate std;
use std::format;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::gate::{CountingGate, GateError};
use crate::tests::{init_logging, wait_for};

#[test]
fn starts_empty() {
    let gate = CountingGate::new();
    assert_eq!(gate.pending(), 0);
    assert!(!gate.is_waiting());
    assert_eq!(gate.try_close(), Err(GateError::WouldBlock));
}

#[test]
fn open_open_close_close() {
    init_logging();
    let gate = CountingGate::new();

    gate.open().unwrap();
    gate.open().unwrap();
    assert_eq!(gate.pending(), 2);

    let start = Instant::now();
    gate.close().unwrap();
    gate.close().unwrap();
    assert!(start.elapsed() < Duration::from_millis(500));
    assert_eq!(gate.pending(), 0);
}

#[test]
fn n_opens_allow_exactly_n_closes() {
    const N: usize = 5;
    let gate = CountingGate::new();

    for _ in 0..N {
        gate.open().unwrap();
    }
    for _ in 0..N {
        assert_eq!(gate.try_close(), Ok(()));
    }
    assert_eq!(gate.try_close(), Err(GateError::WouldBlock));
    assert_eq!(gate.close_for(Duration::from_millis(50)), Err(GateError::TimedOut));
    assert_eq!(gate.pending(), 0);
}

#[test]
fn opens_from_another_thread_are_all_kept() {
    const N: usize = 100;
    let gate = Arc::new(CountingGate::new());

    let opener = gate.clone();
    thread::spawn(move || {
        for _ in 0..N {
            opener.open().unwrap();
        }
    })
    .join()
    .unwrap();

    assert_eq!(gate.pending(), N);
    for _ in 0..N {
        gate.try_close().unwrap();
    }
    assert_eq!(gate.pending(), 0);
}

#[test]
fn open_hands_off_to_waiter_without_counting() {
    init_logging();
    let gate = Arc::new(CountingGate::new());
    let (tx, rx) = channel();

    let closer = gate.clone();
    let t = thread::spawn(move || {
        tx.send(closer.close()).unwrap();
    });

    wait_for(|| gate.is_waiting());
    gate.open().unwrap();
    assert_eq!(rx.recv_timeout(Duration::from_secs(10)), Ok(Ok(())));
    t.join().unwrap();

    assert_eq!(gate.pending(), 0);
    assert!(!gate.is_waiting());
}

#[test]
fn waiter_consumes_one_of_several_opens() {
    let gate = Arc::new(CountingGate::new());

    let closer = gate.clone();
    let t = thread::spawn(move || closer.close());
    wait_for(|| gate.is_waiting());

    gate.open().unwrap();
    gate.open().unwrap();
    gate.open().unwrap();
    assert_eq!(t.join().unwrap(), Ok(()));

    assert_eq!(gate.pending(), 2);
}

#[test]
fn second_waiter_is_refused() {
    let gate = Arc::new(CountingGate::new());

    let closer = gate.clone();
    let t = thread::spawn(move || closer.close());
    wait_for(|| gate.is_waiting());

    assert_eq!(gate.close(), Err(GateError::Occupied));

    gate.open().unwrap();
    assert_eq!(t.join().unwrap(), Ok(()));
    assert_eq!(gate.pending(), 0);
}

#[test]
fn debug_shows_count() {
    let gate = CountingGate::default();
    gate.open().unwrap();
    gate.open().unwrap();
    assert_eq!(format!("{gate:?}"), "CountingGate { pending: 2, waiting: false }");
}
