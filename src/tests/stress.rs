extern crate std;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::gate::{CountingGate, GateError, StickyGate};
use crate::tests::init_logging;

/// Long enough that hitting it means a lost wakeup, not a slow machine.
const LIMIT: Duration = Duration::from_secs(10);

fn jitter() {
    let micros = fastrand::u64(0..200);
    if micros > 0 {
        thread::sleep(Duration::from_micros(micros));
    }
}

#[test]
fn sticky_ping_pong_with_random_delays() {
    const ROUNDS: usize = 500;
    init_logging();

    let ping = Arc::new(StickyGate::new());
    let pong = Arc::new(StickyGate::new());

    let (ping2, pong2) = (ping.clone(), pong.clone());
    let t = thread::spawn(move || {
        for _ in 0..ROUNDS {
            jitter();
            ping2.close_for(LIMIT).unwrap();
            pong2.open();
        }
    });

    for _ in 0..ROUNDS {
        jitter();
        ping.open();
        pong.close_for(LIMIT).unwrap();
    }
    t.join().unwrap();
}

#[test]
fn sticky_fresh_gate_races() {
    const ROUNDS: usize = 200;

    for _ in 0..ROUNDS {
        let gate = Arc::new(StickyGate::new());

        let closer = gate.clone();
        let t = thread::spawn(move || {
            jitter();
            closer.close_for(LIMIT)
        });

        jitter();
        gate.open();
        assert_eq!(t.join().unwrap(), Ok(()));
    }
}

#[test]
fn counting_random_delays_lose_nothing() {
    const N: usize = 1000;
    init_logging();

    let gate = Arc::new(CountingGate::new());

    let opener = gate.clone();
    let t = thread::spawn(move || {
        for _ in 0..N {
            if fastrand::u8(..) < 16 {
                jitter();
            }
            opener.open().unwrap();
        }
    });

    for _ in 0..N {
        if fastrand::u8(..) < 16 {
            jitter();
        }
        gate.close_for(LIMIT).unwrap();
    }
    t.join().unwrap();

    assert_eq!(gate.pending(), 0);
}

#[test]
fn release_racing_timeout_is_neither_lost_nor_doubled() {
    const ROUNDS: usize = 2000;
    init_logging();

    for _ in 0..ROUNDS {
        let gate = Arc::new(CountingGate::new());

        let closer = gate.clone();
        let timeout = Duration::from_micros(fastrand::u64(0..300));
        let t = thread::spawn(move || closer.close_for(timeout));

        thread::sleep(Duration::from_micros(fastrand::u64(0..300)));
        gate.open().unwrap();

        // Either the waiter took the release, or it gave up and the release
        // was stored for the next close.
        match t.join().unwrap() {
            Ok(()) => assert_eq!(gate.pending(), 0),
            Err(GateError::TimedOut) => assert_eq!(gate.pending(), 1),
            Err(other) => panic!("unexpected close result: {other:?}"),
        }
        assert!(!gate.is_waiting());
    }
}
