/*!
Sticky gates: two-party thread synchronization for Linux, built directly on
the `futex` syscall without the use of libc.

A gate behaves like a condition variable guarding a flag, with one
difference that matters: an [`open`](gate::StickyGate::open) issued before
the other thread reaches [`close`](gate::StickyGate::close) is remembered,
so the closing thread does not block. This removes the lost-wakeup hazard of
a plain condition variable for the common "one thread waits for another"
rendezvous.

- [`gate::StickyGate`] remembers a single pending release.
- [`gate::CountingGate`] remembers how many releases are pending.
- [`time::Instant`] supplies monotonic deadlines for timed waits.

```
use sticky_gate::gate::StickyGate;
use std::thread;

static READY: StickyGate = StickyGate::new();

let waiter = thread::spawn(|| READY.close());
READY.open();
waiter.join().unwrap().unwrap();
```

# Crate features

* **not_process_private** -
  Allows for sharing the gates with other processes.
*/

#![cfg(target_os = "linux")]
#![no_std]

pub mod gate;
pub mod time;
mod sync;
mod sys;
#[cfg(test)]
mod tests;
