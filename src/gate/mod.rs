//! Two-party sticky gates.
//!
//! A gate lets one thread block until another thread releases it. Unlike a
//! bare [condition variable](https://doc.rust-lang.org/std/sync/struct.Condvar.html),
//! a gate remembers a release that arrives before anybody waits, so the order
//! in which the two threads get there does not matter.
//!
//! - [`StickyGate`]: remembers at most one release. Extra opens are
//!   discarded.
//!
//! - [`CountingGate`]: remembers every release. Each close consumes one.
//!
//! Both gates offer the same family of closing operations: [`close`] blocks
//! without limit, [`close_for`] and [`close_until`] give up after a duration
//! or at a [`time::Instant`], and [`try_close`] never blocks. Failures are
//! reported as a [`GateError`].
//!
//! Gates are built for exactly one waiting thread. The wait happens inside a
//! futex condition variable with the gate's lock released, so openers are
//! never held up by a sleeping waiter.
//!
//! [`close`]: StickyGate::close
//! [`close_for`]: StickyGate::close_for
//! [`close_until`]: StickyGate::close_until
//! [`try_close`]: StickyGate::try_close
//! [`time::Instant`]: crate::time::Instant

mod counting;
mod error;
mod handoff;
mod sticky;

pub use counting::CountingGate;
pub use error::GateError;
pub use sticky::GateState;
pub use sticky::StickyGate;

#[cfg(test)]
pub(crate) use handoff::Pending;
