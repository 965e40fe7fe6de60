//! The handoff protocol shared by every gate.
//!
//! All state lives in one [`Monitor`]. A closing thread either consumes a
//! stored release or registers itself as the waiter and sleeps on the
//! monitor's condition variable. An opening thread either stores a release or,
//! when a waiter is registered, hands the release over by flipping the
//! waiter's slot to [`Waiter::Released`] and notifying once. Both decisions
//! are taken under the lock, so an open can neither slip in between the
//! waiter's check and its sleep nor be counted twice.

use log::{debug, trace, warn};
use crate::gate::GateError;
use crate::sync::Monitor;
use crate::time::Instant;

/// Storage for releases that arrived while nobody was waiting.
pub(crate) trait Pending {
    type Error;

    /// Records one more release.
    fn store(&mut self) -> Result<(), Self::Error>;

    /// Consumes one stored release. Returns false if there was none.
    fn take(&mut self) -> bool;
}

/// A flag: any number of releases collapse into one.
impl Pending for bool {
    type Error = core::convert::Infallible;

    fn store(&mut self) -> Result<(), Self::Error> {
        *self = true;
        Ok(())
    }

    fn take(&mut self) -> bool {
        core::mem::replace(self, false)
    }
}

/// A counter: every release is kept.
impl Pending for usize {
    type Error = GateError;

    fn store(&mut self) -> Result<(), GateError> {
        *self = self.checked_add(1).ok_or(GateError::Overflow)?;
        Ok(())
    }

    fn take(&mut self) -> bool {
        match self.checked_sub(1) {
            Some(rest) => {
                *self = rest;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Waiter {
    /// Nobody is inside a close.
    Absent,
    /// A thread is sleeping in a close and nothing has been handed to it.
    Blocked,
    /// A release was handed to the sleeping thread, which has not yet
    /// re-acquired the lock to leave.
    Released,
}

pub(crate) struct State<P> {
    pub pending: P,
    pub waiter: Waiter,
}

pub(crate) struct Handoff<P> {
    monitor: Monitor<State<P>>,
}

impl<P: Pending> Handoff<P> {
    pub const fn new(pending: P) -> Handoff<P> {
        Handoff { monitor: Monitor::new(State { pending, waiter: Waiter::Absent }) }
    }

    /// Runs `f` on a snapshot of the state, under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&State<P>) -> R) -> R {
        let state = self.monitor.lock();
        f(&*state)
    }

    /// Consumes a release, blocking until one arrives or `deadline` passes.
    pub fn close(&self, deadline: Option<Instant>) -> Result<(), GateError> {
        let mut state = self.monitor.lock();

        if state.pending.take() {
            trace!("gate close consumed a stored release");
            return Ok(());
        }

        if state.waiter != Waiter::Absent {
            warn!("gate close refused: another thread is already waiting");
            return Err(GateError::Occupied);
        }

        if let Some(deadline) = deadline {
            if deadline <= Instant::now() {
                debug!("gate close timed out: deadline already passed");
                return Err(GateError::TimedOut);
            }
        }

        state.waiter = Waiter::Blocked;
        trace!("gate close blocking");

        loop {
            let timed_out = match deadline {
                Some(deadline) => {
                    let (guard, timed_out) = self.monitor.wait_until(state, deadline);
                    state = guard;
                    timed_out
                }
                None => {
                    state = self.monitor.wait(state);
                    false
                }
            };

            // A hand-off that beat the deadline to the lock still counts.
            if state.waiter == Waiter::Released {
                state.waiter = Waiter::Absent;
                trace!("gate close woken by a handed-off release");
                return Ok(());
            }

            if timed_out {
                state.waiter = Waiter::Absent;
                debug!("gate close timed out without a release");
                return Err(GateError::TimedOut);
            }
        }
    }

    /// Consumes a stored release without blocking.
    pub fn try_close(&self) -> Result<(), GateError> {
        let mut state = self.monitor.lock();

        if state.pending.take() {
            trace!("gate try_close consumed a stored release");
            Ok(())
        } else {
            Err(GateError::WouldBlock)
        }
    }

    /// Hands a release to the blocked waiter, or stores it for the next close.
    pub fn open(&self) -> Result<(), P::Error> {
        let mut state = self.monitor.lock();

        match state.waiter {
            Waiter::Blocked => {
                state.waiter = Waiter::Released;
                self.monitor.notify_one();
                trace!("gate open handed its release to the waiter");
                Ok(())
            }
            // A waiter that already got its release is leaving; this one is
            // for whoever closes next.
            Waiter::Absent | Waiter::Released => {
                state.pending.store()?;
                trace!("gate open stored a release");
                Ok(())
            }
        }
    }
}
