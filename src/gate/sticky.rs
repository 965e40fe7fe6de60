use core::fmt;
use core::time::Duration;
use crate::gate::handoff::{Handoff, Waiter};
use crate::gate::GateError;
use crate::time::Instant;

/// The observable states of a [`StickyGate`].
///
/// It is returned by the [`state`] method.
///
/// [`state`]: StickyGate::state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateState {
    /// No release is stored and nobody is waiting.
    Idle,
    /// The gate was opened and the next close will return immediately.
    SignalPending,
    /// A thread is blocked closing the gate.
    WaiterBlocked,
}

/// A sticky gate
///
/// A sticky gate lets one thread wait for another, like a condition variable
/// with a boolean flag, except that the gate remembers an [`open`] that
/// happens before the matching [`close`]. A thread that closes an already
/// opened gate passes straight through, so there is no lost-wakeup window to
/// guard against.
///
/// Opens do not queue: any number of them with no close in between
/// collapse into a single release. Use a [`CountingGate`] to keep every one.
///
/// The gate is meant for two threads, one closing and one opening. A second
/// thread that tries to close while another is blocked in [`close`] gets
/// [`GateError::Occupied`]. Several openers are allowed and simply race.
///
/// A [`close`] with no matching [`open`] blocks forever. Use [`close_for`] or
/// [`close_until`] when the opener might not come.
///
/// [`open`]: Self::open
/// [`close`]: Self::close
/// [`close_for`]: Self::close_for
/// [`close_until`]: Self::close_until
/// [`CountingGate`]: super::CountingGate
///
/// # Examples
///
/// ```
/// use sticky_gate::gate::StickyGate;
/// use std::sync::Arc;
/// use std::thread;
///
/// let gate = Arc::new(StickyGate::new());
/// let gate2 = Arc::clone(&gate);
///
/// // Opening before anybody waits is remembered.
/// gate.open();
/// thread::spawn(move || {
///     gate2.close().unwrap();
/// }).join().unwrap();
///
/// // Waiting before anybody opens blocks until the open.
/// let gate2 = Arc::clone(&gate);
/// let waiter = thread::spawn(move || {
///     gate2.close().unwrap();
/// });
/// gate.open();
/// waiter.join().unwrap();
/// ```
pub struct StickyGate {
    inner: Handoff<bool>,
}

impl StickyGate {
    /// Creates a new gate with no release stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use sticky_gate::gate::{GateState, StickyGate};
    ///
    /// let gate = StickyGate::new();
    /// assert_eq!(gate.state(), GateState::Idle);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> StickyGate {
        StickyGate { inner: Handoff::new(false) }
    }

    /// Blocks the current thread until the gate is opened.
    ///
    /// If the gate was opened since the last close, this returns immediately
    /// and consumes that release.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Occupied`] if another thread is already blocked
    /// closing this gate.
    pub fn close(&self) -> Result<(), GateError> {
        self.inner.close(None)
    }

    /// Like [`close`], but gives up after `dur`.
    ///
    /// A timed-out close consumes nothing: an open that arrives afterwards is
    /// stored for the next close. A `dur` too large to represent as a
    /// deadline waits without a limit.
    ///
    /// [`close`]: Self::close
    ///
    /// # Errors
    ///
    /// Returns [`GateError::TimedOut`] if the gate was not opened in time, or
    /// [`GateError::Occupied`] if another thread is already waiting.
    ///
    /// # Examples
    ///
    /// ```
    /// use sticky_gate::gate::{GateError, StickyGate};
    /// use std::time::Duration;
    ///
    /// let gate = StickyGate::new();
    /// assert_eq!(gate.close_for(Duration::from_millis(10)), Err(GateError::TimedOut));
    ///
    /// gate.open();
    /// assert_eq!(gate.close_for(Duration::from_millis(10)), Ok(()));
    /// ```
    pub fn close_for(&self, dur: Duration) -> Result<(), GateError> {
        self.inner.close(Instant::now().checked_add(dur))
    }

    /// Like [`close`], but gives up at `deadline`.
    ///
    /// A deadline in the past still consumes a stored release, and otherwise
    /// fails without blocking.
    ///
    /// [`close`]: Self::close
    ///
    /// # Errors
    ///
    /// Returns [`GateError::TimedOut`] if the gate was not opened in time, or
    /// [`GateError::Occupied`] if another thread is already waiting.
    pub fn close_until(&self, deadline: Instant) -> Result<(), GateError> {
        self.inner.close(Some(deadline))
    }

    /// Consumes a stored release without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::WouldBlock`] if the gate has not been opened since
    /// the last close.
    ///
    /// # Examples
    ///
    /// ```
    /// use sticky_gate::gate::{GateError, StickyGate};
    ///
    /// let gate = StickyGate::new();
    /// gate.open();
    /// gate.open();
    /// assert_eq!(gate.try_close(), Ok(()));
    /// assert_eq!(gate.try_close(), Err(GateError::WouldBlock));
    /// ```
    pub fn try_close(&self) -> Result<(), GateError> {
        self.inner.try_close()
    }

    /// Opens the gate.
    ///
    /// If a thread is blocked in a close, it is woken and nothing is stored.
    /// Otherwise the release is stored for the next close, unless one is
    /// stored already.
    pub fn open(&self) {
        match self.inner.open() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Reports what the gate is doing right now. Another thread may change
    /// it as soon as this returns.
    pub fn state(&self) -> GateState {
        self.inner.inspect(|state| {
            if state.pending {
                GateState::SignalPending
            } else if state.waiter == Waiter::Blocked {
                GateState::WaiterBlocked
            } else {
                GateState::Idle
            }
        })
    }
}

impl fmt::Debug for StickyGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyGate").field("state", &self.state()).finish()
    }
}

impl Default for StickyGate {
    /// Creates a `StickyGate` with no release stored.
    fn default() -> StickyGate {
        StickyGate::new()
    }
}
