use core::fmt;
use core::time::Duration;
use crate::gate::handoff::{Handoff, Waiter};
use crate::gate::GateError;
use crate::time::Instant;

/// A counting sticky gate
///
/// Works like a [`StickyGate`], but every [`open`] is kept. After `n` opens
/// with no close in between, the next `n` closes return immediately, each
/// consuming one release, and the one after that blocks.
///
/// An open that finds a thread blocked in [`close`] hands its release to that
/// thread directly instead of adding it to the count.
///
/// The same two-party rules apply as for [`StickyGate`]: one closing thread
/// at a time, and a [`close`] with no matching open blocks forever.
///
/// [`StickyGate`]: super::StickyGate
/// [`open`]: Self::open
/// [`close`]: Self::close
///
/// # Examples
///
/// ```
/// use sticky_gate::gate::CountingGate;
/// use std::sync::Arc;
/// use std::thread;
///
/// let gate = Arc::new(CountingGate::new());
/// let gate2 = Arc::clone(&gate);
///
/// let worker = thread::spawn(move || {
///     gate2.close().unwrap();
///     gate2.close().unwrap();
/// });
/// gate.open().unwrap();
/// gate.open().unwrap();
/// worker.join().unwrap();
///
/// assert_eq!(gate.pending(), 0);
/// ```
pub struct CountingGate {
    inner: Handoff<usize>,
}

impl CountingGate {
    /// Creates a new gate with no releases stored.
    #[must_use]
    #[inline]
    pub const fn new() -> CountingGate {
        CountingGate { inner: Handoff::new(0) }
    }

    /// Blocks the current thread until a release is available, then consumes
    /// it. Returns immediately if one is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Occupied`] if another thread is already blocked
    /// closing this gate.
    pub fn close(&self) -> Result<(), GateError> {
        self.inner.close(None)
    }

    /// Like [`close`], but gives up after `dur`. A timed-out close leaves the
    /// count untouched.
    ///
    /// [`close`]: Self::close
    ///
    /// # Errors
    ///
    /// Returns [`GateError::TimedOut`] if no release arrived in time, or
    /// [`GateError::Occupied`] if another thread is already waiting.
    pub fn close_for(&self, dur: Duration) -> Result<(), GateError> {
        self.inner.close(Instant::now().checked_add(dur))
    }

    /// Like [`close`], but gives up at `deadline`.
    ///
    /// [`close`]: Self::close
    ///
    /// # Errors
    ///
    /// Returns [`GateError::TimedOut`] if no release arrived in time, or
    /// [`GateError::Occupied`] if another thread is already waiting.
    ///
    /// # Examples
    ///
    /// ```
    /// use sticky_gate::gate::{CountingGate, GateError};
    /// use sticky_gate::time::Instant;
    ///
    /// let gate = CountingGate::new();
    /// let past = Instant::now();
    ///
    /// gate.open().unwrap();
    /// assert_eq!(gate.close_until(past), Ok(()));
    /// assert_eq!(gate.close_until(past), Err(GateError::TimedOut));
    /// ```
    pub fn close_until(&self, deadline: Instant) -> Result<(), GateError> {
        self.inner.close(Some(deadline))
    }

    /// Consumes one stored release without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::WouldBlock`] if the count is zero.
    pub fn try_close(&self) -> Result<(), GateError> {
        self.inner.try_close()
    }

    /// Adds a release, or hands it to the thread blocked in a close.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Overflow`] if `usize::MAX` releases are already
    /// stored. The gate is left unchanged.
    pub fn open(&self) -> Result<(), GateError> {
        self.inner.open()
    }

    /// The number of stored releases. Another thread may change it as soon as
    /// this returns.
    pub fn pending(&self) -> usize {
        self.inner.inspect(|state| state.pending)
    }

    /// Whether a thread is blocked in a close that has not been handed a
    /// release yet.
    pub fn is_waiting(&self) -> bool {
        self.inner.inspect(|state| state.waiter == Waiter::Blocked)
    }
}

impl fmt::Debug for CountingGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingGate")
            .field("pending", &self.pending())
            .field("waiting", &self.is_waiting())
            .finish()
    }
}

impl Default for CountingGate {
    /// Creates a `CountingGate` with no releases stored.
    fn default() -> CountingGate {
        CountingGate::new()
    }
}
