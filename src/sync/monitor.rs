use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use crate::sys;
use crate::time::Instant;

/// A monitor: some data, the lock protecting it, and a condition variable
/// tied to that lock.
///
/// Pairing the condition variable with exactly one lock rules out the
/// "waited with the wrong mutex" class of bugs, so no runtime check is needed.
/// There is no poisoning: a panic while the guard is held leaves the data as
/// it was at the time of the panic.
pub(crate) struct Monitor<T> {
    lock: sys::Mutex,
    condvar: sys::Condvar,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for Monitor<T> {}

/// `T` only needs to be `Send`: the lock hands out `&mut T` to one thread at
/// a time.
unsafe impl<T: Send> Sync for Monitor<T> {}

/// An RAII scoped lock of a [`Monitor`]. Dropping it unlocks the monitor.
///
/// The futex lock may be released from any thread, but the guard is kept
/// `!Send` anyway so that it cannot outlive the thread that locked it.
#[must_use = "if unused the Monitor will immediately unlock"]
pub(crate) struct MonitorGuard<'a, T> {
    monitor: &'a Monitor<T>,
    _not_send: PhantomData<*const ()>,
}

impl<T> Monitor<T> {
    #[inline]
    pub const fn new(data: T) -> Monitor<T> {
        Monitor {
            lock: sys::Mutex::new(),
            condvar: sys::Condvar::new(),
            data: UnsafeCell::new(data),
        }
    }

    pub fn lock(&self) -> MonitorGuard<'_, T> {
        self.lock.lock();
        MonitorGuard { monitor: self, _not_send: PhantomData }
    }

    pub fn try_lock(&self) -> Option<MonitorGuard<'_, T>> {
        if self.lock.try_lock() {
            Some(MonitorGuard { monitor: self, _not_send: PhantomData })
        } else {
            None
        }
    }

    /// Releases the lock, blocks until notified, and re-acquires the lock.
    ///
    /// Susceptible to spurious wakeups; callers re-check their state.
    pub fn wait<'a>(&self, guard: MonitorGuard<'a, T>) -> MonitorGuard<'a, T> {
        debug_assert!(core::ptr::eq(self, guard.monitor));
        unsafe { self.condvar.wait(&self.lock) };
        guard
    }

    /// Like [`wait`](Self::wait), but gives up at `deadline`. The returned
    /// flag is `true` if the deadline passed without a notification.
    pub fn wait_until<'a>(
        &self,
        guard: MonitorGuard<'a, T>,
        deadline: Instant,
    ) -> (MonitorGuard<'a, T>, bool) {
        debug_assert!(core::ptr::eq(self, guard.monitor));
        let notified = unsafe { self.condvar.wait_until(&self.lock, deadline.as_timespec()) };
        (guard, !notified)
    }

    pub fn notify_one(&self) {
        self.condvar.notify_one()
    }
}

impl<T: fmt::Debug> fmt::Debug for Monitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Monitor");
        match self.try_lock() {
            Some(guard) => {
                d.field("data", &&*guard);
            }
            None => {
                d.field("data", &format_args!("<locked>"));
            }
        }
        d.finish_non_exhaustive()
    }
}

impl<T> Deref for MonitorGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.monitor.data.get() }
    }
}

impl<T> DerefMut for MonitorGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.monitor.data.get() }
    }
}

impl<T> Drop for MonitorGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            self.monitor.lock.unlock();
        }
    }
}
