use core::sync::atomic::Ordering::Relaxed;
use crate::sys::futex::{futex_wait, futex_wake, Futex};
use crate::sys::mutex::Mutex;
use crate::sys::timespec::Timespec;

/// A futex condition variable. The futex holds a sequence number that every
/// notification bumps, so a waiter that read the old value before unlocking
/// the mutex cannot sleep through a notification sent after it.
pub(crate) struct Condvar {
    futex: Futex,
}

impl Condvar {
    #[inline]
    pub const fn new() -> Condvar {
        Condvar { futex: Futex::new(0) }
    }

    pub fn notify_one(&self) {
        self.futex.fetch_add(1, Relaxed);
        futex_wake(&self.futex);
    }

    /// # Safety
    ///
    /// The calling thread must hold `mutex`. It is held again on return.
    pub unsafe fn wait(&self, mutex: &Mutex) {
        unsafe { self.wait_optional_deadline(mutex, None) };
    }

    /// Returns false if `deadline` passed before a notification arrived.
    ///
    /// # Safety
    ///
    /// The calling thread must hold `mutex`. It is held again on return.
    pub unsafe fn wait_until(&self, mutex: &Mutex, deadline: &Timespec) -> bool {
        unsafe { self.wait_optional_deadline(mutex, Some(deadline)) }
    }

    unsafe fn wait_optional_deadline(&self, mutex: &Mutex, deadline: Option<&Timespec>) -> bool {
        // Examine the notification counter _before_ we unlock the mutex.
        let futex_value = self.futex.load(Relaxed);

        unsafe { mutex.unlock() };

        let r = futex_wait(&self.futex, futex_value, deadline);

        mutex.lock();

        r
    }
}
