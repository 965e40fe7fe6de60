use core::sync::atomic::Ordering::{Acquire, Relaxed, Release};
use crate::sys::futex::{futex_wait, futex_wake, Futex, Primitive};

const UNLOCKED: Primitive = 0;
/// Locked, no other threads waiting.
const LOCKED: Primitive = 1;
/// Locked, and other threads may be sleeping on the futex.
const CONTENDED: Primitive = 2;

/// How many times to re-read a locked futex before going to sleep.
const SPIN_LIMIT: u32 = 100;

/// A raw three-state futex lock. It protects no data by itself; callers pair
/// it with an `UnsafeCell`.
pub(crate) struct Mutex {
    futex: Futex,
}

impl Mutex {
    #[inline]
    pub const fn new() -> Mutex {
        Mutex { futex: Futex::new(UNLOCKED) }
    }

    #[inline]
    pub fn try_lock(&self) -> bool {
        self.futex.compare_exchange(UNLOCKED, LOCKED, Acquire, Relaxed).is_ok()
    }

    #[inline]
    pub fn lock(&self) {
        if self.futex.compare_exchange(UNLOCKED, LOCKED, Acquire, Relaxed).is_err() {
            self.lock_contended();
        }
    }

    #[cold]
    fn lock_contended(&self) {
        let mut state = self.spin();

        // The lock may have been released while spinning.
        if state == UNLOCKED {
            match self.futex.compare_exchange(UNLOCKED, LOCKED, Acquire, Relaxed) {
                Ok(_) => return,
                Err(s) => state = s,
            }
        }

        loop {
            // Mark the lock as contended so the holder knows to wake us.
            // Taking it with CONTENDED is conservative: it may cost one
            // needless wake on unlock, but never a missed one.
            if state != CONTENDED && self.futex.swap(CONTENDED, Acquire) == UNLOCKED {
                return;
            }

            futex_wait(&self.futex, CONTENDED, None);

            state = self.spin();
        }
    }

    fn spin(&self) -> Primitive {
        let mut spin = SPIN_LIMIT;
        loop {
            // Stop on UNLOCKED (worth a try) or CONTENDED (others are already
            // sleeping, so should we).
            let state = self.futex.load(Relaxed);
            if state != LOCKED || spin == 0 {
                return state;
            }

            core::hint::spin_loop();
            spin -= 1;
        }
    }

    /// # Safety
    ///
    /// The calling thread must hold the lock.
    #[inline]
    pub unsafe fn unlock(&self) {
        if self.futex.swap(UNLOCKED, Release) == CONTENDED {
            self.wake();
        }
    }

    #[cold]
    fn wake(&self) {
        futex_wake(&self.futex);
    }
}
