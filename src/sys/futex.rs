use core::sync::atomic::AtomicU32;
use syscalls::{syscall, Errno, Sysno};
use crate::sys::timespec::Timespec;

/// An atomic for use as a futex that is at least 32-bits but may be larger
pub type Futex = AtomicU32;
/// Must be the underlying type of Futex
pub type Primitive = u32;

/// Waits for a `futex_wake` operation to wake us.
///
/// Returns directly if the futex doesn't hold the expected value.
///
/// `deadline` is an absolute point on `CLOCK_MONOTONIC`; `None` waits without
/// a time limit, as does a deadline the kernel cannot represent.
///
/// Returns false on timeout, and true in all other cases.
pub fn futex_wait(futex: &Futex, expected: Primitive, deadline: Option<&Timespec>) -> bool {
    use core::ptr::null;
    use core::sync::atomic::Ordering::Relaxed;

    let timespec = deadline.and_then(Timespec::to_timespec);

    #[cfg(feature = "not_process_private")]
    let op = nc::FUTEX_WAIT_BITSET;
    #[cfg(not(feature = "not_process_private"))]
    let op = nc::FUTEX_WAIT_BITSET | nc::FUTEX_PRIVATE_FLAG;

    loop {
        // No need to wait if the value already changed.
        if futex.load(Relaxed) != expected {
            return true;
        }

        let r = unsafe {
            // FUTEX_WAIT_BITSET takes an absolute time, unlike FUTEX_WAIT, so
            // retrying after EINTR does not stretch the deadline.
            syscall!(
                Sysno::futex,
                futex as *const Futex,
                op,
                expected,
                timespec.as_ref().map_or(null(), |t| t as *const nc::timespec_t),
                null::<u32>(), // This argument is unused for FUTEX_WAIT_BITSET.
                !0u32          // A full bitmask, to make it behave like a regular FUTEX_WAIT.
            )
        };

        match r {
            Err(Errno::ETIMEDOUT) => return false,
            Err(Errno::EINTR) => continue,
            _ => return true,
        }
    }
}

/// Wakes up one thread that's blocked on `futex_wait` on this futex.
///
/// Returns true if this actually woke up such a thread,
/// or false if no thread was waiting on this futex.
pub fn futex_wake(futex: &Futex) -> bool {
    let ptr = futex as *const Futex;

    #[cfg(feature = "not_process_private")]
    let op = nc::FUTEX_WAKE;
    #[cfg(not(feature = "not_process_private"))]
    let op = nc::FUTEX_WAKE | nc::FUTEX_PRIVATE_FLAG;
    let r = unsafe { syscall!(Sysno::futex, ptr, op, 1) };
    matches!(r, Ok(woken) if woken > 0)
}
