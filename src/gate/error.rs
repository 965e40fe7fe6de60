use thiserror::Error;

/// An enumeration of the ways an operation on a gate can fail to release the
/// calling thread.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateError {
    /// Another thread is already blocked closing this gate. Gates support a
    /// single waiter; a second one is refused rather than left to race.
    #[error("another thread is already waiting on this gate")]
    Occupied,

    /// A timed close reached its deadline before the gate was opened.
    /// Nothing was consumed.
    #[error("the gate was not opened before the deadline")]
    TimedOut,

    /// A non-blocking close found no pending release.
    #[error("try_close failed because the operation would block")]
    WouldBlock,

    /// A counting gate already holds `usize::MAX` pending releases.
    #[error("too many pending releases on the gate")]
    Overflow,
}
