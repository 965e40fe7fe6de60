mod mutex;
mod futex;
mod timespec;
mod condvar;

pub(crate) use mutex::Mutex;
pub(crate) use condvar::Condvar;
pub(crate) use timespec::Timespec;
