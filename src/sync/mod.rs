//! Blocking building blocks shared by the gates.
//!
//! [`Monitor`] bundles the data it protects with a futex lock and a futex
//! condition variable, giving the gates a single place where state is read,
//! changed and waited on.

mod monitor;

pub(crate) use monitor::Monitor;
