extern crate std;
use std::thread;
use std::time::{Duration, Instant};

mod counting;
mod stress;
mod time;

/// Routes the crate's `log` output through the test harness. Run with
/// `RUST_LOG=trace` to see every gate transition.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Polls `condition` until it holds. Used to make sure a thread has really
/// gone to sleep inside a gate before the test opens it.
pub(crate) fn wait_for(condition: impl Fn() -> bool) {
    let start = Instant::now();
    while !condition() {
        assert!(start.elapsed() < Duration::from_secs(10), "condition never became true");
        thread::sleep(Duration::from_millis(1));
    }
}
