use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use log::trace;

/// Default delay between refresh ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// A cancellable fixed-interval background task.
///
/// The worker sleeps `interval`, fires `on_tick`, and repeats until
/// cancelled. The handle is owned by the screen that started it and is
/// joined on cancellation, so no thread outlives its screen.
pub struct Poller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn start(interval: Duration, on_tick: impl Fn() + Send + 'static) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                trace!("poller tick");
                on_tick();
            }
        });
        Self { stop, handle: Some(handle) }
    }

    /// Stop the worker and wait for it to exit (at most one interval).
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}
