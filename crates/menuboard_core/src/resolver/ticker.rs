//! Cancellable recurring timer.
//!
//! # Invariants
//! - The callback runs on a single background thread, never concurrently
//!   with itself.
//! - Dropping the ticker stops it and joins the thread; no callback runs
//!   after `stop()`/drop returns.

use log::{debug, warn};
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts calling `on_tick` every `interval` until stopped.
    ///
    /// `on_tick` returning `false` ends the loop early.
    ///
    /// # Errors
    /// - Returns an error when the worker thread cannot be spawned.
    pub fn start<F>(name: &str, interval: Duration, mut on_tick: F) -> io::Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_name = name.to_string();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                debug!("event=ticker_start module=resolver status=ok name={thread_name}");
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if !on_tick() {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("event=ticker_stop module=resolver status=ok name={thread_name}");
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stops the ticker and waits for the worker to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Waits for the worker to end on its own (callback returned `false`).
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("event=ticker_join module=resolver status=error error_code=worker_panicked");
            }
        }
    }

    fn shutdown(&mut self) {
        // Disconnecting the channel wakes the worker immediately.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("event=ticker_join module=resolver status=error error_code=worker_panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::Ticker;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn callback_can_end_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let ticker = Ticker::start("test-ticker", Duration::from_millis(5), move || {
            seen.fetch_add(1, Ordering::SeqCst) + 1 < 3
        })
        .unwrap();
        ticker.join();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn no_ticks_after_stop() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let ticker = Ticker::start("test-ticker", Duration::from_secs(3600), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();
        ticker.stop();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
