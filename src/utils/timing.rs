//! Call-rate control and delays
//!
//! [`Debouncer`] and [`Throttler`] wrap a callback and decide when it
//! actually runs. Both are plain values: drop them, or call
//! [`Debouncer::cancel`] / [`Throttler::reset`], to release their state.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Coalesces bursts of calls into one trailing call
///
/// Every [`call`](Debouncer::call) cancels the pending run and schedules a
/// new one `wait` after the latest call, with the latest arguments.
pub struct Debouncer<A> {
    callback: Callback<A>,
    wait: Duration,
    /// The single scheduled run, if any
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F>(callback: F, wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            wait,
            pending: Mutex::new(None),
        }
    }

    /// Schedules the callback, replacing any pending run
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn call(&self, args: A) {
        let callback = Arc::clone(&self.callback);
        let wait = self.wait;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        trace!(wait_ms = wait.as_millis() as u64, "debounced call scheduled");
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(args);
        }));
    }

    /// Drops the pending run, returning whether one was waiting
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    /// Whether a run is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

/// Wraps `callback` in a [`Debouncer`]
pub fn debounce<A, F>(callback: F, wait: Duration) -> Debouncer<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debouncer::new(callback, wait)
}

/// Runs at most one call per window, on the leading edge
///
/// The first call runs immediately and opens a window of `limit`; calls
/// inside the window are dropped, not queued.
pub struct Throttler<A> {
    callback: Callback<A>,
    limit: Duration,
    window_start: Mutex<Option<Instant>>,
}

impl<A> Throttler<A> {
    pub fn new<F>(callback: F, limit: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            limit,
            window_start: Mutex::new(None),
        }
    }

    /// Runs the callback unless a window is open
    ///
    /// Returns `true` if the callback ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut window_start = self.window_start.lock();
            if window_start.is_some_and(|start| now.duration_since(start) < self.limit) {
                trace!("throttled call dropped");
                return false;
            }
            *window_start = Some(now);
        }

        (self.callback)(args);
        true
    }

    /// Closes the current window so the next call runs immediately
    pub fn reset(&self) {
        *self.window_start.lock() = None;
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// Wraps `callback` in a [`Throttler`]
pub fn throttle<A, F>(callback: F, limit: Duration) -> Throttler<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttler::new(callback, limit)
}

/// Suspends the current task for `duration`
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspends the current task for `ms` milliseconds
pub async fn sleep_ms(ms: u64) {
    sleep(Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |n| sink.lock().push(n))
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_runs_once_with_last_args() {
        let (calls, record) = recorder();
        let debounced = debounce(record, Duration::from_millis(100));

        debounced.call(1);
        tokio::time::advance(Duration::from_millis(30)).await;
        debounced.call(2);
        tokio::time::advance(Duration::from_millis(30)).await;
        debounced.call(3);
        assert!(debounced.is_pending());

        sleep_ms(150).await;
        assert_eq!(*calls.lock(), vec![3]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_separate_bursts() {
        let (calls, record) = recorder();
        let debounced = debounce(record, Duration::from_millis(50));

        debounced.call(1);
        sleep_ms(80).await;
        debounced.call(2);
        sleep_ms(80).await;

        assert_eq!(*calls.lock(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_cancel() {
        let (calls, record) = recorder();
        let debounced = debounce(record, Duration::from_millis(50));

        debounced.call(1);
        assert!(debounced.cancel());
        assert!(!debounced.cancel());
        sleep_ms(100).await;

        assert!(calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_drop_cancels() {
        let (calls, record) = recorder();
        {
            let debounced = debounce(record, Duration::from_millis(50));
            debounced.call(7);
        }
        sleep_ms(100).await;

        assert!(calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_leading_edge() {
        let (calls, record) = recorder();
        let throttled = throttle(record, Duration::from_millis(100));

        assert!(throttled.call(1));
        assert!(!throttled.call(2));
        tokio::time::advance(Duration::from_millis(99)).await;
        assert!(!throttled.call(3));
        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(throttled.call(4));

        assert_eq!(*calls.lock(), vec![1, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_reset() {
        let (calls, record) = recorder();
        let throttled = throttle(record, Duration::from_secs(10));

        assert!(throttled.call(1));
        throttled.reset();
        assert!(throttled.call(2));

        assert_eq!(*calls.lock(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_clock() {
        let start = Instant::now();
        sleep(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
