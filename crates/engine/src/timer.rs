use std::time::Duration;

use tokio::task::JoinHandle;

/// One-shot cancellable timer that closes the feedback window.
///
/// Arming spawns a single task that sleeps for the delay and then runs
/// the callback. Re-arming or cancelling aborts any pending task first,
/// so at most one feedback window can ever be waiting to fire.
#[derive(Debug, Default)]
pub struct FeedbackTimer {
    handle: Option<JoinHandle<()>>,
}

impl FeedbackTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `on_fire` after `delay`, cancelling any pending fire.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        }));
    }

    /// Abort a pending fire, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_the_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = FeedbackTimer::new();

        let counter = Arc::clone(&fired);
        timer.arm(Duration::from_millis(2000), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(timer.is_armed());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_the_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = FeedbackTimer::new();

        let counter = Arc::clone(&fired);
        timer.arm(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();
        assert!(!timer.is_armed());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_pending_fire() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = FeedbackTimer::new();

        let first = Arc::clone(&fired);
        timer.arm(Duration::from_millis(100), move || {
            first.fetch_add(10, Ordering::SeqCst);
        });
        let second = Arc::clone(&fired);
        timer.arm(Duration::from_millis(100), move || {
            second.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
