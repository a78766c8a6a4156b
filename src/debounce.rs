use log::debug;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Delays values until input has been quiet for a fixed window.
///
/// Every [`push`](Debouncer::push) cancels the pending emission and schedules
/// the new value, so only the last value of a burst is delivered. Dropping the
/// debouncer cancels whatever is pending.
pub struct Debouncer<T> {
    window: Duration,
    output: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, output: UnboundedSender<T>) -> Self {
        Self {
            window,
            output,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value` for emission once the window elapses without another push.
    pub fn push(&mut self, value: T) {
        self.cancel();

        // Deadline is fixed here, not when the timer task first gets polled
        let deadline = Instant::now() + self.window;
        let output = self.output.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // Receiver gone means the consumer shut down
            let _ = output.send(value);
        }));
    }

    /// Drop the pending emission, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Debounce superseded before {:?} elapsed", self.window);
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_once_after_last_input() {
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = Debouncer::new(WINDOW, tx);
        let start = Instant::now();

        debouncer.push("a");
        sleep(Duration::from_millis(100)).await;
        debouncer.push("b");
        sleep(Duration::from_millis(100)).await;
        debouncer.push("c");
        sleep(Duration::from_millis(400)).await;
        debouncer.push("d");

        let value = rx.recv().await.unwrap();
        let elapsed = start.elapsed();
        assert_eq!(value, "d");
        assert!(elapsed >= Duration::from_millis(1100), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(1110), "{:?}", elapsed);

        sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_emitted_inside_window() {
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = Debouncer::new(WINDOW, tx);

        debouncer.push("curry".to_string());
        sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), "curry");
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_emit_separately() {
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = Debouncer::new(WINDOW, tx);

        debouncer.push(1);
        sleep(Duration::from_millis(600)).await;
        debouncer.push(2);
        sleep(Duration::from_millis(600)).await;

        assert_eq!(rx.try_recv().unwrap(), 1);
        assert_eq!(rx.try_recv().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = Debouncer::new(WINDOW, tx);

        debouncer.push("gone");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let (tx, mut rx) = unbounded_channel();
        {
            let mut debouncer = Debouncer::new(WINDOW, tx);
            debouncer.push("gone");
        }

        sleep(Duration::from_secs(1)).await;
        // Sender went away with the aborted task, so the channel is closed and empty
        assert!(rx.recv().await.is_none());
    }
}
