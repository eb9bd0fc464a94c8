use std::time::Duration;

use tokio::{select, sync::mpsc::UnboundedSender, time::sleep};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::Action;

/// Sends actions back to the main loop after a delay.
#[derive(Clone)]
pub struct Delayer {
    action_tx: UnboundedSender<Action>,
}

/// Handle to an action scheduled with [`Delayer::schedule`]. Dropping the handle does not cancel
/// the action.
#[derive(Debug)]
pub struct DelayHandle {
    token: CancellationToken,
    delay: Duration,
}

impl DelayHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Delayer {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }

    pub fn schedule(&self, action: Action, delay: Duration) -> DelayHandle {
        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            select! {
                _ = child.cancelled() => {
                    debug!("Cancelled delayed {action:?}");
                }
                _ = sleep(delay) => {
                    let _ = tx.send(action);
                }
            }
        });
        DelayHandle { token, delay }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::{
        sync::mpsc::{error::TryRecvError, unbounded_channel},
        task::yield_now,
        time::{advance, Instant},
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = unbounded_channel();
        let start = Instant::now();
        let handle = Delayer::new(tx).schedule(Action::Quit, Duration::from_millis(200));
        assert_eq!(handle.delay(), Duration::from_millis(200));

        assert_eq!(rx.recv().await, Some(Action::Quit));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200), "fired after {elapsed:?}");
        assert!(elapsed < Duration::from_millis(210), "fired after {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_early() {
        let (tx, mut rx) = unbounded_channel();
        let _handle = Delayer::new(tx).schedule(Action::Quit, Duration::from_millis(200));
        yield_now().await;
        advance(Duration::from_millis(199)).await;
        yield_now().await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_action_never_fires() {
        let (tx, mut rx) = unbounded_channel();
        let handle = Delayer::new(tx.clone()).schedule(Action::Quit, Duration::from_millis(200));
        handle.cancel();
        assert!(handle.is_cancelled());
        sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        drop(tx);
    }
}
