//! Background price list refresh
//!
//! Periodically calls [`PricingsProvider::refresh`] on a tokio task and
//! reports each cycle over a channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::pricings::PricingsProvider;

/// Messages sent from the background refresh task
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshMessage {
    /// Refresh started
    RefreshStarted,
    /// Refresh completed without error
    RefreshCompleted,
    /// An error occurred during refresh
    RefreshError(String),
}

/// Configuration for the refresh loop
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between refreshes
    pub interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600), // matches the default cache TTL
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh task
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    shutdown_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Spawns the refresh loop for `provider`
    ///
    /// The first refresh runs immediately, then once per `interval`. With
    /// refresh disabled no task is spawned and no messages are ever sent.
    pub fn spawn(provider: Arc<dyn PricingsProvider>, config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = config.enabled.then(|| {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(config.interval);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            if msg_tx.send(RefreshMessage::RefreshStarted).await.is_err() {
                                break;
                            }

                            let message = match provider.refresh().await {
                                Ok(()) => RefreshMessage::RefreshCompleted,
                                Err(e) => {
                                    tracing::error!(error = %e, "background refresh failed");
                                    RefreshMessage::RefreshError(e.to_string())
                                }
                            };
                            if msg_tx.send(message).await.is_err() {
                                break;
                            }
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            })
        });

        Self {
            receiver: msg_rx,
            shutdown_tx,
            task,
        }
    }

    /// Stops the refresh loop and waits for it to exit
    ///
    /// Undelivered messages are discarded. Closing the receiver first
    /// releases a loop blocked on a full channel.
    pub async fn shutdown(self) {
        let Self {
            receiver,
            shutdown_tx,
            task,
        } = self;
        drop(receiver);

        let _ = shutdown_tx.send(()).await;
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}

/// Checks for pending refresh messages without blocking
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
