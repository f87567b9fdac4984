//! Content Loader
//!
//! Client side of the fetch-render-retry cycle.
//!
//! ## Cycle
//!
//! 1. Enter [`LoadState::Loading`]
//! 2. Invoke the relay, racing it against a timeout; when the timer wins the
//!    request task is aborted
//! 3. Validate the envelope ([`envelope::interpret`])
//! 4. Settle on `Error`, `Empty` or `Loaded` and raise a notification
//!
//! Retries are manual: [`ContentLoader::retry`] bumps the retry counter and
//! runs the cycle again. `&mut self` keeps a single attempt in flight.

pub mod envelope;
mod error;
mod notify;
pub mod render;
mod state;
mod transport;

pub use error::LoadError;
pub use notify::{LogNotifier, Notification, NotificationKind, Notifier};
pub use render::{render_blocks, render_html, render_text, RenderedBlock, EMPTY_PARAGRAPH};
pub use state::LoadState;
pub use transport::{HttpRelay, RelayReply, RelayTransport};

use std::sync::Arc;
use std::time::Duration;

use crate::notion::Block;

/// Default bound on one load attempt
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Prefix of every user-facing load error
pub const ERROR_PREFIX: &str = "Failed to load content";

/// Drives load cycles against a relay
pub struct ContentLoader<T: RelayTransport> {
    transport: Arc<T>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
    state: LoadState,
    retry_count: u32,
}

impl<T: RelayTransport> ContentLoader<T> {
    /// Create a loader. Nothing is fetched until [`load`](Self::load).
    pub fn new(transport: Arc<T>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            timeout: DEFAULT_TIMEOUT,
            state: LoadState::Loading,
            retry_count: 0,
        }
    }

    /// Override the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Number of user-triggered retries so far
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one load cycle (the initial "mount" load)
    pub async fn load(&mut self) -> &LoadState {
        self.state = LoadState::Loading;
        tracing::debug!(attempt = self.retry_count, "Loading content");

        self.state = match self.fetch().await {
            Ok(blocks) => {
                let state = LoadState::from(blocks);
                if let LoadState::Loaded(blocks) = &state {
                    tracing::info!(blocks = blocks.len(), "Content loaded");
                    self.notifier
                        .notify(Notification::success("Content loaded successfully"));
                } else {
                    tracing::info!("Content loaded, page is empty");
                }
                state
            }
            Err(e) => {
                let message = format!("{}: {}", ERROR_PREFIX, e);
                tracing::warn!(error = %e, "Content load failed");
                self.notifier.notify(Notification::error(message.clone()));
                LoadState::Error(message)
            }
        };

        &self.state
    }

    /// User-triggered reload
    pub async fn retry(&mut self) -> &LoadState {
        self.retry_count += 1;
        tracing::info!(retry = self.retry_count, "Retrying content load");
        self.load().await
    }

    /// Invoke the relay in its own task, bounded by the timeout.
    ///
    /// The task is aborted when the timer wins so the request does not
    /// outlive the attempt.
    async fn fetch(&self) -> Result<Vec<Block>, LoadError> {
        let transport = Arc::clone(&self.transport);
        let mut request = tokio::spawn(async move { transport.invoke().await });

        match tokio::time::timeout(self.timeout, &mut request).await {
            Ok(Ok(reply)) => envelope::interpret(&reply?),
            Ok(Err(join_error)) => Err(LoadError::Internal(join_error.to_string())),
            Err(_) => {
                request.abort();
                Err(LoadError::Timeout(self.timeout))
            }
        }
    }
}
