//! User-facing notification channel.
//!
//! Merge conflicts require human intervention, so the publisher reports
//! them through this seam rather than through the error path. Frontends
//! supply their own implementation; [`LogNotifier`] routes messages to the
//! tracing log.

use async_trait::async_trait;

/// Caller-visible notification sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a message to the user.
    async fn notify(&self, message: &str);
}

/// Notifier that emits messages as tracing warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
