//! The outbound notification seam.
//!
//! The dispatcher only knows that a report can be handed to something that
//! sends it. The relay implementation lives in its own crate behind this
//! trait, so the core stays free of wire-protocol concerns.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid notifier key: {0}")]
    Key(String),

    #[error("failed to sign report event: {0}")]
    Sign(String),

    #[error("no relay accepted the report ({attempted} attempted)")]
    AllRelaysFailed { attempted: usize },
}

/// Best-effort, send-once delivery of a fully assembled report.
///
/// `send` may block for a second or two while connections are set up. It is
/// never retried; failure is reported to the operator and the run moves on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, body: &str) -> Result<(), NotifyError>;
}
