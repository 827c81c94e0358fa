//! Nostr relay notifier.
//!
//! Publishes the assembled report as a signed kind-1 text note to every
//! configured relay. Key handling, event building and signing, and client
//! message framing come from the `nostr` crate; relay I/O is one short-lived
//! websocket per relay.

mod relay;

use async_trait::async_trait;
use nostr::{ClientMessage, EventBuilder, JsonUtil, Keys};
use peerwatch_common::config::NotifierConfig;
use peerwatch_core::notifier::{Notifier, NotifyError};
use tracing::{info, warn};

#[derive(Debug)]
pub struct NostrNotifier {
    keys: Keys,
    relay_urls: Vec<String>,
    accept_invalid_certs: bool,
}

impl NostrNotifier {
    /// Builds a notifier from the explicit config section. Fails early on an
    /// unparsable key so a bad credential is caught before probing starts.
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let keys = Keys::parse(&config.private_key).map_err(|e| NotifyError::Key(e.to_string()))?;

        if config.danger_accept_invalid_certs {
            warn!("TLS certificate verification for relay connections is DISABLED by config");
        }

        Ok(Self {
            keys,
            relay_urls: config.relay_urls.clone(),
            accept_invalid_certs: config.danger_accept_invalid_certs,
        })
    }
}

#[async_trait]
impl Notifier for NostrNotifier {
    async fn send(&self, body: &str) -> Result<(), NotifyError> {
        let event = EventBuilder::text_note(body)
            .sign_with_keys(&self.keys)
            .map_err(|e| NotifyError::Sign(e.to_string()))?;
        let event_id = event.id.to_hex();
        let frame = ClientMessage::event(event).as_json();

        let mut accepted = 0;
        for url in &self.relay_urls {
            match relay::publish(url, &frame, &event_id, self.accept_invalid_certs).await {
                Ok(()) => {
                    info!(relay = url.as_str(), "report accepted");
                    accepted += 1;
                }
                Err(e) => {
                    warn!(relay = url.as_str(), "publish failed: {e:#}");
                }
            }
        }

        if accepted == 0 {
            return Err(NotifyError::AllRelaysFailed {
                attempted: self.relay_urls.len(),
            });
        }
        Ok(())
    }
}
