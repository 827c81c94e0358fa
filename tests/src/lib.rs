//! Shared fixtures for the end-to-end tests.

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use peerwatch_core::notifier::{Notifier, NotifyError};
use tempfile::NamedTempFile;

/// Notifier that records every body it is handed.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, body: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

/// Writes a peer list to a temp file that lives as long as the handle.
pub fn peer_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp peer list");
    file.write_all(contents.as_bytes()).expect("write temp peer list");
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().expect("utf-8 temp path").to_string()
}
