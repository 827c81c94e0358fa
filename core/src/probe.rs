//! Single-shot TCP connectivity probe.
//!
//! One connect attempt with a bounded timeout, socket closed immediately on
//! success. Every outcome, including DNS failures and timeouts, comes back as
//! a [`ProbeResult`] rather than an error: one dead peer must never fail the
//! batch.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Outcome of one connectivity probe. Ephemeral; rendered straight into the
/// report and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub address: String,
    pub port: u16,
    pub success: bool,
    /// Underlying error description when `success` is false, empty otherwise.
    pub detail: String,
}

impl ProbeResult {
    /// The report line for this result.
    pub fn render(&self) -> String {
        if self.success {
            format!("✅ Connection successful: {} {}", self.address, self.port)
        } else {
            format!(
                "☹️ Error connecting to {} {} - {}",
                self.address, self.port, self.detail
            )
        }
    }
}

/// Attempts a TCP connection to `address:port` within `connect_timeout`.
pub async fn probe(address: &str, port: u16, connect_timeout: Duration) -> ProbeResult {
    debug!(address, port, "probing peer");

    let attempt = TcpStream::connect((address, port));
    let (success, detail) = match timeout(connect_timeout, attempt).await {
        Ok(Ok(_stream)) => (true, String::new()),
        Ok(Err(e)) => (false, e.to_string()),
        Err(_elapsed) => (
            false,
            format!("timed out after {}s", connect_timeout.as_secs()),
        ),
    };

    ProbeResult {
        address: address.to_string(),
        port,
        success,
        detail,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
