//! # Peer List Model
//!
//! Defines the line-oriented peer list format and its parser.
//!
//! A peer list is a plain-text file with one entry per line:
//! * A target: `"<address> <port>"`, whitespace-separated.
//! * A comment: a line starting with `#` or `//`, or a blank line.
//!
//! Comments are preserved verbatim in the report, so section headers in the
//! file survive into the published output. Anything else is a corrupt list.

use std::fs;
use std::path::Path;

use crate::error::PeerListError;

/// One line of the peer list, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEntry {
    /// A trimmed comment or blank line, carried through to the report as-is.
    Comment(String),
    /// An endpoint expected to accept a TCP connection.
    Target { address: String, port: u16 },
}

/// Reads and parses a peer list file.
///
/// Fails fast: the first malformed line aborts the load, before any probing
/// can start.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<PeerEntry>, PeerListError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| PeerListError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    contents
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

/// Parses a single raw line. `line_no` is 1-based, for error reporting.
pub fn parse_line(raw: &str, line_no: usize) -> Result<PeerEntry, PeerListError> {
    let line = raw.trim();

    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return Ok(PeerEntry::Comment(line.to_string()));
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [address, port_str] = tokens.as_slice() else {
        return Err(PeerListError::corrupt(
            line_no,
            line,
            format!("expected \"<address> <port>\", got {} tokens", tokens.len()),
        ));
    };

    let port: u16 = port_str
        .parse()
        .map_err(|e| PeerListError::corrupt(line_no, line, format!("invalid port {port_str:?}: {e}")))?;

    if port == 0 {
        return Err(PeerListError::corrupt(line_no, line, "port must be in 1-65535"));
    }

    Ok(PeerEntry::Target {
        address: address.to_string(),
        port,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
