//! Run orchestration: peer list in, published report out.
//!
//! Reads the peer list, probes every target with a bounded number of in-flight
//! connections, folds comments and probe lines into a report in input order,
//! and hands the report to the notifier exactly once.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use peerwatch_common::config::ProbeConfig;
use peerwatch_common::peers::{self, PeerEntry};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::notifier::{Notifier, NotifyError};
use crate::probe::{self, ProbeResult};
use crate::report::Report;

/// Called after each completed probe with (done, total). Shared into probe
/// tasks, so it runs off the caller's thread.
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// What one run produced. The notify outcome is carried rather than
/// propagated: by the time the notifier runs, the observation task has
/// already completed.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub peers_total: usize,
    pub peers_up: usize,
    pub notify: Result<(), NotifyError>,
}

/// Executes one full monitoring pass.
///
/// Fatal errors (missing or corrupt peer list) surface before any probe is
/// sent and before the notifier is touched.
pub async fn run(
    input_path: &str,
    now: DateTime<Utc>,
    probe_cfg: &ProbeConfig,
    notifier: &dyn Notifier,
    on_progress: Option<ProgressFn>,
) -> anyhow::Result<RunOutcome> {
    let entries = peers::load(input_path)?;
    let results = probe_entries(&entries, probe_cfg, on_progress).await?;

    let mut report = Report::new(now);
    let mut peers_total = 0;
    let mut peers_up = 0;

    let mut results = results.into_iter();
    for entry in &entries {
        match entry {
            PeerEntry::Comment(text) => report.push_line(text.clone()),
            PeerEntry::Target { .. } => {
                let result = results.next().expect("one probe result per target entry");
                peers_total += 1;
                if result.success {
                    peers_up += 1;
                }
                report.push_line(result.render());
            }
        }
    }

    info!(peers_total, peers_up, "probe pass complete");

    let notify = notifier.send(&report.render()).await;
    if let Err(e) = &notify {
        error!("failed to publish report: {e}");
    }

    Ok(RunOutcome {
        report,
        peers_total,
        peers_up,
        notify,
    })
}

/// Probes every target entry, at most `concurrency` connections in flight.
///
/// Results come back in target order regardless of completion order: tasks
/// are spawned in input order and their handles awaited in the same order.
async fn probe_entries(
    entries: &[PeerEntry],
    probe_cfg: &ProbeConfig,
    on_progress: Option<ProgressFn>,
) -> anyhow::Result<Vec<ProbeResult>> {
    let targets: Vec<(String, u16)> = entries
        .iter()
        .filter_map(|entry| match entry {
            PeerEntry::Target { address, port } => Some((address.clone(), *port)),
            PeerEntry::Comment(_) => None,
        })
        .collect();

    let total = targets.len();
    let timeout = probe_cfg.timeout();
    let limiter = Arc::new(Semaphore::new(probe_cfg.concurrency.max(1)));
    let done = Arc::new(AtomicUsize::new(0));
    let on_progress: Option<Arc<dyn Fn(usize, usize) + Send + Sync>> =
        on_progress.map(Arc::from);

    let mut handles: Vec<JoinHandle<ProbeResult>> = Vec::with_capacity(total);
    for (address, port) in targets {
        let limiter = limiter.clone();
        let done = done.clone();
        let on_progress = on_progress.clone();

        handles.push(tokio::spawn(async move {
            let _permit = limiter.acquire().await.expect("semaphore never closed");
            let result = probe::probe(&address, port, timeout).await;
            if let Some(cb) = &on_progress {
                cb(done.fetch_add(1, Ordering::Relaxed) + 1, total);
            }
            result
        }));
    }

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
