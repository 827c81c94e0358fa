mod args;
mod terminal;

use anyhow::Context;
use args::CommandLine;
use async_trait::async_trait;
use chrono::Utc;
use peerwatch_common::config::{Config, ProbeConfig};
use peerwatch_core::dispatcher;
use peerwatch_core::notifier::{Notifier, NotifyError};
use peerwatch_notify::NostrNotifier;
use terminal::{logging, print, spinner};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbose);

    let config = load_config(&commands)?;
    let notifier = build_notifier(&commands, &config)?;

    print::header("probing peers");
    let pb = spinner::probe_spinner();
    let on_progress = spinner::progress_callback(&pb);

    let outcome = dispatcher::run(
        &commands.peers,
        Utc::now(),
        &config.probe,
        notifier.as_ref(),
        Some(on_progress),
    )
    .await;
    pb.finish_and_clear();
    let outcome = outcome?;

    print::header("peer status report");
    print::body(outcome.report.render().trim_end());
    print::separator();

    info!(
        "{} of {} peers reachable",
        outcome.peers_up, outcome.peers_total
    );

    match &outcome.notify {
        Ok(()) if commands.dry_run => info!("dry run, report not published"),
        Ok(()) => print::confirmation("Message sent to Nostr relays"),
        Err(e) => error!("report was not published: {e}"),
    }

    Ok(())
}

fn load_config(commands: &CommandLine) -> anyhow::Result<Config> {
    let mut config = if commands.dry_run && !std::path::Path::new(&commands.config).exists() {
        // Report-only runs work without a config file on disk.
        Config {
            notifier: None,
            probe: ProbeConfig::default(),
        }
    } else {
        Config::from_file(&commands.config)
            .with_context(|| format!("loading config {}", commands.config))?
    };

    if let Some(timeout) = commands.timeout {
        config.probe.timeout_secs = timeout;
    }
    if let Some(concurrency) = commands.concurrency {
        config.probe.concurrency = concurrency;
    }
    config.validate().context("applying command line overrides")?;

    Ok(config)
}

fn build_notifier(commands: &CommandLine, config: &Config) -> anyhow::Result<Box<dyn Notifier>> {
    if commands.dry_run {
        return Ok(Box::new(DryRunNotifier));
    }
    let notifier_cfg = config.notifier().context("publishing requires notifier credentials")?;
    Ok(Box::new(NostrNotifier::new(notifier_cfg)?))
}

/// Stand-in notifier for `--dry-run`: accepts the report and drops it.
struct DryRunNotifier;

#[async_trait]
impl Notifier for DryRunNotifier {
    async fn send(&self, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
