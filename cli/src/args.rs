use clap::Parser;

#[derive(Parser)]
#[command(name = "peerwatch")]
#[command(about = "Probes a list of peers over TCP and publishes the status report to Nostr relays.")]
pub struct CommandLine {
    /// Peer list file, one "<address> <port>" per line. Lines starting with
    /// '#' or '//' and blank lines are kept in the report verbatim.
    #[arg(short = 'f', long = "peers", default_value = "peers.txt")]
    pub peers: String,

    /// Config file with the [notifier] and [probe] sections.
    #[arg(short, long, default_value = "peerwatch.toml")]
    pub config: String,

    /// Override the per-peer connect timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the number of probes in flight at once.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Assemble and print the report without publishing it. Works without
    /// notifier credentials.
    #[arg(long)]
    pub dry_run: bool,

    /// Show debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
