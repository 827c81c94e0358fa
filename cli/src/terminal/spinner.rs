use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use peerwatch_core::dispatcher::ProgressFn;

/// Spinner shown while peers are being probed. Slow lists are normal here
/// (each unreachable peer can block for the full timeout), so the operator
/// gets a live counter instead of a silent pause.
pub fn probe_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .expect("static template is valid")
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message("Probing peers...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Progress callback wired into the dispatcher; updates the spinner message
/// from the probe tasks.
pub fn progress_callback(pb: &ProgressBar) -> ProgressFn {
    let pb = pb.clone();
    Box::new(move |done, total| {
        pb.set_message(format!(
            "Probed {} of {} peers...",
            done.to_string().green().bold(),
            total
        ));
    })
}
