//! End-to-end runs against real loopback listeners.

use chrono::{DateTime, TimeZone, Utc};
use peerwatch_common::config::ProbeConfig;
use peerwatch_common::error::PeerListError;
use peerwatch_core::dispatcher;
use peerwatch_integration_tests::{RecordingNotifier, path_of, peer_file};
use tokio::net::TcpListener;

fn fixed_now() -> DateTime<Utc> {
    // 2024-01-02 23:04:00 UTC, i.e. Tue - Jan 02 - 03:04 PM - PST.
    Utc.timestamp_opt(1_704_236_640, 0).unwrap()
}

fn fast_probe() -> ProbeConfig {
    ProbeConfig {
        timeout_secs: 2,
        concurrency: 1,
    }
}

#[tokio::test]
async fn full_run_mixed_peer_list() {
    let open_a = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port_a = open_a.local_addr().unwrap().port();
    let open_b = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port_b = open_b.local_addr().unwrap().port();
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_port = closed.local_addr().unwrap().port();
    drop(closed);

    let file = peer_file(&format!(
        "# gateways\n127.0.0.1 {port_a}\n127.0.0.1 {closed_port}\n\n// backups\n127.0.0.1 {port_b}\n"
    ));
    let notifier = RecordingNotifier::new();

    let outcome = dispatcher::run(&path_of(&file), fixed_now(), &fast_probe(), &notifier, None)
        .await
        .unwrap();

    // One report line per input line, in input order.
    assert_eq!(outcome.report.body_len(), 6);
    assert_eq!(outcome.peers_total, 3);
    assert_eq!(outcome.peers_up, 2);
    assert!(outcome.notify.is_ok());

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);

    let lines: Vec<&str> = sent[0].lines().collect();
    assert_eq!(lines[0], "Tue - Jan 02 - 03:04 PM - PST");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "# gateways");
    assert_eq!(lines[3], format!("✅ Connection successful: 127.0.0.1 {port_a}"));
    assert!(lines[4].starts_with(&format!("☹️ Error connecting to 127.0.0.1 {closed_port} - ")));
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "// backups");
    assert_eq!(lines[7], format!("✅ Connection successful: 127.0.0.1 {port_b}"));
}

#[tokio::test]
async fn parallel_probing_keeps_file_order() {
    let open = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open_port = open.local_addr().unwrap().port();
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_port = closed.local_addr().unwrap().port();
    drop(closed);

    // Alternate open and closed so completion order differs from file order.
    let mut contents = String::new();
    for _ in 0..4 {
        contents.push_str(&format!("127.0.0.1 {closed_port}\n127.0.0.1 {open_port}\n"));
    }
    let file = peer_file(&contents);
    let notifier = RecordingNotifier::new();
    let probe_cfg = ProbeConfig {
        timeout_secs: 2,
        concurrency: 8,
    };

    let outcome = dispatcher::run(&path_of(&file), fixed_now(), &probe_cfg, &notifier, None)
        .await
        .unwrap();

    assert_eq!(outcome.peers_total, 8);
    assert_eq!(outcome.peers_up, 4);

    let rendered = outcome.report.render();
    let body: Vec<&str> = rendered.lines().skip(2).collect();
    assert_eq!(body.len(), 8);
    for (idx, line) in body.iter().enumerate() {
        if idx % 2 == 0 {
            assert!(
                line.starts_with(&format!("☹️ Error connecting to 127.0.0.1 {closed_port}")),
                "line {idx} out of order: {line}"
            );
        } else {
            assert_eq!(*line, format!("✅ Connection successful: 127.0.0.1 {open_port}"));
        }
    }
}

#[tokio::test]
async fn comment_lines_survive_byte_identical() {
    let file = peer_file("# section A\n\n// section B\n   # indented comment\n");
    let notifier = RecordingNotifier::new();

    let outcome = dispatcher::run(&path_of(&file), fixed_now(), &fast_probe(), &notifier, None)
        .await
        .unwrap();

    let rendered = outcome.report.render();
    let body: Vec<&str> = rendered.lines().skip(2).collect();
    assert_eq!(body, vec!["# section A", "", "// section B", "# indented comment"]);
}

#[tokio::test]
async fn corrupt_list_aborts_without_notification() {
    let file = peer_file("# section A\n127.0.0.1 9 999999-not-a-real-open-port\n");
    let notifier = RecordingNotifier::new();

    let err = dispatcher::run(&path_of(&file), fixed_now(), &fast_probe(), &notifier, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PeerListError>(),
        Some(PeerListError::CorruptLine { line_no: 2, .. })
    ));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn empty_list_publishes_header_only_report() {
    let file = peer_file("");
    let notifier = RecordingNotifier::new();

    let outcome = dispatcher::run(&path_of(&file), fixed_now(), &fast_probe(), &notifier, None)
        .await
        .unwrap();

    assert_eq!(outcome.report.body_len(), 0);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], "Tue - Jan 02 - 03:04 PM - PST\n\n");
}
