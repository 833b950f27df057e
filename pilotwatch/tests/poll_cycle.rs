//! End-to-end poll cycle tests with in-memory adapters.

use std::time::Duration;

use chrono::Local;

use pilotwatch::concurrency::shutdown::create_shutdown_channel;
use pilotwatch::notifier::MemoryNotifier;
use pilotwatch::rules::RuleFilter;
use pilotwatch::source::MemoryOrderSource;
use pilotwatch::state::MonitorState;
use pilotwatch::store::MemorySnapshotStore;
use pilotwatch::types::{ORDER_TIME_FORMAT, PilotOrder, VesselType};
use pilotwatch::workers::PollWorker;
use pilotwatch_config::shared::{PollConfig, RulesConfig};
use pilotwatch_telemetry::tracing::init_test_tracing;

fn order_time_in(hours: i64) -> String {
    (Local::now().naive_local() + chrono::Duration::hours(hours))
        .format(ORDER_TIME_FORMAT)
        .to_string()
}

fn order(vessel_type: &str, name: &str, order_time: &str, pilot: &str) -> PilotOrder {
    PilotOrder {
        vessel_type: VesselType::from_tag(vessel_type),
        vessel_name: name.to_string(),
        order_time: order_time.to_string(),
        eta_etd: String::new(),
        rta: String::new(),
        pilot: pilot.to_string(),
        entry_point: "Wandelaar".to_string(),
    }
}

fn fast_poll_config() -> PollConfig {
    PollConfig {
        poll_interval_secs: 1,
        error_backoff_secs: 1,
        // No scheduled overviews during tests.
        overview_hours: vec![],
        ..PollConfig::default()
    }
}

fn filter() -> RuleFilter {
    RuleFilter::from_config(&RulesConfig::default()).unwrap()
}

async fn wait_until<F>(mut condition: F)
where
    F: AsyncFnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        if condition().await {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within deadline"
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn pilot_assignment_sends_a_notification() {
    init_test_tracing();

    let order_time = order_time_in(2);
    let baseline = vec![order("I", "ALFA", &order_time, "")];
    let current = vec![order("I", "ALFA", &order_time, "Mertens")];

    let source = MemoryOrderSource::new();
    source.set_records(current).await;
    let notifier = MemoryNotifier::new();
    let store = MemorySnapshotStore::with_records(baseline);
    let state = MonitorState::new();
    let (shutdown_tx, shutdown_rx) = create_shutdown_channel();

    let handle = PollWorker::new(
        fast_poll_config(),
        filter(),
        source,
        notifier.clone(),
        store,
        state.clone(),
        shutdown_rx,
    )
    .start();

    wait_until(async || !notifier.sent().await.is_empty()).await;

    let sent = notifier.sent().await;
    assert_eq!(sent[0].subject, "LIS update: ALFA [IN] pilot assigned");
    assert!(sent[0].body.contains("--- INBOUND ---"));
    assert!(sent[0].body.contains("Change for 'ALFA':"));
    assert!(sent[0].body.contains("- Pilot: '' -> 'Mertens'"));

    let dashboard = state.dashboard();
    assert_eq!(dashboard.changes.len(), 1);
    assert_eq!(dashboard.changes[0].category, "inbound");

    shutdown_tx.shutdown();
    handle.wait().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_fetch_keeps_the_baseline() {
    init_test_tracing();

    let order_time = order_time_in(2);
    let baseline = vec![order("I", "ALFA", &order_time, "")];

    let source = MemoryOrderSource::new();
    let notifier = MemoryNotifier::new();
    let store = MemorySnapshotStore::with_records(baseline);
    let state = MonitorState::new();
    let (shutdown_tx, shutdown_rx) = create_shutdown_channel();

    let handle = PollWorker::new(
        fast_poll_config(),
        filter(),
        source.clone(),
        notifier.clone(),
        store,
        state.clone(),
        shutdown_rx,
    )
    .start();

    wait_until(async || state.dashboard().status == "empty fetch").await;

    // The baseline restored from the store must survive empty fetches.
    assert_eq!(state.baseline().unwrap().len(), 1);
    assert_eq!(state.dashboard().cycles, 0);
    assert!(notifier.sent().await.is_empty());

    // Once data comes back, the old baseline is still the comparison point.
    source
        .set_records(vec![order("I", "ALFA", &order_time, "Mertens")])
        .await;
    wait_until(async || !notifier.sent().await.is_empty()).await;

    let sent = notifier.sent().await;
    assert_eq!(sent[0].subject, "LIS update: ALFA [IN] pilot assigned");

    shutdown_tx.shutdown();
    handle.wait().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn first_cycle_establishes_the_baseline_silently() {
    init_test_tracing();

    let order_time = order_time_in(2);

    let source = MemoryOrderSource::new();
    source
        .set_records(vec![order("U", "BRAVO", &order_time, "")])
        .await;
    let notifier = MemoryNotifier::new();
    let store = MemorySnapshotStore::new();
    let state = MonitorState::new();
    let (shutdown_tx, shutdown_rx) = create_shutdown_channel();

    let handle = PollWorker::new(
        fast_poll_config(),
        filter(),
        source.clone(),
        notifier.clone(),
        store,
        state.clone(),
        shutdown_rx,
    )
    .start();

    wait_until(async || state.dashboard().cycles >= 1).await;
    assert!(notifier.sent().await.is_empty());

    // The second cycle diffs against the baseline the first one established.
    source
        .set_records(vec![order("U", "BRAVO", &order_time_in(3), "")])
        .await;
    wait_until(async || !notifier.sent().await.is_empty()).await;

    let sent = notifier.sent().await;
    assert!(sent[0].subject.starts_with("LIS update: BRAVO [UIT] Order time ->"));

    shutdown_tx.shutdown();
    handle.wait().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn excluded_entry_point_changes_stay_silent() {
    init_test_tracing();

    let order_time = order_time_in(2);
    let mut before = order("I", "ALFA", &order_time, "");
    before.entry_point = "Zeebrugge".to_string();
    let mut after = before.clone();
    after.pilot = "Mertens".to_string();

    let source = MemoryOrderSource::new();
    source.set_records(vec![after]).await;
    let notifier = MemoryNotifier::new();
    let store = MemorySnapshotStore::with_records(vec![before]);
    let state = MonitorState::new();
    let (shutdown_tx, shutdown_rx) = create_shutdown_channel();

    let handle = PollWorker::new(
        fast_poll_config(),
        filter(),
        source,
        notifier.clone(),
        store,
        state.clone(),
        shutdown_rx,
    )
    .start();

    wait_until(async || state.dashboard().cycles >= 2).await;
    assert!(notifier.sent().await.is_empty());

    shutdown_tx.shutdown();
    handle.wait().await.unwrap();
}
