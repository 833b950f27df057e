//! Polling worker that drives the monitoring cycle.
//!
//! Each cycle fetches the current dataset, normalizes it, diffs it against the
//! baseline, notifies about reportable changes, and persists the new baseline.
//! On top of that, the worker sends a scheduled snapshot overview at fixed
//! hours of the configured overview timezone. Cycle failures back off with
//! jitter and never terminate the worker; only a shutdown signal does.

use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

use pilotwatch_config::shared::PollConfig;

use crate::concurrency::shutdown::ShutdownRx;
use crate::error::{ErrorKind, PilotError, PilotResult};
use crate::notifier::Notifier;
use crate::report::{group_changes, notification_subject, render_overview, render_report, snapshot_overview};
use crate::rules::{RuleFilter, reportable_changes};
use crate::snapshot::Snapshot;
use crate::source::OrderSource;
use crate::state::MonitorState;
use crate::store::SnapshotStore;

/// Jitter applied to the error backoff, as a fraction of the base duration.
const BACKOFF_JITTER_FRACTION: f64 = 0.25;

/// Minute of the hour from which a scheduled overview becomes due.
const OVERVIEW_MINUTE: u32 = 30;

/// Handle to a running poll worker.
#[derive(Debug)]
pub struct PollWorkerHandle {
    join_handle: JoinHandle<PilotResult<()>>,
}

impl PollWorkerHandle {
    /// Waits for the worker to complete.
    pub async fn wait(self) -> PilotResult<()> {
        match self.join_handle.await {
            Ok(result) => result,
            Err(err) => {
                error!(error = %err, "poll worker task panicked");
                Err(PilotError::from((
                    ErrorKind::WorkerFailed,
                    "poll worker task panicked",
                ))
                .with_source(err))
            }
        }
    }
}

/// Worker that runs the fetch-diff-notify cycle until shutdown.
pub struct PollWorker<S, N, T> {
    poll_config: PollConfig,
    filter: RuleFilter,
    source: S,
    notifier: N,
    store: T,
    state: MonitorState,
    shutdown_rx: ShutdownRx,
    overview_tz: Tz,
    last_overview_slot: Option<String>,
}

impl<S, N, T> PollWorker<S, N, T>
where
    S: OrderSource + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    T: SnapshotStore + Send + Sync + 'static,
{
    pub fn new(
        poll_config: PollConfig,
        filter: RuleFilter,
        source: S,
        notifier: N,
        store: T,
        state: MonitorState,
        shutdown_rx: ShutdownRx,
    ) -> Self {
        // Config validation rejects unknown timezones before the worker is
        // built, so the fallback only covers callers bypassing validation.
        let overview_tz = poll_config
            .overview_timezone
            .parse()
            .unwrap_or(chrono_tz::Europe::Brussels);

        Self {
            poll_config,
            filter,
            source,
            notifier,
            store,
            state,
            shutdown_rx,
            overview_tz,
            last_overview_slot: None,
        }
    }

    /// Starts the worker in a background task.
    pub fn start(self) -> PollWorkerHandle {
        let join_handle = tokio::spawn(self.run());
        PollWorkerHandle { join_handle }
    }

    async fn run(mut self) -> PilotResult<()> {
        info!(
            source = self.source.name(),
            interval_secs = self.poll_config.poll_interval_secs,
            "starting poll worker"
        );

        self.load_baseline().await;

        loop {
            if self.shutdown_rx.is_shutdown() {
                info!("poll worker shutting down");
                return Ok(());
            }

            let pause = match self.run_cycle().await {
                Ok(()) => Duration::from_secs(self.poll_config.poll_interval_secs),
                Err(err) => {
                    warn!(error = %err, "monitoring cycle failed, will retry after backoff");
                    self.state.set_status("error");
                    jittered(Duration::from_secs(self.poll_config.error_backoff_secs))
                }
            };

            tokio::select! {
                _ = sleep(pause) => {}
                _ = self.shutdown_rx.wait_for_shutdown() => {
                    info!("poll worker shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Restores the persisted baseline, if any.
    ///
    /// A store failure downgrades to a warning: the worker then starts without
    /// a baseline and establishes a fresh one on the first cycle.
    async fn load_baseline(&mut self) {
        match self.store.load().await {
            Ok(Some(records)) => {
                let now = chrono::Local::now().naive_local();
                let baseline = Snapshot::normalize(records, now);
                info!(vessels = baseline.len(), "restored persisted baseline");
                self.state.set_baseline(baseline);
            }
            Ok(None) => {
                info!("no persisted baseline, first cycle will establish one");
            }
            Err(err) => {
                warn!(error = %err, "could not restore baseline, starting fresh");
            }
        }
    }

    async fn run_cycle(&mut self) -> PilotResult<()> {
        let records = self.source.fetch().await?;
        if records.is_empty() {
            warn!(source = self.source.name(), "fetch returned no records, keeping baseline");
            self.state.set_status("empty fetch");
            return Ok(());
        }

        let now = chrono::Local::now().naive_local();
        let current = Snapshot::normalize(records.clone(), now);
        info!(records = records.len(), vessels = current.len(), "fetched dataset");

        let grouped = match self.state.baseline() {
            Some(baseline) => {
                let changes = reportable_changes(&self.filter, &baseline, &current, now);
                if changes.is_empty() {
                    info!("no reportable changes");
                    Vec::new()
                } else {
                    info!(changes = changes.len(), "reportable changes found");
                    let grouped = group_changes(&changes);
                    let subject = notification_subject(&changes);
                    let body = render_report(&grouped);
                    if let Err(err) = self.notifier.notify(&subject, &body).await {
                        warn!(error = %err, "failed to deliver change notification");
                    }
                    grouped
                }
            }
            None => {
                info!("first cycle, establishing baseline");
                Vec::new()
            }
        };

        self.maybe_send_overview(now, &current).await;

        if let Err(err) = self.store.save(&records).await {
            warn!(error = %err, "failed to persist baseline");
        }

        let overview = snapshot_overview(
            &current,
            now,
            self.filter.inbound_window(),
            self.filter.outbound_window(),
        );
        self.state.set_baseline(current);
        self.state.publish_cycle(now, grouped, overview);

        Ok(())
    }

    /// Sends the scheduled overview when an overview hour is due.
    ///
    /// Due-ness is decided on the wall clock of the configured overview
    /// timezone, so the schedule holds regardless of the host timezone. An
    /// overview hour becomes due from minute 30 and is sent at most once per
    /// hour slot, tracked by a calendar-hour key.
    async fn maybe_send_overview(&mut self, now: NaiveDateTime, current: &Snapshot) {
        let wall_clock = wall_clock(self.overview_tz);
        if !overview_due(&self.poll_config.overview_hours, wall_clock) {
            return;
        }

        let slot = overview_slot(wall_clock);
        if self.last_overview_slot.as_deref() == Some(slot.as_str()) {
            return;
        }

        info!(slot = %slot, "sending scheduled overview");
        let overview = snapshot_overview(
            current,
            now,
            self.filter.inbound_window(),
            self.filter.outbound_window(),
        );
        let subject = format!("LIS overview - {}", wall_clock.format("%d/%m/%Y %H:%M"));
        let body = render_overview(
            &overview,
            self.filter.inbound_window(),
            self.filter.outbound_window(),
        );

        match self.notifier.notify(&subject, &body).await {
            Ok(()) => {
                self.last_overview_slot = Some(slot);
            }
            Err(err) => {
                // Slot stays unmarked so the next cycle retries.
                warn!(error = %err, "failed to deliver scheduled overview");
            }
        }
    }
}

/// Current wall-clock time in the given timezone.
fn wall_clock(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Returns whether a scheduled overview is due at the given wall-clock time.
fn overview_due(overview_hours: &[u32], now: NaiveDateTime) -> bool {
    use chrono::Timelike;
    overview_hours.contains(&now.hour()) && now.minute() >= OVERVIEW_MINUTE
}

/// Calendar-hour key used to deduplicate scheduled overviews.
fn overview_slot(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d-%H").to_string()
}

/// Applies random jitter to the backoff duration.
fn jittered(base: Duration) -> Duration {
    let jitter_range = base.as_secs_f64() * BACKOFF_JITTER_FRACTION;
    let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
    Duration::from_secs_f64((base.as_secs_f64() + jitter).max(0.1))
}
