use std::time::Duration;

use secrecy::ExposeSecret;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info};

use pilotwatch::concurrency::shutdown::create_shutdown_channel;
use pilotwatch::error::PilotResult;
use pilotwatch::notifier::{HttpNotifier, MemoryNotifier, Notifier};
use pilotwatch::rules::RuleFilter;
use pilotwatch::source::{JsonFileOrderSource, MemoryOrderSource, OrderSource};
use pilotwatch::state::MonitorState;
use pilotwatch::store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use pilotwatch::types::PilotOrder;
use pilotwatch::workers::PollWorker;
use pilotwatch_api::startup::Application;
use pilotwatch_config::shared::{MonitorConfig, NotifierConfig, SourceConfig, StoreConfig};

use crate::error::MonitorResult;

/// Source selected by configuration, dispatched statically.
enum AnySource {
    Memory(MemoryOrderSource),
    JsonFile(JsonFileOrderSource),
}

impl OrderSource for AnySource {
    fn name(&self) -> &'static str {
        match self {
            AnySource::Memory(source) => source.name(),
            AnySource::JsonFile(source) => source.name(),
        }
    }

    async fn fetch(&self) -> PilotResult<Vec<PilotOrder>> {
        match self {
            AnySource::Memory(source) => source.fetch().await,
            AnySource::JsonFile(source) => source.fetch().await,
        }
    }
}

/// Notifier selected by configuration, dispatched statically.
enum AnyNotifier {
    Memory(MemoryNotifier),
    Http(HttpNotifier),
}

impl Notifier for AnyNotifier {
    fn name(&self) -> &'static str {
        match self {
            AnyNotifier::Memory(notifier) => notifier.name(),
            AnyNotifier::Http(notifier) => notifier.name(),
        }
    }

    async fn notify(&self, subject: &str, body: &str) -> PilotResult<()> {
        match self {
            AnyNotifier::Memory(notifier) => notifier.notify(subject, body).await,
            AnyNotifier::Http(notifier) => notifier.notify(subject, body).await,
        }
    }
}

/// Store selected by configuration, dispatched statically.
enum AnyStore {
    Memory(MemorySnapshotStore),
    File(FileSnapshotStore),
}

impl SnapshotStore for AnyStore {
    fn name(&self) -> &'static str {
        match self {
            AnyStore::Memory(store) => store.name(),
            AnyStore::File(store) => store.name(),
        }
    }

    async fn load(&self) -> PilotResult<Option<Vec<PilotOrder>>> {
        match self {
            AnyStore::Memory(store) => store.load().await,
            AnyStore::File(store) => store.load().await,
        }
    }

    async fn save(&self, records: &[PilotOrder]) -> PilotResult<()> {
        match self {
            AnyStore::Memory(store) => store.save(records).await,
            AnyStore::File(store) => store.save(records).await,
        }
    }
}

/// Starts the monitor service with the provided configuration.
///
/// Wires up the configured adapters, launches the poll worker and the API
/// server, and runs until SIGINT or SIGTERM triggers a graceful shutdown.
pub async fn start_monitor(config: MonitorConfig) -> MonitorResult<()> {
    info!("starting monitor service");

    log_config(&config);

    let source = build_source(&config.source);
    let notifier = build_notifier(&config.notifier);
    let store = build_store(&config.store);
    let filter = RuleFilter::from_config(&config.rules)?;

    let state = MonitorState::new();
    let (shutdown_tx, shutdown_rx) = create_shutdown_channel();

    let worker_handle = PollWorker::new(
        config.poll.clone(),
        filter,
        source,
        notifier,
        store,
        state.clone(),
        shutdown_rx,
    )
    .start();

    let application = Application::build(&config.api, state)?;
    let server_handle = application.handle();
    let server_task = tokio::spawn(async move {
        if let Err(err) = application.run_until_stopped().await {
            error!(error = %err, "api server terminated with error");
        }
    });

    // Listen for shutdown signals and propagate them to the worker and server.
    let shutdown_listener = tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("received ctrl-c, initiating shutdown");
            }
            _ = sigterm.recv() => {
                info!("received sigterm, initiating shutdown");
            }
        }

        shutdown_tx.shutdown();
        server_handle.stop(true).await;
    });

    worker_handle.wait().await?;
    info!("poll worker stopped");

    shutdown_listener.abort();
    let _ = server_task.await;

    info!("monitor service stopped");

    Ok(())
}

fn build_source(config: &SourceConfig) -> AnySource {
    match config {
        SourceConfig::Memory => AnySource::Memory(MemoryOrderSource::new()),
        SourceConfig::JsonFile { path } => {
            AnySource::JsonFile(JsonFileOrderSource::new(path.clone()))
        }
    }
}

fn build_notifier(config: &NotifierConfig) -> AnyNotifier {
    match config {
        NotifierConfig::Memory => AnyNotifier::Memory(MemoryNotifier::new()),
        NotifierConfig::Http {
            endpoint,
            auth_token,
            timeout_secs,
        } => AnyNotifier::Http(HttpNotifier::new(
            endpoint.clone(),
            auth_token
                .as_ref()
                .map(|token| token.expose_secret().to_owned()),
            Duration::from_secs(*timeout_secs),
        )),
    }
}

fn build_store(config: &StoreConfig) -> AnyStore {
    match config {
        StoreConfig::Memory => AnyStore::Memory(MemorySnapshotStore::new()),
        StoreConfig::File { path } => AnyStore::File(FileSnapshotStore::new(path.clone())),
    }
}

fn log_config(config: &MonitorConfig) {
    info!(
        poll_interval_secs = config.poll.poll_interval_secs,
        overview_hours = ?config.poll.overview_hours,
        inbound_lookahead_hours = config.rules.inbound_lookahead_hours,
        outbound_lookahead_hours = config.rules.outbound_lookahead_hours,
        api_host = %config.api.host,
        api_port = config.api.port,
        "loaded monitor configuration"
    );
}
