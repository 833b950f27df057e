use std::net::TcpListener;

use actix_web::dev::{Server, ServerHandle};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing::info;

use pilotwatch::state::MonitorState;
use pilotwatch_config::shared::ApiConfig;

use crate::routes::{changes, health_check, overview, status};

/// Monitor API application server wrapper.
///
/// Manages the HTTP server lifecycle from binding to shutdown.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Binds the listener and configures the server with all routes.
    ///
    /// Binding to port 0 picks a free port; [`Application::port`] reports the
    /// actual one, which tests rely on.
    pub fn build(config: &ApiConfig, state: MonitorState) -> anyhow::Result<Self> {
        let address = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(state.clone()))
                .service(health_check)
                .service(status)
                .service(changes)
                .service(overview)
        })
        .listen(listener)?
        .run();

        info!(port, "api server bound");

        Ok(Self { port, server })
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns a handle that can stop the server from another task.
    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Runs the server until it is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
