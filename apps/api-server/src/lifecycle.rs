//! Process lifecycle: one context object owning the store connection and the
//! HTTP listener, with explicit start/stop. Test harnesses build an
//! `Application` on port 0, drive requests against `port()`, and tear the
//! process down through a `StopHandle`.

use std::net::TcpListener;

use actix_web::dev::{Server, ServerHandle};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use sea_orm::DbConn;
use tracing_actix_web::TracingLogger;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// A built but not yet running server process.
pub struct Application {
    port: u16,
    db: DbConn,
    server: Server,
}

impl Application {
    /// Connect to the store, then bind the listener. Failure at either stage
    /// aborts startup and propagates to the caller.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let db_config = config
            .database
            .as_ref()
            .context("DATABASE_URL is not set")?;

        let db = quill_infra::connect(db_config)
            .await
            .context("failed to connect to database")?;

        let state = AppState::new(db.clone());

        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
        let port = listener.local_addr()?.port();

        // Signals are handled by whoever holds the StopHandle, not by actix.
        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(state.clone()))
                .configure(handlers::configure_routes)
                .default_service(web::route().to(handlers::not_found))
        })
        .disable_signals()
        .listen(listener)?
        .run();

        Ok(Self { port, db, server })
    }

    /// The port the listener is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// A handle that can stop the process while `run_until_stopped` runs.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            db: self.db.clone(),
            server: self.server.handle(),
        }
    }

    /// Drive the server until it is stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// Shutdown handle: disconnect the store, then close the listener, each step
/// awaited, in that order.
pub struct StopHandle {
    db: DbConn,
    server: ServerHandle,
}

impl StopHandle {
    pub async fn stop(self) -> anyhow::Result<()> {
        tracing::info!("Closing server");
        self.db
            .close()
            .await
            .context("failed to close database connection")?;
        self.server.stop(true).await;
        Ok(())
    }
}
