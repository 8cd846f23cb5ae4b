use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::Router;
use axum_server::{Handle, Server};
use tokio::task::JoinHandle;
use tracing::{error, info};

use callboard_common::traits::{
    campaign_traits::CampaignRunner,
    repository_traits::AnalyticsRepo,
};
use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::db::Database;
use crate::http::DefaultHttpClient;
use crate::repositories::PostgresAnalyticsRepository;
use crate::services::{AnalyticsService, CampaignService, HttpCampaignRunner, LocaleService};
use crate::Error;

/// A running HTTP server. Dropping this does not stop it; call
/// [`RunningServer::shutdown`].
pub struct RunningServer {
    handle: Handle,
    task: JoinHandle<()>,
}

impl RunningServer {
    /// Stop accepting connections and give in-flight requests `grace` to finish.
    pub async fn shutdown(self, grace: Duration) {
        self.handle.graceful_shutdown(Some(grace));
        if let Err(e) = self.task.await {
            error!("HTTP server task ended abnormally: {}", e);
        }
        info!("HTTP server shut down.");
    }
}

/// Wire the production collaborators: Postgres for analytics, the HTTP
/// campaign runner, and the configured locale set.
pub async fn build_state(config: &ServerConfig) -> Result<AppState, Error> {
    let db = Database::new(&config.database_url, config.max_db_connections).await?;
    if config.run_migrations {
        db.migrate().await?;
    }

    let repo: Arc<dyn AnalyticsRepo> = Arc::new(PostgresAnalyticsRepository::new(db.pool().clone()));
    let runner: Arc<dyn CampaignRunner> =
        Arc::new(HttpCampaignRunner::new(DefaultHttpClient::new(), &config.runner_url)?);

    Ok(AppState::new(
        AnalyticsService::new(repo),
        CampaignService::new(runner),
        LocaleService::new(config.locale.clone()),
    ))
}

/// Bind `addr` and serve `app` on a background task.
pub fn start_http_server(addr: SocketAddr, app: Router) -> RunningServer {
    let handle = Handle::new();
    let server = Server::bind(addr)
        .handle(handle.clone())
        .serve(app.into_make_service());

    info!("HTTP server listening on http://{}", addr);

    let task = tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("HTTP server error: {}", e);
        }
    });

    RunningServer { handle, task }
}

/// Convenience used by the binary: build everything and serve.
pub async fn serve(config: &ServerConfig) -> Result<RunningServer, Error> {
    let state = build_state(config).await?;
    Ok(start_http_server(config.bind_addr, api::router(state)))
}
