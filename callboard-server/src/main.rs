use std::net::SocketAddr;
use std::time::Duration;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use callboard_core::config::{LocaleConfig, ServerConfig};
use callboard_core::server;

#[derive(Parser, Debug, Clone)]
#[command(name = "callboard")]
#[command(author, version, about = "Callboard - campaign dashboard API (analytics, campaign start, locale)")]
struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, env = "CALLBOARD_BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: String,

    /// Postgres connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://callboard@localhost:5432/callboard")]
    database_url: String,

    /// Upper bound on pooled Postgres connections
    #[arg(long, env = "CALLBOARD_MAX_DB_CONNECTIONS", default_value_t = 5)]
    max_db_connections: u32,

    /// Do not run migrations on startup
    #[arg(long, default_value = "false")]
    skip_migrations: bool,

    /// Base URL of the external campaign runner
    #[arg(long, env = "CAMPAIGN_RUNNER_URL", default_value = "http://localhost:9000")]
    runner_url: String,

    /// Comma separated list of supported locale codes
    #[arg(long, env = "CALLBOARD_LOCALES", default_value = "fr,en")]
    supported_locales: String,

    /// Locale used when the client has no (valid) locale cookie
    #[arg(long, env = "CALLBOARD_DEFAULT_LOCALE", default_value = "fr")]
    default_locale: String,

    /// Name of the cookie holding the chosen locale
    #[arg(long, env = "CALLBOARD_LOCALE_COOKIE", default_value = "NEXT_LOCALE")]
    locale_cookie: String,

    /// Seconds in-flight requests get to finish on shutdown
    #[arg(long, default_value_t = 10)]
    shutdown_grace_secs: u64,
}

impl Args {
    fn to_config(&self) -> anyhow::Result<ServerConfig> {
        let bind_addr: SocketAddr = self.bind_addr.parse()?;
        let locale = LocaleConfig::new(
            LocaleConfig::parse_list(&self.supported_locales),
            self.default_locale.clone(),
            self.locale_cookie.clone(),
        )?;
        Ok(ServerConfig {
            bind_addr,
            database_url: self.database_url.clone(),
            max_db_connections: self.max_db_connections,
            run_migrations: !self.skip_migrations,
            runner_url: self.runner_url.clone(),
            locale,
        })
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("callboard=info,callboard_core=info,tower_http=info"));
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments use the environment directly.
    let _ = dotenv::dotenv();
    init_tracing()?;

    let args = Args::parse();
    let config = args.to_config()?;
    info!(
        "Callboard starting. bind={}, runner={}, locales={:?}",
        config.bind_addr,
        config.runner_url,
        config.locale.supported()
    );

    let running = match server::serve(&config).await {
        Ok(r) => r,
        Err(e) => {
            error!("Server error: {:?}", e);
            return Err(e.into());
        }
    };

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down...");
    running.shutdown(Duration::from_secs(args.shutdown_grace_secs)).await;

    info!("Main finished. Goodbye!");
    Ok(())
}
