mod args;
mod config;
mod dirs;
mod logging;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use http_api::HttpState;
use mailstats_app::{
    AppConfig, AppPaths, AppState, HourBound, HourRangeParams, ensure_app_data_dir,
    parse_hour_bound,
};
use serde::Serialize;
use tracing::info;

use args::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = config::load_or_create(cli.config.as_deref())?;
    logging::init(&loaded.config.log_level);
    if loaded.created {
        info!(path = %loaded.file.display(), "created default config");
    }

    let paths = AppPaths::new(dirs::resolve_data_dir()?);
    ensure_app_data_dir(&paths)?;

    let file_config = loaded.config;
    let db_path = cli
        .db
        .or(file_config.db_path)
        .unwrap_or(paths.db_path);
    let account = cli.account.unwrap_or(file_config.account);
    let mut app_config = AppConfig::new(db_path, account);
    app_config.provider = file_config.provider;
    app_config.known_domains = file_config.known_domains;
    app_config.mx_hosts = file_config.mx;

    let app_state = AppState::new(app_config);
    app_state
        .setup_db()
        .context("failed to initialize database")?;
    info!(db = %app_state.config.db_path.display(), account = %app_state.config.account, "ready");

    match cli.command {
        Command::Serve { port } => serve(app_state, port.unwrap_or(file_config.port)).await,
        Command::Ingest { file, hour } => {
            let hour = hour
                .map(|value| parse_hour_bound(&HourBound::Text(value)))
                .transpose()?;
            let stats = app_state.services.ingest.run_path(&file, hour)?;
            print_json(&stats)
        }
        Command::Read { hour } => {
            let hour = parse_hour_bound(&HourBound::Text(hour))?;
            let record = app_state.services.stats.read_one(None, hour)?;
            print_json(&record)
        }
        Command::Range { start, end } => {
            let params = HourRangeParams {
                start: Some(HourBound::Text(start)),
                end: Some(HourBound::Text(end)),
            };
            let series = app_state.services.stats.range(None, &params)?;
            print_json(&series)
        }
        Command::Write { json } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("record is not valid JSON")?;
            let record = app_state.services.stats.write_value(&value)?;
            print_json(&record)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn serve(app_state: AppState, port: u16) -> Result<()> {
    let router = http_api::router(HttpState::new(app_state));
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("mailstats API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
