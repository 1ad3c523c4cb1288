use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, TlsConfig};
use utils::cli::Args;
use utils::state::AppState;

mod api;
mod config;
mod error;
mod service;
mod storage;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = validate_config(&args).await;
    let state = Arc::new(AppState::new(config.clone()));
    let app = api::create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    match &config.tls {
        Some(tls) => {
            // Fatal on a bad certificate/key pair: never fall back to
            // plaintext when TLS was requested.
            let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                .await
                .with_context(|| {
                    format!(
                        "failed to load TLS certificate `{}` / key `{}`",
                        tls.cert_path.display(),
                        tls.key_path.display()
                    )
                })?;

            let handle = Handle::new();
            tokio::spawn({
                let handle = handle.clone();
                async move {
                    shutdown_signal().await;
                    handle.graceful_shutdown(Some(Duration::from_secs(5)));
                }
            });

            tracing::info!("listening on https://{addr}");
            axum_server::bind_rustls(addr.parse()?, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down...");
}

async fn validate_config(args: &Args) -> Config {
    let mut validation_errors = Vec::new();

    match tokio::fs::metadata(&args.storage_dir).await {
        Ok(meta) => {
            if !meta.is_dir() {
                validation_errors.push(format!(
                    "SENTINEL_STORAGE_DIR `{}` exists but is not a directory",
                    args.storage_dir,
                ));
            }
        }
        Err(_) => {
            if let Err(err) = tokio::fs::create_dir_all(&args.storage_dir).await {
                validation_errors.push(format!(
                    "failed to create SENTINEL_STORAGE_DIR `{}`: {err}",
                    args.storage_dir,
                ));
            }
        }
    }

    let tls = match (&args.tls_cert, &args.tls_key) {
        (Some(cert_path), Some(key_path)) => Some(TlsConfig {
            cert_path: cert_path.clone(),
            key_path: key_path.clone(),
        }),
        (None, None) => None,
        _ => {
            validation_errors
                .push("--tls-cert and --tls-key must be given together".to_string());
            None
        }
    };

    if !validation_errors.is_empty() {
        eprintln!("{}", validation_errors.join("\n"));
        std::process::exit(1);
    }

    if !args.disable_auth && args.auth_token == "dev-token-change-me" {
        tracing::warn!("SENTINEL_TOKEN is the well-known default; override it in deployment");
    }

    Config {
        host: args.host.clone(),
        port: args.port,
        storage_dir: args.storage_dir.clone(),
        auth_token: args.auth_token.clone(),
        auth_enabled: !args.disable_auth,
        tls,
    }
}
