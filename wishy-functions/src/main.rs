// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wishy Functions Emulator
//!
//! Reads JSON commands from stdin, one per line, applies them to the store,
//! runs the triggered functions and writes one JSON response per line.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use wishy_core::{DocumentStore, MemoryStore, SqliteStore};
use wishy_functions::emulator::execute_line;
use wishy_functions::{Functions, FunctionsConfig, Runtime, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries responses.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wishy_functions=info".parse()?),
        )
        .init();

    let config = FunctionsConfig::from_env();
    info!(
        "Starting Wishy functions emulator v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Storage backend: {:?}", config.store_backend);

    let functions = Functions::standard()?;
    info!("Registered {} functions", functions.len());

    match config.store_backend {
        StoreBackend::Memory => {
            serve(Runtime::new(MemoryStore::new(), functions, config.runtime())).await
        }
        StoreBackend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("failed to create data dir {}", config.data_dir.display())
            })?;
            let path = config.database_path();
            let store = SqliteStore::open(&path)
                .with_context(|| format!("failed to open database {}", path.display()))?;
            info!("Database: {}", path.display());
            serve(Runtime::new(store, functions, config.runtime())).await
        }
    }
}

async fn serve<S: DocumentStore>(mut runtime: Runtime<S>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = execute_line(&mut runtime, &line).await;
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
