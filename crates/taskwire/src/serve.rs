// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `taskwire serve` command implementation.
//!
//! Opens the SQLite store, selects the configured oracle, wires the command
//! pipeline into the HTTP gateway and serves until SIGINT/SIGTERM. On
//! shutdown the store checkpoints its WAL.

use std::sync::Arc;

use taskwire_command::{CommandPipeline, HeuristicOracle};
use taskwire_config::model::{OracleProvider, TaskwireConfig};
use taskwire_core::{OracleAdapter, PluginAdapter, TaskwireError, TodoStore};
use taskwire_gateway::GatewayState;
use taskwire_storage::SqliteStorage;
use tracing::{info, warn};

#[cfg(feature = "anthropic")]
use taskwire_anthropic::AnthropicOracle;

use crate::shutdown;

/// Opens and migrates the configured database.
pub(crate) async fn open_storage(
    config: &TaskwireConfig,
) -> Result<Arc<SqliteStorage>, TaskwireError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    Ok(Arc::new(storage))
}

/// Instantiates the oracle named by `[oracle] provider`.
pub(crate) fn build_oracle(
    config: &TaskwireConfig,
) -> Result<Arc<dyn OracleAdapter>, TaskwireError> {
    match config.oracle.provider {
        OracleProvider::Heuristic => Ok(Arc::new(HeuristicOracle::new())),
        #[cfg(feature = "anthropic")]
        OracleProvider::Anthropic => Ok(Arc::new(AnthropicOracle::new(&config.anthropic)?)),
        #[cfg(not(feature = "anthropic"))]
        OracleProvider::Anthropic => Err(TaskwireError::Config(
            "oracle.provider = \"anthropic\" but taskwire was built without the `anthropic` feature"
                .into(),
        )),
    }
}

/// Runs the `taskwire serve` command.
pub async fn run_serve(config: TaskwireConfig) -> Result<(), TaskwireError> {
    init_tracing(&config.server.log_level);

    info!("starting taskwire serve");

    let storage = open_storage(&config).await?;
    let oracle = build_oracle(&config)?;
    info!(
        oracle = oracle.name(),
        fallback = ?config.interpreter.fallback,
        database = %config.storage.database_path,
        "command pipeline ready"
    );

    let pipeline = Arc::new(CommandPipeline::new(storage.clone(), oracle, &config));
    let state = GatewayState::new(
        storage.clone(),
        storage.clone(),
        pipeline,
        config.users.lookup_limit,
    );

    let cancel = shutdown::install_signal_handler();
    let served = taskwire_gateway::start_server(&config.server, state, cancel).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }

    served?;
    info!("taskwire serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over the configured level.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taskwire={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}
