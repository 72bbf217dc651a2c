use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use ars_restore::{RestoreConfig, Restorer, RunState};
use ars_store::AssetsDir;
use colored::Colorize;
use tokio::signal;

use crate::cli::Cli;
use crate::console::ConsoleObserver;

/// Exit status after an interrupt (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let config = resolve_config(&cli)?;
    if cli.list {
        return cmd_list(&config);
    }
    cmd_restore(config).await
}

/// Merge the optional config file with command-line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<RestoreConfig> {
    let mut config = match &cli.config {
        Some(path) => RestoreConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RestoreConfig::default(),
    };
    if let Some(dir) = &cli.assets_dir {
        config.assets_dir = dir.clone();
    }
    if let Some(dir) = &cli.result_dir {
        config.result_dir = Some(dir.clone());
    }
    if let Some(names) = &cli.manifests {
        config.manifests = Some(names.clone());
    }
    if cli.no_preserve_metadata {
        config.preserve_metadata = false;
    }
    Ok(config)
}

fn cmd_list(config: &RestoreConfig) -> anyhow::Result<()> {
    let assets = AssetsDir::open(&config.assets_dir)?;
    let names = assets.list_manifests()?;
    if names.is_empty() {
        println!("No manifests in {}", assets.indexes_dir().display());
    }
    for name in names {
        println!("{}", name.yellow());
    }
    Ok(())
}

async fn cmd_restore(config: RestoreConfig) -> anyhow::Result<()> {
    let restorer = Restorer::from_config(&config)?.with_observer(Arc::new(ConsoleObserver));
    tracing::debug!(?restorer, "starting restore");

    let end = restore_until(restorer, config.manifests, shutdown_signal()).await?;
    match end.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}

/// How a restore driven by [`restore_until`] ended.
#[derive(Debug)]
enum RunEnd {
    Finished,
    /// Cancelled by a shutdown signal; holds the output set that was removed.
    Interrupted(Option<PathBuf>),
}

impl RunEnd {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Finished => 0,
            Self::Interrupted(_) => INTERRUPTED_EXIT_CODE,
        }
    }
}

/// Run the restore on a blocking thread until it finishes or `shutdown`
/// resolves, whichever comes first.
async fn restore_until(
    restorer: Restorer,
    requested: Option<Vec<String>>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<RunEnd> {
    let state = restorer.state().clone();
    let task = tokio::task::spawn_blocking(move || restorer.run(requested.as_deref()));

    tokio::select! {
        biased;
        () = shutdown => {
            let removed = cancel(state).await?;
            Ok(RunEnd::Interrupted(removed))
        }
        joined = task => {
            joined.context("restore task failed")??;
            Ok(RunEnd::Finished)
        }
    }
}

/// Interrupt the run and remove its in-progress output set.
async fn cancel(state: RunState) -> anyhow::Result<Option<PathBuf>> {
    let removed = tokio::task::spawn_blocking(move || state.interrupt())
        .await
        .context("interrupt cleanup failed")?;
    match &removed {
        Some(dir) => eprintln!(
            "{} interrupted; removed incomplete {}",
            "✗".red().bold(),
            dir.display()
        ),
        None => eprintln!("{} interrupted", "✗".red().bold()),
    }
    Ok(removed)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
