//! playorder binary.
//!
//! Reorders a playlist by artist, album and title.
//!
//! Usage:
//!   # Show the moves without sending anything
//!   playorder plan --snapshot playlist.json
//!
//!   # Send them, then write the new order back to the snapshot
//!   PLAYORDER_AUTHORIZATION='SAPISIDHASH ...' playorder apply --snapshot playlist.json
//!
//! Logging goes to stderr; `RUST_LOG=playorder_core=debug` shows the
//! before/after preview.

mod config;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use playorder_client::{EditPlaylistClient, EnvCredentials};
use playorder_core::{Planner, Preflight, Reconciler, RunOutcome, SnapshotSource};
use playorder_types::RunPhase;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;
use crate::snapshot::Snapshot;

/// Reorder a playlist by artist, album and title.
#[derive(Parser, Debug)]
#[command(name = "playorder")]
#[command(about = "Reorder a playlist by artist, album and title")]
struct Args {
    /// Config file (RON). Defaults to the user config dir.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and print the moves without sending them
    Plan {
        /// Snapshot file (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,
    },
    /// Send the moves and write the reordered rows back to the snapshot
    Apply {
        /// Snapshot file (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Playlist URL or id, overriding the snapshot's location
        #[arg(long)]
        location: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("loading config")?;

    match args.command {
        Command::Plan { snapshot } => plan(&config, &Snapshot::load(&snapshot)?),
        Command::Apply { snapshot, location, yes } => apply(&config, &snapshot, location.as_deref(), yes).await,
    }
}

fn plan(config: &Config, snapshot: &Snapshot) -> Result<()> {
    let planner = Planner::new(&config.engine)?;
    let reconciliation = planner.plan(&snapshot.items)?;

    if reconciliation.plan.is_empty() {
        println!("already ordered ({} items)", snapshot.items.len());
        return Ok(());
    }

    println!(
        "{} moves for {} items",
        reconciliation.plan.len(),
        snapshot.items.len()
    );
    for (n, planned) in reconciliation.plan.moves.iter().enumerate() {
        println!("{:>4}. {:<40} {:>4} -> {:<4}", n + 1, planned.title, planned.from, planned.to);
    }
    Ok(())
}

async fn apply(config: &Config, path: &std::path::Path, location: Option<&str>, yes: bool) -> Result<()> {
    let snapshot = Snapshot::load(path)?;
    let playlist = snapshot.playlist(location);

    let client = EditPlaylistClient::new(config.remote.clone(), EnvCredentials::default())?;
    let reconciler = Reconciler::new(client, &config.engine)?;

    let mut phases = reconciler.subscribe();
    let watcher = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            if !matches!(phase, RunPhase::Idle) {
                tracing::info!(phase = %phase, "progress");
            }
        }
    });

    let mut source = SnapshotSource::new(snapshot.items.clone());
    let result = reconciler
        .run(playlist, &mut source, |preflight| yes || confirm(preflight))
        .await;

    drop(reconciler);
    // The watcher ends once the phase sender is gone.
    let _ = watcher.await;

    match result? {
        RunOutcome::AlreadyOrdered => println!("already ordered"),
        RunOutcome::Cancelled => println!("cancelled"),
        RunOutcome::Applied { moves, mirror } => {
            println!("playlist successfully ordered ({moves} moves)");
            match mirror {
                Some(report) => {
                    if report.missed > 0 {
                        println!("{} rows could not be mirrored locally", report.missed);
                    }
                    let updated = Snapshot { items: source.into_rows(), ..snapshot };
                    updated.save(path)?;
                }
                None => println!("snapshot changed during the run; not rewritten"),
            }
        }
    }
    Ok(())
}

/// Ask before anything is sent. A failed prompt (no terminal) declines.
fn confirm(preflight: &Preflight) -> bool {
    Confirm::new()
        .with_prompt(confirm_prompt(preflight))
        .default(false)
        .interact()
        .unwrap_or(false)
}

fn confirm_prompt(preflight: &Preflight) -> String {
    format!(
        "Reorder {} items by artist, album and title ({} moves)?",
        preflight.items, preflight.moves
    )
}
