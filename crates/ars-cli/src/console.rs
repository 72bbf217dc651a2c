use ars_restore::{ManifestOutcome, RestoreEvent, RestoreObserver};
use ars_types::ByteSize;
use colored::Colorize;

/// Prints restore progress to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl RestoreObserver for ConsoleObserver {
    fn on_event(&self, event: &RestoreEvent<'_>) {
        match event {
            RestoreEvent::RunStarted { manifests } => {
                if manifests.is_empty() {
                    println!("Nothing to do.");
                } else {
                    println!("Restoring {} manifest(s)", manifests.len().to_string().bold());
                }
            }
            RestoreEvent::UnknownManifest { name } => {
                eprintln!("{} no manifest named {}", "warning:".yellow().bold(), name.bold());
            }
            RestoreEvent::ManifestStarted { name, index, total } => {
                println!("[{index}/{total}] {}", name.cyan().bold());
            }
            RestoreEvent::EntryCopied {
                manifest,
                path,
                hash,
                done,
                total,
                ..
            } => {
                println!(
                    "  {:>6} {}:{}->{}",
                    format!("{:.1}%", percent(*done, *total)).dimmed(),
                    manifest,
                    hash.short().dimmed(),
                    path
                );
            }
            RestoreEvent::EntrySkipped { path, reason, .. } => {
                eprintln!("  {} {}: {}", "skip".yellow(), path, reason);
            }
            RestoreEvent::MappingWriteFailed { manifest, error } => {
                eprintln!(
                    "{} mapping log for {} not written: {}",
                    "warning:".yellow().bold(),
                    manifest.bold(),
                    error
                );
            }
            RestoreEvent::ManifestFinished { name, outcome } => match outcome {
                ManifestOutcome::Completed {
                    copied,
                    skipped,
                    bytes,
                    ..
                } => {
                    println!(
                        "{} {}: {} files ({}), {} skipped",
                        "✓".green().bold(),
                        name.bold(),
                        copied,
                        ByteSize(*bytes),
                        skipped
                    );
                }
                ManifestOutcome::Skipped(skip) => {
                    eprintln!("{} {} skipped: {}", "-".yellow().bold(), name.bold(), skip);
                }
                ManifestOutcome::Aborted { path, error } => {
                    eprintln!(
                        "{} {} aborted at {}: {}",
                        "✗".red().bold(),
                        name.bold(),
                        path.yellow(),
                        error
                    );
                }
            },
            RestoreEvent::RunFinished { summary } => {
                if summary.is_empty() {
                    return;
                }
                println!(
                    "\nDone: {} completed, {} skipped, {} aborted; {} files restored, {} entries skipped",
                    summary.completed().count().to_string().green(),
                    summary.skipped().count().to_string().yellow(),
                    summary.aborted().count().to_string().red(),
                    summary.files_copied().to_string().bold(),
                    summary.entries_skipped()
                );
            }
        }
    }
}

/// Share of declared items handled so far, in percent.
fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    done as f64 * 100.0 / total as f64
}
