//! Batch host: picks input files, migrates each one independently, writes
//! the results.
//!
//! Files are read and written on tokio tasks; the migration itself runs on
//! the blocking pool. A failure is recorded against its own file and never
//! stops the others.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use polemig_core::{migrate_str, Defaults};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// How outputs are named and written.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Output directory; `None` writes next to each input.
    pub out_dir: Option<PathBuf>,
    pub prefix: String,
    pub pretty: bool,
    /// Migrate but do not write anything.
    pub dry_run: bool,
    /// Files read and migrated at once. Zero counts as one.
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            out_dir: None,
            prefix: "transformed_".to_string(),
            pretty: true,
            dry_run: false,
            jobs: default_jobs(),
        }
    }
}

/// One file per available core.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}

// ---------------------------------------------------------------------------
// Input selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotJson,
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = display_name(&self.path);
        match self.reason {
            SkipReason::NotJson => write!(f, "Skipped non-JSON file: {name}"),
            SkipReason::Duplicate => write!(f, "File already added: {name}"),
        }
    }
}

/// Keep `.json` inputs whose file name has not been seen yet.
///
/// Names are compared without their directory since outputs from two
/// same-named files would collide.
pub fn select_inputs(paths: impl IntoIterator<Item = PathBuf>) -> (Vec<PathBuf>, Vec<Skipped>) {
    let mut accepted = Vec::new();
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();

    for path in paths {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !is_json {
            skipped.push(Skipped { path, reason: SkipReason::NotJson });
            continue;
        }
        if !seen.insert(display_name(&path)) {
            skipped.push(Skipped { path, reason: SkipReason::Duplicate });
            continue;
        }
        accepted.push(path);
    }

    (accepted, skipped)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum FileOutcome {
    Migrated {
        /// `None` on a dry run.
        output: Option<PathBuf>,
        changes: Vec<String>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FileOutcome::Migrated { .. })
    }

    pub fn name(&self) -> String {
        display_name(&self.input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of(reports: &[FileReport]) -> Self {
        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        Self {
            total: reports.len(),
            succeeded,
            failed: reports.len() - succeeded,
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} file(s). {} successful, {} with errors.",
            self.total, self.succeeded, self.failed
        )
    }
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// Migrate inputs concurrently, at most `options.jobs` at a time. Reports
/// come back in input order.
pub async fn run(inputs: Vec<PathBuf>, defaults: Arc<Defaults>, options: Arc<BatchOptions>) -> Vec<FileReport> {
    let permits = Arc::new(Semaphore::new(options.jobs.max(1)));
    let mut tasks = JoinSet::new();
    for (index, input) in inputs.iter().cloned().enumerate() {
        let defaults = Arc::clone(&defaults);
        let options = Arc::clone(&options);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // Held until the file is written, so at most `jobs` texts are in memory.
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let outcome = FileOutcome::Failed { error: e.to_string() };
                    return (index, FileReport { input, outcome });
                }
            };
            let outcome = match process_file(&input, defaults, &options).await {
                Ok((output, changes)) => {
                    tracing::info!(file = %input.display(), changes = changes.len(), "migrated");
                    FileOutcome::Migrated { output, changes }
                }
                Err(e) => {
                    tracing::warn!(file = %input.display(), error = %e, "migration failed");
                    FileOutcome::Failed { error: format!("{e:#}") }
                }
            };
            (index, FileReport { input, outcome })
        });
    }

    let mut slots: Vec<Option<FileReport>> = inputs.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => slots[index] = Some(report),
            Err(e) => tracing::error!(error = %e, "migration task aborted"),
        }
    }

    // A panicked task leaves its slot empty; report it as failed.
    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, input)| {
            slot.unwrap_or_else(|| FileReport {
                input,
                outcome: FileOutcome::Failed {
                    error: "migration task aborted".to_string(),
                },
            })
        })
        .collect()
}

async fn process_file(
    input: &Path,
    defaults: Arc<Defaults>,
    options: &BatchOptions,
) -> anyhow::Result<(Option<PathBuf>, Vec<String>)> {
    let raw = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;

    let migration = tokio::task::spawn_blocking(move || migrate_str(&raw, &defaults)).await??;

    if options.dry_run {
        return Ok((None, migration.changes));
    }

    let output = output_path(input, options);
    let body = if options.pretty {
        migration.to_json_pretty()
    } else {
        migration.to_json()
    };
    tokio::fs::write(&output, body)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    Ok((Some(output), migration.changes))
}

/// `<out_dir or input dir>/<prefix><file name>`.
pub fn output_path(input: &Path, options: &BatchOptions) -> PathBuf {
    let dir = options
        .out_dir
        .clone()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}{}", options.prefix, display_name(input)))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
