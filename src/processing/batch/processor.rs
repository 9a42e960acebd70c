use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{BatchItem, FileOutcome, OptionSet, Progress, ProgressType, TransformReport};
use crate::processing::TransformEngine;
use crate::utils::{MediaError, MediaResult};

use super::CancelFlag;

enum Pending {
    Skipped(PathBuf),
    Running(PathBuf, JoinHandle<MediaResult<TransformReport>>),
}

/// Runs one operation over many files on the blocking thread pool.
///
/// At most `concurrency` files are in flight. Each file gets its own outcome and a failure
/// never stops its siblings. Outcomes come back in input order.
pub struct BatchProcessor {
    engine: TransformEngine,
    concurrency: usize,
    cancel: CancelFlag,
}

impl BatchProcessor {
    pub fn new(engine: TransformEngine, concurrency: usize, cancel: CancelFlag) -> Self {
        Self {
            engine,
            concurrency: concurrency.max(1),
            cancel,
        }
    }

    /// Flag that stops this processor from submitting more files.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Processes `items` with `operation_id`, reporting progress as outcomes are collected.
    pub async fn run<F>(
        &self,
        items: Vec<BatchItem>,
        operation_id: &str,
        options: &OptionSet,
        progress_callback: F,
    ) -> MediaResult<Vec<FileOutcome>>
    where
        F: Fn(Progress) + Send + Sync,
    {
        self.engine.batch_operation(operation_id)?;

        let total = items.len();
        info!(
            "Processing batch of {} files with '{}' ({} at a time)",
            total, operation_id, self.concurrency
        );
        progress_callback(Progress::new(ProgressType::Start, 0, total, "started"));

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut pending = Vec::with_capacity(total);

        for item in items {
            let source = item.file.path.clone();
            if self.cancel.is_cancelled() {
                pending.push(Pending::Skipped(source));
                continue;
            }

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| MediaError::worker(format!("Failed to acquire worker: {e}")))?;

            // Cancellation may have arrived while waiting for a free worker.
            if self.cancel.is_cancelled() {
                pending.push(Pending::Skipped(source));
                continue;
            }

            let engine = self.engine.clone();
            let operation = operation_id.to_string();
            let options = options.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                engine.process_item(&item, &operation, &options)
            });
            pending.push(Pending::Running(source, handle));
        }

        let mut outcomes = Vec::with_capacity(total);
        let mut failed = 0;

        for (idx, job) in pending.into_iter().enumerate() {
            let completed = idx + 1;
            let outcome = match job {
                Pending::Skipped(source) => FileOutcome {
                    result: Err(MediaError::Cancelled(source.clone())),
                    source,
                },
                Pending::Running(source, handle) => {
                    let result = handle
                        .await
                        .unwrap_or_else(|e| Err(MediaError::worker(format!("Task panicked: {e}"))));
                    FileOutcome { source, result }
                }
            };

            let progress = match &outcome.result {
                Ok(report) => {
                    debug!("{}/{} done: {}", completed, total, report.path.display());
                    Progress::new(ProgressType::Progress, completed, total, "processing")
                }
                Err(e) => {
                    failed += 1;
                    warn!("Transform failed for {}: {}", outcome.source.display(), e);
                    Progress::new(ProgressType::Error, completed, total, "error")
                        .with_error(e.to_string())
                }
            };
            progress_callback(progress.for_file(outcome.source.clone()));
            outcomes.push(outcome);
        }

        if failed > 0 {
            warn!(
                "Batch processing completed with {} failed files out of {}",
                failed, total
            );
        } else {
            info!("Batch processing completed successfully: {} files processed", total);
        }
        progress_callback(Progress::new(ProgressType::Complete, total, total, "complete"));

        Ok(outcomes)
    }
}
