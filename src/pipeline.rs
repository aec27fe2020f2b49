//! Scan, extract and persist
//!
//! Files are handled one at a time in scan order. A file already on record
//! is skipped, a file the extractor rejects is logged and skipped, and every
//! stored receipt is committed on its own. Only storage failures end a run
//! early.

use std::path::Path;
use crossbeam::channel::Sender;

use crate::Result;
use crate::extractor::ReceiptExtractor;
use crate::notifier::{Notifier, NotifierEvent};
use crate::scanner::{FileScanner, ReceiptFile};
use crate::storage::SqliteStore;
use crate::ui::progress_message::{ProgressMessage, ProgressPhase};

/// A file the extractor could not handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub filename: String,
    pub error: String,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Supported files found in the directory
    pub scanned: usize,
    /// Files already on record
    pub skipped: usize,
    /// Files newly extracted and stored
    pub processed: usize,
    pub failures: Vec<FailedFile>,
}

impl RunSummary {
    /// Files that went through extraction
    pub fn attempted(&self) -> usize {
        self.processed + self.failures.len()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} of {} new receipt(s) ({} scanned, {} already stored, {} failed)",
            self.processed,
            self.attempted(),
            self.scanned,
            self.skipped,
            self.failures.len()
        )
    }
}

pub struct Pipeline<'a> {
    store: &'a SqliteStore,
    extractor: &'a dyn ReceiptExtractor,
    notifier: &'a dyn Notifier,
    scanner: FileScanner,
    progress: Option<Sender<ProgressMessage>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        store: &'a SqliteStore,
        extractor: &'a dyn ReceiptExtractor,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            extractor,
            notifier,
            scanner: FileScanner::new(),
            progress: None,
        }
    }

    /// Report progress over a channel while running
    pub fn with_progress(mut self, tx: Sender<ProgressMessage>) -> Self {
        self.progress = Some(tx);
        self
    }

    /// Process every new receipt in a directory
    pub fn run(&self, directory: &Path) -> Result<RunSummary> {
        self.report(ProgressMessage::Started { phase: ProgressPhase::Scanning, total: 0 });
        let files = self.scanner.scan(directory);
        self.report(ProgressMessage::Finished { phase: ProgressPhase::Scanning });
        tracing::info!("Found {} receipt file(s) in {}", files.len(), directory.display());

        let mut summary = RunSummary {
            scanned: files.len(),
            ..RunSummary::default()
        };

        self.report(ProgressMessage::Started { phase: ProgressPhase::Processing, total: files.len() });
        for (current, file) in files.iter().enumerate() {
            self.process_file(file, &mut summary)?;
            self.report(ProgressMessage::Progress {
                phase: ProgressPhase::Processing,
                current: current + 1,
                file: Some(file.filename.clone()),
            });
        }
        self.report(ProgressMessage::Finished { phase: ProgressPhase::Processing });

        tracing::info!("{}", summary);
        Ok(summary)
    }

    fn process_file(&self, file: &ReceiptFile, summary: &mut RunSummary) -> Result<()> {
        if self.store.exists(&file.filename)? {
            tracing::debug!("Already processed, skipping: {}", file.filename);
            summary.skipped += 1;
            self.report(ProgressMessage::FileSkipped(file.filename.clone()));
            return Ok(());
        }

        let payload = match self.extractor.extract(&file.path) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to process {}: {}", file.filename, e);
                summary.failures.push(FailedFile {
                    filename: file.filename.clone(),
                    error: e.to_string(),
                });
                self.report(ProgressMessage::FileFailed {
                    file: file.filename.clone(),
                    error: e.to_string(),
                });
                return Ok(());
            }
        };

        let id = self.store.save(&file.filename, &payload)?;
        summary.processed += 1;
        tracing::info!("Stored receipt #{}: {}", id, file.filename);
        self.report(ProgressMessage::FileNew(file.filename.clone()));

        let event = NotifierEvent::RecordAdded { id, filename: file.filename.clone() };
        if let Err(e) = self.notifier.notify(&event) {
            tracing::warn!("Notifier failed for {}: {}", file.filename, e);
        }
        Ok(())
    }

    fn report(&self, msg: ProgressMessage) {
        if let Some(tx) = &self.progress {
            tx.send(msg).ok();
        }
    }
}
