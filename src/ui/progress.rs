use crate::pipeline::RunSummary;
use crate::ui::output::{file_failed, file_new, file_skipped};
use crate::ui::progress_message::{ProgressMessage, ProgressPhase};
use crate::ui::theme;
use crate::ui::Icons;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::thread;
use std::time::Duration;

/// Drives a progress bar from pipeline messages on a background thread
pub struct ProgressManager {
    bar: ProgressBar,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressManager {
    pub fn new() -> (Self, crossbeam::channel::Sender<ProgressMessage>) {
        let (tx, rx) = crossbeam::channel::unbounded::<ProgressMessage>();

        let bar = if console::Term::stdout().is_term() {
            ProgressBar::new(0).with_message("Scanning")
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }

        let bar_clone = bar.clone();
        let handle = thread::spawn(move || {
            for msg in rx {
                match msg {
                    ProgressMessage::Started {
                        phase: ProgressPhase::Scanning,
                        total: _,
                    } => {
                        bar_clone.enable_steady_tick(Duration::from_millis(100));
                    }
                    ProgressMessage::Started {
                        phase: ProgressPhase::Processing,
                        total,
                    } => {
                        bar_clone.set_length(total as u64);
                        bar_clone.set_message("Processing receipts");
                    }
                    ProgressMessage::Progress {
                        phase: ProgressPhase::Processing,
                        current,
                        file,
                    } => {
                        bar_clone.set_position(current as u64);
                        if let Some(ref f) = file {
                            bar_clone.set_message(f.clone());
                        }
                    }
                    ProgressMessage::Finished {
                        phase: ProgressPhase::Processing,
                    } => {
                        bar_clone.finish_and_clear();
                    }
                    ProgressMessage::FileNew(file) => bar_clone.println(file_new(&file)),
                    ProgressMessage::FileSkipped(file) => {
                        tracing::debug!("{}", file_skipped(&file));
                    }
                    ProgressMessage::FileFailed { file, error } => {
                        bar_clone.println(file_failed(&file, &error))
                    }
                    _ => {}
                }
            }
        });

        (
            Self {
                bar,
                handle: Some(handle),
            },
            tx,
        )
    }

    /// Wait for the message stream to end, then clear the bar.
    ///
    /// Every sender must be dropped first or this blocks.
    pub fn finish(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
        self.bar.finish_and_clear();
    }

    pub fn finish_with_summary(self, duration: Duration, summary: &RunSummary) {
        self.finish();
        println!();
        println!(
            "{} {}",
            Icons::CHECK.style(theme().success.clone()),
            format!("Complete in {}", HumanDuration(duration)).style(theme().success.clone())
        );
        println!(
            "  {} {} new  {} {} skipped  {} {} failed",
            Icons::NEW.style(theme().info.clone()),
            summary.processed,
            Icons::SKIP,
            summary.skipped,
            Icons::CROSS.style(theme().info.clone()),
            summary.failures.len()
        );
    }
}
