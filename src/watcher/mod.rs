use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use crate::pipeline::Pipeline;
use crate::scanner::is_supported;

/// Re-runs the pipeline whenever a receipt lands in the watched folder
pub struct Watcher<'a> {
    path: PathBuf,
    pipeline: Pipeline<'a>,
}

impl<'a> Watcher<'a> {
    pub fn new(path: PathBuf, pipeline: Pipeline<'a>) -> Self {
        Self { path, pipeline }
    }

    /// Process what is already there, then block handling file events
    pub fn run(&self) -> anyhow::Result<()> {
        self.process();

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!("Watching for receipts in {}", self.path.display());

        for res in rx {
            match res {
                Ok(event) => {
                    if is_relevant(&event) {
                        self.process();
                    }
                }
                Err(e) => tracing::warn!("watch error: {:?}", e),
            }
        }

        Ok(())
    }

    fn process(&self) {
        match self.pipeline.run(&self.path) {
            Ok(summary) if summary.processed > 0 || !summary.failures.is_empty() => {
                println!("{}", summary);
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Processing {} failed: {}", self.path.display(), e),
        }
    }
}

/// Creates and modifications of supported files trigger a run
fn is_relevant(event: &notify::Event) -> bool {
    use notify::EventKind;
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => event.paths.iter().any(|p| is_receipt_path(p)),
        _ => false,
    }
}

fn is_receipt_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(is_supported)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, RemoveKind};

    #[test]
    fn test_relevant_events() {
        let create = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/inbox/a.PDF"));
        assert!(is_relevant(&create));

        let text = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/inbox/notes.txt"));
        assert!(!is_relevant(&text));

        let removed = notify::Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/inbox/a.pdf"));
        assert!(!is_relevant(&removed));
    }
}
