use crossbeam::channel::{self, Sender};
use std::thread;

use super::{Notifier, NotifierEvent, NotifyError};

/// Runs a notifier on its own thread.
///
/// `notify` only enqueues the event, so a slow or failing hook never holds
/// up the caller. Failures are logged by the worker. Pending events are
/// drained when the notifier is shut down or dropped.
pub struct BackgroundNotifier {
    tx: Option<Sender<NotifierEvent>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl BackgroundNotifier {
    pub fn spawn(inner: impl Notifier + 'static) -> std::io::Result<Self> {
        let (tx, rx) = channel::unbounded::<NotifierEvent>();

        let handle = thread::Builder::new()
            .name("receipt-notifier".to_string())
            .spawn(move || {
                for event in rx {
                    if let Err(e) = inner.notify(&event) {
                        tracing::warn!("Notifier failed for {}: {}", event.filename(), e);
                    }
                }
            })?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Stop accepting events and wait for the queue to drain
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Notifier thread panicked");
            }
        }
    }
}

impl Notifier for BackgroundNotifier {
    fn notify(&self, event: &NotifierEvent) -> Result<(), NotifyError> {
        match &self.tx {
            Some(tx) => tx.send(event.clone()).map_err(|_| NotifyError::Closed),
            None => Err(NotifyError::Closed),
        }
    }
}

impl Drop for BackgroundNotifier {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, event: &NotifierEvent) -> Result<(), NotifyError> {
            self.seen.lock().unwrap().push(event.filename().to_string());
            Ok(())
        }
    }

    struct Broken;

    impl Notifier for Broken {
        fn notify(&self, _event: &NotifierEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Failed("remote rejected".to_string()))
        }
    }

    fn added(name: &str) -> NotifierEvent {
        NotifierEvent::RecordAdded { id: 1, filename: name.to_string() }
    }

    #[test]
    fn test_events_delivered_in_order_before_shutdown_returns() {
        let recorder = Recorder::default();
        let notifier = BackgroundNotifier::spawn(recorder.clone()).unwrap();

        notifier.notify(&added("a.pdf")).unwrap();
        notifier.notify(&added("b.jpg")).unwrap();
        notifier.shutdown();

        assert_eq!(*recorder.seen.lock().unwrap(), vec!["a.pdf", "b.jpg"]);
    }

    #[test]
    fn test_inner_failure_is_not_reported_to_caller() {
        let notifier = BackgroundNotifier::spawn(Broken).unwrap();
        assert!(notifier.notify(&added("a.pdf")).is_ok());
        notifier.shutdown();
    }
}
