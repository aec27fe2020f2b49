//! Post-processing notifications
//!
//! A notifier hears about every receipt the pipeline stores. Notifications
//! are best effort: a failing notifier is logged and otherwise ignored.

pub mod background;

pub use background::BackgroundNotifier;

/// Something worth telling a notifier about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierEvent {
    /// A new receipt was persisted
    RecordAdded { id: i64, filename: String },
}

impl NotifierEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifierEvent::RecordAdded { .. } => "record added",
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            NotifierEvent::RecordAdded { filename, .. } => filename,
        }
    }
}

impl std::fmt::Display for NotifierEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.as_str(), self.filename())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notifier is shut down")]
    Closed,

    #[error("notification failed: {0}")]
    Failed(String),
}

/// Trait for notification hooks
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &NotifierEvent) -> Result<(), NotifyError>;
}

/// Writes each event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &NotifierEvent) -> Result<(), NotifyError> {
        tracing::info!("Notification: {}", event);
        Ok(())
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _event: &NotifierEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = NotifierEvent::RecordAdded { id: 3, filename: "a.pdf".to_string() };
        assert_eq!(event.to_string(), "record added: a.pdf");
    }

    #[test]
    fn test_builtin_notifiers_succeed() {
        let event = NotifierEvent::RecordAdded { id: 1, filename: "b.jpg".to_string() };
        assert!(LogNotifier.notify(&event).is_ok());
        assert!(NoopNotifier.notify(&event).is_ok());
    }
}
