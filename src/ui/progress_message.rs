#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressPhase {
    Scanning,
    Processing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProgressMessage {
    Started {
        phase: ProgressPhase,
        total: usize,
    },
    Progress {
        phase: ProgressPhase,
        current: usize,
        file: Option<String>,
    },
    Finished {
        phase: ProgressPhase,
    },
    FileNew(String),
    FileSkipped(String),
    FileFailed {
        file: String,
        error: String,
    },
}
