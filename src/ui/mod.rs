pub mod detail;
pub mod icons;
pub mod output;
pub mod progress;
pub mod progress_message;
pub mod table;
pub mod theme;

pub use detail::render_detail;
pub use icons::Icons;
pub use output::{
    dim, empty, file_failed, file_new, file_skipped, header, info, section, status, success,
    summary_row, warn,
};
pub use progress::ProgressManager;
pub use progress_message::{ProgressMessage, ProgressPhase};
pub use table::{receipts_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
