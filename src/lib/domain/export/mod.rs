pub mod processor;
pub mod setup;
pub mod summary;

pub use processor::{RunOptions, export_grid, run_kind, run_pipeline};
pub use setup::setup_logging;
pub use summary::{ExportSummary, RunSummary, format_number, log_summary, print_run_summary};
