pub mod config;
pub mod layout;
pub mod record;
pub mod results;
pub mod summary;

pub use config::{load_or_init, RunConfig};
pub use record::{
    append_run_row, ensure_results_file, format_elapsed, render_run_row, results_file_name,
    results_file_path, save_to_final_results,
};
pub use results::{ClassificationRecord, ClassificationRun, ResultsStats, ResultsTable};
pub use summary::{print_results, render_results, ReportOptions};
