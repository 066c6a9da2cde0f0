mod io;
mod manager;

pub use io::{
    draft_file_path_for, export_submission, import_submission, load_draft_file, save_draft_file,
    scan_draft_entries, DraftEntry,
};
pub use manager::{ExperimentDraft, ExperimentManager, WorkloadSlot, DEFAULT_CURVE_WIDTH};
