pub mod config;
mod orchestrator;
mod persist;
mod types;

pub use orchestrator::{
    load_raster, process_file, process_file_outcome, run_batch, run_batch_reported,
};
pub use persist::{persist, render_preview, with_appended_extension};
pub use types::{
    BandId, BatchReporter, BatchSummary, FileOutcome, NoOpReporter, OutputArtifactPair,
};
