use std::path::{Path, PathBuf};

use crate::consts::CORE_APPROX_SUFFIX;
use crate::wavelet::Orientation;

/// Identifies one band of a decomposition for naming its artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandId {
    Approximation,
    Detail {
        level: usize,
        orientation: Orientation,
    },
}

impl BandId {
    /// Artifact base name (without extension) inside the file's folder.
    pub fn base_name(&self, stem: &str) -> String {
        match self {
            Self::Approximation => format!("{stem}_{CORE_APPROX_SUFFIX}"),
            Self::Detail { level, orientation } => format!("L{level}_{orientation}"),
        }
    }
}

impl std::fmt::Display for BandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approximation => write!(f, "approximation"),
            Self::Detail { level, orientation } => write!(f, "L{level} {orientation}"),
        }
    }
}

/// The two files written for one band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputArtifactPair {
    /// Lossless float64 FITS with the source header attached.
    pub raster_path: PathBuf,
    /// 8-bit grayscale PNG at the source resolution.
    pub image_path: PathBuf,
}

/// Result of processing a single input file.
#[derive(Clone, Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub success: bool,
    pub message: String,
    pub artifacts: Vec<OutputArtifactPair>,
}

impl FileOutcome {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Outcomes of a batch run, in input order.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> + '_ {
        self.outcomes.iter().filter(|o| !o.success)
    }
}

/// Thread-safe progress reporting for a batch.
///
/// Implementors can drive progress bars, logging, or any other UI feedback.
/// All methods have default no-op implementations.
pub trait BatchReporter: Send + Sync {
    /// Input discovery finished; `total_files` files will be processed.
    fn begin_batch(&self, _total_files: usize) {}

    /// Processing of one file has started.
    fn file_started(&self, _path: &Path) {}

    /// Processing of one file has finished, successfully or not.
    fn file_finished(&self, _outcome: &FileOutcome) {}
}

/// Reporter that ignores every event.
pub struct NoOpReporter;
impl BatchReporter for NoOpReporter {}
