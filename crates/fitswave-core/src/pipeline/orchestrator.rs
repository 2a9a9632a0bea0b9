use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::consts::SUCCESS_MESSAGE;
use crate::error::{FitswaveError, Result};
use crate::io::discover::discover_rasters;
use crate::io::fits::load_fits;
use crate::raster::Raster;
use crate::wavelet::{decompose, Orientation};

use super::config::BatchConfig;
use super::persist::persist;
use super::types::{
    BandId, BatchReporter, BatchSummary, FileOutcome, NoOpReporter, OutputArtifactPair,
};

/// Load a FITS file as a single 2D plane, tagging failures with the path.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let tag = |e: FitswaveError| match e {
        FitswaveError::EmptyRaster => FitswaveError::EmptyRaster,
        other => FitswaveError::Load {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    };
    load_fits(path).and_then(|loaded| loaded.into_plane()).map_err(tag)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "raster".to_string())
}

/// Decompose one input file and write every band under
/// `<output_folder>/<stem>/`.
///
/// The first failing band aborts the file; bands already written stay on disk.
pub fn process_file(path: &Path, config: &BatchConfig) -> Result<Vec<OutputArtifactPair>> {
    let raster = load_raster(path)?;
    let target_shape = raster.shape();
    let stem = file_stem(path);

    let folder = config.paths.output_folder.join(&stem);
    std::fs::create_dir_all(&folder)?;

    let params = &config.parameters;
    let result = decompose(&raster.data, params.wavelet_type, params.decomposition_level)?;
    info!(
        file = %stem,
        rows = target_shape.0,
        cols = target_shape.1,
        wavelet = %params.wavelet_type,
        levels = result.levels(),
        "Decomposed raster"
    );

    let mut artifacts = Vec::with_capacity(1 + 3 * result.levels());

    let base = folder.join(BandId::Approximation.base_name(&stem));
    artifacts.push(persist(&result.approximation, &base, &raster.header, target_shape)?);

    for bands in &result.details {
        for orientation in Orientation::ALL {
            let id = BandId::Detail {
                level: bands.level,
                orientation,
            };
            debug!(file = %stem, band = %id, "Persisting band");
            let base = folder.join(id.base_name(&stem));
            artifacts.push(persist(
                bands.band(orientation),
                &base,
                &raster.header,
                target_shape,
            )?);
        }
    }

    Ok(artifacts)
}

/// `process_file` with every error converted into a failed outcome.
pub fn process_file_outcome(path: &Path, config: &BatchConfig) -> FileOutcome {
    match process_file(path, config) {
        Ok(artifacts) => FileOutcome {
            path: path.to_path_buf(),
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            artifacts,
        },
        Err(e) => {
            warn!(file = %path.display(), error = %e, "File failed");
            FileOutcome {
                path: path.to_path_buf(),
                success: false,
                message: e.to_string(),
                artifacts: Vec::new(),
            }
        }
    }
}

/// Run the batch with a thread-safe progress reporter.
///
/// Only configuration, output-root creation and input discovery can fail the
/// batch itself; per-file errors end up in the summary.
pub fn run_batch_reported(
    config: &BatchConfig,
    reporter: Arc<dyn BatchReporter>,
) -> Result<BatchSummary> {
    config.validate()?;
    std::fs::create_dir_all(&config.paths.output_folder)?;

    let files = discover_rasters(&config.paths.input_folder)?;
    info!(
        total_files = files.len(),
        input = %config.paths.input_folder.display(),
        parallel = config.execution.parallel,
        "Starting batch"
    );
    reporter.begin_batch(files.len());

    let run_one = |path: &PathBuf| {
        reporter.file_started(path);
        let outcome = process_file_outcome(path, config);
        reporter.file_finished(&outcome);
        outcome
    };

    let outcomes: Vec<FileOutcome> = if config.execution.parallel {
        files.par_iter().map(run_one).collect()
    } else {
        files.iter().map(run_one).collect()
    };

    let summary = BatchSummary { outcomes };
    info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "Batch complete"
    );
    Ok(summary)
}

/// Run the batch without progress reporting.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    run_batch_reported(config, Arc::new(NoOpReporter))
}
