use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::debug;

use crate::display::{normalize, resample};
use crate::error::{FitswaveError, Result};
use crate::io::fits_writer::write_fits;
use crate::io::image_io::save_gray_png;
use crate::raster::FitsHeader;

use super::types::OutputArtifactPair;

/// Append `.ext` to a base path without touching dots already in its name.
pub fn with_appended_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Write one band as `<base>.fits` (raw samples + header) and `<base>.png`
/// (log-stretched and resized to `target_shape`).
///
/// Both files are always attempted. If either write fails the error names
/// every failed artifact; a FITS that was written stays on disk.
pub fn persist(
    band: &Array2<f64>,
    base_path: &Path,
    header: &FitsHeader,
    target_shape: (usize, usize),
) -> Result<OutputArtifactPair> {
    if band.is_empty() {
        return Err(FitswaveError::Persist {
            base: base_path.to_path_buf(),
            reason: "band is empty".into(),
        });
    }

    let raster_path = with_appended_extension(base_path, "fits");
    let image_path = with_appended_extension(base_path, "png");

    let raster_result = write_fits(&raster_path, band, header);
    let image_result = render_preview(band, target_shape)
        .and_then(|preview| save_gray_png(&preview, &image_path));

    let mut failures = Vec::new();
    if let Err(e) = raster_result {
        failures.push(format!("{}: {e}", raster_path.display()));
    }
    if let Err(e) = image_result {
        failures.push(format!("{}: {e}", image_path.display()));
    }

    if !failures.is_empty() {
        return Err(FitswaveError::Persist {
            base: base_path.to_path_buf(),
            reason: failures.join("; "),
        });
    }

    debug!(base = %base_path.display(), "Band written");
    Ok(OutputArtifactPair {
        raster_path,
        image_path,
    })
}

/// Display rendering of a band at the requested resolution.
pub fn render_preview(band: &Array2<f64>, target_shape: (usize, usize)) -> Result<Array2<u8>> {
    resample(&normalize(band), target_shape)
}
