use std::path::{Path, PathBuf};

use crate::consts::FITS_EXTENSIONS;
use crate::error::Result;

/// True when the path has a `.fits` or `.fit` extension (any case).
pub fn is_fits_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            FITS_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// List the FITS files directly inside `dir`, sorted by path.
pub fn discover_rasters(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_fits_path(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
