use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitswaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("empty raster")]
    EmptyRaster,

    #[error("Invalid FITS file: {0}")]
    InvalidFits(String),

    #[error("Decomposition level {level} out of range (supported: 1..={max})")]
    InvalidLevel { level: usize, max: usize },

    #[error("Cannot decompose an empty band")]
    EmptyBand,

    #[error("Unknown wavelet: {0}")]
    UnknownWavelet(String),

    #[error("Cannot resample {}x{} image to {}x{}", from.1, from.0, to.1, to.0)]
    InvalidResample {
        from: (usize, usize),
        to: (usize, usize),
    },

    #[error("Failed to persist {}: {reason}", base.display())]
    Persist { base: PathBuf, reason: String },

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FitswaveError>;
