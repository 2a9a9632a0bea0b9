/// Minimum sample count (h*w) to use lane-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Log-range width below which a band is treated as flat and rendered black.
pub const FLAT_RANGE_EPSILON: f64 = 1e-6;

/// Brightest 8-bit intensity produced by the display stretch.
pub const DISPLAY_MAX: f64 = 255.0;

/// FITS logical record size in bytes.
pub const FITS_BLOCK_SIZE: usize = 2880;

/// FITS header card size in bytes.
pub const FITS_CARD_SIZE: usize = 80;

/// Header cards per FITS block.
pub const FITS_CARDS_PER_BLOCK: usize = FITS_BLOCK_SIZE / FITS_CARD_SIZE;

/// Largest NAXIS value the FITS standard allows.
pub const FITS_MAX_AXES: i64 = 999;

/// Longest string value that fits on a single header card.
pub const FITS_MAX_STRING_LEN: usize = 68;

/// File extensions recognized as FITS input (compared case-insensitively).
pub const FITS_EXTENSIONS: [&str; 2] = ["fits", "fit"];

/// Suffix appended to the file stem for the approximation band.
pub const CORE_APPROX_SUFFIX: &str = "core_approx";

/// Message reported for a file that was processed without error.
pub const SUCCESS_MESSAGE: &str = "Success";
