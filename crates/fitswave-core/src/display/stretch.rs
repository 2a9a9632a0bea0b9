use ndarray::Array2;

use crate::consts::{DISPLAY_MAX, FLAT_RANGE_EPSILON};

/// Replace NaN with 0 and clamp infinities to the largest finite values.
pub fn sanitize(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else if v == f64::INFINITY {
        f64::MAX
    } else if v == f64::NEG_INFINITY {
        f64::MIN
    } else {
        v
    }
}

/// Logarithmic display stretch of a band to 8-bit intensities.
///
/// Samples are shifted so the minimum becomes 1.0, compressed with `log10`,
/// then mapped linearly from [lo, hi] to [0, 255] and truncated. A band
/// whose log range is not wider than 1e-6 renders as all zeros.
pub fn normalize(band: &Array2<f64>) -> Array2<u8> {
    let clean = band.mapv(sanitize);
    let min = clean.iter().copied().fold(f64::INFINITY, f64::min);

    let log = clean.mapv(|v| (v - min + 1.0).log10());
    let (lo, hi) = log
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if hi - lo > FLAT_RANGE_EPSILON {
        let range = hi - lo;
        log.mapv(|v| ((v - lo) / range * DISPLAY_MAX) as u8)
    } else {
        Array2::zeros(band.raw_dim())
    }
}
