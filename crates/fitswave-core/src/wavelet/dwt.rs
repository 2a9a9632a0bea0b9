use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Zip};
use tracing::{debug, warn};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{FitswaveError, Result};

use super::filter::WaveletKind;

/// Direction of a detail band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// High-pass along columns, low-pass along rows.
    Horizontal,
    /// Low-pass along columns, high-pass along rows.
    Vertical,
    /// High-pass in both directions.
    Diagonal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Self::Horizontal, Self::Vertical, Self::Diagonal];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The three detail bands produced by one decomposition step.
#[derive(Clone, Debug)]
pub struct DetailBands {
    /// 1 is the finest level, `L` the coarsest.
    pub level: usize,
    pub horizontal: Array2<f64>,
    pub vertical: Array2<f64>,
    pub diagonal: Array2<f64>,
}

impl DetailBands {
    pub fn band(&self, orientation: Orientation) -> &Array2<f64> {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
            Orientation::Diagonal => &self.diagonal,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.horizontal.dim()
    }
}

/// Approximation plus per-level details, ordered coarsest level first.
#[derive(Clone, Debug)]
pub struct DecompositionResult {
    pub approximation: Array2<f64>,
    pub details: Vec<DetailBands>,
}

impl DecompositionResult {
    pub fn levels(&self) -> usize {
        self.details.len()
    }
}

/// Number of coefficients one analysis step produces from `len` samples
/// with symmetric extension.
pub fn output_len(len: usize, filter_len: usize) -> usize {
    (len + filter_len - 1) / 2
}

/// Half-sample symmetric extension: reflect index into [0, size).
///
/// `x[-1] = x[0]`, `x[size] = x[size - 1]`, with period `2 * size`.
pub fn symmetric_index(idx: isize, size: usize) -> usize {
    let period = 2 * size as isize;
    let m = idx.rem_euclid(period) as usize;
    if m < size {
        m
    } else {
        2 * size - 1 - m
    }
}

/// Recommended depth for a raster of this shape. Deeper levels are
/// computed but their bands are dominated by boundary effects.
pub fn max_level(shape: (usize, usize), kind: WaveletKind) -> usize {
    kind.max_level(shape.0.min(shape.1))
}

/// Deepest level `decompose` accepts: every step must still shrink the
/// shorter axis of the approximation.
pub fn depth_limit(shape: (usize, usize), kind: WaveletKind) -> usize {
    let filter_len = kind.filter_len();
    let mut len = shape.0.min(shape.1);
    let mut levels = 0;
    while len >= filter_len.max(2) {
        len = output_len(len, filter_len);
        levels += 1;
    }
    levels
}

/// Multi-level 2D discrete wavelet decomposition.
///
/// Each step filters and downsamples along columns (axis 0) and then rows
/// (axis 1) with the analysis pair of `kind`, splitting the current
/// approximation into a coarser approximation and horizontal, vertical and
/// diagonal details.
pub fn decompose(
    data: &Array2<f64>,
    kind: WaveletKind,
    level: usize,
) -> Result<DecompositionResult> {
    if data.is_empty() {
        return Err(FitswaveError::EmptyBand);
    }
    let max = depth_limit(data.dim(), kind);
    if level == 0 || level > max {
        return Err(FitswaveError::InvalidLevel { level, max });
    }
    let recommended = max_level(data.dim(), kind);
    if level > recommended {
        warn!(
            level,
            max_level = recommended,
            wavelet = %kind,
            "Level too high: coarse bands are dominated by boundary effects"
        );
    }

    let mut details = Vec::with_capacity(level);
    let mut current = data.clone();

    for step in 1..=level {
        let (approx, bands) = dwt2(current.view(), kind, step);
        debug!(
            level = step,
            rows = approx.nrows(),
            cols = approx.ncols(),
            "Decomposition level complete"
        );
        details.push(bands);
        current = approx;
    }

    details.reverse();
    Ok(DecompositionResult {
        approximation: current,
        details,
    })
}

/// Single-level 2D transform. Returns (approximation, details).
pub fn dwt2(data: ArrayView2<f64>, kind: WaveletKind, level: usize) -> (Array2<f64>, DetailBands) {
    let lo = kind.dec_lo();
    let hi = kind.dec_hi();

    let col_lo = analyze_axis(data, lo, Axis(0));
    let col_hi = analyze_axis(data, hi, Axis(0));

    let approximation = analyze_axis(col_lo.view(), lo, Axis(1));
    let vertical = analyze_axis(col_lo.view(), hi, Axis(1));
    let horizontal = analyze_axis(col_hi.view(), lo, Axis(1));
    let diagonal = analyze_axis(col_hi.view(), hi, Axis(1));

    (
        approximation,
        DetailBands {
            level,
            horizontal,
            vertical,
            diagonal,
        },
    )
}

/// Convolve every lane along `axis` with `filter`, keeping odd positions.
fn analyze_axis(data: ArrayView2<f64>, filter: &[f64], axis: Axis) -> Array2<f64> {
    let n = data.len_of(axis);
    let mut shape = data.raw_dim();
    shape[axis.index()] = output_len(n, filter.len());
    let mut out = Array2::<f64>::zeros(shape);

    let zip = Zip::from(data.lanes(axis)).and(out.lanes_mut(axis));
    if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|src, mut dst| {
            for (o, slot) in dst.iter_mut().enumerate() {
                *slot = convolve_at(&src, filter, 2 * o + 1);
            }
        });
    } else {
        zip.for_each(|src, mut dst| {
            for (o, slot) in dst.iter_mut().enumerate() {
                *slot = convolve_at(&src, filter, 2 * o + 1);
            }
        });
    }

    out
}

/// `sum_j filter[j] * x[i - j]` with symmetric boundary handling.
fn convolve_at(signal: &ArrayView1<f64>, filter: &[f64], i: usize) -> f64 {
    let n = signal.len();
    filter
        .iter()
        .enumerate()
        .map(|(j, &h)| h * signal[symmetric_index(i as isize - j as isize, n)])
        .sum()
}
