#[allow(dead_code)]
mod common;

use ndarray::{array, Array2};

use fitswave_core::display::stretch::sanitize;
use fitswave_core::display::{normalize, resample};
use fitswave_core::error::FitswaveError;
use fitswave_core::wavelet::{decompose, WaveletKind};

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn test_log_stretch_truncates() {
    // log10 of the shifted values: 0, 1, 2
    let band = array![[0.0, 9.0, 99.0]];
    let img = normalize(&band);
    assert_eq!(img, array![[0u8, 127, 255]]);
}

#[test]
fn test_negative_values_shifted_to_one() {
    let band = array![[-5.0, 4.0]];
    assert_eq!(normalize(&band), array![[0u8, 255]]);
}

#[test]
fn test_nan_treated_as_zero() {
    let band = array![[f64::NAN, 9.0], [0.0, 9.0]];
    assert_eq!(normalize(&band), array![[0u8, 255], [0, 255]]);

    let band = array![[f64::NAN, -9.0]];
    assert_eq!(normalize(&band), array![[255u8, 0]]);
}

#[test]
fn test_constant_band_is_black() {
    for value in [0.0, 10.0, -3.5, 1e6] {
        let band = Array2::from_elem((7, 5), value);
        let img = normalize(&band);
        assert_eq!(img.dim(), (7, 5));
        assert!(img.iter().all(|&v| v == 0), "constant {value}");
    }
}

#[test]
fn test_all_nan_band_is_black() {
    let band = Array2::from_elem((4, 4), f64::NAN);
    assert!(normalize(&band).iter().all(|&v| v == 0));
}

#[test]
fn test_tiny_range_is_treated_as_flat() {
    let mut band = Array2::from_elem((4, 4), 100.0);
    band[[1, 1]] = 100.0 + 1e-9;
    assert!(normalize(&band).iter().all(|&v| v == 0));
}

#[test]
fn test_output_spans_full_range_when_not_flat() {
    let inputs = [
        common::synthetic_galaxy(16, 16),
        Array2::from_shape_fn((9, 9), |(r, c)| (r as f64 - 4.0) * (c as f64 + 1.0)),
        array![[f64::NAN, 1e-3], [5e5, -2.0]],
    ];
    for band in &inputs {
        let img = normalize(band);
        assert_eq!(img.dim(), band.dim());
        assert_eq!(img.iter().copied().min(), Some(0));
        assert_eq!(img.iter().copied().max(), Some(255));
    }
}

#[test]
fn test_infinities_do_not_panic() {
    let band = array![[f64::INFINITY, 1.0], [f64::NEG_INFINITY, 2.0]];
    let img = normalize(&band);
    assert_eq!(img.dim(), (2, 2));
    assert_eq!(sanitize(f64::INFINITY), f64::MAX);
    assert_eq!(sanitize(f64::NEG_INFINITY), f64::MIN);
    assert_eq!(sanitize(f64::NAN), 0.0);
}

#[test]
fn test_point_source_approximation_peaks_at_255() {
    let data = common::point_source(64, 64, 10.0, 1000.0, (32, 32));
    let result = decompose(&data, WaveletKind::Bior3_3, 2).unwrap();
    let img = normalize(&result.approximation);

    let (rows, cols) = img.dim();
    assert!(rows < 64 && cols < 64);

    let peaks = img.iter().filter(|&&v| v == 255).count();
    assert!((1..=4).contains(&peaks), "expected a compact peak, got {peaks}");

    // Pixels far from the source all share the background intensity.
    let background = img[[0, 0]];
    assert!(background < 255);
    let same = img.iter().filter(|&&v| v == background).count();
    assert!(same > rows * cols / 2, "background covers {same} px");
}

// ---------------------------------------------------------------------------
// resample
// ---------------------------------------------------------------------------

#[test]
fn test_resample_identity_on_matching_shape() {
    let img = Array2::from_shape_fn((6, 9), |(r, c)| (r * 40 + c * 3) as u8);
    let out = resample(&img, (6, 9)).unwrap();
    assert_eq!(out, img);
}

#[test]
fn test_resample_changes_shape() {
    let img = Array2::from_shape_fn((3, 5), |(r, c)| (r * 50 + c * 10) as u8);
    assert_eq!(resample(&img, (7, 11)).unwrap().dim(), (7, 11));
    assert_eq!(resample(&img, (2, 2)).unwrap().dim(), (2, 2));
}

#[test]
fn test_resample_constant_stays_constant() {
    let img = Array2::from_elem((4, 4), 128u8);
    let out = resample(&img, (16, 12)).unwrap();
    assert!(out.iter().all(|&v| (127..=128).contains(&v)), "{out:?}");
}

#[test]
fn test_resample_gradient_is_smooth() {
    let img = array![[0u8, 255]];
    let out = resample(&img, (1, 8)).unwrap();
    let row: Vec<u8> = out.iter().copied().collect();
    for pair in row.windows(2) {
        assert!(pair[0] <= pair[1], "not monotonic: {row:?}");
    }
    assert!(row[0] < row[7]);
    // Bilinear output has intermediate values, unlike nearest-neighbour.
    assert!(row.iter().any(|&v| v > 0 && v < 255), "{row:?}");
}

#[test]
fn test_resample_rejects_zero_target() {
    let img = Array2::from_elem((4, 4), 1u8);
    let err = resample(&img, (0, 4)).unwrap_err();
    assert!(matches!(err, FitswaveError::InvalidResample { to: (0, 4), .. }));
    assert!(resample(&img, (4, 0)).is_err());
}

#[test]
fn test_resample_rejects_empty_source() {
    let img = Array2::<u8>::zeros((0, 3));
    assert!(resample(&img, (4, 4)).is_err());
}
