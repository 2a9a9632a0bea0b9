use ndarray::Array2;

use fitswave_core::io::image_io::{load_gray_image, save_gray_png, to_gray_image};

#[test]
fn test_png_roundtrip_is_lossless() {
    let data = Array2::from_shape_fn((5, 9), |(r, c)| (r * 50 + c * 3) as u8);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");

    save_gray_png(&data, &path).unwrap();
    let loaded = load_gray_image(&path).unwrap();

    assert_eq!(loaded.dim(), (5, 9));
    assert_eq!(loaded, data);
}

#[test]
fn test_gray_image_dimensions_follow_columns_and_rows() {
    let data = Array2::<u8>::zeros((3, 7));
    let img = to_gray_image(&data).unwrap();
    assert_eq!(img.dimensions(), (7, 3));
}

#[test]
fn test_save_png_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");

    save_gray_png(&Array2::from_elem((8, 8), 10u8), &path).unwrap();
    save_gray_png(&Array2::from_elem((2, 4), 200u8), &path).unwrap();

    let loaded = load_gray_image(&path).unwrap();
    assert_eq!(loaded.dim(), (2, 4));
    assert!(loaded.iter().all(|&v| v == 200));
}

#[test]
fn test_save_png_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("test.png");
    assert!(save_gray_png(&Array2::from_elem((2, 2), 1u8), &path).is_err());
}
