use std::path::Path;

use image::{GrayImage, ImageFormat};
use ndarray::Array2;

use crate::error::{FitswaveError, Result};

/// Convert an 8-bit array (rows, cols) into a grayscale image buffer.
pub fn to_gray_image(data: &Array2<u8>) -> Result<GrayImage> {
    let (h, w) = data.dim();
    let invalid = || FitswaveError::InvalidResample {
        from: (h, w),
        to: (h, w),
    };
    let width = u32::try_from(w).map_err(|_| invalid())?;
    let height = u32::try_from(h).map_err(|_| invalid())?;

    let pixels: Vec<u8> = data.iter().copied().collect();
    GrayImage::from_raw(width, height, pixels).ok_or_else(invalid)
}

/// Convert a grayscale image buffer back into an (rows, cols) array.
pub fn from_gray_image(img: &GrayImage) -> Array2<u8> {
    let (w, h) = img.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        img.get_pixel(col as u32, row as u32).0[0]
    })
}

/// Save an 8-bit intensity array as grayscale PNG, overwriting `path`.
pub fn save_gray_png(data: &Array2<u8>, path: &Path) -> Result<()> {
    let img = to_gray_image(data)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Load a PNG (or any format the `image` crate reads) as 8-bit grayscale.
pub fn load_gray_image(path: &Path) -> Result<Array2<u8>> {
    let img = image::open(path)?;
    Ok(from_gray_image(&img.to_luma8()))
}
