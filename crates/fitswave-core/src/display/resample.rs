use image::imageops::{self, FilterType};
use ndarray::Array2;

use crate::error::{FitswaveError, Result};
use crate::io::image_io::{from_gray_image, to_gray_image};

/// Resize an 8-bit image to `target` = (rows, cols) with bilinear filtering.
///
/// Matching shapes return an unchanged copy.
pub fn resample(image: &Array2<u8>, target: (usize, usize)) -> Result<Array2<u8>> {
    let from = image.dim();
    let (rows, cols) = target;
    let invalid = || FitswaveError::InvalidResample { from, to: target };

    if image.is_empty() || rows == 0 || cols == 0 {
        return Err(invalid());
    }
    let width = u32::try_from(cols).map_err(|_| invalid())?;
    let height = u32::try_from(rows).map_err(|_| invalid())?;

    if from == target {
        return Ok(image.clone());
    }

    let src = to_gray_image(image)?;
    let resized = imageops::resize(&src, width, height, FilterType::Triangle);
    Ok(from_gray_image(&resized))
}
