use std::path::Path;

use ndarray::Array2;

pub const BLOCK: usize = 2880;

/// Format one 80-column header card.
pub fn card(text: &str) -> String {
    format!("{text:<80}")
}

/// Build a header block (padded to 2880 bytes) from raw card strings.
///
/// The `END` card is appended automatically.
pub fn build_header(cards: &[String]) -> Vec<u8> {
    let mut buf = Vec::new();
    for c in cards {
        assert_eq!(c.len(), 80, "card must be 80 columns: {c:?}");
        buf.extend_from_slice(c.as_bytes());
    }
    buf.extend_from_slice(card("END").as_bytes());
    pad(&mut buf, b' ');
    buf
}

pub fn pad(buf: &mut Vec<u8>, fill: u8) {
    while buf.len() % BLOCK != 0 {
        buf.push(fill);
    }
}

/// Primary-HDU cards for an image with the given BITPIX and axes (NAXIS1 first).
pub fn image_cards(bitpix: i64, axes: &[usize]) -> Vec<String> {
    let mut cards = vec![
        card("SIMPLE  =                    T"),
        card(&format!("BITPIX  = {bitpix:>20}")),
        card(&format!("NAXIS   = {:>20}", axes.len())),
    ];
    for (i, n) in axes.iter().enumerate() {
        cards.push(card(&format!("NAXIS{:<3}= {n:>20}", i + 1)));
    }
    cards
}

/// Complete FITS file with 16-bit integer data (big-endian).
pub fn build_i16_fits(axes: &[usize], extra_cards: &[String], values: &[i16]) -> Vec<u8> {
    let mut cards = image_cards(16, axes);
    cards.extend_from_slice(extra_cards);
    let mut buf = build_header(&cards);
    for v in values {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    pad(&mut buf, 0);
    buf
}

/// Complete FITS file with 32-bit float data (big-endian).
pub fn build_f32_fits(axes: &[usize], extra_cards: &[String], values: &[f32]) -> Vec<u8> {
    let mut cards = image_cards(-32, axes);
    cards.extend_from_slice(extra_cards);
    let mut buf = build_header(&cards);
    for v in values {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    pad(&mut buf, 0);
    buf
}

pub fn write_bytes(path: &Path, data: &[u8]) {
    std::fs::write(path, data).expect("write test file");
}

/// Flat field of `background` with a single bright pixel at (row, col).
pub fn point_source(
    rows: usize,
    cols: usize,
    background: f64,
    peak: f64,
    at: (usize, usize),
) -> Array2<f64> {
    let mut data = Array2::from_elem((rows, cols), background);
    data[at] = peak;
    data
}

/// Smooth synthetic "galaxy": a Gaussian bulge on a faint sloped sky.
pub fn synthetic_galaxy(rows: usize, cols: usize) -> Array2<f64> {
    let cy = rows as f64 / 2.0;
    let cx = cols as f64 / 2.0;
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let dy = r as f64 - cy;
        let dx = c as f64 - cx;
        let bulge = 500.0 * (-(dx * dx + dy * dy) / 40.0).exp();
        bulge + 10.0 + 0.05 * r as f64
    })
}
