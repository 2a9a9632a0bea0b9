use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use ndarray::Array2;

use crate::consts::{FITS_BLOCK_SIZE, FITS_CARD_SIZE, FITS_MAX_STRING_LEN};
use crate::error::Result;
use crate::raster::{FitsHeader, HeaderCard, HeaderValue};

/// Write a 2D float64 image as a single-HDU FITS file, overwriting `path`.
///
/// Structural keywords are generated from the data; every card of `header`
/// follows them in order.
pub fn write_fits(path: &Path, data: &Array2<f64>, header: &FitsHeader) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_fits_to(&mut writer, data, header)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a FITS image into any writer.
pub fn write_fits_to(w: &mut impl Write, data: &Array2<f64>, header: &FitsHeader) -> Result<()> {
    let (rows, cols) = data.dim();

    let mut cards = vec![
        HeaderCard::new("SIMPLE", HeaderValue::Bool(true))
            .with_comment("conforms to FITS standard"),
        HeaderCard::new("BITPIX", HeaderValue::Int(-64)).with_comment("array data type"),
        HeaderCard::new("NAXIS", HeaderValue::Int(2)).with_comment("number of array dimensions"),
        HeaderCard::new("NAXIS1", HeaderValue::Int(cols as i64)),
        HeaderCard::new("NAXIS2", HeaderValue::Int(rows as i64)),
        HeaderCard::new("EXTEND", HeaderValue::Bool(true)),
    ];
    cards.extend(header.cards().iter().cloned());

    let mut written = 0usize;
    for card in &cards {
        w.write_all(format_card(card).as_bytes())?;
        written += FITS_CARD_SIZE;
    }
    w.write_all(format!("{:<80}", "END").as_bytes())?;
    written += FITS_CARD_SIZE;
    write_padding(w, written, b' ')?;

    for &v in data.iter() {
        w.write_f64::<BigEndian>(v)?;
    }
    write_padding(w, data.len() * std::mem::size_of::<f64>(), 0)?;
    Ok(())
}

fn write_padding(w: &mut impl Write, written: usize, fill: u8) -> Result<()> {
    let rem = written % FITS_BLOCK_SIZE;
    if rem != 0 {
        w.write_all(&vec![fill; FITS_BLOCK_SIZE - rem])?;
    }
    Ok(())
}

/// Render a card in FITS fixed format, padded or truncated to 80 columns.
pub fn format_card(card: &HeaderCard) -> String {
    let text = match &card.value {
        HeaderValue::Commentary(body) => format!("{:<8}{}", card.keyword, body),
        value => {
            let mut s = format!("{:<8}= {}", card.keyword, format_value(value));
            if let Some(ref comment) = card.comment {
                s.push_str(" / ");
                s.push_str(comment);
            }
            s
        }
    };

    let mut line: String = text.chars().filter(|c| c.is_ascii()).take(FITS_CARD_SIZE).collect();
    while line.len() < FITS_CARD_SIZE {
        line.push(' ');
    }
    line
}

fn format_value(value: &HeaderValue) -> String {
    match value {
        HeaderValue::Str(s) => {
            let escaped: String = s.replace('\'', "''").chars().take(FITS_MAX_STRING_LEN).collect();
            // Fixed format: string content at least 8 columns wide
            format!("'{escaped:<8}'")
        }
        HeaderValue::Int(i) => format!("{i:>20}"),
        HeaderValue::Float(f) => format!("{:>20}", format_float(*f)),
        HeaderValue::Bool(b) => format!("{:>20}", if *b { "T" } else { "F" }),
        HeaderValue::Raw(s) => format!("{s:>20}"),
        HeaderValue::Commentary(s) => s.clone(),
    }
}

/// Shortest representation that parses back to the same f64.
fn format_float(v: f64) -> String {
    format!("{v:?}").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int_card_right_aligned() {
        let card = HeaderCard::new("NAXIS1", HeaderValue::Int(64));
        let line = format_card(&card);
        assert_eq!(line.len(), 80);
        assert_eq!(&line[..10], "NAXIS1  = ");
        assert_eq!(&line[28..30], "64");
    }

    #[test]
    fn test_format_string_pads_and_escapes() {
        let card = HeaderCard::new("OBSERVER", HeaderValue::Str("O'Neil".into()));
        let line = format_card(&card);
        assert!(line.starts_with("OBSERVER= 'O''Neil '"), "got: {line}");
    }

    #[test]
    fn test_format_float_roundtrips() {
        for v in [1.0, -1.5e-4, 123456.789, 6.02214076e23] {
            let s = format_float(v);
            assert_eq!(s.parse::<f64>().unwrap(), v, "{s}");
        }
    }

    #[test]
    fn test_output_is_block_aligned() {
        let data = Array2::<f64>::zeros((3, 5));
        let mut buf = Vec::new();
        write_fits_to(&mut buf, &data, &FitsHeader::new()).unwrap();
        assert_eq!(buf.len() % FITS_BLOCK_SIZE, 0);
        assert_eq!(buf.len(), 2 * FITS_BLOCK_SIZE);
    }
}
