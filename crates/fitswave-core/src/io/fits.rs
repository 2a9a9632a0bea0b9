use std::fs::File;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use memmap2::Mmap;
use ndarray::{ArrayD, IxDyn};

use crate::consts::{FITS_BLOCK_SIZE, FITS_CARDS_PER_BLOCK, FITS_CARD_SIZE, FITS_MAX_AXES};
use crate::error::{FitswaveError, Result};
use crate::raster::{FitsHeader, HeaderCard, HeaderValue, LoadedRaster};

/// Parsed header of one HDU plus the location of its data segment.
#[derive(Clone, Debug)]
pub struct HduInfo {
    pub index: usize,
    /// `None` for the primary HDU, otherwise the XTENSION value.
    pub extension: Option<String>,
    pub bitpix: i64,
    /// Axis lengths in FITS order (NAXIS1 first).
    pub axes: Vec<usize>,
    pub bscale: f64,
    pub bzero: f64,
    pub blank: Option<i64>,
    /// All cards of this HDU, structural ones included.
    pub cards: Vec<HeaderCard>,
    pixels: usize,
    data_offset: usize,
    data_len: usize,
}

impl HduInfo {
    /// True for the primary array and IMAGE extensions that carry pixels.
    pub fn has_image_data(&self) -> bool {
        let is_image = match &self.extension {
            None => true,
            Some(x) => x == "IMAGE",
        };
        is_image && !self.axes.is_empty() && self.axes.iter().all(|&n| n > 0)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bitpix.unsigned_abs() / 8) as usize
    }

    /// Array shape in C order (slowest axis first).
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().rev().copied().collect()
    }
}

/// Memory-mapped FITS file reader.
pub struct FitsReader {
    mmap: Mmap,
    pub hdus: Vec<HduInfo>,
}

impl FitsReader {
    /// Open a FITS file and parse every HDU header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(FitswaveError::InvalidFits("file is empty".into()));
        }
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < FITS_BLOCK_SIZE {
            return Err(FitswaveError::InvalidFits(
                "File too small for a FITS header".into(),
            ));
        }
        if !mmap.starts_with(b"SIMPLE  =") {
            return Err(FitswaveError::InvalidFits(
                "Missing SIMPLE keyword".into(),
            ));
        }

        let mut hdus = vec![parse_hdu(&mmap, 0, 0)?];
        loop {
            let last = &hdus[hdus.len() - 1];
            let next = last.data_offset + padded_len(last.data_len);
            if next.saturating_add(FITS_BLOCK_SIZE) > mmap.len() {
                break;
            }
            match parse_hdu(&mmap, next, hdus.len()) {
                Ok(hdu) => hdus.push(hdu),
                Err(e) => {
                    tracing::debug!(offset = next, error = %e, "Ignoring trailing data");
                    break;
                }
            }
        }

        Ok(Self { mmap, hdus })
    }

    pub fn primary(&self) -> &HduInfo {
        &self.hdus[0]
    }

    /// First HDU (primary or IMAGE extension) that holds pixel data.
    pub fn first_image_hdu(&self) -> Option<&HduInfo> {
        self.hdus.iter().find(|h| h.has_image_data())
    }

    /// Decode the data segment of an HDU into physical values.
    ///
    /// BSCALE/BZERO are applied and integer BLANK samples become NaN.
    pub fn read_data(&self, hdu: &HduInfo) -> Result<ArrayD<f64>> {
        if !hdu.has_image_data() {
            return Err(FitswaveError::EmptyRaster);
        }
        let end = hdu
            .pixel_count()
            .checked_mul(hdu.bytes_per_sample())
            .and_then(|len| hdu.data_offset.checked_add(len))
            .ok_or_else(|| overflow(hdu.index))?;
        if end > self.mmap.len() {
            return Err(FitswaveError::InvalidFits(format!(
                "File truncated: expected at least {} bytes, got {}",
                end,
                self.mmap.len()
            )));
        }

        let samples = decode_samples(&self.mmap[hdu.data_offset..end], hdu)?;
        ArrayD::from_shape_vec(IxDyn(&hdu.shape()), samples)
            .map_err(|e| FitswaveError::InvalidFits(e.to_string()))
    }
}

/// Load pixel data and primary-header metadata from a FITS file.
///
/// Pixels come from the primary HDU, or from the first IMAGE extension when
/// the primary array is empty.
pub fn load_fits(path: &Path) -> Result<LoadedRaster> {
    let reader = FitsReader::open(path)?;
    let hdu = reader
        .first_image_hdu()
        .ok_or(FitswaveError::EmptyRaster)?;
    let data = reader.read_data(hdu)?;
    let header = FitsHeader::from_cards(reader.primary().cards.iter().cloned());
    Ok(LoadedRaster { data, header })
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(FITS_BLOCK_SIZE) * FITS_BLOCK_SIZE
}

fn parse_hdu(buf: &[u8], offset: usize, index: usize) -> Result<HduInfo> {
    let mut cards = Vec::new();
    let mut pos = offset;
    let mut found_end = false;

    while !found_end {
        if pos + FITS_BLOCK_SIZE > buf.len() {
            return Err(FitswaveError::InvalidFits(format!(
                "Missing END card in HDU {index}"
            )));
        }
        let block = &buf[pos..pos + FITS_BLOCK_SIZE];
        pos += FITS_BLOCK_SIZE;

        for raw in block.chunks_exact(FITS_CARD_SIZE).take(FITS_CARDS_PER_BLOCK) {
            let text = String::from_utf8_lossy(raw);
            if text.trim_end() == "END" {
                found_end = true;
                break;
            }
            if let Some(card) = parse_card(&text) {
                cards.push(card);
            }
        }
    }

    let extension = if index == 0 {
        None
    } else {
        let value = find_value(&cards, "XTENSION").and_then(HeaderValue::as_str);
        match value {
            Some(x) => Some(x.trim().to_string()),
            None => {
                return Err(FitswaveError::InvalidFits(format!(
                    "HDU {index} lacks XTENSION"
                )))
            }
        }
    };

    let bitpix = required_int(&cards, "BITPIX")?;
    let naxis = required_int(&cards, "NAXIS")?;
    if !(0..=FITS_MAX_AXES).contains(&naxis) {
        return Err(FitswaveError::InvalidFits(format!("NAXIS = {naxis}")));
    }
    let mut axes = Vec::with_capacity(naxis as usize);
    for i in 1..=naxis {
        let n = required_int(&cards, &format!("NAXIS{i}"))?;
        if n < 0 {
            return Err(FitswaveError::InvalidFits(format!("NAXIS{i} = {n}")));
        }
        axes.push(n as usize);
    }

    let pcount = find_value(&cards, "PCOUNT").and_then(HeaderValue::as_i64).unwrap_or(0);
    let gcount = find_value(&cards, "GCOUNT").and_then(HeaderValue::as_i64).unwrap_or(1);
    let bscale = find_value(&cards, "BSCALE").and_then(HeaderValue::as_f64).unwrap_or(1.0);
    let bzero = find_value(&cards, "BZERO").and_then(HeaderValue::as_f64).unwrap_or(0.0);
    let blank = find_value(&cards, "BLANK").and_then(HeaderValue::as_i64);

    let pixels = if axes.is_empty() {
        0
    } else {
        axes.iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| overflow(index))?
    };
    let data_len = if pixels == 0 {
        0
    } else {
        usize::try_from(pcount.max(0))
            .ok()
            .and_then(|p| p.checked_add(pixels))
            .and_then(|n| n.checked_mul(gcount.max(1) as usize))
            .and_then(|n| n.checked_mul((bitpix.unsigned_abs() / 8) as usize))
            .ok_or_else(|| overflow(index))?
    };
    // The block-padded end of the data segment must stay addressable.
    pos.checked_add(data_len)
        .and_then(|end| end.checked_add(FITS_BLOCK_SIZE))
        .ok_or_else(|| overflow(index))?;

    Ok(HduInfo {
        index,
        extension,
        bitpix,
        axes,
        bscale,
        bzero,
        blank,
        cards,
        pixels,
        data_offset: pos,
        data_len,
    })
}

fn overflow(index: usize) -> FitswaveError {
    FitswaveError::InvalidFits(format!("HDU {index} data size overflows"))
}

fn find_value<'a>(cards: &'a [HeaderCard], keyword: &str) -> Option<&'a HeaderValue> {
    cards
        .iter()
        .find(|c| !c.is_commentary() && c.keyword == keyword)
        .map(|c| &c.value)
}

fn required_int(cards: &[HeaderCard], keyword: &str) -> Result<i64> {
    find_value(cards, keyword)
        .and_then(HeaderValue::as_i64)
        .ok_or_else(|| FitswaveError::InvalidFits(format!("Missing {keyword} keyword")))
}

fn decode_samples(raw: &[u8], hdu: &HduInfo) -> Result<Vec<f64>> {
    let scale = |v: f64| hdu.bzero + hdu.bscale * v;
    let int = |v: i64| {
        if hdu.blank == Some(v) {
            f64::NAN
        } else {
            scale(v as f64)
        }
    };

    let samples = match hdu.bitpix {
        8 => raw.iter().map(|&b| int(b as i64)).collect(),
        16 => raw
            .chunks_exact(2)
            .map(|c| int(BigEndian::read_i16(c) as i64))
            .collect(),
        32 => raw
            .chunks_exact(4)
            .map(|c| int(BigEndian::read_i32(c) as i64))
            .collect(),
        64 => raw
            .chunks_exact(8)
            .map(|c| int(BigEndian::read_i64(c)))
            .collect(),
        -32 => raw
            .chunks_exact(4)
            .map(|c| scale(BigEndian::read_f32(c) as f64))
            .collect(),
        -64 => raw
            .chunks_exact(8)
            .map(|c| scale(BigEndian::read_f64(c)))
            .collect(),
        other => {
            return Err(FitswaveError::InvalidFits(format!(
                "Unsupported BITPIX {other}"
            )))
        }
    };
    Ok(samples)
}

/// Parse one 80-column card. Returns `None` for fully blank padding cards.
fn parse_card(text: &str) -> Option<HeaderCard> {
    let keyword = text.get(..8).unwrap_or(text).trim_end();
    let rest = text.get(8..).unwrap_or("");

    let commentary = matches!(keyword, "" | "COMMENT" | "HISTORY");
    if !commentary && rest.starts_with("= ") {
        let (value, comment) = parse_value_field(&rest[2..]);
        return Some(HeaderCard {
            keyword: keyword.to_string(),
            value,
            comment,
        });
    }

    let body = rest.trim_end();
    if keyword.is_empty() && body.trim().is_empty() {
        return None;
    }
    Some(HeaderCard {
        keyword: keyword.to_string(),
        value: HeaderValue::Commentary(body.to_string()),
        comment: None,
    })
}

fn parse_value_field(field: &str) -> (HeaderValue, Option<String>) {
    let trimmed = field.trim_start();

    if let Some(body) = trimmed.strip_prefix('\'') {
        let mut value = String::new();
        let mut end = body.len();
        let mut chars = body.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            if ch != '\'' {
                value.push(ch);
                continue;
            }
            // '' inside a string is an escaped quote
            if matches!(chars.peek(), Some((_, '\''))) {
                value.push('\'');
                chars.next();
            } else {
                end = i + 1;
                break;
            }
        }
        let comment = parse_comment(&body[end..]);
        return (HeaderValue::Str(value.trim_end().to_string()), comment);
    }

    match trimmed.find('/') {
        Some(i) => (parse_scalar(trimmed[..i].trim()), parse_comment(&trimmed[i..])),
        None => (parse_scalar(trimmed.trim()), None),
    }
}

fn parse_comment(rest: &str) -> Option<String> {
    rest.trim_start()
        .strip_prefix('/')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn parse_scalar(token: &str) -> HeaderValue {
    match token {
        "T" => HeaderValue::Bool(true),
        "F" => HeaderValue::Bool(false),
        _ => {
            if let Ok(i) = token.parse::<i64>() {
                HeaderValue::Int(i)
            } else if let Ok(f) = token.replace(['D', 'd'], "E").parse::<f64>() {
                HeaderValue::Float(f)
            } else {
                HeaderValue::Raw(token.to_string())
            }
        }
    }
}
