use ndarray::{Array2, ArrayD, Axis, Ix2};

use crate::error::{FitswaveError, Result};

/// A single-plane scientific raster.
/// Samples are physical values (after BSCALE/BZERO); NaN marks invalid pixels.
#[derive(Clone, Debug)]
pub struct Raster {
    /// Sample data, row-major, shape = (NAXIS2, NAXIS1)
    pub data: Array2<f64>,
    /// Non-structural header cards, carried through unmodified.
    pub header: FitsHeader,
}

impl Raster {
    pub fn new(data: Array2<f64>, header: FitsHeader) -> Self {
        Self { data, header }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// Raster data as stored on disk, before collapsing to a single plane.
/// Axes follow C order: the slowest-varying FITS axis (NAXISn) comes first.
#[derive(Clone, Debug)]
pub struct LoadedRaster {
    pub data: ArrayD<f64>,
    pub header: FitsHeader,
}

impl LoadedRaster {
    /// Collapse leading axes to their first index until a 2D plane remains.
    pub fn into_plane(self) -> Result<Raster> {
        let ndim = self.data.ndim();
        if ndim < 2 {
            return Err(FitswaveError::InvalidFits(format!(
                "expected at least 2 axes, found {ndim}"
            )));
        }

        let mut data = self.data;
        while data.ndim() > 2 {
            data = data.index_axis_move(Axis(0), 0);
        }
        let plane = data
            .into_dimensionality::<Ix2>()
            .map_err(|e| FitswaveError::InvalidFits(e.to_string()))?;

        Ok(Raster::new(plane, self.header))
    }
}

/// Typed value of a FITS header card.
#[derive(Clone, Debug, PartialEq)]
pub enum HeaderValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Undefined or complex values, kept as their on-card text.
    Raw(String),
    /// COMMENT, HISTORY and blank-keyword cards.
    Commentary(String),
}

impl HeaderValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{}", if *b { "T" } else { "F" }),
            Self::Raw(s) | Self::Commentary(s) => write!(f, "{s}"),
        }
    }
}

/// One 80-column header record.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderCard {
    pub keyword: String,
    pub value: HeaderValue,
    pub comment: Option<String>,
}

impl HeaderCard {
    pub fn new(keyword: &str, value: HeaderValue) -> Self {
        Self {
            keyword: keyword.trim().to_uppercase(),
            value,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn is_commentary(&self) -> bool {
        matches!(self.value, HeaderValue::Commentary(_))
    }
}

/// Keywords the FITS writer regenerates from the data itself.
pub fn is_structural_keyword(keyword: &str) -> bool {
    match keyword {
        "SIMPLE" | "XTENSION" | "BITPIX" | "NAXIS" | "EXTEND" | "PCOUNT" | "GCOUNT"
        | "BSCALE" | "BZERO" | "BLANK" | "END" => true,
        k => k
            .strip_prefix("NAXIS")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}

/// Ordered astronomical header metadata (WCS, instrument, observer, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitsHeader {
    cards: Vec<HeaderCard>,
}

impl FitsHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a header from parsed cards, dropping structural keywords.
    pub fn from_cards(cards: impl IntoIterator<Item = HeaderCard>) -> Self {
        Self {
            cards: cards
                .into_iter()
                .filter(|c| !is_structural_keyword(&c.keyword))
                .collect(),
        }
    }

    pub fn cards(&self) -> &[HeaderCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// First value card with this keyword.
    pub fn get(&self, keyword: &str) -> Option<&HeaderValue> {
        let key = keyword.to_uppercase();
        self.cards
            .iter()
            .find(|c| !c.is_commentary() && c.keyword == key)
            .map(|c| &c.value)
    }

    /// Keywords of all value cards, in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.cards
            .iter()
            .filter(|c| !c.is_commentary())
            .map(|c| c.keyword.as_str())
    }

    /// Insert or replace a value card. Structural keywords are ignored.
    pub fn set(&mut self, keyword: &str, value: HeaderValue) {
        let card = HeaderCard::new(keyword, value);
        if is_structural_keyword(&card.keyword) {
            return;
        }
        match self
            .cards
            .iter_mut()
            .find(|c| !c.is_commentary() && c.keyword == card.keyword)
        {
            Some(existing) => existing.value = card.value,
            None => self.cards.push(card),
        }
    }

    pub fn push_history(&mut self, text: &str) {
        self.cards
            .push(HeaderCard::new("HISTORY", HeaderValue::Commentary(text.to_string())));
    }
}
