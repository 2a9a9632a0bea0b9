use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FitswaveError;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

const HAAR_LO: [f64; 2] = [FRAC_1_SQRT_2, FRAC_1_SQRT_2];
const HAAR_HI: [f64; 2] = [-FRAC_1_SQRT_2, FRAC_1_SQRT_2];

const DB2_LO: [f64; 4] = [
    -0.12940952255092145,
    0.22414386804185735,
    0.836516303737469,
    0.48296291314469025,
];
const DB2_HI: [f64; 4] = [
    -0.48296291314469025,
    0.836516303737469,
    -0.22414386804185735,
    -0.12940952255092145,
];

const DB4_LO: [f64; 8] = [
    -0.010597401784997278,
    0.032883011666982945,
    0.030841381835986965,
    -0.18703481171888114,
    -0.02798376941698385,
    0.6308807679295904,
    0.7148465705525415,
    0.23037781330885523,
];
const DB4_HI: [f64; 8] = [
    -0.23037781330885523,
    0.7148465705525415,
    -0.6308807679295904,
    -0.02798376941698385,
    0.18703481171888114,
    0.030841381835986965,
    -0.032883011666982945,
    -0.010597401784997278,
];

const BIOR22_LO: [f64; 6] = [
    0.0,
    -0.1767766952966369,
    0.3535533905932738,
    1.0606601717798214,
    0.3535533905932738,
    -0.1767766952966369,
];
const BIOR22_HI: [f64; 6] = [
    0.0,
    0.3535533905932738,
    -0.7071067811865476,
    0.3535533905932738,
    0.0,
    0.0,
];

const BIOR33_LO: [f64; 8] = [
    0.06629126073623882,
    -0.19887378220871646,
    -0.15467960838455727,
    0.9943689110435825,
    0.9943689110435825,
    -0.15467960838455727,
    -0.19887378220871646,
    0.06629126073623882,
];
const BIOR33_HI: [f64; 8] = [
    0.0,
    0.0,
    -0.1767766952966369,
    0.5303300858899107,
    -0.5303300858899107,
    0.1767766952966369,
    0.0,
    0.0,
];

/// Supported analysis filter pairs for the 2D decomposition.
///
/// Names follow the usual wavelet-family notation and are parsed
/// case-insensitively: `haar` (also `db1`, `bior1.1`), `db2`, `db4`,
/// `bior2.2`, `bior3.3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WaveletKind {
    Haar,
    Db2,
    Db4,
    Bior2_2,
    Bior3_3,
}

impl Default for WaveletKind {
    fn default() -> Self {
        Self::Bior3_3
    }
}

impl WaveletKind {
    pub const ALL: [WaveletKind; 5] = [
        Self::Haar,
        Self::Db2,
        Self::Db4,
        Self::Bior2_2,
        Self::Bior3_3,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::Db2 => "db2",
            Self::Db4 => "db4",
            Self::Bior2_2 => "bior2.2",
            Self::Bior3_3 => "bior3.3",
        }
    }

    /// Analysis low-pass (scaling) filter.
    pub fn dec_lo(&self) -> &'static [f64] {
        match self {
            Self::Haar => &HAAR_LO,
            Self::Db2 => &DB2_LO,
            Self::Db4 => &DB4_LO,
            Self::Bior2_2 => &BIOR22_LO,
            Self::Bior3_3 => &BIOR33_LO,
        }
    }

    /// Analysis high-pass (wavelet) filter.
    pub fn dec_hi(&self) -> &'static [f64] {
        match self {
            Self::Haar => &HAAR_HI,
            Self::Db2 => &DB2_HI,
            Self::Db4 => &DB4_HI,
            Self::Bior2_2 => &BIOR22_HI,
            Self::Bior3_3 => &BIOR33_HI,
        }
    }

    pub fn filter_len(&self) -> usize {
        self.dec_lo().len()
    }

    /// Recommended depth for an axis of `len` samples:
    /// `floor(log2(len / (F - 1)))`. Deeper levels still run, with a warning.
    pub fn max_level(&self, len: usize) -> usize {
        let span = self.filter_len() - 1;
        if len < span {
            return 0;
        }
        (len as f64 / span as f64).log2().floor() as usize
    }
}

impl std::fmt::Display for WaveletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WaveletKind {
    type Err = FitswaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haar" | "db1" | "bior1.1" => Ok(Self::Haar),
            "db2" => Ok(Self::Db2),
            "db4" => Ok(Self::Db4),
            "bior2.2" => Ok(Self::Bior2_2),
            "bior3.3" => Ok(Self::Bior3_3),
            _ => Err(FitswaveError::UnknownWavelet(s.to_string())),
        }
    }
}

impl TryFrom<String> for WaveletKind {
    type Error = FitswaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WaveletKind> for String {
    fn from(kind: WaveletKind) -> Self {
        kind.name().to_string()
    }
}
