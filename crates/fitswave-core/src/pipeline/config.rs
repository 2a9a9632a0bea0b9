use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FitswaveError, Result};
use crate::wavelet::WaveletKind;

/// Immutable settings for one batch run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub paths: PathsConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl BatchConfig {
    pub fn new(
        input_folder: PathBuf,
        output_folder: PathBuf,
        wavelet_type: WaveletKind,
        decomposition_level: usize,
    ) -> Self {
        Self {
            paths: PathsConfig {
                input_folder,
                output_folder,
            },
            parameters: ParametersConfig {
                wavelet_type,
                decomposition_level,
            },
            execution: ExecutionConfig::default(),
        }
    }

    /// Reject values serde cannot rule out on its own.
    pub fn validate(&self) -> Result<()> {
        if self.parameters.decomposition_level == 0 {
            return Err(FitswaveError::Config(
                "decomposition_level must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Folder scanned for `.fits` / `.fit` inputs.
    pub input_folder: PathBuf,
    /// Root under which one subfolder per input is created.
    pub output_folder: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("DATA"),
            output_folder: PathBuf::from("PROCESSED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParametersConfig {
    pub wavelet_type: WaveletKind,
    pub decomposition_level: usize,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            wavelet_type: WaveletKind::Bior3_3,
            decomposition_level: 4,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Process files concurrently on the Rayon pool.
    #[serde(default)]
    pub parallel: bool,
}
