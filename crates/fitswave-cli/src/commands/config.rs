use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fitswave_core::pipeline::config::BatchConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default BatchConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    if let Some(ref path) = args.output {
        write_default_config(path)?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", default_config_toml()?);
    }

    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    Ok(toml::to_string_pretty(&BatchConfig::default())?)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    std::fs::write(path, default_config_toml()?)
        .with_context(|| format!("Failed to write config to {}", path.display()))
}
