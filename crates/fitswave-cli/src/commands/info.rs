use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fitswave_core::io::fits::FitsReader;
use fitswave_core::raster::HeaderValue;
use fitswave_core::wavelet::dwt::{depth_limit, max_level};
use fitswave_core::wavelet::WaveletKind;

#[derive(Args)]
pub struct InfoArgs {
    /// Input FITS file
    pub file: PathBuf,

    /// Also print every header card of the primary HDU
    #[arg(long)]
    pub header: bool,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = FitsReader::open(&args.file)?;

    println!("File:        {}", args.file.display());
    println!("HDUs:        {}", reader.hdus.len());

    for hdu in &reader.hdus {
        let kind = hdu.extension.as_deref().unwrap_or("PRIMARY");
        let axes: Vec<String> = hdu.axes.iter().map(|n| n.to_string()).collect();
        println!(
            "  [{}] {:<10} BITPIX {:>4}  axes {}",
            hdu.index,
            kind,
            hdu.bitpix,
            if axes.is_empty() { "-".to_string() } else { axes.join("x") }
        );
    }

    match reader.first_image_hdu() {
        Some(hdu) => {
            // NAXIS1 is columns, NAXIS2 rows (1 for a single axis)
            let cols = hdu.axes[0];
            let rows = hdu.axes.get(1).copied().unwrap_or(1);
            println!("Image:       HDU {} ({}x{})", hdu.index, cols, rows);
            if hdu.axes.len() > 2 {
                println!("             first plane of {} used", hdu.axes.len());
            }
            println!("Levels (recommended / limit):");
            for kind in WaveletKind::ALL {
                println!(
                    "  {:<10}{} / {}",
                    kind.name(),
                    max_level((rows, cols), kind),
                    depth_limit((rows, cols), kind)
                );
            }
        }
        None => println!("Image:       none"),
    }

    if args.header {
        println!();
        for card in &reader.primary().cards {
            match &card.value {
                HeaderValue::Commentary(text) => println!("{:<8} {}", card.keyword, text),
                value => match card.comment {
                    Some(ref comment) => {
                        println!("{:<8} = {}  / {}", card.keyword, value, comment)
                    }
                    None => println!("{:<8} = {}", card.keyword, value),
                },
            }
        }
    }

    Ok(())
}
