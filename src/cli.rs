// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for scanning operations
//!
//! This module provides command-line functionality for:
//! - Decoding a barcode from an image file
//! - Writing the prepared (binarized) buffer out for inspection
//! - Listing the supported symbology names

use scanprep::decode::BarcodeFormat;
use scanprep::{
    BarcodeReader, CapturedFrame, FrameBufferCache, OutputFormat, Options, PixelFormat,
    ScanConfig, SensorRotation, transform,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Per-invocation overrides layered over the config file
#[derive(Debug, Default)]
pub struct ScanArgs {
    pub rotation: Option<String>,
    pub formats: Option<String>,
    pub invert: bool,
    pub try_harder: bool,
    pub try_rotate: bool,
    pub full_color: bool,
}

/// Decode a barcode from an image file
pub fn scan(image_path: &Path, args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScanConfig::load_default()?;
    let options = build_options(&config, &args)?;

    let output_format = if args.full_color {
        OutputFormat::FullColor
    } else {
        config.output_format
    };
    let invert = args.invert || config.invert;

    let mut reader = BarcodeReader::new()
        .with_options(options)
        .with_output_format(output_format);

    let frame = load_frame(image_path)?;
    let frame = match &args.rotation {
        Some(degrees) => frame.with_rotation(SensorRotation::from_degrees(degrees)),
        None => frame,
    };

    let outcome = if invert {
        reader.read_inverted(frame)?
    } else {
        reader.read(frame)?
    };

    match outcome {
        Some(symbol) => {
            println!("Format: {}", symbol.format);
            if let Some(text) = &symbol.text {
                println!("Text:   {}", text);
            }
            if let Some(time) = &symbol.time {
                println!("Time:   {}", time);
            }
            Ok(())
        }
        None => Err("No barcode found".into()),
    }
}

/// Run the preparation stages and write the result as a PNG
///
/// Exposes the intermediate buffer the decode engine would see, for
/// threshold and lighting diagnostics.
pub fn prepare(
    image_path: &Path,
    output: PathBuf,
    invert: bool,
    full_color: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_format = if full_color {
        OutputFormat::FullColor
    } else {
        OutputFormat::SingleChannel
    };

    let image = image::open(image_path)?.to_luma8();
    let (width, height) = image.dimensions();

    let mut cache = FrameBufferCache::new();
    let buffer = cache.ensure(width, height, PixelFormat::Yuv420, output_format)?;
    buffer.load_luma(image.as_raw())?;

    transform::grayscale(buffer);
    transform::binarize(buffer);
    if invert {
        transform::invert(buffer);
    }

    match output_format {
        OutputFormat::SingleChannel => {
            let image = image::GrayImage::from_raw(width, height, buffer.as_slice().to_vec())
                .ok_or("buffer does not match image dimensions")?;
            image.save(&output)?;
        }
        OutputFormat::FullColor => {
            let image = image::RgbaImage::from_raw(width, height, buffer.as_slice().to_vec())
                .ok_or("buffer does not match image dimensions")?;
            image.save(&output)?;
        }
    }

    println!("Prepared buffer written to {}", output.display());
    Ok(())
}

/// List the supported symbology names
pub fn formats() -> Result<(), Box<dyn std::error::Error>> {
    println!("Supported formats:");
    for format in BarcodeFormat::ALL {
        println!("  {}", format.name());
    }
    Ok(())
}

/// Load an image file as a planar-luma frame with a full-frame crop
fn load_frame(path: &Path) -> Result<CapturedFrame, Box<dyn std::error::Error>> {
    let image = image::open(path)?.to_luma8();
    let (width, height) = image.dimensions();
    Ok(CapturedFrame::from_luma(width, height, image.into_raw()))
}

fn build_options(
    config: &ScanConfig,
    args: &ScanArgs,
) -> Result<Options, Box<dyn std::error::Error>> {
    let formats = match &args.formats {
        Some(list) => parse_formats(list)?,
        None => config.formats.clone(),
    };
    Ok(Options {
        formats,
        try_harder: args.try_harder || config.try_harder,
        try_rotate: args.try_rotate || config.try_rotate,
    })
}

/// Parse a comma-separated format allow-list
fn parse_formats(list: &str) -> Result<BTreeSet<BarcodeFormat>, Box<dyn std::error::Error>> {
    let mut formats = BTreeSet::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let format = BarcodeFormat::from_name(entry)
            .ok_or_else(|| format!("Unknown format: {}", entry))?;
        formats.insert(format);
    }
    Ok(formats)
}
