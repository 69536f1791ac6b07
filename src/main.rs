// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "scanprep")]
#[command(about = "Frame preparation pipeline for barcode scanning")]
#[command(version = scanprep::constants::app_info::version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a barcode from an image file
    Scan {
        /// Image file to decode
        image: PathBuf,

        /// Sensor rotation in degrees (0, 90, 180, 270)
        #[arg(short, long)]
        rotation: Option<String>,

        /// Comma-separated format allow-list (default: all formats)
        #[arg(short, long)]
        formats: Option<String>,

        /// Enable the inversion stage (light-on-dark symbols)
        #[arg(short, long)]
        invert: bool,

        /// Spend more time per frame for damaged symbols
        #[arg(long)]
        try_harder: bool,

        /// Also try rotated orientations of the symbol
        #[arg(long)]
        try_rotate: bool,

        /// Use a full-color working buffer instead of single-channel
        #[arg(long)]
        full_color: bool,
    },

    /// Run the preparation stages and write the binarized buffer as PNG
    Prepare {
        /// Image file to prepare
        image: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Enable the inversion stage
        #[arg(short, long)]
        invert: bool,

        /// Use a full-color working buffer instead of single-channel
        #[arg(long)]
        full_color: bool,
    },

    /// List the supported symbology names
    Formats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=scanprep=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            image,
            rotation,
            formats,
            invert,
            try_harder,
            try_rotate,
            full_color,
        } => cli::scan(
            &image,
            cli::ScanArgs {
                rotation,
                formats,
                invert,
                try_harder,
                try_rotate,
                full_color,
            },
        ),
        Commands::Prepare {
            image,
            output,
            invert,
            full_color,
        } => cli::prepare(&image, output, invert, full_color),
        Commands::Formats => cli::formats(),
    }
}
