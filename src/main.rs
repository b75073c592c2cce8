mod assemble;
mod clap;
mod color;
mod config;
mod error;
mod matcher;
mod menu;
mod mosaic;
mod output;
mod preprocess;
mod progress;
mod tiles;
mod zoom;

use std::path::PathBuf;

use anyhow::{Context, Result};
use ::clap::ArgMatches;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::config::{MosaicConfig, ZoomConfig};

fn main() {
    let matches = clap::get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize the logger.")?;

    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    match matches.subcommand() {
        Some(("mosaic", sub)) => {
            mosaic::mosaic(&MosaicConfig::from_matches(&root, sub))?;
        }
        Some(("zoom", sub)) => {
            mosaic::zoom(&ZoomConfig::from_matches(&root, sub))?;
        }
        _ => unreachable!("a subcommand is required"),
    }
    println!("All done.");
    Ok(())
}
