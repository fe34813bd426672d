//! Cricsheet Narrate: converts a folder of Cricsheet JSON files into
//! narrative text files.
//!
//! Usage: cricsheet_narrate
//!
//! Prompts for the folder path. Settings are read from
//! `cricsheet-narrate.ron` in the working directory when it exists.

use cricsheet_narrative::core::config::DEFAULT_CONFIG_FILE;
use cricsheet_narrative::core::pipeline::Converter;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut builder = Converter::builder();
    if Path::new(DEFAULT_CONFIG_FILE).is_file() {
        builder = builder.config_file(DEFAULT_CONFIG_FILE);
    }
    let converter = match builder.build() {
        Ok(converter) => converter,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    print!("Enter the folder path for the folder containing cricsheet json files: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        eprintln!("ERROR: Failed to read folder path");
        process::exit(1);
    }
    let folder = line.trim();
    if folder.is_empty() {
        println!("No folder given, nothing to do.");
        return;
    }

    let report = match converter.convert_folder(Path::new(folder)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!(
        "\nConverted {} match(es) into {}",
        report.converted.len(),
        converter.output_dir().display()
    );
    for (path, error) in &report.failed {
        println!("SKIPPED: {} ({})", path.display(), error);
    }
}
