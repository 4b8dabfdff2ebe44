//! Songbouts - bird song annotation to bout sequence converter.
//!
//! Reads per-file syllable annotations, groups phrases into bouts by the
//! silence between them, and encodes each bout as a string of symbols with
//! aligned duration, gap, phrase and optional acoustic feature arrays.

#![warn(missing_docs)]

pub mod annotation;
pub mod bouts;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod labels;
pub mod output;
pub mod pipeline;
pub mod symbols;
pub mod utils;

use annotation::load_annotations;
use clap::Parser;
use cli::{Cli, Command, ConfigAction, ConvertArgs, SymbolsArgs};
use config::{
    Config, config_file_path, load_config_file, load_default_config, save_config,
    validate_config,
};
use constants::output_files::DEFAULT_OUTPUT_DIR;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

pub use error::{Error, Result};
pub use pipeline::{Conversion, ConversionOptions, ConversionSummary, Converter, convert};

/// Main entry point for the songbouts CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_default_config()?,
    };

    match cli.command {
        Command::Convert(args) => convert_annotations(&args, config, cli.quiet),
        Command::Symbols(args) => print_symbols(&args, config),
        Command::Config { action } => handle_config_command(action, cli.config.as_deref()),
    }
}

/// Run a conversion and write its outputs.
fn convert_annotations(args: &ConvertArgs, mut config: Config, quiet: bool) -> Result<()> {
    let total_start = Instant::now();

    // CLI flags take precedence over the config file
    args.apply(&mut config.conversion);
    if let Some(formats) = &args.format {
        config.output.formats.clone_from(formats);
    }
    if args.output_dir.is_some() {
        config.output.dir.clone_from(&args.output_dir);
    }
    validate_config(&config)?;

    info!("Loading annotations: {}", args.annotations.display());
    let store = load_annotations(&args.annotations)?;
    info!("Found {} annotated file(s)", store.len());

    let converter = Converter::new(config.conversion.to_options());

    let file_progress =
        output::progress::create_file_progress(store.len(), !quiet && !args.no_progress);
    let result = converter.convert(&store, file_progress.as_ref());
    output::progress::finish_progress(file_progress, "Complete");
    let conversion = result?;

    let output_dir = config
        .output
        .dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.annotations));
    output::write_conversion(&conversion, &output_dir, &config.output.formats)?;

    let summary = &conversion.summary;
    info!(
        "Complete: {} bout(s) from {} file(s), {} symbol(s), in {:.2}s",
        summary.bouts_accepted,
        summary.files_converted,
        conversion.symbols.len(),
        total_start.elapsed().as_secs_f64()
    );

    if summary.files_failed > 0 {
        warn!("{} file(s) failed and were skipped", summary.files_failed);
    }
    if summary.unknown_labels > 0 {
        warn!(
            "{} phrase(s) had labels without a symbol",
            summary.unknown_labels
        );
    }

    Ok(())
}

/// Print the unpruned symbol table for an annotation store.
fn print_symbols(args: &SymbolsArgs, mut config: Config) -> Result<()> {
    args.rules.apply(&mut config.conversion);
    validate_config(&config)?;

    let store = load_annotations(&args.annotations)?;
    let table = Converter::new(config.conversion.to_options()).symbol_table(&store)?;

    for entry in table.entries() {
        match entry.value {
            constants::symbols::ONSET_VALUE => println!("{}\tonset", entry.symbol),
            constants::symbols::OFFSET_VALUE => println!("{}\toffset", entry.symbol),
            value => println!("{}\t{value}", entry.symbol),
        }
    }

    Ok(())
}

/// Default output location: `bouts/` next to the annotation store.
fn default_output_dir(annotations: &Path) -> PathBuf {
    annotations
        .parent()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), |p| p.join(DEFAULT_OUTPUT_DIR))
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Stdout is reserved for command output.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(action: ConfigAction, explicit_path: Option<&Path>) -> Result<()> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config_file(&path)?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_next_to_annotations() {
        assert_eq!(
            default_output_dir(Path::new("/data/bird12/annotations.json")),
            PathBuf::from("/data/bird12/bouts")
        );
        assert_eq!(
            default_output_dir(Path::new("annotations.json")),
            PathBuf::from("bouts")
        );
    }
}
