//! Chrome App to Progressive Web App Converter CLI

use anyhow::Context;
use chrome2pwa::{ConversionConfig, Converter, ConverterSettings};
use clap::{Parser, Subcommand};
use colored::*;
use log::{Level, LevelFilter};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chrome2pwa")]
#[command(about = "Convert Chrome Apps into progressive web apps", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Chrome App to a progressive web app
    Convert {
        /// Chrome App directory or zip archive
        input: PathBuf,

        /// Output directory for the progressive web app
        output: PathBuf,

        /// Conversion configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Overwrite the output directory if it exists
        #[arg(short, long)]
        force: bool,

        /// Write a Markdown conversion report next to the output directory
        #[arg(short, long)]
        report: bool,
    },

    /// Print the reference conversion configuration
    Config,
}

fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let label = format!(":{}:", record.level());
            let label = match record.level() {
                Level::Error => label.red().bold(),
                Level::Warn => label.yellow().bold(),
                Level::Info => label.blue(),
                Level::Debug | Level::Trace => label.cyan().dimmed(),
            };
            writeln!(buf, "{}  \t{}", label, record.args())
        })
        .init();
}

fn convert(input: &Path, output: &Path, config: &Path, force: bool, report: bool) -> anyhow::Result<()> {
    let config = ConversionConfig::from_file(config)
        .with_context(|| format!("failed to load config `{}`", config.display()))?;

    let converter = Converter::new(ConverterSettings::default());
    let result = converter.convert(input, output, &config, force)?;

    if report {
        let report_path = chrome2pwa::report::report_path(output);
        std::fs::write(&report_path, chrome2pwa::report::generate_report(&result))
            .with_context(|| format!("failed to write report `{}`", report_path.display()))?;
        log::info!("Report written to `{}`.", report_path.display());
    }

    let actions = result.manual_actions();
    if !actions.is_empty() {
        println!();
        println!("{}", "Manual actions required:".yellow().bold());
        for action in &actions {
            println!("  - {}", action);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Convert { input, output, config, force, report } => {
            if let Err(e) = convert(&input, &output, &config, force, report) {
                log::error!("Conversion failed: {:#}", e);
                std::process::exit(1);
            }
        }

        Commands::Config => {
            let settings = ConverterSettings::default();
            println!("{}", ConversionConfig::reference_json(&settings.converter_name));
        }
    }
}
