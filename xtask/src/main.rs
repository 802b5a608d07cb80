//! xtask - Development tasks for docker-monitor

use clap::{Parser, Subcommand};
use docker_monitor::config::Config;
use std::fs;
use std::path::Path;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for docker-monitor")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CLI documentation from clap definitions
    GenDocs,

    /// Write the default settings file to docs/config.toml
    SampleConfig,
}

fn main() {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs => generate_cli_docs(),
        Commands::SampleConfig => write_sample_config(),
    }
}

fn generate_cli_docs() {
    let markdown = clap_markdown::help_markdown::<docker_monitor::cli::Cli>();

    let docs_dir = Path::new("docs/cli");
    fs::create_dir_all(docs_dir).expect("Failed to create docs/cli directory");

    let output_path = docs_dir.join("reference.md");
    fs::write(&output_path, markdown).expect("Failed to write CLI reference");

    println!("Generated CLI documentation at {}", output_path.display());
}

fn write_sample_config() {
    let toml = toml::to_string_pretty(&Config::default()).expect("Failed to serialize defaults");

    let output_path = Path::new("docs/config.toml");
    fs::create_dir_all("docs").expect("Failed to create docs directory");
    fs::write(output_path, toml).expect("Failed to write sample config");

    println!("Wrote default settings to {}", output_path.display());
}
