// Main entry point for tap13

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use tap13::cli::{Cli, Commands};
use tap13::commands::{handle_completion, handle_render, handle_stream};
use tap13::config;
use tap13::logging;

fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let config = config::Config::load();

    let cli = Cli::parse();

    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting tap13 v{}", env!("CARGO_PKG_VERSION"));
    }

    // Handle config flag
    if cli.config {
        let effective = config.clone().unwrap_or_default();
        println!("Current configuration:");
        match &config {
            Some(_) => println!("\n  Configuration file loaded"),
            None => {
                println!("\n  No configuration file loaded");
                println!("  Create one with: tap13 --init-config .tap13rc.toml");
            }
        }
        println!(
            "    Output: {}",
            effective.general.output.as_deref().unwrap_or("stdout")
        );
        println!(
            "    Strict: {}",
            if effective.general.strict {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!(
            "    Stream autoflush: {}",
            if effective.stream.autoflush {
                "enabled"
            } else {
                "disabled"
            }
        );

        println!("\nConfiguration precedence:");
        println!("  1. Command-line arguments (highest)");
        println!("  2. Configuration file");
        println!("  3. Built-in defaults (lowest)");

        return Ok(());
    }

    // Handle init_config flag
    if let Some(config_file) = cli.init_config {
        let toml_content = config::Config::default().to_toml();
        std::fs::write(&config_file, toml_content)?;
        println!("Configuration file created: {}", config_file.display());
        println!("\nYou can now edit the file to customize your settings.");
        return Ok(());
    }

    // Handle completion flag
    if let Some(shell_type) = cli.completion {
        handle_completion(&shell_type)?;
        return Ok(());
    }

    let summary = match &cli.command {
        Some(Commands::Render(args)) => handle_render(args, config.as_ref())?,
        Some(Commands::Stream(args)) => handle_stream(args, config.as_ref())?,
        None => {
            warn!("No command provided. Use 'tap13 --help' for usage.");
            return Ok(());
        }
    };

    if !summary.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
