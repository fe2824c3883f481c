//! Init command - Write a default configuration file

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::InitArgs;
use crate::cli::exit_codes;
use crate::config::{Config, CONFIG_FILENAME};

pub async fn execute(args: InitArgs, working_dir: &Path) -> Result<i32> {
    let config_path = working_dir.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        eprintln!(
            "{} Configuration file already exists. Use --force to overwrite.",
            "Error:".red().bold()
        );
        return Ok(exit_codes::ERROR);
    }

    let config_content = Config::default()
        .to_toml()
        .context("Failed to serialize default configuration")?;
    fs::write(&config_path, &config_content).context("Failed to write configuration file")?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        CONFIG_FILENAME.cyan()
    );

    println!("\nNext steps:");
    println!("  1. Review {}", CONFIG_FILENAME.cyan());
    println!(
        "  2. Add rules to {}, e.g. {}",
        ".gitattributes".cyan(),
        "legacy/** -ts".yellow()
    );
    println!(
        "  3. Run {}",
        "diagsieve check -- npx tsc --noEmit --pretty false".cyan()
    );

    Ok(exit_codes::SUCCESS)
}
