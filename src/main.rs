//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `iplookup` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use iplookup::initialization::init_logger_with;
use iplookup::{run_console, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // MAXMIND_LICENSE_KEY may come from a .env file in the working directory
    // or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run_console(opt).await {
        eprintln!("iplookup error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
