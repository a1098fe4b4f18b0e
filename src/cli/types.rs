//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::{BootstrapSettings, Severity};
use crate::infrastructure::config::DEFAULT_SETTINGS_FILE;

#[derive(Parser, Debug)]
#[command(name = "appboot")]
#[command(about = "Appboot - .env configuration and logging bootstrap", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Bootstrap settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Override the .env file named in the settings
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Override the log directory named in the settings
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Override the console threshold (debug, info, warning, error, critical)
    #[arg(long, global = true)]
    pub console_level: Option<Severity>,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut BootstrapSettings) {
        if let Some(env_file) = &self.env_file {
            settings.env_file.clone_from(env_file);
        }
        if let Some(log_dir) = &self.log_dir {
            settings.logging.log_directory.clone_from(log_dir);
        }
        if let Some(level) = self.console_level {
            settings.logging.console_level = level;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add NUMBER1 and NUMBER2 from the environment
    Add,

    /// Print a configuration value
    Get(GetArgs),

    /// Write an example settings file
    Init(InitArgs),

    /// Show the effective bootstrap settings
    Settings,
}

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Variable name
    pub name: String,

    /// Value used when the variable is set nowhere
    #[arg(short, long)]
    pub default: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing settings file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}
