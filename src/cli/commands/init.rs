//! Implementation of the `appboot init` command.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::InitArgs;
use crate::infrastructure::config::{SettingsLoader, DEFAULT_SETTINGS_FILE};

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub settings_file: PathBuf,
    pub directories_created: Vec<String>,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if !self.directories_created.is_empty() {
            lines.push("\nCreated directories:".to_string());
            for dir in &self.directories_created {
                lines.push(format!("  - {dir}"));
            }
        }
        lines.join("\n")
    }
}

pub fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let result = init(&args)?;
    output(&result, json_mode);
    Ok(())
}

fn init(args: &InitArgs) -> Result<InitOutput> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };
    let settings_file = target_path.join(DEFAULT_SETTINGS_FILE);

    if settings_file.exists() && !args.force {
        return Ok(InitOutput {
            success: false,
            message: "Settings file already exists. Use --force to overwrite.".to_string(),
            settings_file,
            directories_created: vec![],
        });
    }

    let mut directories_created = vec![];
    if !target_path.exists() {
        std::fs::create_dir_all(&target_path).with_context(|| {
            format!("Failed to create directory {}", target_path.display())
        })?;
        directories_created.push(target_path.display().to_string());
    }

    SettingsLoader::create_example(&settings_file)?;

    Ok(InitOutput {
        success: true,
        message: format!("Wrote example settings to {}", settings_file.display()),
        settings_file,
        directories_created,
    })
}
