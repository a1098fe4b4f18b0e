//! Command-line interface

pub mod commands;
pub mod output;
pub mod types;

use anyhow::{Context, Result};

pub use types::{Cli, Commands, GetArgs, InitArgs};

use crate::application::{AppContext, BootstrapError};
use crate::domain::error::ConfigError;
use crate::domain::models::BootstrapSettings;
use crate::infrastructure::config::SettingsLoader;
use crate::infrastructure::paths::{discover_project_root, SearchPath};

/// Dispatch the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    match &cli.command {
        Commands::Init(args) => commands::init::execute(args.clone(), json),
        Commands::Settings => commands::settings::execute(effective_settings(&cli)?, json),
        Commands::Add => {
            let ctx = bootstrap(&cli)?;
            commands::add::execute(&ctx, json)
        }
        Commands::Get(args) => {
            let ctx = bootstrap(&cli)?;
            commands::get::execute(&ctx, args.clone(), json)
        }
    }
}

/// Settings file merged with environment and command-line overrides
pub fn effective_settings(cli: &Cli) -> Result<BootstrapSettings> {
    let mut settings = SettingsLoader::load(&cli.settings)?;
    cli.apply_overrides(&mut settings);
    SettingsLoader::validate(&settings)?;
    Ok(settings)
}

/// Search path with the working directory first and the discovered project root after it
pub fn default_search_path() -> Result<SearchPath> {
    let mut search_path =
        SearchPath::from_current_dir().context("Failed to get current directory")?;
    if let Some(root) = search_path.dirs().first().and_then(discover_project_root) {
        search_path.push(root);
    }
    Ok(search_path)
}

fn bootstrap(cli: &Cli) -> Result<AppContext> {
    let settings = effective_settings(cli)?;
    let search_path = default_search_path()?;
    Ok(AppContext::bootstrap(settings, search_path)?)
}

/// Report `err` on stderr and exit with a non-zero status
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let chain = output::error_chain(&err);
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": chain.first(),
            "causes": chain.get(1..).unwrap_or_default(),
            "source_path": failed_source(&err),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {}", chain.join(": "));
    }
    std::process::exit(1)
}

fn failed_source(err: &anyhow::Error) -> Option<String> {
    // `BootstrapError` is transparent, so its `ConfigError` never shows up in the chain itself
    err.chain()
        .find_map(|cause| {
            cause.downcast_ref::<ConfigError>().or_else(|| {
                match cause.downcast_ref::<BootstrapError>() {
                    Some(BootstrapError::Config(config_err)) => Some(config_err),
                    _ => None,
                }
            })
        })
        .and_then(ConfigError::load_path)
        .map(|path| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_failed_source_found_through_wrappers() {
        let config_err = ConfigError::Load {
            path: PathBuf::from("/srv/app/.env"),
            source: dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)),
        };
        let err = anyhow::Error::from(BootstrapError::Config(config_err));

        assert_eq!(failed_source(&err), Some("/srv/app/.env".to_string()));
        assert_eq!(
            output::error_chain(&err)[0],
            "Failed to load environment variables from /srv/app/.env"
        );
    }

    #[test]
    fn test_default_search_path_starts_with_working_directory() {
        let search_path = default_search_path().unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(search_path.dirs()[0], cwd);
        assert!(search_path.dirs().len() <= 2);
        if let Some(root) = discover_project_root(&cwd) {
            if root != cwd {
                assert_eq!(search_path.dirs()[1], root);
            }
        }
    }

    #[test]
    fn test_failed_source_absent_for_other_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(failed_source(&err), None);
    }
}
