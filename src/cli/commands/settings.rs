//! Implementation of the `appboot settings` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::BootstrapSettings;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SettingsOutput(pub BootstrapSettings);

impl CommandOutput for SettingsOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.0).unwrap_or_default()
    }
}

pub fn execute(settings: BootstrapSettings, json_mode: bool) -> Result<()> {
    output(&SettingsOutput(settings), json_mode);
    Ok(())
}
