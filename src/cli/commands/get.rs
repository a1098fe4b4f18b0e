//! Implementation of the `appboot get` command.

use anyhow::Result;
use serde::Serialize;

use crate::application::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::GetArgs;

#[derive(Debug, Serialize)]
pub struct GetOutput {
    pub name: String,
    pub value: Option<String>,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        match &self.value {
            Some(value) => value.clone(),
            None => format!("{} is not set", self.name),
        }
    }
}

pub fn execute(ctx: &AppContext, args: GetArgs, json_mode: bool) -> Result<()> {
    let value = ctx.config.get(&args.name, args.default.as_deref())?;
    output(
        &GetOutput {
            name: args.name,
            value,
        },
        json_mode,
    );
    Ok(())
}
