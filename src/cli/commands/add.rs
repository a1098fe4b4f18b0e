//! Implementation of the `appboot add` command.

use anyhow::Result;

use crate::application::{add_numbers, AppContext, SumReport};
use crate::cli::output::{output, CommandOutput};

impl CommandOutput for SumReport {
    fn to_human(&self) -> String {
        format!("{} + {} = {}", self.number1, self.number2, self.result)
    }
}

pub fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    let report = add_numbers(&ctx.config, &ctx.logger)?;
    output(&report, json_mode);
    Ok(())
}
