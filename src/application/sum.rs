//! Example workflow: add two numbers taken from configuration

use serde::Serialize;
use std::num::ParseIntError;
use thiserror::Error;

use crate::domain::error::ConfigError;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerHandle;

pub const NUMBER1: &str = "NUMBER1";
pub const NUMBER2: &str = "NUMBER2";
pub const NUMBER1_DEFAULT: &str = "10";
pub const NUMBER2_DEFAULT: &str = "5";

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Error converting environment variable {name}={value:?} to an integer")]
    Conversion {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Sum of {0} and {1} overflows")]
    Overflow(i64, i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SumReport {
    pub number1: i64,
    pub number2: i64,
    pub result: i64,
}

/// Read `NUMBER1` and `NUMBER2`, add them, and log the outcome.
pub fn add_numbers(config: &ConfigLoader, logger: &LoggerHandle) -> Result<SumReport, WorkflowError> {
    let report = compute(config, logger);
    if let Err(err) = &report {
        match err {
            WorkflowError::Conversion { .. } => logger.error(err.to_string()),
            _ => logger.error(format!("An unexpected error occurred: {err}")),
        }
    }
    report
}

fn compute(config: &ConfigLoader, logger: &LoggerHandle) -> Result<SumReport, WorkflowError> {
    let number1 = read_number(config, NUMBER1, NUMBER1_DEFAULT)?;
    let number2 = read_number(config, NUMBER2, NUMBER2_DEFAULT)?;
    logger.info(format!(
        "Retrieved environment variables: NUMBER1={number1}, NUMBER2={number2}"
    ));

    let result = number1
        .checked_add(number2)
        .ok_or(WorkflowError::Overflow(number1, number2))?;
    logger.info(format!("The result of adding {number1} and {number2} is {result}"));

    Ok(SumReport {
        number1,
        number2,
        result,
    })
}

fn read_number(config: &ConfigLoader, name: &str, default: &str) -> Result<i64, WorkflowError> {
    let value = config.get_or(name, default)?;
    value
        .trim()
        .parse()
        .map_err(|source| WorkflowError::Conversion {
            name: name.to_string(),
            value,
            source,
        })
}
