//! CLI command implementations.

pub mod add;
pub mod get;
pub mod init;
pub mod settings;
