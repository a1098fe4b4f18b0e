//! Port trait definitions
//!
//! Traits the infrastructure layer depends on instead of concrete adapters:
//! - `EnvSource`: read access to the ambient environment

pub mod env_source;

pub use env_source::{EnvSource, MapEnv, ProcessEnv};
