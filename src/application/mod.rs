pub mod bootstrap;
pub mod sum;

pub use bootstrap::{AppContext, BootstrapError};
pub use sum::{add_numbers, SumReport, WorkflowError};
