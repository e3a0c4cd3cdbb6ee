pub mod annotate;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod encode;
pub mod query;
pub mod status;

#[cfg(feature = "cli")]
pub use cli::run;
pub use annotate::Annotator;
pub use status::{StateStatus, WorkflowStatus};
