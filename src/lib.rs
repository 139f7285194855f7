pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::QrConfig;
pub use core::{engine::QrEngine, pipeline::ContactPipeline};
pub use domain::model::{ContactPayload, PayloadKind, RenderJob, RenderStyle, RunReport};
pub use utils::error::{QrGenError, Result};
