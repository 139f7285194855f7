pub mod emblem;
pub mod engine;
pub mod payload;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{ContactPayload, RenderJob, RenderStyle, RenderedImage};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
