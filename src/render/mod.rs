//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::{DocSet, Filter};
use anyhow::{anyhow, Result};

/// What to include when rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions<'a> {
    /// Only annotations matching this filter are rendered
    pub annotations: Filter<'a>,
}

/// Trait for rendering parsed members into a specific output format.
pub trait Renderer {
    fn render(&self, docs: &DocSet, opts: &RenderOptions) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
