//! Renderer module - trait-based format dispatch.

pub mod html;
pub mod json;
pub mod text;

use crate::model::Document;
use anyhow::{anyhow, Result};

/// Rendering knobs shared by every format.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    /// ANSI colors in text output.
    pub color: bool,
}

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, config: &RenderConfig) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer::new(config))),
        "json" => Ok(Box::new(json::JsonRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, json, or html",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_renderers_by_name() {
        let config = RenderConfig::default();
        assert_eq!(create_renderer("text", &config).unwrap().file_extension(), "txt");
        assert_eq!(create_renderer("txt", &config).unwrap().file_extension(), "txt");
        assert_eq!(create_renderer("json", &config).unwrap().file_extension(), "json");
        assert_eq!(create_renderer("html", &config).unwrap().file_extension(), "html");
    }

    #[test]
    fn rejects_unknown_formats() {
        // Drop the Ok value first: boxed renderers carry no Debug impl.
        let err = create_renderer("yaml", &RenderConfig::default())
            .map(|_| ())
            .unwrap_err();
        assert!(err.to_string().contains("unknown format: yaml"));
    }
}
