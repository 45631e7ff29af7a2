//! Path template rendering for Trellis.
//! Removal paths are written as MiniJinja templates (`{{ package_slug }}/www.py`)
//! and rendered against the answers context before any file is touched.

use crate::error::Result;
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self { env: Environment::new() }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a one-shot template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the template fails to parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_slug_into_path() {
        let renderer = MiniJinjaRenderer::new();
        let context = serde_json::json!({"package_slug": "my_app"});
        let rendered =
            renderer.render("{{ package_slug }}/services/cache.py", &context).unwrap();
        assert_eq!(rendered, "my_app/services/cache.py");
    }

    #[test]
    fn test_plain_path_passes_through() {
        let renderer = MiniJinjaRenderer::new();
        let rendered = renderer.render("compose.yaml", &serde_json::json!({})).unwrap();
        assert_eq!(rendered, "compose.yaml");
    }
}
