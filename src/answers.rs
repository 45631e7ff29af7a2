//! The answers record supplied by the invoking template engine.
//! Parses the JSON or YAML answers document into an immutable record of
//! project identity and feature flags, consumed by every later stage.

use crate::error::{Error, Result};
use cruet::Inflector;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Feature flags and project identity for one generation run.
///
/// Every flag defaults to `false` when the answers document omits it, and
/// unknown keys are ignored so the document may carry template-only answers
/// (display strings, author details) that trellis has no use for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Answers {
    /// Human-readable project name, e.g. "My App"
    #[serde(default)]
    pub project_name: String,

    /// Python package/module name; derived from `project_name` when absent
    #[serde(default)]
    pub package_slug: Option<String>,

    #[serde(default)]
    pub include_fastapi: bool,
    #[serde(default)]
    pub include_celery: bool,
    #[serde(default)]
    pub include_qq: bool,
    #[serde(default)]
    pub include_sqlalchemy: bool,
    #[serde(default)]
    pub include_cli: bool,
    #[serde(default)]
    pub include_jinja2: bool,
    #[serde(default)]
    pub include_dogpile: bool,
    #[serde(default)]
    pub include_docker: bool,
    #[serde(default)]
    pub include_github_actions: bool,
    #[serde(default)]
    pub include_requirements_files: bool,
    #[serde(default)]
    pub include_agent_instructions: bool,

    /// Carried in the record but gates no paths
    #[serde(default)]
    pub publish_to_pypi: bool,
}

impl Answers {
    /// Parses an answers document, trying JSON first and YAML second.
    ///
    /// # Errors
    /// * `Error::AnswersError` if the content parses as neither format
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(answers) => Ok(answers),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::AnswersError(format!("invalid answers document: {}", e))),
        }
    }

    /// Loads the answers document from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::AnswersError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Loads the answers document from standard input.
    pub fn from_stdin() -> Result<Self> {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map_err(Error::IoError)?;
        Self::parse(&buffer)
    }

    /// The package slug: the explicit answer when present, otherwise the
    /// snake_case form of the project name.
    pub fn package_slug(&self) -> String {
        match &self.package_slug {
            Some(slug) => slug.clone(),
            None => self.project_name.to_snake_case(),
        }
    }

    /// Rendering context for path templates.
    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({
            "project_name": self.project_name,
            "package_slug": self.package_slug(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_defaults_to_snake_case_project_name() {
        let answers = Answers {
            project_name: "My App".to_string(),
            ..Answers::default()
        };
        assert_eq!(answers.package_slug(), "my_app");
    }

    #[test]
    fn test_explicit_slug_wins() {
        let answers = Answers {
            project_name: "My App".to_string(),
            package_slug: Some("custom_pkg".to_string()),
            ..Answers::default()
        };
        assert_eq!(answers.package_slug(), "custom_pkg");
    }
}
