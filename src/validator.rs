//! Pre-generation validation for Trellis.
//! Gates a generation run before any file is written: the package slug must
//! be a usable Python module name and the host package manager must be
//! installed. Pure checks, no file-system mutation.

use crate::answers::Answers;
use crate::error::{Error, Result};
use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

/// Grammar for a valid Python module name.
pub const MODULE_NAME_PATTERN: &str = "^[_a-zA-Z][_a-zA-Z0-9]+$";

static MODULE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MODULE_NAME_PATTERN).expect("pattern is valid"));

/// Checks that the package slug is a valid Python module name.
///
/// # Errors
/// * `Error::InvalidModuleName` if the slug fails the grammar
pub fn validate_package_slug(slug: &str) -> Result<()> {
    if MODULE_NAME_RE.is_match(slug) {
        Ok(())
    } else {
        Err(Error::InvalidModuleName { slug: slug.to_string() })
    }
}

/// Probes for a tool on the search path by asking it for its version.
pub fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn uv_remediation() -> String {
    [
        "",
        "This project template requires uv for Python package management.",
        "",
        "To install uv, run one of the following commands:",
        "",
        "  # On macOS and Linux:",
        "  curl -LsSf https://astral.sh/uv/install.sh | sh",
        "",
        "  # Using pip:",
        "  pip install uv",
        "",
        "  # Using pipx:",
        "  pipx install uv",
        "",
        "  # Using Homebrew:",
        "  brew install uv",
        "",
        "For more installation options, visit: https://docs.astral.sh/uv/getting-started/installation/",
        "",
        "After installing uv, re-run generation with your saved answers:",
        "  trellis check --answers answers.json",
    ]
    .join("\n")
}

/// Checks that `uv` is discoverable on the system search path.
///
/// # Errors
/// * `Error::MissingTool` with installation instructions if it is not
pub fn ensure_uv_installed() -> Result<()> {
    if tool_available("uv") {
        Ok(())
    } else {
        Err(Error::MissingTool { tool: "uv".to_string(), remediation: uv_remediation() })
    }
}

/// Runs the full pre-generation gate against an answers record.
pub fn run_checks(answers: &Answers) -> Result<()> {
    validate_package_slug(&answers.package_slug())?;
    ensure_uv_installed()?;
    Ok(())
}
