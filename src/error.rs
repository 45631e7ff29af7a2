//! Error handling for the Trellis application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for Trellis operations.
///
/// This enum represents all possible errors that can occur within the Trellis
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while rendering a path template
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),

    /// Represents errors in reading or parsing the answers document
    #[error("Answers error: {0}.")]
    AnswersError(String),

    /// The package slug does not satisfy the Python module-name grammar
    #[error("ERROR: {slug} is not a valid Python module name!")]
    InvalidModuleName { slug: String },

    /// A required host tool is not discoverable on the search path.
    /// The remediation text carries installation instructions.
    #[error("ERROR: {tool} is not installed!\n{remediation}")]
    MissingTool { tool: String, remediation: String },

    /// A resolved removal path escapes the project root
    #[error("Unsafe removal path: '{}'.", .path.display())]
    UnsafePath { path: PathBuf },

    /// The project directory to finish does not exist
    #[error("Project directory does not exist: '{}'.", .project_dir.display())]
    ProjectDirMissing { project_dir: PathBuf },

    /// A bootstrap command exited with a non-zero status
    #[error("Failed to run command '{command}': {code}")]
    BootstrapFailed { command: String, code: i32 },
}

/// Convenience type alias for Results with trellis Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Exit status for the whole process when this error aborts a run.
    ///
    /// Bootstrap failures propagate the child command's own status verbatim;
    /// every other failure is a configuration error and exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::BootstrapFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with `err.exit_code()`
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(err.exit_code());
}
