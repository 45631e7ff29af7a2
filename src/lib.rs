//! Trellis is a finishing tool for freshly scaffolded projects.
//! A template engine renders the full output tree first; trellis then removes
//! the files that belong to unselected features, prunes directories the
//! removals left empty, and runs the project's bootstrap commands.

/// The answers record supplied by the invoking template engine:
/// project identity plus one boolean per optional feature
pub mod answers;

/// Bootstrap command sequence and the streaming command runner
pub mod bootstrap;

/// Command-line interface module for the Trellis application
pub mod cli;

/// Error types and handling for the Trellis application
pub mod error;

/// Tree pruning
/// Applies a removal plan and cleans up empty directories
pub mod pruner;

/// Path template rendering (`{{ package_slug }}` interpolation)
pub mod renderer;

/// Feature-to-path resolution
/// Evaluates the declarative rule table into a removal plan
pub mod resolver;

/// Pre-generation validation (module-name grammar, host tool checks)
pub mod validator;
