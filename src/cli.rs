//! Command-line interface implementation for Trellis.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for Trellis.
#[derive(Parser, Debug)]
#[command(author, version, about = "Trellis: finishing tool for scaffolded projects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the answers before generation starts
    Check {
        /// Path to the answers document (JSON or YAML)
        #[arg(short, long, value_name = "FILE", required_unless_present = "stdin")]
        answers: Option<PathBuf>,

        /// Read the answers document from standard input
        #[arg(long, conflicts_with = "answers")]
        stdin: bool,
    },

    /// Prune unselected features from a generated project and bootstrap it
    Finish {
        /// The freshly generated project directory
        #[arg(value_name = "PROJECT_DIR")]
        project_dir: PathBuf,

        /// Path to the answers document (JSON or YAML)
        #[arg(short, long, value_name = "FILE", required_unless_present = "stdin")]
        answers: Option<PathBuf>,

        /// Read the answers document from standard input
        #[arg(long, conflicts_with = "answers")]
        stdin: bool,

        /// Print the removal plan without touching the tree
        #[arg(long)]
        dry_run: bool,

        /// Prune the tree but skip the bootstrap commands
        #[arg(long)]
        skip_bootstrap: bool,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
