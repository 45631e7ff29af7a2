//! Trellis's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the validate/resolve/prune/bootstrap
//! flow, and coordinates interactions between different modules.

use std::path::PathBuf;

use trellis::{
    answers::Answers,
    bootstrap,
    cli::{get_args, Args, Command},
    error::{default_error_handler, Error, Result},
    pruner,
    renderer::MiniJinjaRenderer,
    resolver::{self, RemovalPlan},
    validator,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn load_answers(answers_file: Option<PathBuf>, stdin: bool) -> Result<Answers> {
    if stdin {
        Answers::from_stdin()
    } else if let Some(path) = answers_file {
        Answers::from_file(path)
    } else {
        Err(Error::AnswersError("provide --answers <FILE> or --stdin".to_string()))
    }
}

fn print_plan(plan: &RemovalPlan) {
    if plan.is_empty() {
        println!("Nothing to remove.");
        return;
    }
    for (feature, paths) in &plan.by_feature {
        for path in paths {
            println!("{}: would remove '{}'", feature, path.display());
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the answers document (file or stdin)
/// 2. `check`: runs the pre-generation gate and stops
/// 3. `finish`: resolves the removal plan from the feature flags,
///    prunes the generated tree, then runs the bootstrap commands
fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Check { answers, stdin } => {
            let answers = load_answers(answers, stdin)?;
            validator::run_checks(&answers)?;
            println!("Answers for '{}' look good.", answers.package_slug());
        }
        Command::Finish { project_dir, answers, stdin, dry_run, skip_bootstrap } => {
            let answers = load_answers(answers, stdin)?;
            // The slug parameterizes removal paths and is checked again here.
            validator::validate_package_slug(&answers.package_slug())?;

            let renderer = MiniJinjaRenderer::new();
            let plan = resolver::resolve(&answers, &renderer)?;

            if dry_run {
                print_plan(&plan);
                return Ok(());
            }

            let report = pruner::prune(&project_dir, &plan)?;
            for path in &report.removed {
                println!("removed: '{}'", path.display());
            }

            if !skip_bootstrap {
                bootstrap::run(&project_dir, &bootstrap::commands(&answers))?;
            }

            println!(
                "Project finishing completed successfully in {}.",
                project_dir.display()
            );
        }
    }
    Ok(())
}
