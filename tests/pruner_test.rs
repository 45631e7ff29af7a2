use std::fs;
use std::path::Path;
use tempfile::TempDir;
use trellis::answers::Answers;
use trellis::error::Error;
use trellis::pruner::prune;
use trellis::renderer::MiniJinjaRenderer;
use trellis::resolver::resolve;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "content").unwrap();
}

fn answers(configure: impl FnOnce(&mut Answers)) -> Answers {
    let mut answers = Answers {
        project_name: "My App".to_string(),
        ..Answers::default()
    };
    configure(&mut answers);
    answers
}

fn all_on() -> Answers {
    answers(|a| {
        a.include_fastapi = true;
        a.include_celery = true;
        a.include_qq = true;
        a.include_sqlalchemy = true;
        a.include_cli = true;
        a.include_jinja2 = true;
        a.include_dogpile = true;
        a.include_docker = true;
        a.include_github_actions = true;
        a.include_requirements_files = true;
        a.include_agent_instructions = true;
    })
}

#[test]
fn test_prune_removes_files_and_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(root, "my_app/www.py");
    touch(root, "my_app/static/style.css");
    touch(root, "my_app/settings.py");
    touch(root, ".github/workflows/tests.yaml");
    touch(root, ".github/workflows/docker.yaml");

    let mut answers = all_on();
    answers.include_fastapi = false;
    answers.include_github_actions = false;
    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers, &renderer).unwrap();

    prune(root, &plan).unwrap();

    assert!(!root.join("my_app/www.py").exists());
    assert!(!root.join("my_app/static").exists());
    assert!(!root.join(".github").exists());
    assert!(root.join("my_app/settings.py").exists());
}

// Removing the only service file empties the services directory, which the
// candidate pass then removes; the same cascade takes docs/dev and docs.
#[test]
fn test_empty_directory_cascade() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(root, "my_app/services/cache.py");
    touch(root, "my_app/conf/cache.py");
    touch(root, "my_app/settings.py");
    touch(root, "docs/dev/cache.md");

    let mut answers = all_on();
    answers.include_dogpile = false;
    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers, &renderer).unwrap();

    prune(root, &plan).unwrap();

    assert!(!root.join("my_app/services").exists());
    assert!(!root.join("docs/dev").exists());
    assert!(!root.join("docs").exists());
    assert!(root.join("my_app/settings.py").exists());
}

#[test]
fn test_non_empty_candidates_survive() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(root, "my_app/services/cache.py");
    touch(root, "my_app/services/db.py");
    touch(root, "docs/dev/cache.md");
    touch(root, "docs/dev/database.md");
    touch(root, "docs/index.md");

    let mut answers = all_on();
    answers.include_dogpile = false;
    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers, &renderer).unwrap();

    prune(root, &plan).unwrap();

    // db.py keeps the services directory alive, index.md keeps docs alive.
    assert!(root.join("my_app/services/db.py").exists());
    assert!(!root.join("my_app/services/cache.py").exists());
    assert!(!root.join("docs/dev").exists());
    assert!(root.join("docs/index.md").exists());
}

#[test]
fn test_prune_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(root, "my_app/celery.py");
    touch(root, "my_app/settings.py");
    touch(root, "dockerfile.celery");

    let mut answers = all_on();
    answers.include_celery = false;
    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers, &renderer).unwrap();

    let first = prune(root, &plan).unwrap();
    assert!(!first.removed.is_empty());

    let second = prune(root, &plan).unwrap();
    assert!(second.removed.is_empty());
    assert_eq!(second.skipped, plan.paths().len());
    assert!(root.join("my_app/settings.py").exists());
}

#[test]
fn test_pruned_tree_matches_expected() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    touch(&project, "my_app/www.py");
    touch(&project, "my_app/settings.py");
    touch(&project, "compose.yaml");
    touch(&project, "AGENTS.md");
    touch(&project, "README.md");

    let expected = temp_dir.path().join("expected");
    touch(&expected, "my_app/settings.py");
    touch(&expected, "README.md");

    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers(|_| {}), &renderer).unwrap();
    prune(&project, &plan).unwrap();

    assert!(!dir_diff::is_different(&project, &expected).unwrap());
}

#[test]
fn test_absent_paths_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(root, "README.md");

    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers(|_| {}), &renderer).unwrap();

    let report = prune(root, &plan).unwrap();

    assert!(report.removed.is_empty());
    assert_eq!(report.skipped, plan.paths().len());
    assert!(root.join("README.md").exists());
}

#[test]
fn test_missing_project_dir() {
    let renderer = MiniJinjaRenderer::new();
    let plan = resolve(&answers(|_| {}), &renderer).unwrap();

    let result = prune(Path::new("/nonexistent/project"), &plan);
    assert!(matches!(result, Err(Error::ProjectDirMissing { .. })));
}
