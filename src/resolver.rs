//! Feature-to-path resolution for Trellis.
//! A declarative rule table associates every optional feature with the paths
//! that must be deleted when the feature is not selected. The three features
//! that ship a long-running container (`fastapi`, `celery`, `qq`) also
//! register a compose service when selected; whether any service remains
//! decides the fate of the shared docker CI resources.

use crate::answers::Answers;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// One row of the rule table.
///
/// `paths` are MiniJinja templates removed when the feature is off;
/// `service` is the compose service the feature contributes when it is on.
pub struct Rule {
    pub feature: &'static str,
    pub enabled: fn(&Answers) -> bool,
    pub service: Option<&'static str>,
    pub paths: &'static [&'static str],
}

/// The full feature rule table, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        feature: "fastapi",
        enabled: |a| a.include_fastapi,
        service: Some("www"),
        paths: &[
            "{{ package_slug }}/www.py",
            "{{ package_slug }}/static",
            "dockerfile.www",
            "docker/www",
            "docs/dev/api.md",
            "tests/test_www.py",
        ],
    },
    Rule {
        feature: "celery",
        enabled: |a| a.include_celery,
        service: Some("celery"),
        paths: &[
            "{{ package_slug }}/celery.py",
            "dockerfile.celery",
            "docker/celery",
            "docs/dev/celery.md",
            "tests/test_celery.py",
        ],
    },
    Rule {
        feature: "qq",
        enabled: |a| a.include_qq,
        service: Some("qq"),
        paths: &[
            "{{ package_slug }}/qq.py",
            "dockerfile.qq",
            "docs/dev/qq.md",
            "tests/test_qq.py",
        ],
    },
    Rule {
        feature: "sqlalchemy",
        enabled: |a| a.include_sqlalchemy,
        service: None,
        paths: &[
            "{{ package_slug }}/models",
            "db",
            "{{ package_slug }}/conf/db.py",
            "{{ package_slug }}/services/db.py",
            "alembic.ini",
            "docs/dev/database.md",
            ".github/workflows/postgres.yaml",
            ".github/workflows/migrations.yaml",
        ],
    },
    Rule {
        feature: "cli",
        enabled: |a| a.include_cli,
        service: None,
        paths: &[
            "{{ package_slug }}/cli.py",
            "docs/dev/cli.md",
            "tests/test_cli.py",
        ],
    },
    Rule {
        feature: "jinja2",
        enabled: |a| a.include_jinja2,
        service: None,
        paths: &[
            "{{ package_slug }}/templates",
            "{{ package_slug }}/services/jinja.py",
            "docs/dev/templates.md",
            "tests/services/test_jinja.py",
        ],
    },
    Rule {
        feature: "dogpile",
        enabled: |a| a.include_dogpile,
        service: None,
        paths: &[
            "{{ package_slug }}/conf/cache.py",
            "{{ package_slug }}/services/cache.py",
            "tests/services/test_cache.py",
            "docs/dev/cache.md",
        ],
    },
    Rule {
        feature: "docker",
        enabled: |a| a.include_docker,
        service: None,
        paths: &[
            ".dockerignore",
            "compose.yaml",
            "dockerfile.www",
            "dockerfile.celery",
            "dockerfile.qq",
            "docs/dev/docker.md",
        ],
    },
    Rule {
        feature: "github_actions",
        enabled: |a| a.include_github_actions,
        service: None,
        paths: &[".github", "docs/dev/github.md"],
    },
    Rule {
        feature: "requirements_files",
        enabled: |a| a.include_requirements_files,
        service: None,
        paths: &[".github/workflows/lockfiles.yaml", "docs/dev/dependencies.md"],
    },
    Rule {
        feature: "agent_instructions",
        enabled: |a| a.include_agent_instructions,
        service: None,
        paths: &["AGENTS.md"],
    },
];

/// Docker CI resources shared by all compose services. Removed when docker
/// is off or when no feature contributes a service.
pub const DOCKER_SERVICE_PATHS: &[&str] = &[".github/workflows/docker.yaml", "docker"];

/// Directories removed after pruning when they end up empty, in check order:
/// emptying the services directory can in turn empty `docs/dev`, then `docs`.
pub const EMPTY_DIR_CANDIDATES: &[&str] =
    &["{{ package_slug }}/services", "docs/dev", "docs"];

/// The resolved removal plan for one generation run.
///
/// Paths are grouped per feature in rule-table order for reporting; the
/// deduplicated set is what the pruner consumes. Cross-feature overlap
/// (two rules naming the same path) is expected and harmless.
#[derive(Default)]
pub struct RemovalPlan {
    pub by_feature: IndexMap<&'static str, Vec<PathBuf>>,
    pub services: BTreeSet<&'static str>,
    pub empty_dir_candidates: Vec<PathBuf>,
}

impl RemovalPlan {
    /// The deduplicated set of paths to delete, relative to the project root.
    pub fn paths(&self) -> BTreeSet<&Path> {
        self.by_feature.values().flatten().map(PathBuf::as_path).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_feature.values().all(|paths| paths.is_empty())
    }
}

/// Returns whether a rendered path may be deleted relative to a project root.
/// Absolute paths and any parent-directory traversal are rejected.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let path = Path::new(path);
    !path.is_absolute()
        && path.components().all(|component| matches!(component, Component::Normal(_)))
}

fn render_paths(
    templates: &[&str],
    context: &serde_json::Value,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    templates
        .iter()
        .map(|template| {
            let rendered = renderer.render(template, context)?;
            if !is_safe_relative_path(&rendered) {
                return Err(Error::UnsafePath { path: PathBuf::from(rendered) });
            }
            Ok(PathBuf::from(rendered))
        })
        .collect()
}

/// Evaluates the rule table against an answers record.
///
/// Two-stage evaluation: the table populates the service tally first, and
/// only then is the derived docker CI rule decided, since it depends on
/// whether any service remains at all. Either trigger (docker off, or an
/// empty tally) removes the same shared resources.
pub fn resolve(answers: &Answers, renderer: &dyn TemplateRenderer) -> Result<RemovalPlan> {
    let context = answers.context();
    let mut plan = RemovalPlan::default();

    for rule in RULES {
        if (rule.enabled)(answers) {
            if let Some(service) = rule.service {
                plan.services.insert(service);
            }
        } else {
            let paths = render_paths(rule.paths, &context, renderer)?;
            log::debug!("feature '{}' is off, scheduling {} paths", rule.feature, paths.len());
            plan.by_feature.insert(rule.feature, paths);
        }
    }

    if !answers.include_docker || plan.services.is_empty() {
        let paths = render_paths(DOCKER_SERVICE_PATHS, &context, renderer)?;
        plan.by_feature.insert("docker_services", paths);
    }

    plan.empty_dir_candidates = render_paths(EMPTY_DIR_CANDIDATES, &context, renderer)?;

    Ok(plan)
}
