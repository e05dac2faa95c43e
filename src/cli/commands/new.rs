//! New Command
//!
//! Runs the full bootstrap pipeline: probe the editor CLI, collect the
//! operator's answers, resolve the target directory, clone the template,
//! install dependencies, render the derived artifacts, and launch the
//! editor.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::ui::Output;
use crate::collector::{self, Collector};
use crate::config::Config;
use crate::process::{CommandDriver, FailurePolicy, ProcessDriver, ProcessOutcome};
use crate::render;
use crate::target::{self, TargetAction, TargetState};
use crate::types::{ForgeError, ProjectConfig, Result};

/// CLI overrides for a bootstrap run.
#[derive(Debug, Default)]
pub struct NewOptions {
    /// Template repository URL override
    pub template_url: Option<String>,
    /// Base project directory override (skips the config/default lookup)
    pub project_dir: Option<PathBuf>,
    /// Failure policy override for clone/install
    pub on_failure: Option<FailurePolicy>,
}

pub async fn run(config: Config, opts: NewOptions) -> Result<()> {
    let out = Output::new();
    let driver = CommandDriver::new(config.editor.command.clone(), config.editor.new_window);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    ensure_editor(&driver, &out, &mut input, &config.editor.command).await?;

    out.section("Project setup");
    let workspace_default = opts
        .project_dir
        .clone()
        .unwrap_or_else(|| config.workspace_dir());
    let project = Collector::new(&mut input, &out, workspace_default).collect()?;

    let template_url = opts
        .template_url
        .as_deref()
        .unwrap_or(config.template.url.as_str());
    let policy = opts.on_failure.unwrap_or(config.process.failure);

    run_pipeline(&driver, &out, &mut input, &project, template_url, policy).await
}

/// The editor CLI is required before any answers are collected. Declining
/// to install a missing one aborts the run.
pub(crate) async fn ensure_editor<D, R>(
    driver: &D,
    out: &Output,
    input: &mut R,
    editor_command: &str,
) -> Result<()>
where
    D: ProcessDriver + Sync,
    R: BufRead,
{
    if driver.editor_available().await {
        return Ok(());
    }

    out.warning(&format!(
        "The '{editor_command}' command line tool was not found on PATH."
    ));
    let install = collector::confirm(input, out, "Install it yourself now and continue? [y/N]")?;
    if !install {
        return Err(ForgeError::MissingTool {
            tool: editor_command.to_string(),
            hint: "Install the editor CLI (for VS Code: 'Shell Command: Install `code` \
                   command in PATH') and re-run 'widgetforge new'."
                .to_string(),
        });
    }
    out.info("Continuing; the editor launch at the end will be retried.");
    Ok(())
}

/// Pipeline body, generic over the process driver and the answer stream so
/// orchestration tests can use a recording mock and scripted input.
pub(crate) async fn run_pipeline<D, R>(
    driver: &D,
    out: &Output,
    input: &mut R,
    project: &ProjectConfig,
    template_url: &str,
    policy: FailurePolicy,
) -> Result<()>
where
    D: ProcessDriver + Sync,
    R: BufRead,
{
    let target = project.target_path();
    let state = target::inspect(&target)?;

    let confirmed = match state {
        TargetState::NonEmpty | TargetState::GitRepo => {
            if state == TargetState::GitRepo {
                out.warning(&format!(
                    "'{}' is already a git repository.",
                    target.display()
                ));
            }
            let prompt = format!(
                "Target '{}' is not empty. Overwrite it? [y/N]",
                target.display()
            );
            collector::confirm(input, out, &prompt)?
        }
        TargetState::Missing | TargetState::Empty => false,
    };

    match target::decide(state, confirmed) {
        TargetAction::Abort => return Err(ForgeError::TargetConflict(target)),
        TargetAction::PurgeAndProceed => {
            // Strictly before the clone; later steps never see a partial overwrite
            target::purge(&target, &project.project_dir)?;
            out.info(&format!("Removed existing '{}'.", target.display()));
        }
        TargetAction::Proceed => {}
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    out.section("Bootstrapping");
    info!("Cloning {} into {}", template_url, target.display());
    check_step(
        driver.clone_template(template_url, &target).await,
        "git clone",
        policy,
        out,
    )?;

    info!("Installing dependencies in {}", target.display());
    check_step(
        driver.install_dependencies(&target).await,
        "npm install",
        policy,
        out,
    )?;

    let report = render::write_artifacts(project, &target)?;
    out.success(&format!("Wrote {}", report.widget_config.display()));
    if report.stub_created {
        out.success(&format!("Wrote {}", report.service_stub.display()));
    } else {
        out.info(&format!(
            "Kept existing {}",
            report.service_stub.display()
        ));
    }
    out.success(&format!("Wrote {}", report.prompt_doc.display()));

    // A failed editor launch never fails the run
    match driver.launch_editor(&target).await {
        Ok(outcome) if outcome.success => {}
        Ok(outcome) => out.warning(&format!("Editor launch failed ({})", outcome.describe())),
        Err(e) => out.warning(&format!("Editor launch failed: {e}")),
    }

    out.success(&format!(
        "Widget project '{}' is ready at {}",
        project.project_name,
        target.display()
    ));

    Ok(())
}

/// Apply the failure policy to a clone/install outcome.
fn check_step(
    result: Result<ProcessOutcome>,
    operation: &str,
    policy: FailurePolicy,
    out: &Output,
) -> Result<()> {
    let message = match result {
        Ok(outcome) if outcome.success => return Ok(()),
        Ok(outcome) => outcome.describe(),
        Err(e) => e.to_string(),
    };

    match policy {
        FailurePolicy::ReportAndContinue => {
            warn!("{operation} failed: {message}");
            out.warning(&format!("{operation} failed ({message}); continuing."));
            Ok(())
        }
        FailurePolicy::ReportAndAbort => Err(ForgeError::process(operation, message)),
    }
}
