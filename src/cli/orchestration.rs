//! Main workflow orchestration logic
//!
//! Parses the requested action, runs the pre-flight fetch and issues the
//! ordered git / git-flow commands for that action. Errors are returned to
//! the caller; only `main` decides to exit, so the stage-merge rollback
//! always runs before the process ends.

use chrono::NaiveDate;

use crate::allocator::allocate_next_version;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchRef, Version, WorkflowAction, WorkflowType};
use crate::error::{FlowError, Result};
use crate::git::Repository;
use crate::ui;

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The action that ran
    pub action: WorkflowAction,

    /// Versions allocated, in the order their branches were started
    pub versions: Vec<Version>,

    /// Captured stdout of the last reported command
    pub output: String,
}

/// Validate the action name given on the command line
pub fn parse_action(action: Option<&str>) -> Result<WorkflowAction> {
    action.ok_or(FlowError::MissingAction)?.parse()
}

/// Parse `action` and run it against `repo`.
///
/// The action name is validated before anything touches the repository: an
/// unknown or missing action issues no commands at all, not even the fetch.
pub fn run_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    action: Option<&str>,
    today: NaiveDate,
) -> Result<WorkflowResult> {
    let action = parse_action(action)?;
    Orchestrator::new(repo, config, today).run(action)
}

/// Runs one workflow action against a repository
pub struct Orchestrator<'a, R: Repository + ?Sized> {
    repo: &'a R,
    config: &'a Config,
    today: NaiveDate,
}

impl<'a, R: Repository + ?Sized> Orchestrator<'a, R> {
    /// `today` is fixed for the whole invocation, so every version allocated
    /// by one run shares the same date.
    pub fn new(repo: &'a R, config: &'a Config, today: NaiveDate) -> Self {
        Orchestrator {
            repo,
            config,
            today,
        }
    }

    pub fn run(&self, action: WorkflowAction) -> Result<WorkflowResult> {
        tracing::debug!(%action, today = %self.today, "running workflow");
        self.fetch();

        match action {
            WorkflowAction::Start(kind) => {
                let (version, output) = self.start(kind)?;
                Ok(WorkflowResult {
                    action,
                    versions: vec![version],
                    output,
                })
            }
            WorkflowAction::FastRelease => self.fast_release(),
            WorkflowAction::MergeCurrentToStage => self.merge_current_to_stage(),
        }
    }

    /// Best-effort fetch; offline runs continue on local state.
    fn fetch(&self) {
        if !self.config.behavior.fetch_before_action {
            tracing::debug!("fetch disabled by configuration");
            return;
        }

        let remote = self.config.remote.as_str();
        ui::display_status(&format!("Fetching latest data from {}...", remote));
        match self.repo.run_command("fetch", &[remote]) {
            Ok(_) => ui::display_success(&format!("Fetched latest data from {}", remote)),
            Err(e) => ui::display_boundary_warning(&BoundaryWarning::FetchFailed {
                remote: remote.to_string(),
                reason: failure_detail(&e),
            }),
        }
    }

    /// Allocate a version and start a branch of `kind` with it
    fn start(&self, kind: WorkflowType) -> Result<(Version, String)> {
        let version = allocate_next_version(self.repo, self.today);
        let branch = BranchRef::new(kind, version);
        let version_arg = version.to_string();

        ui::display_status(&format!("Starting {}", branch));
        let output = self
            .repo
            .run_command("flow", &[kind.as_str(), "start", version_arg.as_str()])?;
        ui::display_command_output(&output);

        Ok((version, output))
    }

    fn finish(&self, kind: WorkflowType, version: Version) -> Result<String> {
        let branch = BranchRef::new(kind, version);
        let version_arg = version.to_string();
        let message = self.config.tag_message_for(&version);

        ui::display_status(&format!("Finishing {}", branch));
        let output = self.repo.run_command(
            "flow",
            &[kind.as_str(), "finish", version_arg.as_str(), "-m", message.as_str()],
        )?;
        ui::display_command_output(&output);

        Ok(output)
    }

    /// Hotfix start/finish, then release start/finish.
    ///
    /// A failure stops the sequence. Branches already finished stay finished.
    fn fast_release(&self) -> Result<WorkflowResult> {
        let (hotfix, _) = self.start(WorkflowType::Hotfix)?;
        self.finish(WorkflowType::Hotfix, hotfix)?;

        // finishing the hotfix tagged it, so the release needs a fresh lookup
        let (release, _) = self.start(WorkflowType::Release)?;
        let output = self.finish(WorkflowType::Release, release)?;

        Ok(WorkflowResult {
            action: WorkflowAction::FastRelease,
            versions: vec![hotfix, release],
            output,
        })
    }

    /// Merge the checked-out branch into the stage branch and switch back.
    fn merge_current_to_stage(&self) -> Result<WorkflowResult> {
        let stage = self.config.stage_branch.as_str();

        ui::display_status(&format!("Checking that {} exists", stage));
        if !self.repo.branch_exists(stage) {
            return Err(FlowError::MissingStageBranch(stage.to_string()));
        }
        ui::display_success(&format!("branch {} exists", stage));

        let original = self.repo.current_branch_name()?.trim_end().to_string();
        ui::display_success(&format!("current branch name: {}", original));

        self.checkout(stage)?;

        ui::display_status(&format!("git merge {}", original));
        let output = match self.repo.run_command("merge", &[original.as_str()]) {
            Ok(output) => output,
            Err(e) => {
                self.abort_merge();
                self.switch_back(&original);
                return Err(e);
            }
        };
        ui::display_command_output(&output);

        self.checkout(&original)?;

        Ok(WorkflowResult {
            action: WorkflowAction::MergeCurrentToStage,
            versions: Vec::new(),
            output,
        })
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        ui::display_status(&format!("git checkout {}", branch));
        self.repo.run_command("checkout", &[branch])?;
        Ok(())
    }

    /// A conflicted merge leaves the index dirty and blocks the checkout back.
    fn abort_merge(&self) {
        if let Err(e) = self.repo.run_command("merge", &["--abort"]) {
            tracing::debug!(error = %e, "nothing to abort");
        }
    }

    /// Compensation after a failed merge; its own failure is only a warning
    /// so the merge error is what gets reported.
    fn switch_back(&self, branch: &str) {
        if let Err(e) = self.checkout(branch) {
            ui::display_boundary_warning(&BoundaryWarning::CompensationFailed {
                branch: branch.to_string(),
                reason: failure_detail(&e),
            });
        }
    }
}

fn failure_detail(error: &FlowError) -> String {
    match error {
        FlowError::Command { stderr, .. } => stderr.clone(),
        other => other.to_string(),
    }
}
