use crate::error::{FlowError, Result};
use crate::git::render_command;
use git2::{BranchType, DescribeFormatOptions, DescribeOptions, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Repository backed by `git2` for lookups and the `git` binary for commands
///
/// `git flow`, `checkout`, `merge` and `fetch` go through the command line so
/// they pick up the user's git-flow extension, hooks and credential helpers.
pub struct GitCliRepository {
    repo: Git2Repo,
    workdir: PathBuf,
    git: PathBuf,
}

impl GitCliRepository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| FlowError::config("bare repositories are not supported"))?
            .to_path_buf();

        Ok(GitCliRepository {
            repo,
            workdir,
            git: PathBuf::from("git"),
        })
    }

    /// Use a specific git executable instead of the one on `PATH`
    pub fn with_git_binary(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }
}

impl super::Repository for GitCliRepository {
    fn branch_exists(&self, name: &str) -> bool {
        match self.repo.find_branch(name, BranchType::Local) {
            Ok(_) => true,
            Err(e) => {
                if e.code() != git2::ErrorCode::NotFound {
                    tracing::debug!(branch = name, error = %e, "branch lookup failed, treating as absent");
                }
                false
            }
        }
    }

    fn latest_tag(&self) -> Result<String> {
        let describe = self.repo.describe(&DescribeOptions::new())?;
        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        let tag = describe.format(Some(&format))?;

        Ok(tag.trim_end().to_string())
    }

    fn current_branch_name(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(FlowError::DetachedHead);
        }

        let name = head.shorthand().ok_or(FlowError::DetachedHead)?;
        Ok(name.trim_end().to_string())
    }

    fn run_command(&self, verb: &str, args: &[&str]) -> Result<String> {
        let line = render_command(verb, args);
        tracing::debug!(command = %line, "running");

        let output = Command::new(&self.git)
            .arg(verb)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| FlowError::command(&line, format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(
                command = %line,
                code = output.status.code().unwrap_or(-1),
                "command failed"
            );
            return Err(FlowError::command(line, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
