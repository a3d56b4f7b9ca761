//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! collaborator, allowing the workflow to run against a real repository or
//! an in-memory fake in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait, which exposes the four
//! capabilities the workflow needs. The concrete implementations include:
//!
//! - [repository::GitCliRepository]: `git2` for queries, the `git` binary for commands
//! - [mock::MockRepository]: An in-memory fake for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_flow_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! if repo.branch_exists("feature/stage") {
//!     let branch = repo.current_branch_name()?;
//!     repo.run_command("checkout", &["feature/stage"])?;
//!     repo.run_command("merge", &[branch.as_str()])?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::GitCliRepository;

use crate::error::Result;

/// Version-control collaborator used by the allocator and the orchestrator
///
/// Every call goes to live repository state. Implementations must not cache
/// branch or tag lookups, since other operators may create branches between
/// two calls.
///
/// ## Error Handling
///
/// Fallible methods return [crate::error::Result<T>]. Command failures carry
/// the captured standard error as [crate::error::FlowError::Command].
///
/// ## Implementations
///
/// - [GitCliRepository](repository::GitCliRepository): Real repository
/// - [MockRepository](mock::MockRepository): Test implementation
pub trait Repository {
    /// Check whether a local branch with exactly this name exists
    ///
    /// A failed lookup is reported as `false`; callers cannot tell a VCS
    /// error apart from a missing branch.
    ///
    /// # Arguments
    /// * `name` - Full branch name (e.g., "release/2024.03.07.01")
    fn branch_exists(&self, name: &str) -> bool;

    /// Get the most recent annotated tag reachable from HEAD
    ///
    /// # Returns
    /// * `Ok(String)` - Tag name, without trailing line terminator
    /// * `Err` - If no tag is reachable or the lookup fails
    fn latest_tag(&self) -> Result<String>;

    /// Get the name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g., "feature/login")
    /// * `Err` - If HEAD is detached or cannot be read
    fn current_branch_name(&self) -> Result<String>;

    /// Run a git subcommand and capture its output
    ///
    /// Arguments are passed as a vector, one element per argument.
    ///
    /// # Arguments
    /// * `verb` - Git subcommand (e.g., "flow", "checkout", "merge", "fetch")
    /// * `args` - Remaining arguments
    ///
    /// # Returns
    /// * `Ok(String)` - Captured standard output
    /// * `Err` - [crate::error::FlowError::Command] with captured standard error
    ///
    /// # Example
    /// ```rust
    /// # use git_flow_release::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// let output = repo.run_command("flow", &["release", "start", "2024.03.07.01"])?;
    /// println!("{}", output);
    /// # Ok(())
    /// # }
    /// ```
    fn run_command(&self, verb: &str, args: &[&str]) -> Result<String>;
}

/// Render a command line for messages and logs
pub(crate) fn render_command(verb: &str, args: &[&str]) -> String {
    let mut line = format!("git {}", verb);
    for arg in args {
        line.push(' ');
        if arg.contains(char::is_whitespace) {
            line.push_str(&format!("{:?}", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}
