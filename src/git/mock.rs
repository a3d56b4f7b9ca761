use crate::error::{FlowError, Result};
use crate::git::{render_command, Repository};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Mock repository for testing without actual git operations
///
/// Keeps a mutable set of branch names, a latest tag and a checked-out
/// branch. `git flow <type> start|finish`, `checkout` and `merge` update that
/// state the way the real commands would, so multi-step workflows can be
/// asserted end to end. Every command is recorded.
pub struct MockRepository {
    branches: RefCell<BTreeSet<String>>,
    latest_tag: RefCell<Option<String>>,
    current_branch: RefCell<Option<String>>,
    commands: RefCell<Vec<String>>,
    failures: HashMap<String, String>,
    broken_lookups: HashSet<String>,
    current_branch_queries: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            branches: RefCell::new(BTreeSet::new()),
            latest_tag: RefCell::new(None),
            current_branch: RefCell::new(None),
            commands: RefCell::new(Vec::new()),
            failures: HashMap::new(),
            broken_lookups: HashSet::new(),
            current_branch_queries: Cell::new(0),
        }
    }

    /// Add a local branch
    pub fn add_branch(&mut self, name: impl Into<String>) {
        self.branches.get_mut().insert(name.into());
    }

    /// Set the tag `latest_tag` reports
    pub fn set_latest_tag(&mut self, tag: impl Into<String>) {
        *self.latest_tag.get_mut() = Some(tag.into());
    }

    /// Check out a branch, creating it if needed
    pub fn set_current_branch(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.branches.get_mut().insert(name.clone());
        *self.current_branch.get_mut() = Some(name);
    }

    /// Make every command whose rendered line starts with `prefix` fail
    pub fn fail_command(&mut self, prefix: impl Into<String>, stderr: impl Into<String>) {
        self.failures.insert(prefix.into(), stderr.into());
    }

    /// Make `branch_exists` report `false` for this name even if it exists
    pub fn break_branch_lookup(&mut self, name: impl Into<String>) {
        self.broken_lookups.insert(name.into());
    }

    /// Rendered command lines in the order they ran
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Commands that went through `git flow`
    pub fn flow_commands(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c.starts_with("git flow "))
            .cloned()
            .collect()
    }

    pub fn current_branch(&self) -> Option<String> {
        self.current_branch.borrow().clone()
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.borrow().contains(name)
    }

    pub fn tag(&self) -> Option<String> {
        self.latest_tag.borrow().clone()
    }

    /// How many times `current_branch_name` was called
    pub fn current_branch_queries(&self) -> usize {
        self.current_branch_queries.get()
    }

    fn apply(&self, verb: &str, args: &[&str], line: &str) -> Result<String> {
        match (verb, args) {
            ("flow", [kind, "start", version, ..]) => {
                let branch = format!("{}/{}", kind, version);
                if !self.branches.borrow_mut().insert(branch.clone()) {
                    return Err(FlowError::command(
                        line,
                        format!("Fatal: Branch '{}' already exists.", branch),
                    ));
                }
                *self.current_branch.borrow_mut() = Some(branch.clone());
                Ok(format!("Switched to a new branch '{}'\n", branch))
            }
            ("flow", [kind, "finish", version, ..]) => {
                let branch = format!("{}/{}", kind, version);
                if !self.branches.borrow_mut().remove(&branch) {
                    return Err(FlowError::command(
                        line,
                        format!("Fatal: Branch '{}' does not exist.", branch),
                    ));
                }
                *self.latest_tag.borrow_mut() = Some(version.to_string());
                *self.current_branch.borrow_mut() = Some("develop".to_string());
                Ok(format!("Deleted branch {}\n", branch))
            }
            ("checkout", [branch]) => {
                if !self.branches.borrow().contains(*branch) {
                    return Err(FlowError::command(
                        line,
                        format!(
                            "error: pathspec '{}' did not match any file(s) known to git",
                            branch
                        ),
                    ));
                }
                *self.current_branch.borrow_mut() = Some(branch.to_string());
                Ok(String::new())
            }
            ("merge", ["--abort"]) => Ok(String::new()),
            ("merge", [branch]) => Ok(format!(
                "Merge made by the 'ort' strategy.\n {} | 1 +\n",
                branch
            )),
            _ => Ok(String::new()),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn branch_exists(&self, name: &str) -> bool {
        if self.broken_lookups.contains(name) {
            return false;
        }
        self.branches.borrow().contains(name)
    }

    fn latest_tag(&self) -> Result<String> {
        self.latest_tag.borrow().clone().ok_or_else(|| {
            FlowError::command(
                "git describe --abbrev=0",
                "fatal: No names found, cannot describe anything.",
            )
        })
    }

    fn current_branch_name(&self) -> Result<String> {
        self.current_branch_queries
            .set(self.current_branch_queries.get() + 1);
        self.current_branch
            .borrow()
            .clone()
            .ok_or(FlowError::DetachedHead)
    }

    fn run_command(&self, verb: &str, args: &[&str]) -> Result<String> {
        let line = render_command(verb, args);
        self.commands.borrow_mut().push(line.clone());

        if let Some(stderr) = self
            .failures
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, stderr)| stderr.clone())
        {
            return Err(FlowError::command(line, stderr));
        }

        self.apply(verb, args, &line)
    }
}
