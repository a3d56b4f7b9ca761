use std::fmt;

use super::version::Version;

/// Kind of gitflow branch a version is released through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowType {
    Release,
    Hotfix,
}

impl WorkflowType {
    /// Name used by `git flow <type> ...`
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::Release => "release",
            WorkflowType::Hotfix => "hotfix",
        }
    }

    /// Branch name prefix (e.g., "release/")
    pub fn prefix(&self) -> &'static str {
        match self {
            WorkflowType::Release => "release/",
            WorkflowType::Hotfix => "hotfix/",
        }
    }

    pub fn all() -> [WorkflowType; 2] {
        [WorkflowType::Release, WorkflowType::Hotfix]
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workflow branch: type prefix plus version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchRef {
    pub kind: WorkflowType,
    pub version: Version,
}

impl BranchRef {
    pub fn new(kind: WorkflowType, version: Version) -> Self {
        BranchRef { kind, version }
    }

    pub fn name(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.version)
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.version)
    }
}
