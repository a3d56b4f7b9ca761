use std::fmt;
use std::str::FromStr;

use super::branch::WorkflowType;
use crate::error::FlowError;

/// Action requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Start a single release or hotfix branch
    Start(WorkflowType),
    /// Start and finish a hotfix, then start and finish a release
    FastRelease,
    /// Merge the current branch into the stage branch and come back
    MergeCurrentToStage,
}

impl WorkflowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowAction::Start(kind) => kind.as_str(),
            WorkflowAction::FastRelease => "fast_release",
            WorkflowAction::MergeCurrentToStage => "merge_cur_to_stage",
        }
    }
}

impl FromStr for WorkflowAction {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(WorkflowAction::Start(WorkflowType::Release)),
            "hotfix" => Ok(WorkflowAction::Start(WorkflowType::Hotfix)),
            "fast_release" => Ok(WorkflowAction::FastRelease),
            "merge_cur_to_stage" => Ok(WorkflowAction::MergeCurrentToStage),
            "" => Err(FlowError::MissingAction),
            other => Err(FlowError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
