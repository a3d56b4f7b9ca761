use std::fmt;

/// Non-fatal conditions met while running a workflow.
/// They are reported to the user and execution continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Pre-flight fetch failed; local branches and tags are used as they are
    FetchFailed { remote: String, reason: String },
    /// Checking the original branch out again after a failed merge also failed
    CompensationFailed { branch: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch from remote '{}': {}. Using local branch data.",
                    remote,
                    first_line(reason)
                )
            }
            BoundaryWarning::CompensationFailed { branch, reason } => {
                write!(
                    f,
                    "Could not switch back to '{}': {}. Check it out manually.",
                    branch,
                    first_line(reason)
                )
            }
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim()
}
