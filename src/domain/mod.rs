//! Domain logic - pure business rules independent of git operations

pub mod action;
pub mod branch;
pub mod version;

pub use action::WorkflowAction;
pub use branch::{BranchRef, WorkflowType};
pub use version::Version;
