pub mod orchestration;

pub use orchestration::{parse_action, run_workflow, Orchestrator, WorkflowResult};
