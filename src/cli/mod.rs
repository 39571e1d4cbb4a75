pub mod orchestration;

pub use orchestration::{run_bump_workflow, BumpWorkflowArgs, RunOutcome, WorkflowResult};
