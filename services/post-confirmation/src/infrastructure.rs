// Infrastructure layer modules
pub mod cognito_ops;
pub mod config;
pub mod invocation_deadline;
pub mod logging;

// Re-exports
pub use cognito_ops::{AwsCognitoOps, CognitoOps, CognitoOpsError};
pub use config::{GroupAssignerConfig, GroupAssignerConfigError};
pub use invocation_deadline::{DEADLINE_SAFETY_MARGIN, budget_from_context, remaining_budget};
pub use logging::init_logging;
