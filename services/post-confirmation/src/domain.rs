// Domain layer modules
pub mod group_assignment;
pub mod trigger_event;

// Re-exports
pub use group_assignment::{GroupAssignmentRequest, ResolveError};
pub use trigger_event::{TriggerEvent, TriggerEventError};
