// Lifecycle hook system: authorization and field stamping for resource
// create/update requests, dispatched before the host commits the change.

pub mod builtins;
pub mod context;
pub mod directive;
pub mod error;
pub mod pipeline;
pub mod traits;

// Re-export core types
pub use builtins::*;
pub use context::*;
pub use directive::*;
pub use error::*;
pub use pipeline::*;
pub use traits::*;
