use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::hook::context::HookRequest;
use crate::hook::directive::MutationDirective;
use crate::hook::error::{HookError, Rejection};

/// Resource lifecycle events that trigger hook dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    Create,
    Update,
}

/// The two terminal outcomes of a single hook invocation.
///
/// Hooks do not mutate the pending change or call side-effecting host
/// functions; they describe what should happen and the pipeline applies it.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// Continue processing; the directive is merged with those of the other
    /// hooks and applied once after all hooks have run.
    Proceed(MutationDirective),
    /// Abort the request. No directive is applied, no field is mutated.
    Reject(Rejection),
}

/// A function invoked before the host commits a resource create or update.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    /// Hook name for logging and debugging
    fn name(&self) -> &'static str;

    /// Check if hook applies to this lifecycle event
    fn applies_to_event(&self, event: HookEvent) -> bool;

    /// Check if hook applies to this collection (default: all collections)
    fn applies_to_collection(&self, _collection: &str) -> bool {
        true
    }

    /// Execution timeout (default 5 seconds)
    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    /// Priority within an event (lower numbers execute first)
    fn priority(&self) -> u8 {
        50
    }

    async fn execute(&self, req: &HookRequest) -> Result<HookOutcome, HookError>;
}
