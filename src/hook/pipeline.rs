use std::collections::HashMap;
use std::sync::Arc;

use tokio::time::timeout;

use crate::actor::Actor;
use crate::clock::Clock;
use crate::hook::builtins::{CreateStamp, UpdateStamp};
use crate::hook::context::HookRequest;
use crate::hook::directive::MutationDirective;
use crate::hook::error::HookError;
use crate::hook::traits::{HookEvent, HookOutcome, LifecycleHook};
use crate::record::{CommittedChange, PendingChange};

/// Hook registry and dispatcher.
///
/// Holds registered hooks keyed by lifecycle event, runs the applicable ones
/// in priority order for each request, and applies the merged directive
/// exactly once. A rejection from any hook short-circuits the dispatch with
/// no directive applied, so a rejected request commits nothing.
pub struct HookPipeline {
    hooks: HashMap<HookEvent, Vec<Box<dyn LifecycleHook>>>,
    clock: Arc<dyn Clock>,
}

impl HookPipeline {
    /// Create an empty pipeline around an injected clock
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            hooks: HashMap::new(),
            clock,
        }
    }

    /// Pipeline preloaded with the builtin authorization/stamping hooks
    pub fn with_builtin_stamps(clock: Arc<dyn Clock>) -> Self {
        let mut pipeline = Self::new(clock);
        pipeline.register(HookEvent::Create, Box::new(CreateStamp));
        pipeline.register(HookEvent::Update, Box::new(UpdateStamp));
        pipeline
    }

    /// Register a hook for an event, kept sorted by priority
    pub fn register(&mut self, event: HookEvent, hook: Box<dyn LifecycleHook>) {
        let name = hook.name();
        let hooks = self.hooks.entry(event).or_default();
        hooks.push(hook);
        hooks.sort_by_key(|h| h.priority());

        tracing::debug!("Registered hook '{}' for event {:?}", name, event);
    }

    /// Dispatch a pending change through the hooks registered for its event.
    ///
    /// Returns the committed change the host may persist, or the first
    /// rejection/error. The clock is sampled once here; every hook in the
    /// dispatch sees the same instant.
    pub async fn dispatch(
        &self,
        actor: Option<Actor>,
        pending: PendingChange,
    ) -> Result<CommittedChange, HookError> {
        let event = pending.event();
        let received_at_ms = self.clock.now_ms();
        let req = HookRequest::new(actor, pending, received_at_ms);

        tracing::info!(
            "Hook dispatch starting: event={:?}, collection={}, anonymous={}",
            event,
            req.collection(),
            req.is_anonymous()
        );

        let mut merged = MutationDirective::new();

        if let Some(hooks) = self.hooks.get(&event) {
            for hook in hooks {
                if !hook.applies_to_event(event) {
                    tracing::trace!(
                        "Hook {} skipped - doesn't apply to event {:?}",
                        hook.name(),
                        event
                    );
                    continue;
                }

                if !hook.applies_to_collection(req.collection()) {
                    tracing::trace!(
                        "Hook {} skipped - doesn't apply to collection {}",
                        hook.name(),
                        req.collection()
                    );
                    continue;
                }

                let outcome = match timeout(hook.timeout(), hook.execute(&req)).await {
                    Ok(result) => result?,
                    Err(_elapsed) => {
                        tracing::error!(
                            "Hook {} timed out after {:?}",
                            hook.name(),
                            hook.timeout()
                        );
                        return Err(HookError::TimeoutError(format!(
                            "Hook {} timed out after {:?}",
                            hook.name(),
                            hook.timeout()
                        )));
                    }
                };

                match outcome {
                    HookOutcome::Proceed(directive) => {
                        tracing::debug!(
                            "Hook {} completed: set={}, protected={}",
                            hook.name(),
                            directive.set_fields().len(),
                            directive.protected_fields().len()
                        );
                        merged.merge(directive);
                    }
                    HookOutcome::Reject(rejection) => {
                        tracing::warn!(
                            "Hook {} rejected request on {}: {}",
                            hook.name(),
                            req.collection(),
                            rejection
                        );
                        return Err(HookError::Rejected(rejection));
                    }
                }
            }
        } else {
            tracing::debug!("No hooks registered for event {:?}", event);
        }

        let committed = merged.apply(&req.pending);

        if !committed.excluded().is_empty() {
            tracing::debug!(
                "Dispatch excluded protected fields from commit: {:?}",
                committed.excluded()
            );
        }

        Ok(committed)
    }
}
