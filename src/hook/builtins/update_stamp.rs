use async_trait::async_trait;

use crate::hook::builtins::{CREATED_AT, CREATOR_ID, UPDATED_AT};
use crate::hook::context::HookRequest;
use crate::hook::directive::MutationDirective;
use crate::hook::error::{HookError, Rejection};
use crate::hook::traits::{HookEvent, HookOutcome, LifecycleHook};

/// Update-time audit stamp.
///
/// Rejects anonymous requests, overwrites `updatedAt` with the server time
/// (whole seconds) on every update, and protects `createdAt` / `creatorId`
/// so the update payload cannot rewrite provenance.
#[derive(Debug, Default)]
pub struct UpdateStamp;

#[async_trait]
impl LifecycleHook for UpdateStamp {
    fn name(&self) -> &'static str {
        "UpdateStamp"
    }

    fn applies_to_event(&self, event: HookEvent) -> bool {
        matches!(event, HookEvent::Update)
    }

    async fn execute(&self, req: &HookRequest) -> Result<HookOutcome, HookError> {
        if req.is_anonymous() {
            tracing::debug!(
                collection = req.collection(),
                record_id = ?req.pending.id(),
                "anonymous update rejected"
            );
            return Ok(HookOutcome::Reject(Rejection::unauthorized()));
        }

        let directive = MutationDirective::new()
            .set_field(UPDATED_AT, req.unix_seconds())
            .protect(CREATED_AT)
            .protect(CREATOR_ID);

        Ok(HookOutcome::Proceed(directive))
    }
}
