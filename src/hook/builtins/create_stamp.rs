use async_trait::async_trait;

use crate::hook::builtins::{CREATED_AT, CREATOR_ID, UPDATED_AT};
use crate::hook::context::HookRequest;
use crate::hook::directive::MutationDirective;
use crate::hook::error::{HookError, Rejection};
use crate::hook::traits::{HookEvent, HookOutcome, LifecycleHook};

/// Create-time audit stamp.
///
/// Rejects anonymous requests outright. Otherwise stamps `createdAt` with
/// the server time (whole seconds) and `creatorId` with the acting user's
/// id, both overriding whatever the client sent, and protects `updatedAt`
/// so the create payload cannot smuggle one in.
#[derive(Debug, Default)]
pub struct CreateStamp;

#[async_trait]
impl LifecycleHook for CreateStamp {
    fn name(&self) -> &'static str {
        "CreateStamp"
    }

    fn applies_to_event(&self, event: HookEvent) -> bool {
        matches!(event, HookEvent::Create)
    }

    async fn execute(&self, req: &HookRequest) -> Result<HookOutcome, HookError> {
        let actor = match &req.actor {
            Some(actor) => actor,
            None => {
                tracing::debug!(
                    collection = req.collection(),
                    "anonymous create rejected"
                );
                return Ok(HookOutcome::Reject(Rejection::unauthorized()));
            }
        };

        let directive = MutationDirective::new()
            .set_field(CREATED_AT, req.unix_seconds())
            .set_field(CREATOR_ID, actor.id.clone())
            .protect(UPDATED_AT);

        Ok(HookOutcome::Proceed(directive))
    }
}
