use crate::actor::Actor;
use crate::hook::traits::HookEvent;
use crate::record::PendingChange;

/// Immutable view of a single request, handed to every hook in a dispatch.
///
/// The actor and clock arrive here as explicit values rather than ambient
/// reads; `received_at_ms` is sampled exactly once per dispatch so every
/// hook in the request observes the same instant.
#[derive(Debug, Clone)]
pub struct HookRequest {
    pub event: HookEvent,
    pub actor: Option<Actor>,
    pub pending: PendingChange,
    /// Server time at dispatch, milliseconds since the Unix epoch
    pub received_at_ms: i64,
}

impl HookRequest {
    pub fn new(actor: Option<Actor>, pending: PendingChange, received_at_ms: i64) -> Self {
        Self {
            event: pending.event(),
            actor,
            pending,
            received_at_ms,
        }
    }

    pub fn collection(&self) -> &str {
        self.pending.collection()
    }

    /// Server time truncated to whole seconds, the resolution stored in
    /// `createdAt` / `updatedAt`.
    pub fn unix_seconds(&self) -> i64 {
        self.received_at_ms / 1000
    }

    pub fn is_anonymous(&self) -> bool {
        self.actor.is_none()
    }
}
