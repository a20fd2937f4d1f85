use serde::{Deserialize, Serialize};

/// Authenticated identity attached to an incoming request.
///
/// Produced by the host's session layer and passed to dispatch explicitly.
/// Anonymous requests carry no `Actor` at all (`Option<Actor>` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
