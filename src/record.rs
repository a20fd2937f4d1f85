use serde_json::{Map, Value};
use uuid::Uuid;

use crate::hook::HookEvent;

/// Errors raised while building a pending change from API input
#[derive(Debug, Clone, thiserror::Error)]
pub enum PendingChangeError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// The in-flight mutation a request proposes against a resource record.
///
/// Created by the host immediately before hook dispatch and discarded right
/// after: either the directive-applied [`CommittedChange`] is persisted, or
/// the request is rejected and nothing is written.
///
/// The `proposed` payload is untrusted and taken as-is. Protected fields are
/// not rejected at parse time; they are discarded when the merged directive
/// is applied (last-writer-is-the-server).
#[derive(Debug, Clone)]
pub struct PendingChange {
    event: HookEvent,
    collection: String,
    id: Option<Uuid>,
    /// Committed state loaded by the host for updates; `None` on create
    original: Option<Map<String, Value>>,
    /// Client-supplied field values, unfiltered
    proposed: Map<String, Value>,
}

impl PendingChange {
    /// Pending change for a brand new record. The host assigns the ID after
    /// commit, so none is carried here.
    pub fn create(collection: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            event: HookEvent::Create,
            collection: collection.into(),
            id: None,
            original: None,
            proposed: payload,
        }
    }

    /// Pending change against an existing record.
    pub fn update(
        collection: impl Into<String>,
        id: Uuid,
        original: Map<String, Value>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            event: HookEvent::Update,
            collection: collection.into(),
            id: Some(id),
            original: Some(original),
            proposed: payload,
        }
    }

    /// Build a create-pending change from raw JSON, rejecting non-objects.
    pub fn create_from_json(
        collection: impl Into<String>,
        payload: Value,
    ) -> Result<Self, PendingChangeError> {
        match payload {
            Value::Object(map) => Ok(Self::create(collection, map)),
            other => Err(PendingChangeError::InvalidPayload(format!(
                "expected JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Build an update-pending change from raw JSON, rejecting non-objects.
    pub fn update_from_json(
        collection: impl Into<String>,
        id: Uuid,
        original: Map<String, Value>,
        payload: Value,
    ) -> Result<Self, PendingChangeError> {
        match payload {
            Value::Object(map) => Ok(Self::update(collection, id, original, map)),
            other => Err(PendingChangeError::InvalidPayload(format!(
                "expected JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn event(&self) -> HookEvent {
        self.event
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Get a proposed (client-supplied) field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.proposed.get(field)
    }

    pub fn proposed(&self) -> &Map<String, Value> {
        &self.proposed
    }

    pub fn original(&self) -> Option<&Map<String, Value>> {
        self.original.as_ref()
    }

    /// Original committed value for a field, if the record existed
    pub fn get_original(&self, field: &str) -> Option<&Value> {
        self.original.as_ref()?.get(field)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The field map the host may persist, after directive application.
///
/// `excluded` lists proposed fields that were dropped because a hook marked
/// them protected; the host surfaces these in its own logging.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedChange {
    fields: Map<String, Value>,
    excluded: Vec<String>,
}

impl CommittedChange {
    pub fn new(fields: Map<String, Value>, excluded: Vec<String>) -> Self {
        Self { fields, excluded }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
