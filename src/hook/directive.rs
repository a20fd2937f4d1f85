use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::record::{CommittedChange, PendingChange};

/// Structured description of how a hook wants the pending change adjusted.
///
/// `set` holds server-computed values that win over any client-supplied
/// value for the same field. `protected` names fields the client payload may
/// not set: an attempted value is discarded and the field is excluded from
/// the committed write. Hooks build directives; only the pipeline applies
/// them, once, after every hook has run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationDirective {
    set: Map<String, Value>,
    protected: BTreeSet<String>,
}

impl MutationDirective {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a server-computed field value (chainable)
    pub fn set_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    /// Mark a field as not settable by the request payload (chainable)
    pub fn protect(mut self, field: impl Into<String>) -> Self {
        self.protected.insert(field.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.protected.is_empty()
    }

    pub fn set_fields(&self) -> &Map<String, Value> {
        &self.set
    }

    pub fn protected_fields(&self) -> &BTreeSet<String> {
        &self.protected
    }

    /// Merge another directive into this one. Later `set` values win on
    /// field collisions; protections accumulate.
    pub fn merge(&mut self, other: MutationDirective) {
        for (field, value) in other.set {
            self.set.insert(field, value);
        }
        self.protected.extend(other.protected);
    }

    /// Apply the directive to a pending change, producing the field map the
    /// host may persist.
    ///
    /// Order matters: protected fields are stripped from the proposed
    /// payload first, then server-computed values are overlaid, so a field
    /// that is both protected and set ends up with the server's value.
    pub fn apply(&self, pending: &PendingChange) -> CommittedChange {
        let mut fields = Map::new();
        let mut excluded = Vec::new();

        for (field, value) in pending.proposed() {
            if self.protected.contains(field.as_str()) {
                excluded.push(field.clone());
            } else {
                fields.insert(field.clone(), value.clone());
            }
        }

        for (field, value) in &self.set {
            fields.insert(field.clone(), value.clone());
        }

        CommittedChange::new(fields, excluded)
    }
}
