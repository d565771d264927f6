//! IAM policy-document model and wire serialization.
//!
//! The derivation engine produces statements in a fixed order and the
//! document preserves that order exactly. Consumers may diff serialized
//! documents across runs for idempotence checks, so nothing here reorders or
//! deduplicates.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// IAM policy language version understood by the provisioning backend.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// Comparison operator of a statement condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    StringEquals,
    StringLike,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::StringEquals => "StringEquals",
            Operator::StringLike => "StringLike",
        }
    }
}

/// One key-value constraint attached to a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub operator: Operator,
    pub key: String,
    pub values: Vec<String>,
}

impl Condition {
    /// `StringEquals` condition on `key` over `values`.
    pub fn string_equals(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            operator: Operator::StringEquals,
            key: key.into(),
            values,
        }
    }
}

// Wire shape: {"StringEquals": {"aws:RequestedRegion": ["us-east-1"]}}
impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut constraint = BTreeMap::new();
        constraint.insert(self.key.as_str(), &self.values);

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.operator.as_str(), &constraint)?;
        map.end()
    }
}

/// One allow/deny rule unit within a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub effect: Effect,
    pub action: Vec<String>,
    pub resource: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Statement {
    /// Allow statement over the given actions and resources.
    pub fn allow(actions: Vec<String>, resources: Vec<String>) -> Self {
        Self {
            sid: None,
            effect: Effect::Allow,
            action: actions,
            resource: resources,
            condition: None,
        }
    }

    /// Attach a statement ID.
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Attach a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A full policy document, in statement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    /// Empty document with the current policy language version.
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: Vec::new(),
        }
    }

    /// Wrap an already-ordered statement list.
    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: statements,
        }
    }

    /// Append a statement, preserving insertion order.
    pub fn add_statement(&mut self, statement: Statement) {
        self.statement.push(statement);
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}
