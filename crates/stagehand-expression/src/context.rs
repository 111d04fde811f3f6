//! Read-only variable namespace an expression is evaluated against.

use std::collections::BTreeMap;

use crate::value::Value;

/// Top-level names visible to an expression.
///
/// Names absent from the context evaluate to `Null` rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionContext {
    variables: BTreeMap<String, Value>,
}

impl ExpressionContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar top-level variable.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Adds a namespace whose fields are reached with `name.field`.
    #[must_use]
    pub fn with_namespace<K, V, I>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.variables.insert(name.into(), Value::Object(fields));
        self
    }

    /// Looks up a top-level name.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.variables.get(name).cloned().unwrap_or(Value::Null)
    }
}
