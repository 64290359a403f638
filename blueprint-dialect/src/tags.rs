use crate::error::ParseError;
use crate::loader::{construct, value_scalar_text};
use crate::node::{Node, TaggedValue};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Builds a node from the value found under a tag.
///
/// Handlers receive the registry so nested values are constructed with the
/// same tag table.
pub type TagHandler = fn(&TagRegistry, Value) -> Result<Node, ParseError>;

/// Mapping from tag name (without the leading `!`) to its handler.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    handlers: BTreeMap<String, TagHandler>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagRegistry {
    /// A registry that rejects every tag.
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// `!input`, `!include`, `!secret` and `!env_var`.
    pub fn builtin() -> Self {
        Self::empty()
            .with("input", input)
            .with("include", include)
            .with("secret", secret)
            .with("env_var", env_var)
    }

    pub fn with(mut self, tag: impl Into<String>, handler: TagHandler) -> Self {
        self.handlers.insert(tag.into(), handler);
        self
    }

    pub fn handler(&self, tag: &str) -> Option<TagHandler> {
        self.handlers.get(tag).copied()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

const INPUT_MARKER: &str = "INPUT:";

fn input(registry: &TagRegistry, value: Value) -> Result<Node, ParseError> {
    match value {
        Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = construct(registry, k)?.to_text();
                entries.push((
                    Node::String(format!("{INPUT_MARKER}{key}")),
                    construct(registry, v)?,
                ));
            }
            Ok(Node::Mapping(entries))
        }
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| {
                let text = construct(registry, item)?.to_text();
                Ok(Node::String(format!("{INPUT_MARKER}{text}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Sequence),
        other => scalar_or_default(registry, other, TaggedValue::Input),
    }
}

fn include(registry: &TagRegistry, value: Value) -> Result<Node, ParseError> {
    scalar_or_default(registry, value, TaggedValue::Include)
}

fn secret(registry: &TagRegistry, value: Value) -> Result<Node, ParseError> {
    scalar_or_default(registry, value, TaggedValue::Secret)
}

fn env_var(registry: &TagRegistry, value: Value) -> Result<Node, ParseError> {
    scalar_or_default(registry, value, TaggedValue::EnvVar)
}

/// Wraps scalar payloads; any other shape is constructed as if untagged.
fn scalar_or_default(
    registry: &TagRegistry,
    value: Value,
    make: fn(String) -> TaggedValue,
) -> Result<Node, ParseError> {
    match value_scalar_text(&value) {
        Some(text) => Ok(Node::Tagged(make(text))),
        None => construct(registry, value),
    }
}
