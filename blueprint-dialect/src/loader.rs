use crate::error::ParseError;
use crate::node::Node;
use crate::tags::TagRegistry;
use serde_yaml::Value;
use serde_yaml::value::{Tag, TaggedValue as YamlTagged};
use tracing::trace;

const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Parses raw text with the built-in dialect tags.
pub fn parse(raw: &str) -> Result<Node, ParseError> {
    parse_with(raw, &TagRegistry::builtin())
}

/// Parses raw text, resolving tags through `registry`.
///
/// Pure: nothing referenced by a tag is read or looked up. Merge keys
/// (`<<: *anchor`) are applied before tags are resolved. Duplicate mapping
/// keys are a syntax error.
pub fn parse_with(raw: &str, registry: &TagRegistry) -> Result<Node, ParseError> {
    let mut value: Value = serde_yaml::from_str(raw)?;
    value.apply_merge()?;
    construct(registry, value)
}

pub(crate) fn construct(registry: &TagRegistry, value: Value) -> Result<Node, ParseError> {
    Ok(match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => Node::Number(n),
        Value::String(s) => Node::String(s),
        Value::Sequence(items) => Node::Sequence(
            items
                .into_iter()
                .map(|item| construct(registry, item))
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (k, v) in mapping {
                entries.push((construct(registry, k)?, construct(registry, v)?));
            }
            Node::Mapping(entries)
        }
        Value::Tagged(tagged) => {
            let YamlTagged { tag, value } = *tagged;
            return construct_tagged(registry, &tag, value);
        }
    })
}

fn construct_tagged(registry: &TagRegistry, tag: &Tag, value: Value) -> Result<Node, ParseError> {
    let rendered = tag.to_string();
    let name = rendered.strip_prefix('!').unwrap_or(&rendered);

    // Standard YAML tags carry no dialect meaning.
    if name.starts_with('!') || name.starts_with(CORE_SCHEMA_PREFIX) {
        return construct(registry, value);
    }

    match registry.handler(name) {
        Some(handler) => {
            trace!(tag = %rendered, "constructing dialect tag");
            handler(registry, value)
        }
        None => Err(ParseError::UnknownTag { tag: rendered }),
    }
}

pub(crate) fn value_scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
