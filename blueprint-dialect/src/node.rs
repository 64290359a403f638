use std::fmt;

/// An opaque placeholder produced by a dialect tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaggedValue {
    Input(String),
    Include(String),
    Secret(String),
    EnvVar(String),
}

impl TaggedValue {
    /// The marker written in front of the payload when the placeholder is
    /// echoed back as text.
    pub fn marker(&self) -> &'static str {
        match self {
            TaggedValue::Input(_) => "INPUT",
            TaggedValue::Include(_) => "INCLUDE",
            TaggedValue::Secret(_) => "SECRET",
            TaggedValue::EnvVar(_) => "ENV_VAR",
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            TaggedValue::Input(s)
            | TaggedValue::Include(s)
            | TaggedValue::Secret(s)
            | TaggedValue::EnvVar(s) => s,
        }
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.marker(), self.payload())
    }
}

/// A loaded YAML node.
///
/// Mirrors `serde_yaml::Value` except that mappings keep insertion order as
/// a plain vector and dialect tags are resolved into [`TaggedValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
    Tagged(TaggedValue),
}

impl Node {
    /// Looks up a string key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text of a string node or of a placeholder in its echoed form.
    ///
    /// Placeholders count as text because that is how they round-trip into
    /// derived output.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Node::String(s) => Some(s.clone()),
            Node::Tagged(t) => Some(t.to_string()),
            _ => None,
        }
    }

    /// Text of any scalar node. Null renders as the empty string.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Node::Null => Some(String::new()),
            Node::Bool(b) => Some(b.to_string()),
            Node::Number(n) => Some(n.to_string()),
            Node::String(_) | Node::Tagged(_) => self.as_text(),
            Node::Sequence(_) | Node::Mapping(_) => None,
        }
    }

    /// Text of any node; collections render as YAML text.
    pub fn to_text(&self) -> String {
        self.scalar_text().unwrap_or_else(|| {
            serde_yaml::to_string(&self.to_yaml_value())
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default()
        })
    }

    /// Converts back into a plain YAML value, echoing placeholders as text.
    pub fn to_yaml_value(&self) -> serde_yaml::Value {
        use serde_yaml::Value;
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::String(s) => Value::String(s.clone()),
            Node::Tagged(t) => Value::String(t.to_string()),
            Node::Sequence(items) => Value::Sequence(items.iter().map(Node::to_yaml_value).collect()),
            Node::Mapping(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_yaml_value(), v.to_yaml_value()))
                    .collect(),
            ),
        }
    }
}
