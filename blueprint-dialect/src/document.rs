use crate::error::ParseError;
use crate::loader::parse;
use crate::node::Node;
use blueprint_types::Domain;
use thiserror::Error;

/// Why a parsed document is not a usable blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("blueprint must be a YAML object")]
    NotAMapping,

    #[error("missing \"blueprint\" key")]
    MissingBlueprint,

    #[error("\"blueprint\" must be a YAML object")]
    BlueprintNotAMapping,

    #[error("missing required field \"{0}\" in blueprint metadata")]
    MissingField(&'static str),

    #[error("blueprint name must be a non-empty string")]
    InvalidName,

    #[error("invalid domain \"{value}\"; must be one of [{}]", Domain::expected_values())]
    InvalidDomain { value: String },
}

/// Either stage of turning text into a [`BlueprintDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// The metadata this system cares about plus the untouched document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintDocument {
    pub name: String,
    pub domain: Domain,
    pub description: Option<String>,
    pub author: Option<String>,
    /// `blueprint.homeassistant.min_version`.
    pub min_version: Option<String>,
    pub root: Node,
}

impl BlueprintDocument {
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        Ok(Self::from_node(parse(raw)?)?)
    }

    /// Extracts metadata from a loaded tree, failing on the first problem.
    pub fn from_node(root: Node) -> Result<Self, StructureError> {
        if !root.is_mapping() {
            return Err(StructureError::NotAMapping);
        }
        let meta = root.get("blueprint").ok_or(StructureError::MissingBlueprint)?;
        if !meta.is_mapping() {
            return Err(StructureError::BlueprintNotAMapping);
        }

        let name = meta
            .get("name")
            .ok_or(StructureError::MissingField("name"))?
            .as_text()
            .filter(|n| !n.trim().is_empty())
            .ok_or(StructureError::InvalidName)?;

        let raw_domain = meta
            .get("domain")
            .ok_or(StructureError::MissingField("domain"))?;
        let domain = raw_domain
            .as_str()
            .and_then(|d| d.parse::<Domain>().ok())
            .ok_or_else(|| StructureError::InvalidDomain {
                value: raw_domain.to_text(),
            })?;

        let description = meta.get("description").and_then(Node::scalar_text);
        let author = meta.get("author").and_then(Node::scalar_text);
        let min_version = meta
            .get("homeassistant")
            .and_then(|ha| ha.get("min_version"))
            .and_then(Node::scalar_text);

        Ok(Self {
            name,
            domain,
            description,
            author,
            min_version,
            root,
        })
    }
}
