use thiserror::Error;

/// A document could not be loaded.
///
/// Positions are 1-based and copied from the YAML parser so they can be
/// shown to users as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed YAML. `message` is the parser's own diagnostic.
    #[error("{message}")]
    Syntax {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// A tag with no registered handler.
    #[error("could not determine a constructor for the tag {tag}")]
    UnknownTag { tag: String },
}

impl ParseError {
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { line, .. } => *line,
            ParseError::UnknownTag { .. } => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { column, .. } => *column,
            ParseError::UnknownTag { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        ParseError::Syntax {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}
