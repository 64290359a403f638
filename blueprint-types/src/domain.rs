use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The automation domain a blueprint targets.
///
/// The set is closed: anything else is a schema failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Automation,
    Script,
    Template,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Automation, Domain::Script, Domain::Template];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Automation => "automation",
            Domain::Script => "script",
            Domain::Template => "template",
        }
    }

    /// Comma-separated list of accepted values, for diagnostics.
    pub fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid domain \"{value}\"; must be one of [{}]", Domain::expected_values())]
pub struct UnknownDomain {
    pub value: String,
}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDomain {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_domains() {
        assert_eq!("automation".parse::<Domain>(), Ok(Domain::Automation));
        assert_eq!("script".parse::<Domain>(), Ok(Domain::Script));
        assert_eq!("template".parse::<Domain>(), Ok(Domain::Template));
    }

    #[test]
    fn domain_match_is_case_sensitive() {
        let err = "Automation".parse::<Domain>().unwrap_err();
        assert_eq!(err.value, "Automation");
        assert!(err.to_string().contains("automation, script, template"));
    }
}
