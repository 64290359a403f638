use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `major.minor.patch` triple.
///
/// Field order gives the derived `Ord` lexicographic semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTuple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTuple {
    /// Every document starts here.
    pub const BASELINE: VersionTuple = VersionTuple::new(1, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn bump_major(self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }

    pub fn bump_minor(self) -> Self {
        Self::new(self.major, self.minor + 1, 0)
    }

    pub fn bump_patch(self) -> Self {
        Self::new(self.major, self.minor, self.patch + 1)
    }
}

impl Default for VersionTuple {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version \"{0}\"; expected major.minor.patch")]
pub struct VersionParseError(pub String);

impl FromStr for VersionTuple {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(VersionParseError(s.to_string()));
        };
        let component = |raw: &&str| {
            raw.parse::<u64>()
                .map_err(|_| VersionParseError(s.to_string()))
        };
        Ok(Self::new(
            component(major)?,
            component(minor)?,
            component(patch)?,
        ))
    }
}

impl TryFrom<String> for VersionTuple {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionTuple> for String {
    fn from(v: VersionTuple) -> Self {
        v.to_string()
    }
}
