use serde::{Deserialize, Serialize};

/// Substrings marking a breaking change. Checked first.
pub const BREAKING_KEYWORDS: &[&str] = &[
    "breaking change",
    "breaking:",
    "major:",
    "!:",
    "incompatible",
];

/// Substrings marking a new feature. Checked after [`BREAKING_KEYWORDS`].
pub const FEATURE_KEYWORDS: &[&str] = &[
    "feat:",
    "feature:",
    "add:",
    "new:",
    "minor:",
    "enhancement",
];

/// Effect of one revision on the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The oldest revision; contributes no increment.
    Baseline,
    Major,
    Minor,
    Patch,
}

/// Classifies a revision message.
///
/// Case-insensitive substring match, first matching family wins, anything
/// unmatched is a patch.
pub fn classify(message: &str) -> ChangeKind {
    let lower = message.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if matches(BREAKING_KEYWORDS) {
        ChangeKind::Major
    } else if matches(FEATURE_KEYWORDS) {
        ChangeKind::Minor
    } else {
        ChangeKind::Patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaking_keywords_are_major() {
        assert_eq!(classify("BREAKING CHANGE: drop input"), ChangeKind::Major);
        assert_eq!(classify("feat!: rename trigger"), ChangeKind::Major);
        assert_eq!(classify("Major: rewrite"), ChangeKind::Major);
        assert_eq!(classify("make it incompatible"), ChangeKind::Major);
        assert_eq!(classify("breaking: remove field"), ChangeKind::Major);
    }

    #[test]
    fn feature_keywords_are_minor() {
        assert_eq!(classify("feat: add delay input"), ChangeKind::Minor);
        assert_eq!(classify("Feature: dimming"), ChangeKind::Minor);
        assert_eq!(classify("add: selector"), ChangeKind::Minor);
        assert_eq!(classify("new: blueprint"), ChangeKind::Minor);
        assert_eq!(classify("minor: tweak"), ChangeKind::Minor);
        assert_eq!(classify("UI enhancement"), ChangeKind::Minor);
    }

    #[test]
    fn breaking_wins_over_feature() {
        assert_eq!(classify("feat: new mode, breaking change"), ChangeKind::Major);
    }

    #[test]
    fn everything_else_is_patch() {
        assert_eq!(classify("fix: typo"), ChangeKind::Patch);
        assert_eq!(classify("chore: bump"), ChangeKind::Patch);
        assert_eq!(classify("Update motion.yaml"), ChangeKind::Patch);
        assert_eq!(classify(""), ChangeKind::Patch);
    }

    #[test]
    fn keywords_need_their_punctuation() {
        // "feature" alone, without the colon, is not a feature keyword.
        assert_eq!(classify("feature flag cleanup"), ChangeKind::Patch);
    }
}
