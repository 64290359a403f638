use crate::classify::{ChangeKind, classify};
use blueprint_types::{RevisionRecord, VersionTuple};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Order in which a revision sequence is supplied.
///
/// Derivation always folds oldest to newest; newest-first input (what
/// `git log` prints) is reversed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionOrder {
    OldestFirst,
    NewestFirst,
}

/// One fold step, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionStep {
    pub revision_id: String,
    pub kind: ChangeKind,
    pub version: VersionTuple,
}

/// Derives the version of a document from its revision history.
pub fn derive_version(revisions: &[RevisionRecord], order: RevisionOrder) -> VersionTuple {
    derive_version_with_trace(revisions, order)
        .last()
        .map(|step| step.version)
        .unwrap_or(VersionTuple::BASELINE)
}

/// Like [`derive_version`], returning every intermediate version.
///
/// The trace is empty for an empty history.
pub fn derive_version_with_trace(
    revisions: &[RevisionRecord],
    order: RevisionOrder,
) -> Vec<VersionStep> {
    let chronological: Vec<&RevisionRecord> = match order {
        RevisionOrder::OldestFirst => revisions.iter().collect(),
        RevisionOrder::NewestFirst => revisions.iter().rev().collect(),
    };

    let mut version = VersionTuple::BASELINE;
    let mut steps = Vec::with_capacity(chronological.len());
    for (idx, rev) in chronological.into_iter().enumerate() {
        let kind = if idx == 0 {
            ChangeKind::Baseline
        } else {
            classify(&rev.message)
        };
        version = match kind {
            ChangeKind::Baseline => version,
            ChangeKind::Major => version.bump_major(),
            ChangeKind::Minor => version.bump_minor(),
            ChangeKind::Patch => version.bump_patch(),
        };
        trace!(revision = %rev.id, ?kind, %version, "folded revision");
        steps.push(VersionStep {
            revision_id: rev.id.clone(),
            kind,
            version,
        });
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history(messages: &[&str]) -> Vec<RevisionRecord> {
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| RevisionRecord::new(format!("{i:07x}"), *m))
            .collect()
    }

    #[test]
    fn empty_history_is_baseline() {
        assert_eq!(
            derive_version(&[], RevisionOrder::OldestFirst),
            VersionTuple::new(1, 0, 0)
        );
        assert!(derive_version_with_trace(&[], RevisionOrder::NewestFirst).is_empty());
    }

    #[test]
    fn single_revision_is_baseline() {
        let h = history(&["feat: initial blueprint, breaking change"]);
        assert_eq!(
            derive_version(&h, RevisionOrder::OldestFirst),
            VersionTuple::new(1, 0, 0)
        );
    }

    #[test]
    fn breaking_second_revision_is_two_oh() {
        let h = history(&["initial", "breaking change: new inputs"]);
        assert_eq!(
            derive_version(&h, RevisionOrder::OldestFirst),
            VersionTuple::new(2, 0, 0)
        );
    }

    #[test]
    fn mixed_history_folds_in_order() {
        let h = history(&["baseline", "feat: x", "fix: y", "feat: z"]);
        let versions: Vec<String> = derive_version_with_trace(&h, RevisionOrder::OldestFirst)
            .into_iter()
            .map(|s| s.version.to_string())
            .collect();
        assert_eq!(versions, vec!["1.0.0", "1.1.0", "1.1.1", "1.2.0"]);
    }

    #[test]
    fn newest_first_input_is_reversed_before_folding() {
        // git log order: newest at the top.
        let newest_first = history(&["feat: z", "fix: y", "feat: x", "baseline"]);
        assert_eq!(
            derive_version(&newest_first, RevisionOrder::NewestFirst),
            VersionTuple::new(1, 2, 0)
        );

        // Treating the same sequence as oldest-first takes "feat: z" as the
        // baseline and gives a different answer.
        assert_eq!(
            derive_version(&newest_first, RevisionOrder::OldestFirst),
            VersionTuple::new(1, 1, 1)
        );
    }

    #[test]
    fn major_resets_minor_and_patch() {
        let h = history(&["init", "feat: a", "fix: b", "major: c", "fix: d"]);
        assert_eq!(
            derive_version(&h, RevisionOrder::OldestFirst),
            VersionTuple::new(2, 0, 1)
        );
    }

    #[test]
    fn revision_id_does_not_affect_classification() {
        let h = vec![
            RevisionRecord::new("feat:00", "init"),
            RevisionRecord::new("major:1", "docs"),
        ];
        assert_eq!(
            derive_version(&h, RevisionOrder::OldestFirst),
            VersionTuple::new(1, 0, 1)
        );
    }

    #[test]
    fn trace_marks_first_step_as_baseline() {
        let h = history(&["breaking change", "feat: x"]);
        let steps = derive_version_with_trace(&h, RevisionOrder::OldestFirst);
        assert_eq!(steps[0].kind, ChangeKind::Baseline);
        assert_eq!(steps[0].revision_id, "0000000");
        assert_eq!(steps[1].kind, ChangeKind::Minor);
    }
}
