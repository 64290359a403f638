use crate::error::{EditError, EditResult};
use blueprint_types::VersionTuple;
use tracing::debug;

/// How the `name:` value is written in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    Plain,
    DoubleQuoted,
    SingleQuoted,
}

impl NameStyle {
    /// Priority order in which forms are tried.
    pub const ALL: [NameStyle; 3] = [
        NameStyle::Plain,
        NameStyle::DoubleQuoted,
        NameStyle::SingleQuoted,
    ];

    fn render(self, value: &str) -> String {
        match self {
            NameStyle::Plain => value.to_string(),
            NameStyle::DoubleQuoted => {
                format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
            }
            NameStyle::SingleQuoted => format!("'{}'", value.replace('\'', "''")),
        }
    }
}

/// `"<name> v<version>"`.
pub fn versioned_name(name: &str, version: &VersionTuple) -> String {
    format!("{name} v{version}")
}

/// Replaces the first `name: <name>` line with `name: <name> v<version>`.
///
/// Forms are tried plain, double-quoted, then single-quoted; the first
/// form with a match wins and only its first occurrence is rewritten.
/// A match must be the whole `name:` entry of its line, so
/// `name: Motion` does not match inside `name: Motion Light` or
/// `friendly_name: Motion`.
pub fn rewrite_name(
    content: &str,
    name: &str,
    version: &VersionTuple,
) -> EditResult<(String, NameStyle)> {
    let stamped = versioned_name(name, version);

    for style in NameStyle::ALL {
        let needle = format!("name: {}", style.render(name));
        if let Some(at) = find_entry(content, &needle) {
            debug!(?style, at, "rewriting name");
            let mut out = String::with_capacity(content.len() + stamped.len() - name.len());
            out.push_str(&content[..at]);
            out.push_str("name: ");
            out.push_str(&style.render(&stamped));
            out.push_str(&content[at + needle.len()..]);
            return Ok((out, style));
        }
    }

    Err(EditError::NameNotFound {
        name: name.to_string(),
    })
}

/// Byte offset of the first occurrence of `needle` that is preceded on its
/// line only by indentation (or a `- ` sequence marker) and followed only
/// by whitespace or a comment.
fn find_entry(content: &str, needle: &str) -> Option<usize> {
    content.match_indices(needle).map(|(at, _)| at).find(|&at| {
        let line_start = content[..at].rfind('\n').map_or(0, |i| i + 1);
        let before = content[line_start..at].trim_start();
        let lead_ok = before.is_empty() || before.trim_end() == "-";

        let after = &content[at + needle.len()..];
        let rest = after.split('\n').next().unwrap_or_default().trim();
        let tail_ok = rest.is_empty() || rest.starts_with('#');

        lead_ok && tail_ok
    })
}
