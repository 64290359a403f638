use blueprint_types::DuplicateName;
use std::collections::HashMap;

/// Append-only map from blueprint name to the first path that used it.
///
/// Results depend on insertion order; feed it in enumeration order.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    first_seen: HashMap<String, String>,
    duplicates: Vec<DuplicateName>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` at `path`, returning the conflict if the name was
    /// already taken.
    pub fn observe(&mut self, name: &str, path: &str) -> Option<&DuplicateName> {
        match self.first_seen.get(name) {
            Some(first) => {
                self.duplicates.push(DuplicateName {
                    name: name.to_string(),
                    first_path: first.clone(),
                    conflicting_path: path.to_string(),
                });
                self.duplicates.last()
            }
            None => {
                self.first_seen.insert(name.to_string(), path.to_string());
                None
            }
        }
    }

    pub fn into_duplicates(self) -> Vec<DuplicateName> {
        self.duplicates
    }
}
