//! Insertion-ordered environment variable mapping.

/// Mapping from upper-cased variable name to value.
///
/// Iteration order is insertion order, which in turn fixes the byte order of
/// the serialized environment block. Keys are unique; inserting an existing
/// key replaces its value in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<(String, String)>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, normalizing the name to upper case.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.to_uppercase();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key, value.to_string()));
        }
    }

    /// Look up a variable by name, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_uppercase();
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}
