//! Ordered audit log of document mutations.

/// Append-only list of human-readable change descriptions.
///
/// Order is traversal order. Entries are meant for display, not for
/// machine parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    entries: Vec<String>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one mutation.
    pub fn record(&mut self, change: impl Into<String>) {
        let change = change.into();
        tracing::debug!(change = %change, "document changed");
        self.entries.push(change);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// True when any entry contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.iter().any(|c| c.contains(needle))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

impl From<ChangeLog> for Vec<String> {
    fn from(log: ChangeLog) -> Self {
        log.into_vec()
    }
}
