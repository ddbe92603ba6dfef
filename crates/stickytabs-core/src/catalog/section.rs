use serde::{Deserialize, Serialize};

/// A named, ordered group of items.
///
/// The engine never mutates sections; it rebuilds its row tables when it is
/// handed a different section list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<T> {
    /// Unique identifier, used to derive row keys
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "Vec::new", alias = "items")]
    pub data: Vec<T>,
}

impl<T> Section<T> {
    pub fn new(id: impl Into<String>, title: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            data,
        }
    }

    /// Title shown on the tab, falling back to "Section N" (1-based) when empty
    pub fn tab_title(&self, index: usize) -> String {
        if self.title.trim().is_empty() {
            format!("Section {}", index + 1)
        } else {
            self.title.clone()
        }
    }
}

/// Tab titles for a whole section list
pub fn tab_titles<T>(sections: &[Section<T>]) -> Vec<String> {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| s.tab_title(i))
        .collect()
}

/// Ids that occur more than once, in first-seen order
pub fn duplicate_ids<T>(sections: &[Section<T>]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut dupes = Vec::new();
    for section in sections {
        if !seen.insert(section.id.as_str()) && !dupes.contains(&section.id) {
            dupes.push(section.id.clone());
        }
    }
    dupes
}
