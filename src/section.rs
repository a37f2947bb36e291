use std::collections::HashMap;
use std::collections::hash_map::Keys;
use std::sync::Arc;

use crate::value::strip_comments;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    options: HashMap<String, String>,
    comment_markers: Arc<[char]>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String, comment_markers: Arc<[char]>) -> Self {
        Self {
            name,
            options: HashMap::new(),
            comment_markers,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every option exactly as written, inline comments included.
    #[must_use]
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// The value for `key` cut at the first comment marker the section was parsed with.
    #[must_use]
    pub fn value_without_comments(&self, key: &str) -> Option<&str> {
        self.value_of(key)
            .map(|raw| strip_comments(raw, &self.comment_markers))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn option_names(&self) -> Keys<'_, String, String> {
        self.options.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn comment_markers(&self) -> &[char] {
        &self.comment_markers
    }

    /// Later writes to the same key win.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        _ = self.options.insert(key, value);
    }
}
