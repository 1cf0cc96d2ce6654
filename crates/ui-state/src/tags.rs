//! Tag selection for a classified being created.

use indexmap::IndexSet;
use thiserror::Error;

/// Ceiling on the combined length of all chosen tags, in characters.
pub const MAX_COMBINED_TAG_LENGTH: usize = 500;

/// Reasons a tag was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag cannot be empty")]
    Empty,

    #[error("Tags may not exceed {limit} characters in total ({attempted} requested)")]
    TooLong { limit: usize, attempted: usize },
}

/// Unique tags in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: IndexSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Combined character count of every chosen tag.
    pub fn combined_length(&self) -> usize {
        self.tags.iter().map(|tag| tag.chars().count()).sum()
    }

    /// Adds `tag` after trimming it.
    ///
    /// Returns `Ok(false)` if the tag was already chosen. The length ceiling is
    /// checked before anything is inserted.
    pub fn insert(&mut self, tag: &str) -> Result<bool, TagError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TagError::Empty);
        }
        if self.tags.contains(tag) {
            return Ok(false);
        }
        let attempted = self.combined_length() + tag.chars().count();
        if attempted > MAX_COMBINED_TAG_LENGTH {
            log::debug!("rejecting tag {tag:?}: combined length {attempted}");
            return Err(TagError::TooLong {
                limit: MAX_COMBINED_TAG_LENGTH,
                attempted,
            });
        }
        Ok(self.tags.insert(tag.to_string()))
    }

    /// Removes `tag`, keeping the order of the rest.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.shift_remove(tag.trim())
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Known tags that have not been chosen yet, in the order given.
    pub fn recommended<'a, I>(&self, known: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = IndexSet::new();
        known
            .into_iter()
            .filter(|tag| !self.tags.contains(*tag) && seen.insert(*tag))
            .collect()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_enforces_uniqueness() {
        let mut tags = TagSet::new();
        assert_eq!(tags.insert("bike"), Ok(true));
        assert_eq!(tags.insert("  bike "), Ok(false));
        assert_eq!(tags.insert("city"), Ok(true));
        assert_eq!(tags.to_vec(), vec!["bike", "city"]);
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let mut tags = TagSet::new();
        assert_eq!(tags.insert("   "), Err(TagError::Empty));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_combined_length_ceiling_is_checked_before_insert() {
        let mut tags = TagSet::new();
        let long = "x".repeat(499);
        assert_eq!(tags.insert(&long), Ok(true));
        assert_eq!(tags.insert("y"), Ok(true));
        assert_eq!(tags.combined_length(), MAX_COMBINED_TAG_LENGTH);

        assert_eq!(
            tags.insert("z"),
            Err(TagError::TooLong {
                limit: 500,
                attempted: 501
            })
        );
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut tags = TagSet::new();
        let cyrillic = "ж".repeat(500);
        assert_eq!(tags.insert(&cyrillic), Ok(true));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut tags = TagSet::new();
        for tag in ["a", "b", "c"] {
            tags.insert(tag).unwrap();
        }
        assert!(tags.remove("b"));
        assert!(!tags.remove("b"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_recommended_excludes_chosen_tags() {
        let mut tags = TagSet::new();
        tags.insert("phone").unwrap();
        let known = ["phone", "laptop", "tablet", "laptop"];
        assert_eq!(tags.recommended(known), vec!["laptop", "tablet"]);
    }
}
