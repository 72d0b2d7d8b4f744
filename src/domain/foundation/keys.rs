//! Canonical join keys for categories and items.
//!
//! Category and item names arrive from spreadsheets with inconsistent casing,
//! underscores and stray whitespace ("Risk_Drivers", " process ", "PROCESS").
//! They are canonicalized once at ingestion and the canonical form is the only
//! key used for grouping and cross-assessment matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, case-folded name with `_` treated as a space and internal
/// whitespace collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Canonicalizes a raw name.
    pub fn new(raw: &str) -> Self {
        let spaced = raw.replace('_', " ");
        let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(collapsed.to_lowercase())
    }

    /// Returns the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the canonical form is empty (blank input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one sub-risk item across assessments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub category: CanonicalKey,
    pub item: CanonicalKey,
}

impl ItemKey {
    /// Builds an item key from raw category and item names.
    pub fn new(category: &str, item: &str) -> Self {
        Self {
            category: CanonicalKey::new(category),
            item: CanonicalKey::new(item),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.item)
    }
}
