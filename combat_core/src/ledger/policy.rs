//! Stacking policy - Which source tags may have several active buffs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Policy table consulted by the ledger on every add
///
/// Tags not listed here are non-stacking: a second active buff with the
/// same tag is rejected as a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackingPolicy {
    stackable: BTreeSet<String>,
}

impl StackingPolicy {
    /// Policy where nothing stacks
    pub fn new() -> Self {
        StackingPolicy::default()
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StackingPolicy {
            stackable: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Allow stacking for one more tag
    pub fn allow(mut self, source_tag: impl Into<String>) -> Self {
        self.stackable.insert(source_tag.into());
        self
    }

    pub fn allows_stacking(&self, source_tag: &str) -> bool {
        self.stackable.contains(source_tag)
    }

    pub fn stackable_tags(&self) -> impl Iterator<Item = &str> {
        self.stackable.iter().map(String::as_str)
    }
}
