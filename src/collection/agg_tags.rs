//! Tags aggregated over the members of a collection.

use crate::collection::Collection;
use crate::error::TreantError;
use std::collections::BTreeSet;

/// Live view over the tags of a collection's members.
///
/// Reads take the union across members. Writes fan out to each member's own
/// state file in collection order; a failure part way leaves earlier members
/// updated.
#[derive(Debug, Clone, Copy)]
pub struct AggTags<'a> {
    collection: &'a Collection,
}

impl<'a> AggTags<'a> {
    pub(crate) fn new(collection: &'a Collection) -> Self {
        Self { collection }
    }

    /// Tags present on at least one member.
    pub fn any(&self) -> Result<BTreeSet<String>, TreantError> {
        let mut union = BTreeSet::new();
        for member in self.collection {
            union.extend(member.tags().all()?);
        }
        Ok(union)
    }

    /// Tags present on every member. Empty for an empty collection.
    pub fn all(&self) -> Result<BTreeSet<String>, TreantError> {
        let mut members = self.collection.iter();
        let Some(first) = members.next() else {
            return Ok(BTreeSet::new());
        };

        let mut common = first.tags().all()?;
        for member in members {
            if common.is_empty() {
                break;
            }
            let tags = member.tags().all()?;
            common.retain(|t| tags.contains(t));
        }
        Ok(common)
    }

    pub fn len(&self) -> Result<usize, TreantError> {
        Ok(self.any()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, TreantError> {
        Ok(self.len()? == 0)
    }

    /// True if any member carries `tag`.
    pub fn contains(&self, tag: &str) -> Result<bool, TreantError> {
        for member in self.collection {
            if member.tags().contains(tag)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn add<I, S>(&self, tags: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        for member in self.collection {
            member.tags().add(tags.iter().cloned())?;
        }
        Ok(())
    }

    pub fn remove<I, S>(&self, tags: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: Vec<S> = tags.into_iter().collect();
        for member in self.collection {
            member.tags().remove(&tags)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), TreantError> {
        for member in self.collection {
            member.tags().clear()?;
        }
        Ok(())
    }
}
