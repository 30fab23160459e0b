//! Per-Treant tags and categories
//!
//! Both limbs are thin views over the Treant's state file; every call is its
//! own read or write transaction.

use crate::category::{CategoryMap, CategoryValue};
use crate::error::TreantError;
use crate::store::StateFile;
use std::collections::BTreeSet;

/// Tags of a single Treant.
#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    statefile: &'a StateFile,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(statefile: &'a StateFile) -> Self {
        Self { statefile }
    }

    pub fn all(&self) -> Result<BTreeSet<String>, TreantError> {
        self.statefile.view(|state| state.tags.clone())
    }

    pub fn contains(&self, tag: &str) -> Result<bool, TreantError> {
        self.statefile.view(|state| state.tags.contains(tag))
    }

    pub fn len(&self) -> Result<usize, TreantError> {
        self.statefile.view(|state| state.tags.len())
    }

    pub fn is_empty(&self) -> Result<bool, TreantError> {
        Ok(self.len()? == 0)
    }

    pub fn add<I, S>(&self, tags: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statefile
            .update(|state| state.tags.extend(tags.into_iter().map(Into::into)))
    }

    /// Remove tags; tags that are not present are ignored.
    pub fn remove<I, S>(&self, tags: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.statefile.update(|state| {
            for tag in tags {
                state.tags.remove(tag.as_ref());
            }
        })
    }

    pub fn clear(&self) -> Result<(), TreantError> {
        self.statefile.update(|state| state.tags.clear())
    }
}

/// Categories of a single Treant.
#[derive(Debug, Clone, Copy)]
pub struct Categories<'a> {
    statefile: &'a StateFile,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(statefile: &'a StateFile) -> Self {
        Self { statefile }
    }

    pub fn all(&self) -> Result<CategoryMap, TreantError> {
        self.statefile.view(|state| state.categories.clone())
    }

    pub fn get(&self, key: &str) -> Result<Option<CategoryValue>, TreantError> {
        self.statefile.view(|state| state.categories.get(key).cloned())
    }

    pub fn contains(&self, key: &str) -> Result<bool, TreantError> {
        self.statefile.view(|state| state.categories.contains_key(key))
    }

    pub fn keys(&self) -> Result<Vec<String>, TreantError> {
        self.statefile
            .view(|state| state.categories.keys().cloned().collect())
    }

    pub fn values(&self) -> Result<Vec<CategoryValue>, TreantError> {
        self.statefile
            .view(|state| state.categories.values().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, TreantError> {
        self.statefile.view(|state| state.categories.len())
    }

    pub fn is_empty(&self) -> Result<bool, TreantError> {
        Ok(self.len()? == 0)
    }

    /// Insert or overwrite categories.
    pub fn add<I, K, V>(&self, categories: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CategoryValue>,
    {
        self.statefile.update(|state| {
            state.categories.extend(
                categories
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into())),
            )
        })
    }

    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<CategoryValue>,
    ) -> Result<(), TreantError> {
        let (key, value) = (key.into(), value.into());
        self.statefile.update(|state| {
            state.categories.insert(key, value);
        })
    }

    /// Remove categories; missing keys are ignored.
    pub fn remove<I, S>(&self, keys: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.statefile.update(|state| {
            for key in keys {
                state.categories.remove(key.as_ref());
            }
        })
    }

    pub fn clear(&self) -> Result<(), TreantError> {
        self.statefile.update(|state| state.categories.clear())
    }
}
