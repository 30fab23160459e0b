//! Categories aggregated over the members of a collection.
//!
//! Per-key value lists always have one entry per member, in collection order,
//! with `None` where a member lacks the key.

use crate::category::{CategoryMap, CategoryValue};
use crate::collection::Collection;
use crate::error::TreantError;
use crate::treant::Member;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Which keys an aggregate read covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Keys present on every member
    #[default]
    All,
    /// Keys present on at least one member
    Any,
}

impl FromStr for Scope {
    type Err = TreantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Scope::All),
            "any" => Ok(Scope::Any),
            other => Err(TreantError::InvalidArgument(format!(
                "Unknown scope '{}', expected 'all' or 'any'",
                other
            ))),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Any => write!(f, "any"),
        }
    }
}

/// Value written by [`AggCategories::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryAssignment {
    /// Same value on every member
    Uniform(CategoryValue),
    /// One value per member, in collection order
    PerMember(Vec<CategoryValue>),
}

macro_rules! uniform_assignment {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CategoryAssignment {
                fn from(value: $ty) -> Self {
                    CategoryAssignment::Uniform(value.into())
                }
            }
        )*
    };
}

uniform_assignment!(bool, i32, i64, f64, &str, String, CategoryValue, &CategoryValue);

impl<V: Into<CategoryValue>> From<Vec<V>> for CategoryAssignment {
    fn from(values: Vec<V>) -> Self {
        CategoryAssignment::PerMember(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<CategoryValue>, const N: usize> From<[V; N]> for CategoryAssignment {
    fn from(values: [V; N]) -> Self {
        CategoryAssignment::PerMember(values.into_iter().map(Into::into).collect())
    }
}

/// Live view over the categories of a collection's members.
#[derive(Debug, Clone, Copy)]
pub struct AggCategories<'a> {
    collection: &'a Collection,
}

/// Categories of every member read once, in collection order.
struct Snapshot(Vec<CategoryMap>);

impl Snapshot {
    fn take(collection: &Collection) -> Result<Self, TreantError> {
        collection
            .iter()
            .map(|m| m.categories().all())
            .collect::<Result<Vec<_>, _>>()
            .map(Snapshot)
    }

    fn keys(&self, scope: Scope) -> BTreeSet<String> {
        match scope {
            Scope::Any => self.0.iter().flat_map(|c| c.keys().cloned()).collect(),
            Scope::All => {
                let mut maps = self.0.iter();
                let Some(first) = maps.next() else {
                    return BTreeSet::new();
                };
                let rest: Vec<&CategoryMap> = maps.collect();
                first
                    .keys()
                    .filter(|k| rest.iter().all(|c| c.contains_key(*k)))
                    .cloned()
                    .collect()
            }
        }
    }

    fn column(&self, key: &str) -> Vec<Option<CategoryValue>> {
        self.0.iter().map(|c| c.get(key).cloned()).collect()
    }

    /// Values of `keys` for member `i`, or `None` if any is missing.
    fn row(&self, i: usize, keys: &[&str]) -> Option<Vec<CategoryValue>> {
        keys.iter().map(|k| self.0[i].get(*k).cloned()).collect()
    }
}

impl<'a> AggCategories<'a> {
    pub(crate) fn new(collection: &'a Collection) -> Self {
        Self { collection }
    }

    /// Keys common to every member, with their values.
    pub fn all(&self) -> Result<BTreeMap<String, Vec<CategoryValue>>, TreantError> {
        let snapshot = Snapshot::take(self.collection)?;
        Ok(snapshot
            .keys(Scope::All)
            .into_iter()
            .map(|key| {
                let values = snapshot.column(&key).into_iter().flatten().collect();
                (key, values)
            })
            .collect())
    }

    /// Keys present on any member, with `None` where a member lacks the key.
    pub fn any(&self) -> Result<BTreeMap<String, Vec<Option<CategoryValue>>>, TreantError> {
        let snapshot = Snapshot::take(self.collection)?;
        Ok(snapshot
            .keys(Scope::Any)
            .into_iter()
            .map(|key| {
                let values = snapshot.column(&key);
                (key, values)
            })
            .collect())
    }

    /// Number of keys common to every member.
    pub fn len(&self) -> Result<usize, TreantError> {
        Ok(Snapshot::take(self.collection)?.keys(Scope::All).len())
    }

    pub fn is_empty(&self) -> Result<bool, TreantError> {
        Ok(self.len()? == 0)
    }

    /// True if every member has `key`.
    pub fn contains(&self, key: &str) -> Result<bool, TreantError> {
        for member in self.collection {
            if !member.categories().contains(key)? {
                return Ok(false);
            }
        }
        Ok(!self.collection.is_empty())
    }

    pub fn keys(&self, scope: Scope) -> Result<Vec<String>, TreantError> {
        Ok(Snapshot::take(self.collection)?.keys(scope).into_iter().collect())
    }

    /// Value lists aligned with [`keys`](Self::keys) for the same scope.
    pub fn values(&self, scope: Scope) -> Result<Vec<Vec<Option<CategoryValue>>>, TreantError> {
        let snapshot = Snapshot::take(self.collection)?;
        Ok(snapshot
            .keys(scope)
            .iter()
            .map(|key| snapshot.column(key))
            .collect())
    }

    pub fn get(&self, key: &str) -> Result<Vec<Option<CategoryValue>>, TreantError> {
        Ok(Snapshot::take(self.collection)?.column(key))
    }

    /// One value list per key, in the order given.
    pub fn get_many<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> Result<Vec<Vec<Option<CategoryValue>>>, TreantError> {
        let snapshot = Snapshot::take(self.collection)?;
        Ok(keys.iter().map(|k| snapshot.column(k.as_ref())).collect())
    }

    pub fn get_set(
        &self,
        keys: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, Vec<Option<CategoryValue>>>, TreantError> {
        let snapshot = Snapshot::take(self.collection)?;
        Ok(keys
            .iter()
            .map(|k| (k.clone(), snapshot.column(k)))
            .collect())
    }

    /// Set `key` on every member, either to one value or positionally.
    ///
    /// A per-member list must have exactly one value per member.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<CategoryAssignment>,
    ) -> Result<(), TreantError> {
        let key = key.into();
        match value.into() {
            CategoryAssignment::Uniform(value) => {
                for member in self.collection {
                    member.categories().set(key.clone(), value.clone())?;
                }
            }
            CategoryAssignment::PerMember(values) => {
                if values.len() != self.collection.len() {
                    return Err(TreantError::InvalidArgument(format!(
                        "Got {} values for '{}' but the collection has {} members",
                        values.len(),
                        key,
                        self.collection.len()
                    )));
                }
                for (member, value) in self.collection.iter().zip(values) {
                    member.categories().set(key.clone(), value)?;
                }
            }
        }
        Ok(())
    }

    /// Merge categories into every member, overwriting existing keys.
    pub fn add<I, K, V>(&self, categories: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CategoryValue>,
    {
        let categories: CategoryMap = categories
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for member in self.collection {
            member.categories().add(categories.clone())?;
        }
        Ok(())
    }

    /// Delete keys from every member that has them.
    pub fn remove<I, S>(&self, keys: I) -> Result<(), TreantError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        for member in self.collection {
            member.categories().remove(&keys)?;
        }
        Ok(())
    }

    /// Partition members by their value for `key`. Members without it are left out.
    pub fn groupby(&self, key: &str) -> Result<BTreeMap<CategoryValue, Collection>, TreantError> {
        Ok(self
            .group_rows(&[key])?
            .into_iter()
            .filter_map(|(mut values, c)| values.pop().map(|v| (v, c)))
            .collect())
    }

    /// Partition members by their values for `keys`, in the order given.
    ///
    /// Only members having every key are grouped.
    pub fn groupby_keys<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> Result<BTreeMap<Vec<CategoryValue>, Collection>, TreantError> {
        let keys: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
        self.group_rows(&keys)
    }

    /// Like [`groupby_keys`](Self::groupby_keys) with keys in sorted order.
    pub fn groupby_set(
        &self,
        keys: &BTreeSet<String>,
    ) -> Result<BTreeMap<Vec<CategoryValue>, Collection>, TreantError> {
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.group_rows(&keys)
    }

    fn group_rows(
        &self,
        keys: &[&str],
    ) -> Result<BTreeMap<Vec<CategoryValue>, Collection>, TreantError> {
        let snapshot = Snapshot::take(self.collection)?;
        let mut groups: BTreeMap<Vec<CategoryValue>, Vec<Member>> = BTreeMap::new();

        for (i, member) in self.collection.iter().enumerate() {
            if let Some(row) = snapshot.row(i, keys) {
                groups.entry(row).or_default().push(member.clone());
            }
        }

        debug!(keys = ?keys, groups = groups.len(), "Grouped collection by category");
        let workspace = self.collection.workspace();
        Ok(groups
            .into_iter()
            .map(|(row, members)| (row, Collection::from_members(Arc::clone(workspace), members)))
            .collect())
    }
}
