//! Collections of Treants and Groups
//!
//! A [`Collection`] is an ordered set of members: insertion order is kept and
//! no two members are equal (same name and uuid). A standalone collection is
//! a Bundle; the members of a [`Group`] are a collection bound to the Group's
//! state file, to which every mutation is written back.
//!
//! Aggregate views over the members' tags and categories are built fresh on
//! every [`Collection::tags`] / [`Collection::categories`] call, so they
//! always reflect the current membership.

pub mod agg_categories;
pub mod agg_tags;
pub mod selector;

pub use agg_categories::{AggCategories, CategoryAssignment, Scope};
pub use agg_tags::AggTags;
pub use selector::{Addable, Removable};

use crate::concurrency;
use crate::error::TreantError;
use crate::store::{MemberRecord, StateFile};
use crate::treant::{Group, Member};
use crate::workspace::Workspace;
use std::collections::{BTreeSet, HashSet};
use std::ops::{Add, Bound, Index, RangeBounds};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Collection {
    members: Vec<Member>,
    /// State file of the owning Group, if any
    owner: Option<StateFile>,
    workspace: Arc<Workspace>,
}

fn regenerate_all(
    workspace: &Arc<Workspace>,
    records: &[MemberRecord],
) -> Result<Vec<Member>, TreantError> {
    records.iter().map(|r| workspace.regenerate(r)).collect()
}

fn push_unique(members: &mut Vec<Member>, member: Member) -> bool {
    if members.contains(&member) {
        false
    } else {
        members.push(member);
        true
    }
}

impl Collection {
    /// An empty standalone collection (a Bundle).
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self {
            members: Vec::new(),
            owner: None,
            workspace,
        }
    }

    /// A standalone collection of `members`, duplicates dropped.
    pub fn from_members<I>(workspace: Arc<Workspace>, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Member>,
    {
        let mut collection = Self::new(workspace);
        for member in members {
            push_unique(&mut collection.members, member.into());
        }
        collection
    }

    pub(crate) fn of_group(group: &Group) -> Result<Self, TreantError> {
        let records = group.statefile().view(|state| state.members.clone())?;
        let members = regenerate_all(group.workspace(), &records)?;
        Ok(Self {
            members,
            owner: Some(group.statefile().clone()),
            workspace: Arc::clone(group.workspace()),
        })
    }

    fn bundle(&self, members: Vec<Member>) -> Self {
        Self::from_members(Arc::clone(&self.workspace), members)
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    /// True when this collection is the member list of a Group.
    pub fn is_group_members(&self) -> bool {
        self.owner.is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Member at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Option<&Member> {
        selector::resolve_index(index, self.members.len()).map(|i| &self.members[i])
    }

    /// Ordered sub-collection; bounds past the end are clamped.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let len = self.members.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        if start >= end {
            return self.bundle(Vec::new());
        }
        self.bundle(self.members[start..end].to_vec())
    }

    /// Members whose name or uuid is among `keys`, in collection order.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Self {
        let keys: HashSet<&str> = keys.iter().map(AsRef::as_ref).collect();
        self.bundle(
            self.members
                .iter()
                .filter(|m| keys.contains(m.name()) || keys.contains(m.uuid()))
                .cloned()
                .collect(),
        )
    }

    pub fn contains(&self, member: &Member) -> bool {
        self.members.contains(member)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name() == name)
    }

    pub fn contains_uuid(&self, uuid: &str) -> bool {
        self.members.iter().any(|m| m.uuid() == uuid)
    }

    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn uuids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.uuid().to_string()).collect()
    }

    pub fn treanttypes(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.treanttype().to_string())
            .collect()
    }

    /// Apply a change to the member list. Group-bound collections reload the
    /// Group's records and write the result back in one transaction.
    fn mutate<F>(&mut self, f: F) -> Result<(), TreantError>
    where
        F: FnOnce(&mut Vec<Member>) -> Result<(), TreantError>,
    {
        match &self.owner {
            None => f(&mut self.members),
            Some(statefile) => {
                let mut txn = statefile.write()?;
                let mut members = regenerate_all(&self.workspace, &txn.members)?;
                f(&mut members)?;
                txn.members = members.iter().map(Member::record).collect();
                txn.commit()?;
                self.members = members;
                Ok(())
            }
        }
    }

    /// Add members, names, glob patterns or nested lists of these. Members
    /// already present are skipped; patterns matching nothing add nothing.
    pub fn add<A: Into<Addable>>(&mut self, items: A) -> Result<(), TreantError> {
        let mut resolved = Vec::new();
        items.into().resolve(&self.workspace, &mut resolved)?;

        self.mutate(|members| {
            let before = members.len();
            for member in resolved {
                push_unique(members, member);
            }
            debug!(added = members.len() - before, total = members.len(), "Added members");
            Ok(())
        })
    }

    /// Remove members by value, position, name or glob pattern. All positions
    /// are resolved against the membership at call time before anything is
    /// removed. Selectors matching nothing are ignored.
    pub fn remove<R: Into<Removable>>(&mut self, items: R) -> Result<(), TreantError> {
        let items = items.into();
        self.mutate(|members| {
            let mut targets = BTreeSet::new();
            items.positions(members, &mut targets)?;

            let mut position = 0;
            members.retain(|_| {
                let keep = !targets.contains(&position);
                position += 1;
                keep
            });
            debug!(removed = targets.len(), total = members.len(), "Removed members");
            Ok(())
        })
    }

    pub fn clear(&mut self) -> Result<(), TreantError> {
        self.mutate(|members| {
            members.clear();
            Ok(())
        })
    }

    pub fn union(&self, other: &Collection) -> Self {
        self.bundle(self.iter().chain(other.iter()).cloned().collect())
    }

    pub fn intersection(&self, other: &Collection) -> Self {
        self.bundle(self.iter().filter(|m| other.contains(m)).cloned().collect())
    }

    pub fn difference(&self, other: &Collection) -> Self {
        self.bundle(self.iter().filter(|m| !other.contains(m)).cloned().collect())
    }

    pub fn symmetric_difference(&self, other: &Collection) -> Self {
        let left = self.iter().filter(|m| !other.contains(m));
        let right = other.iter().filter(|m| !self.contains(m));
        self.bundle(left.chain(right).cloned().collect())
    }

    pub fn is_subset(&self, other: &Collection) -> bool {
        self.iter().all(|m| other.contains(m))
    }

    pub fn is_superset(&self, other: &Collection) -> bool {
        other.is_subset(self)
    }

    /// Apply `f` to every member with `processes` workers, in member order.
    ///
    /// Returns the non-`None` results, or `None` when every call returned
    /// `None`.
    pub fn map<F, R>(&self, f: F, processes: usize) -> Result<Option<Vec<R>>, TreantError>
    where
        F: Fn(&Member) -> Option<R> + Sync + Send,
        R: Send,
    {
        let results: Vec<R> = concurrency::map_ordered(&self.members, f, processes)?
            .into_iter()
            .flatten()
            .collect();
        Ok(if results.is_empty() { None } else { Some(results) })
    }

    /// Expand Groups into the Treants they contain, recursively.
    pub fn flatten(&self) -> Result<Self, TreantError> {
        self.flatten_excluding(std::iter::empty::<&str>())
    }

    /// Like [`flatten`](Self::flatten), but Groups whose uuid is in `exclude`
    /// are neither expanded nor emitted.
    ///
    /// Each Group is expanded at most once per traversal, which is what stops
    /// a Group that contains itself. Output holds only non-Group members, each
    /// uuid once.
    pub fn flatten_excluding<I, S>(&self, exclude: I) -> Result<Self, TreantError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut visited: HashSet<String> =
            exclude.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut emitted = HashSet::new();
        let mut leaves = Vec::new();

        flatten_into(&self.members, &mut visited, &mut emitted, &mut leaves)?;
        debug!(leaves = leaves.len(), groups = visited.len(), "Flattened collection");
        Ok(self.bundle(leaves))
    }

    pub fn tags(&self) -> AggTags<'_> {
        AggTags::new(self)
    }

    pub fn categories(&self) -> AggCategories<'_> {
        AggCategories::new(self)
    }
}

fn flatten_into(
    members: &[Member],
    visited: &mut HashSet<String>,
    emitted: &mut HashSet<String>,
    leaves: &mut Vec<Member>,
) -> Result<(), TreantError> {
    for member in members {
        match member {
            Member::Group(group) => {
                if visited.insert(group.uuid().to_string()) {
                    let nested = group.members()?;
                    flatten_into(nested.members(), visited, emitted, leaves)?;
                }
            }
            Member::Treant(treant) => {
                if emitted.insert(treant.uuid().to_string()) {
                    leaves.push(member.clone());
                }
            }
        }
    }
    Ok(())
}

impl Index<usize> for Collection {
    type Output = Member;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Combining collections always yields a standalone collection.
impl Add<&Collection> for &Collection {
    type Output = Collection;

    fn add(self, rhs: &Collection) -> Self::Output {
        self.union(rhs)
    }
}

impl Add<&Member> for &Collection {
    type Output = Collection;

    fn add(self, rhs: &Member) -> Self::Output {
        let mut members = self.members.clone();
        push_unique(&mut members, rhs.clone());
        self.bundle(members)
    }
}
