//! Flexible addressing of members for `add` and `remove`.

use crate::collection::Collection;
use crate::error::TreantError;
use crate::treant::{Group, Member, Treant};
use crate::workspace::Workspace;
use globset::Glob;
use std::collections::BTreeSet;
use std::sync::Arc;

/// What can be added to a collection: members, names or glob patterns
/// resolved in the collection's workspace, or nested lists of these.
#[derive(Debug, Clone)]
pub enum Addable {
    Member(Member),
    Pattern(String),
    Many(Vec<Addable>),
}

impl Addable {
    /// Flatten into members in argument order, resolving patterns.
    pub(crate) fn resolve(
        self,
        workspace: &Arc<Workspace>,
        out: &mut Vec<Member>,
    ) -> Result<(), TreantError> {
        match self {
            Addable::Member(member) => out.push(member),
            Addable::Pattern(pattern) => out.extend(workspace.discover(&pattern)?),
            Addable::Many(items) => {
                for item in items {
                    item.resolve(workspace, out)?;
                }
            }
        }
        Ok(())
    }
}

/// What can be removed from a collection: members, positions (negative
/// counts from the end), names or glob patterns, or nested lists of these.
/// Selectors that match nothing, out-of-range positions included, are ignored.
#[derive(Debug, Clone)]
pub enum Removable {
    Member(Member),
    Index(isize),
    Pattern(String),
    Many(Vec<Removable>),
}

impl Removable {
    /// Collect the positions in `members` this selector refers to.
    pub(crate) fn positions(
        &self,
        members: &[Member],
        out: &mut BTreeSet<usize>,
    ) -> Result<(), TreantError> {
        match self {
            Removable::Member(target) => {
                out.extend(
                    members
                        .iter()
                        .enumerate()
                        .filter(|(_, m)| *m == target)
                        .map(|(i, _)| i),
                );
            }
            Removable::Index(index) => {
                // Out-of-range positions match nothing
                out.extend(resolve_index(*index, members.len()));
            }
            Removable::Pattern(pattern) => {
                let matcher = Glob::new(pattern)?.compile_matcher();
                out.extend(
                    members
                        .iter()
                        .enumerate()
                        .filter(|(_, m)| matcher.is_match(m.name()))
                        .map(|(i, _)| i),
                );
            }
            Removable::Many(items) => {
                for item in items {
                    item.positions(members, out)?;
                }
            }
        }
        Ok(())
    }
}

/// Map a possibly negative index onto `0..len`.
pub(crate) fn resolve_index(index: isize, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    (resolved < len).then_some(resolved)
}

macro_rules! member_conversions {
    ($target:ident) => {
        impl From<Member> for $target {
            fn from(member: Member) -> Self {
                $target::Member(member)
            }
        }

        impl From<&Member> for $target {
            fn from(member: &Member) -> Self {
                $target::Member(member.clone())
            }
        }

        impl From<Treant> for $target {
            fn from(treant: Treant) -> Self {
                $target::Member(treant.into())
            }
        }

        impl From<&Treant> for $target {
            fn from(treant: &Treant) -> Self {
                $target::Member(treant.into())
            }
        }

        impl From<Group> for $target {
            fn from(group: Group) -> Self {
                $target::Member(group.into())
            }
        }

        impl From<&Group> for $target {
            fn from(group: &Group) -> Self {
                $target::Member(group.into())
            }
        }

        impl From<&str> for $target {
            fn from(pattern: &str) -> Self {
                $target::Pattern(pattern.to_string())
            }
        }

        impl From<String> for $target {
            fn from(pattern: String) -> Self {
                $target::Pattern(pattern)
            }
        }

        impl<T: Into<$target>> From<Vec<T>> for $target {
            fn from(items: Vec<T>) -> Self {
                $target::Many(items.into_iter().map(Into::into).collect())
            }
        }

        impl<T: Into<$target>, const N: usize> From<[T; N]> for $target {
            fn from(items: [T; N]) -> Self {
                $target::Many(items.into_iter().map(Into::into).collect())
            }
        }

        impl From<&Collection> for $target {
            fn from(collection: &Collection) -> Self {
                $target::Many(collection.iter().cloned().map($target::Member).collect())
            }
        }
    };
}

member_conversions!(Addable);
member_conversions!(Removable);

impl From<isize> for Removable {
    fn from(index: isize) -> Self {
        Removable::Index(index)
    }
}

impl From<i32> for Removable {
    fn from(index: i32) -> Self {
        Removable::Index(index as isize)
    }
}

impl From<usize> for Removable {
    fn from(index: usize) -> Self {
        Removable::Index(index as isize)
    }
}
