//! Uniform view over Treants and Groups.

use crate::store::{MemberRecord, StateFile};
use crate::treant::{Categories, Group, Tags, Treant};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Anything that can be a member of a collection.
///
/// Equality, ordering and hashing follow the underlying Treant: name, then uuid.
#[derive(Debug, Clone)]
pub enum Member {
    Treant(Treant),
    Group(Group),
}

impl Member {
    pub fn treant(&self) -> &Treant {
        match self {
            Member::Treant(t) => t,
            Member::Group(g) => g.as_treant(),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Member::Group(g) => Some(g),
            Member::Treant(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Member::Group(_))
    }

    pub fn name(&self) -> &str {
        self.treant().name()
    }

    pub fn uuid(&self) -> &str {
        self.treant().uuid()
    }

    pub fn treanttype(&self) -> &str {
        self.treant().treanttype()
    }

    pub fn path(&self) -> &Path {
        self.treant().path()
    }

    pub fn statefile(&self) -> &StateFile {
        self.treant().statefile()
    }

    pub fn tags(&self) -> Tags<'_> {
        self.treant().tags()
    }

    pub fn categories(&self) -> Categories<'_> {
        self.treant().categories()
    }

    pub fn record(&self) -> MemberRecord {
        MemberRecord {
            uuid: self.uuid().to_string(),
            name: self.name().to_string(),
            treanttype: self.treanttype().to_string(),
            statefile: self.statefile().path().to_path_buf(),
        }
    }
}

impl From<Treant> for Member {
    fn from(treant: Treant) -> Self {
        Member::Treant(treant)
    }
}

impl From<&Treant> for Member {
    fn from(treant: &Treant) -> Self {
        Member::Treant(treant.clone())
    }
}

impl From<Group> for Member {
    fn from(group: Group) -> Self {
        Member::Group(group)
    }
}

impl From<&Group> for Member {
    fn from(group: &Group) -> Self {
        Member::Group(group.clone())
    }
}

impl From<&Member> for Member {
    fn from(member: &Member) -> Self {
        member.clone()
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.treant() == other.treant()
    }
}

impl Eq for Member {}

impl PartialEq<Treant> for Member {
    fn eq(&self, other: &Treant) -> bool {
        self.treant() == other
    }
}

impl PartialEq<Group> for Member {
    fn eq(&self, other: &Group) -> bool {
        self.treant() == other.as_treant()
    }
}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.treant().hash(state);
    }
}

impl Ord for Member {
    fn cmp(&self, other: &Self) -> Ordering {
        self.treant().cmp(other.treant())
    }
}

impl PartialOrd for Member {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.treant(), f)
    }
}
