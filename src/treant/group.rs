//! Groups: Treants that hold a persisted collection of members.

use crate::collection::Collection;
use crate::error::TreantError;
use crate::treant::{Treant, TreantInit};
use crate::workspace::Workspace;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

/// Type tag of Groups
pub const GROUP_TYPE: &str = "Group";

/// A Treant whose state records a collection of member Treants and Groups.
///
/// Members are stored as records in the Group's own state file, so a Group
/// may list itself, directly or through other Groups, without creating an
/// ownership cycle in memory. Names given to `members().add(..)` are resolved
/// against the Group's workspace.
#[derive(Debug, Clone)]
pub struct Group {
    treant: Treant,
    workspace: Arc<Workspace>,
}

impl Group {
    /// Regenerate or generate a Group at `dir`, resolving member names from
    /// the current directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, TreantError> {
        Self::init(dir, TreantInit::default())
    }

    pub fn init<P: AsRef<Path>>(dir: P, init: TreantInit) -> Result<Self, TreantError> {
        let workspace = Arc::new(Workspace::current()?);
        Self::init_in(dir, init, workspace)
    }

    /// Regenerate or generate a Group bound to `workspace`.
    pub fn init_in<P: AsRef<Path>>(
        dir: P,
        init: TreantInit,
        workspace: Arc<Workspace>,
    ) -> Result<Self, TreantError> {
        let treant = Treant::init_typed(dir.as_ref(), GROUP_TYPE, &init)?;
        Ok(Self::from_treant(treant, workspace))
    }

    /// Regenerate an existing Group from its directory or state file.
    pub fn open<P: AsRef<Path>>(path: P, workspace: Arc<Workspace>) -> Result<Self, TreantError> {
        Ok(Self::from_treant(Treant::open(path)?, workspace))
    }

    pub(crate) fn from_treant(treant: Treant, workspace: Arc<Workspace>) -> Self {
        Self { treant, workspace }
    }

    pub fn as_treant(&self) -> &Treant {
        &self.treant
    }

    pub fn into_treant(self) -> Treant {
        self.treant
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    /// The Group's members, read fresh from its state file. Mutations of the
    /// returned collection are written back to the Group.
    pub fn members(&self) -> Result<Collection, TreantError> {
        Collection::of_group(self)
    }
}

impl Deref for Group {
    type Target = Treant;

    fn deref(&self) -> &Self::Target {
        &self.treant
    }
}

impl DerefMut for Group {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.treant
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.treant == other.treant
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.treant.hash(state);
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.treant, f)
    }
}
