//! Treant type registry
//!
//! Maps the type tag stored in a state file name to the constructor that
//! rebuilds the right [`Member`] variant. A registry is owned by a
//! [`Workspace`](crate::workspace::Workspace) rather than living in global
//! state, so different workspaces may know different types.

use crate::error::TreantError;
use crate::treant::{Group, Member, Treant, GROUP_TYPE, TREANT_TYPE};
use crate::workspace::Workspace;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Rebuilds a member from its state file handle.
pub type MemberConstructor = fn(Treant, &Arc<Workspace>) -> Member;

fn leaf(treant: Treant, _workspace: &Arc<Workspace>) -> Member {
    Member::Treant(treant)
}

fn group(treant: Treant, workspace: &Arc<Workspace>) -> Member {
    Member::Group(Group::from_treant(treant, Arc::clone(workspace)))
}

#[derive(Clone)]
pub struct TreantRegistry {
    constructors: BTreeMap<String, MemberConstructor>,
}

impl TreantRegistry {
    /// A registry that knows no types at all.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register a constructor for `treanttype`, replacing any previous one.
    pub fn register(&mut self, treanttype: impl Into<String>, constructor: MemberConstructor) {
        self.constructors.insert(treanttype.into(), constructor);
    }

    /// Register `treanttype` as another kind of leaf Treant.
    pub fn register_leaf(&mut self, treanttype: impl Into<String>) {
        self.register(treanttype, leaf);
    }

    pub fn contains(&self, treanttype: &str) -> bool {
        self.constructors.contains_key(treanttype)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn construct(
        &self,
        treant: Treant,
        workspace: &Arc<Workspace>,
    ) -> Result<Member, TreantError> {
        let constructor = self
            .constructors
            .get(treant.treanttype())
            .ok_or_else(|| TreantError::UnknownTreantType(treant.treanttype().to_string()))?;
        Ok(constructor(treant, workspace))
    }
}

impl Default for TreantRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(TREANT_TYPE, leaf);
        registry.register(GROUP_TYPE, group);
        registry
    }
}

impl fmt::Debug for TreantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}
