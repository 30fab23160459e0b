//! Workspace: where Treants are discovered
//!
//! A workspace couples a root directory with the registry of known Treant
//! types. It resolves names and glob patterns to Treants found below the
//! root, and rebuilds members from persisted records.

use crate::collection::Collection;
use crate::error::TreantError;
use crate::store::{parse_statefile_name, MemberRecord};
use crate::treant::{Group, Member, Treant, TreantInit, TreantRegistry};
use globset::Glob;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Discovery walk configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Maximum walk depth below the root (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links (default: false)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Directory names never descended into
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        ".git".to_string(),
        "target".to_string(),
        "node_modules".to_string(),
    ]
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_symlinks: false,
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    registry: TreantRegistry,
    discovery: DiscoveryConfig,
}

impl Workspace {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            root: dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()),
            registry: TreantRegistry::default(),
            discovery: DiscoveryConfig::default(),
        }
    }

    /// Workspace rooted at the current working directory.
    pub fn current() -> Result<Self, TreantError> {
        let cwd = std::env::current_dir().map_err(|e| TreantError::store(".", e))?;
        Ok(Self::new(cwd))
    }

    pub fn from_config<P: AsRef<Path>>(root: P, config: &crate::config::ArborConfig) -> Self {
        Self::new(root).with_discovery(config.discovery.clone())
    }

    pub fn with_registry(mut self, registry: TreantRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &TreantRegistry {
        &self.registry
    }

    pub fn discovery(&self) -> &DiscoveryConfig {
        &self.discovery
    }

    /// Every state file of a registered type below the root, sorted by path.
    pub fn statefiles(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.root)
            .follow_links(self.discovery.follow_symlinks)
            .max_depth(self.discovery.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name();

        let mut found = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| !self.should_ignore(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry during discovery");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let registered = parse_statefile_name(entry.path())
                .map(|(treanttype, _)| self.registry.contains(&treanttype))
                .unwrap_or(false);
            if registered {
                found.push(entry.into_path());
            }
        }

        found.sort();
        found
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.discovery
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }

    /// Members below the root whose name matches `pattern`.
    ///
    /// Every string is treated as a glob; a plain name is a glob without
    /// metacharacters and matches only itself.
    pub fn discover(self: &Arc<Self>, pattern: &str) -> Result<Vec<Member>, TreantError> {
        let matcher = Glob::new(pattern)?.compile_matcher();

        let mut members = Vec::new();
        for path in self.statefiles() {
            let treant = Treant::from_statefile(path)?;
            if matcher.is_match(treant.name()) {
                members.push(self.registry.construct(treant, self)?);
            }
        }
        debug!(pattern, matched = members.len(), "Discovered treants");
        Ok(members)
    }

    /// Locate the state file of the Treant with `uuid` below the root.
    pub fn find_by_uuid(&self, uuid: &str) -> Option<PathBuf> {
        self.statefiles().into_iter().find(|path| {
            parse_statefile_name(path)
                .map(|(_, found)| found == uuid)
                .unwrap_or(false)
        })
    }

    /// Rebuild a member from a persisted record. A record whose state file
    /// has moved is re-resolved by uuid below the root.
    pub fn regenerate(self: &Arc<Self>, record: &MemberRecord) -> Result<Member, TreantError> {
        let mut path = record.statefile.clone();
        if !path.is_file() {
            if let Some(moved) = self.find_by_uuid(&record.uuid) {
                debug!(uuid = %record.uuid, path = %moved.display(), "Re-resolved moved member");
                path = moved;
            }
        }
        let treant = Treant::from_statefile(path)?;
        self.registry.construct(treant, self)
    }

    /// Regenerate or generate the Treant named `name` directly below the root.
    pub fn treant(&self, name: &str) -> Result<Treant, TreantError> {
        Treant::new(self.root.join(name))
    }

    /// Regenerate or generate the Group named `name` directly below the root.
    pub fn group(self: &Arc<Self>, name: &str) -> Result<Group, TreantError> {
        Group::init_in(self.root.join(name), TreantInit::default(), Arc::clone(self))
    }

    /// An empty standalone collection resolving names in this workspace.
    pub fn bundle(self: &Arc<Self>) -> Collection {
        Collection::new(Arc::clone(self))
    }
}
