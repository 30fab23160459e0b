//! Treants: directories carrying a persisted state file
//!
//! A [`Treant`] is a directory holding one state file named
//! `<treanttype>.<uuid>.json`. Its name is the directory name; its uuid is the
//! immutable identity. A [`Group`] is a Treant whose state also records a
//! collection of member Treants. [`Member`] is the uniform view over both.

pub mod group;
pub mod limbs;
pub mod member;
pub mod registry;

pub use group::{Group, GROUP_TYPE};
pub use limbs::{Categories, Tags};
pub use member::Member;
pub use registry::{MemberConstructor, TreantRegistry};

use crate::category::CategoryMap;
use crate::error::TreantError;
use crate::store::{parse_statefile_name, statefile_name, statefiles_in, StateFile, TreantState};
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Type tag of plain Treants
pub const TREANT_TYPE: &str = "Treant";

/// Options for generating or regenerating a Treant.
#[derive(Debug, Clone, Default)]
pub struct TreantInit {
    /// Generate a new Treant even if one already exists at the path
    pub new: bool,
    /// Tags to seed
    pub tags: Vec<String>,
    /// Categories to seed
    pub categories: CategoryMap,
}

impl TreantInit {
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn category(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::CategoryValue>,
    ) -> Self {
        self.categories.insert(key.into(), value.into());
        self
    }

    pub fn force_new(mut self) -> Self {
        self.new = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.categories.is_empty()
    }
}

/// A directory with a persisted state file.
#[derive(Debug, Clone)]
pub struct Treant {
    statefile: StateFile,
    name: String,
    uuid: String,
    treanttype: String,
}

impl Treant {
    /// Regenerate the Treant at `dir` if one exists there, otherwise generate
    /// a new one.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, TreantError> {
        Self::init(dir, TreantInit::default())
    }

    pub fn init<P: AsRef<Path>>(dir: P, init: TreantInit) -> Result<Self, TreantError> {
        Self::init_typed(dir.as_ref(), TREANT_TYPE, &init)
    }

    pub(crate) fn init_typed(
        path: &Path,
        treanttype: &str,
        init: &TreantInit,
    ) -> Result<Self, TreantError> {
        if init.new {
            return Self::generate(path, treanttype, init);
        }

        match Self::open(path) {
            Ok(treant) => {
                treant.seed(init)?;
                Ok(treant)
            }
            Err(TreantError::MemberNotFound(_)) => Self::generate(path, treanttype, init),
            Err(e) => Err(e),
        }
    }

    /// Regenerate an existing Treant from its directory or its state file.
    ///
    /// A directory must hold exactly one state file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TreantError> {
        let path = path.as_ref();

        if path.is_dir() {
            let mut found = statefiles_in(path)?;
            match found.len() {
                0 => Err(TreantError::MemberNotFound(path.to_path_buf())),
                1 => Self::from_existing(&found.remove(0)),
                count => Err(TreantError::AmbiguousMember {
                    path: path.to_path_buf(),
                    count,
                }),
            }
        } else if path.is_file() {
            Self::from_existing(path)
        } else {
            Err(TreantError::MemberNotFound(path.to_path_buf()))
        }
    }

    fn from_existing(statefile: &Path) -> Result<Self, TreantError> {
        let canonical =
            dunce::canonicalize(statefile).map_err(|e| TreantError::store(statefile, e))?;
        Self::from_statefile(canonical)
    }

    /// Build a handle from a state file path without touching the filesystem.
    pub fn from_statefile<P: Into<PathBuf>>(path: P) -> Result<Self, TreantError> {
        let path = path.into();
        let (treanttype, uuid) = parse_statefile_name(&path)
            .ok_or_else(|| TreantError::InvalidStateFile(path.clone()))?;
        let name = path
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| TreantError::InvalidStateFile(path.clone()))?;

        Ok(Self {
            statefile: StateFile::new(path),
            name,
            uuid,
            treanttype,
        })
    }

    fn generate(dir: &Path, treanttype: &str, init: &TreantInit) -> Result<Self, TreantError> {
        fs::create_dir_all(dir).map_err(|e| TreantError::store(dir, e))?;
        let dir = dunce::canonicalize(dir).map_err(|e| TreantError::store(dir, e))?;

        let uuid = Uuid::new_v4().to_string();
        let state = TreantState {
            tags: init.tags.iter().cloned().collect(),
            categories: init.categories.clone(),
            members: Vec::new(),
        };
        let statefile = StateFile::create(dir.join(statefile_name(treanttype, &uuid)), &state)?;

        info!(treanttype, uuid = %uuid, path = %dir.display(), "Generated treant");
        Self::from_statefile(statefile.path().to_path_buf())
    }

    /// Merge seed tags and categories into an existing Treant. An unwritable
    /// store is tolerated so read-only Treants can still be loaded.
    fn seed(&self, init: &TreantInit) -> Result<(), TreantError> {
        if init.is_empty() {
            return Ok(());
        }
        let result = self.statefile.update(|state| {
            state.tags.extend(init.tags.iter().cloned());
            state
                .categories
                .extend(init.categories.iter().map(|(k, v)| (k.clone(), v.clone())));
        });
        match result {
            Err(e) if e.is_store_unavailable() => {
                warn!(
                    treant = %self.name,
                    error = %e,
                    "Could not seed tags/categories; loading read-only"
                );
                Ok(())
            }
            other => other,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn treanttype(&self) -> &str {
        &self.treanttype
    }

    /// The Treant's directory.
    pub fn path(&self) -> &Path {
        self.statefile.dir()
    }

    pub fn statefile(&self) -> &StateFile {
        &self.statefile
    }

    /// Snapshot of the persisted state.
    pub fn state(&self) -> Result<TreantState, TreantError> {
        self.statefile.view(|state| state.clone())
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(&self.statefile)
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(&self.statefile)
    }

    /// Rename the Treant by renaming its directory within the same parent.
    pub fn rename(&mut self, name: &str) -> Result<(), TreantError> {
        let parent = self.path().parent().map(Path::to_path_buf).unwrap_or_default();
        self.move_dir(parent.join(name))
    }

    /// Move the Treant's directory under `location`, keeping its name.
    pub fn relocate<P: AsRef<Path>>(&mut self, location: P) -> Result<(), TreantError> {
        let location = location.as_ref();
        fs::create_dir_all(location).map_err(|e| TreantError::store(location, e))?;
        let target = location.join(&self.name);
        self.move_dir(target)
    }

    fn move_dir(&mut self, target: PathBuf) -> Result<(), TreantError> {
        let source = self.path().to_path_buf();
        fs::rename(&source, &target).map_err(|e| TreantError::store(&target, e))?;

        let file_name = statefile_name(&self.treanttype, &self.uuid);
        *self = Self::from_existing(&target.join(file_name))?;
        info!(from = %source.display(), to = %self.path().display(), "Moved treant");
        Ok(())
    }

    fn identity(&self) -> String {
        format!("{}{}", self.name, self.uuid)
    }
}

impl PartialEq for Treant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.uuid == other.uuid
    }
}

impl Eq for Treant {}

impl Hash for Treant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl Ord for Treant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl PartialOrd for Treant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Treant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: '{}'>", self.treanttype, self.name)
    }
}
