//! Treant state store
//!
//! Every Treant persists its tags, categories and (for Groups) member records
//! in a single JSON state file inside its directory. All access goes through
//! scoped transactions: [`StateFile::read`] hands out a shared [`ReadTxn`],
//! [`StateFile::write`] an exclusive [`WriteTxn`] that persists only on
//! [`WriteTxn::commit`]. Locks are released when the transaction is dropped,
//! whatever the exit path.

pub mod naming;
pub mod persistence;

pub use naming::{parse_statefile_name, statefile_name, statefiles_in, STATEFILE_EXT};

use crate::category::CategoryMap;
use crate::error::TreantError;
use parking_lot::{ArcRwLockReadGuard, ArcRwLockWriteGuard, Mutex, RawRwLock, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

/// Persisted reference to a member of a Group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub uuid: String,
    pub name: String,
    pub treanttype: String,
    /// Absolute path of the member's state file
    pub statefile: PathBuf,
}

/// Contents of a state file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreantState {
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub categories: CategoryMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberRecord>,
}

/// Process-wide lock table, one lock per state file path.
static LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<RwLock<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn lock_for(path: &Path) -> Arc<RwLock<()>> {
    LOCKS
        .lock()
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(RwLock::new(())))
        .clone()
}

/// Drop the table entry for `path` once no transaction holds or awaits it.
fn release(path: &Path) {
    let mut locks = LOCKS.lock();
    if locks.get(path).is_some_and(|lock| Arc::strong_count(lock) == 1) {
        locks.remove(path);
    }
}

/// A held lock from the table; releases the guard, then prunes the entry.
struct Held<G> {
    guard: Option<G>,
    path: PathBuf,
}

impl<G> Held<G> {
    fn new(guard: G, path: &Path) -> Self {
        Self {
            guard: Some(guard),
            path: path.to_path_buf(),
        }
    }
}

impl<G> Drop for Held<G> {
    fn drop(&mut self) {
        drop(self.guard.take());
        release(&self.path);
    }
}

/// Handle to a Treant's state file. Cheap to clone; does no I/O until a
/// transaction is opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Create a new state file holding `state`. Parent directories are created
    /// as needed; an existing file at `path` is left untouched.
    pub fn create<P: Into<PathBuf>>(path: P, state: &TreantState) -> Result<Self, TreantError> {
        let statefile = Self::new(path);
        let _held = Held::new(lock_for(&statefile.path).write_arc(), &statefile.path);
        persistence::create_state(&statefile.path, state)?;
        Ok(statefile)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the state file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Open a shared read transaction.
    pub fn read(&self) -> Result<ReadTxn, TreantError> {
        let held = Held::new(lock_for(&self.path).read_arc(), &self.path);
        let state = persistence::load_state(&self.path)?;
        Ok(ReadTxn { _held: held, state })
    }

    /// Open an exclusive write transaction.
    pub fn write(&self) -> Result<WriteTxn, TreantError> {
        let held = Held::new(lock_for(&self.path).write_arc(), &self.path);
        let state = persistence::load_state(&self.path)?;
        Ok(WriteTxn {
            _held: held,
            path: self.path.clone(),
            state,
        })
    }

    /// Run `f` against the current state inside a read transaction.
    pub fn view<R>(&self, f: impl FnOnce(&TreantState) -> R) -> Result<R, TreantError> {
        let txn = self.read()?;
        Ok(f(&txn))
    }

    /// Run `f` against the state inside a write transaction and commit.
    pub fn update<R>(&self, f: impl FnOnce(&mut TreantState) -> R) -> Result<R, TreantError> {
        let mut txn = self.write()?;
        let out = f(&mut txn);
        txn.commit()?;
        Ok(out)
    }
}

/// Shared, read-only view of a state file.
pub struct ReadTxn {
    _held: Held<ArcRwLockReadGuard<RawRwLock, ()>>,
    state: TreantState,
}

impl Deref for ReadTxn {
    type Target = TreantState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

/// Exclusive view of a state file. Changes are discarded unless committed.
pub struct WriteTxn {
    _held: Held<ArcRwLockWriteGuard<RawRwLock, ()>>,
    path: PathBuf,
    state: TreantState,
}

impl WriteTxn {
    /// Persist the modified state and release the lock.
    pub fn commit(self) -> Result<(), TreantError> {
        persistence::save_state(&self.path, &self.state)
    }
}

impl Deref for WriteTxn {
    type Target = TreantState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for WriteTxn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}
