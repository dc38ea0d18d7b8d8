use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use depot_types::Fingerprint;

use crate::error::{StoreError, StoreResult};
use crate::key::KeyName;
use crate::mapping::{KeyMapping, SuffixMapping};
use crate::traits::{ContentStore, Sink, Source};

/// Filesystem-backed content store.
///
/// Keys map to relative paths under a root directory via a [`KeyMapping`];
/// files the mapping does not recognise are invisible, so the store can
/// share a directory with unrelated files.
///
/// Writes and removals are buffered in memory and reach disk on
/// [`synchronise`](ContentStore::synchronise), which also drops the
/// clean-read cache so that entries changed externally are re-read on the
/// next `get`. Reads consult the write buffer first, then the cache, then
/// the medium, so a `get` after `put` observes the new value before any
/// flush. Bytes are cached raw and decoded fresh per `get`; `keys` and
/// `match_keys` return keys sorted by `(id, kind)`.
pub struct DirectoryStore<M = SuffixMapping> {
    root: PathBuf,
    mapping: M,
    state: RwLock<DirState>,
}

#[derive(Default)]
struct DirState {
    /// Buffered mutations awaiting flush. `None` marks a removal.
    pending: BTreeMap<KeyName<String>, Option<Vec<u8>>>,
    /// Raw bytes and fingerprints of entries read from the medium.
    clean: HashMap<KeyName<String>, CachedEntry>,
}

struct CachedEntry {
    bytes: Vec<u8>,
    fingerprint: Fingerprint,
}

impl<M: KeyMapping<String>> DirectoryStore<M> {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>, mapping: M) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            mapping,
            state: RwLock::new(DirState::default()),
        })
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The key mapping in use.
    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    /// Number of buffered writes and removals awaiting `synchronise`.
    pub fn pending_writes(&self) -> usize {
        self.state.read().expect("lock poisoned").pending.len()
    }

    fn path_for(&self, name: &KeyName<String>) -> PathBuf {
        self.root.join(self.mapping.encode(name))
    }

    /// Keys present on the medium, ignoring unmapped files.
    fn scan(&self) -> StoreResult<BTreeSet<KeyName<String>>> {
        let mut found = BTreeSet::new();
        for entry in walkdir::WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| StoreError::Io(io::Error::from(e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walked path is under root");
            // Normalise to `/`-separated identifiers regardless of platform.
            let raw = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if let Some(name) = self.mapping.decode(&raw) {
                found.insert(name);
            }
        }
        Ok(found)
    }

    fn read_from_medium(
        &self,
        state: &mut DirState,
        name: &KeyName<String>,
    ) -> StoreResult<Vec<u8>> {
        match std::fs::read(self.path_for(name)) {
            Ok(bytes) => {
                state.clean.insert(
                    name.clone(),
                    CachedEntry {
                        bytes: bytes.clone(),
                        fingerprint: Fingerprint::of(&bytes),
                    },
                );
                Ok(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<M: KeyMapping<String>> Source<String> for DirectoryStore<M> {
    fn read_raw(&self, name: &KeyName<String>) -> StoreResult<Vec<u8>> {
        let mut state = self.state.write().expect("lock poisoned");
        match state.pending.get(name) {
            Some(Some(bytes)) => return Ok(bytes.clone()),
            Some(None) => return Err(StoreError::NotFound(name.to_string())),
            None => {}
        }
        if let Some(cached) = state.clean.get(name) {
            return Ok(cached.bytes.clone());
        }
        self.read_from_medium(&mut state, name)
    }

    fn keys(&self) -> StoreResult<Vec<KeyName<String>>> {
        let state = self.state.read().expect("lock poisoned");
        let mut found = self.scan()?;
        for (name, op) in &state.pending {
            match op {
                Some(_) => {
                    found.insert(name.clone());
                }
                None => {
                    found.remove(name);
                }
            }
        }
        Ok(found.into_iter().collect())
    }
}

impl<M: KeyMapping<String>> Sink<String> for DirectoryStore<M> {
    fn write_raw(&self, name: KeyName<String>, bytes: Vec<u8>) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        state.clean.remove(&name);
        state.pending.insert(name, Some(bytes));
        Ok(())
    }

    fn remove_raw(&self, name: &KeyName<String>) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        state.clean.remove(name);
        state.pending.insert(name.clone(), None);
        Ok(())
    }
}

impl<M: KeyMapping<String>> ContentStore<String> for DirectoryStore<M> {
    fn synchronise(&self) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        let mut flushed = 0usize;
        while let Some((name, op)) = state.pending.pop_first() {
            let path = self.path_for(&name);
            let result = match &op {
                Some(bytes) => {
                    let parent_ready = match path.parent() {
                        Some(parent) => std::fs::create_dir_all(parent),
                        None => Ok(()),
                    };
                    parent_ready.and_then(|()| std::fs::write(&path, bytes))
                }
                None => match std::fs::remove_file(&path) {
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                    other => other,
                },
            };
            if let Err(e) = result {
                // Keep the failed mutation buffered so visible state still
                // reflects it; the caller may retry synchronise.
                state.pending.insert(name, op);
                return Err(e.into());
            }
            flushed += 1;
        }
        state.clean.clear();
        tracing::debug!(flushed, root = %self.root.display(), "synchronised store");
        Ok(())
    }

    fn fingerprint(&self, name: &KeyName<String>) -> StoreResult<Fingerprint> {
        let mut state = self.state.write().expect("lock poisoned");
        match state.pending.get(name) {
            Some(Some(bytes)) => return Ok(Fingerprint::of(bytes)),
            Some(None) => return Err(StoreError::NotFound(name.to_string())),
            None => {}
        }
        if let Some(cached) = state.clean.get(name) {
            return Ok(cached.fingerprint);
        }
        self.read_from_medium(&mut state, name)?;
        Ok(state.clean[name].fingerprint)
    }
}

impl<M> std::fmt::Debug for DirectoryStore<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().expect("lock poisoned");
        f.debug_struct("DirectoryStore")
            .field("root", &self.root)
            .field("pending", &state.pending.len())
            .field("cached", &state.clean.len())
            .finish()
    }
}
