use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use derive_more::Deref;
use parking_lot::RwLock;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Entry, Error, Result};

/// Shared handle to the loaded [`Store`].
#[derive(Debug, Clone, Deref)]
pub(crate) struct StoreHandle {
    #[deref]
    store: Arc<RwLock<Store>>,
}

impl StoreHandle {
    pub fn load(path: PathBuf) -> Result<Self> {
        Ok(Self {
            store: Arc::new(RwLock::new(Store::load(path)?)),
        })
    }
}

/// In-memory cache of the entry file.
///
/// Entries are kept ordered by id. Every mutation writes the whole collection back to disk
/// and is undone if that write fails.
#[derive(Debug)]
pub(crate) struct Store {
    path: PathBuf,
    entries: BTreeMap<u32, Entry>,
    /// Id handed to the next created entry, `None` once `u32::MAX` is taken
    next_id: Option<u32>,
}

impl Store {
    /// Load entries from `path`. A missing or blank file is an empty store.
    fn load(path: PathBuf) -> Result<Self> {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::io(path, e)),
        };

        let list: Vec<Entry> = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&contents).map_err(|source| Error::Json {
                path: path.clone(),
                source,
            })?
        };

        let entries: BTreeMap<u32, Entry> = list.into_iter().map(|e| (e.id, e)).collect();
        let next_id = match entries.last_key_value() {
            Some((id, _)) => id.checked_add(1),
            None => Some(1),
        };

        debug!(
            "Loaded {} entries from {}",
            entries.len(),
            path.display()
        );

        Ok(Self {
            path,
            entries,
            next_id,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn get(&self, id: u32) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Store `entry` under a freshly assigned id, ignoring the one it carries.
    pub fn insert(&mut self, mut entry: Entry) -> Result<Entry> {
        let id = self.next_id.ok_or(Error::IdsExhausted)?;
        if self.entries.contains_key(&id) {
            return Err(Error::IdTaken(id));
        }
        entry.id = id;

        let previous_next_id = self.next_id;
        self.entries.insert(id, entry.clone());
        self.next_id = id.checked_add(1);

        if let Err(err) = self.save() {
            self.entries.remove(&id);
            self.next_id = previous_next_id;
            return Err(err);
        }

        Ok(entry)
    }

    /// Replace the entry with the same id. Returns `None` if there isn't one.
    pub fn replace(&mut self, entry: Entry) -> Result<Option<Entry>> {
        let Some(slot) = self.entries.get_mut(&entry.id) else {
            return Ok(None);
        };

        let previous = std::mem::replace(slot, entry.clone());

        if let Err(err) = self.save() {
            self.entries.insert(previous.id, previous);
            return Err(err);
        }

        Ok(Some(entry))
    }

    /// Remove the entry with `id`. Returns `false` if there isn't one.
    pub fn remove(&mut self, id: u32) -> Result<bool> {
        let Some(removed) = self.entries.remove(&id) else {
            return Ok(false);
        };

        if let Err(err) = self.save() {
            self.entries.insert(id, removed);
            return Err(err);
        }

        Ok(true)
    }

    /// Write the entries to disk as a JSON array.
    ///
    /// The array goes to a temporary file beside the entry file, which then replaces it, so
    /// an interrupted write leaves the previous contents intact.
    pub fn save(&self) -> Result<()> {
        let list: Vec<&Entry> = self.entries.values().collect();
        let contents = serde_json::to_string_pretty(&list).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        let mut file = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| Error::io(file.path(), e))?;
        file.persist(&self.path).map_err(|e| Error::io(&self.path, e.error))?;

        debug!(
            "Saved {} entries to {}",
            self.entries.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Copy the entry file next to itself with a timestamped name. An existing backup is never
    /// overwritten; a numeric suffix is added instead.
    pub fn backup(&self) -> Result<PathBuf> {
        if !self.path.exists() {
            self.save()?;
        }

        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "entries".into(), |s| s.to_string_lossy());

        let mut backup = self.path.with_file_name(format!("{stem}-{timestamp}.json.bak"));
        let mut suffix: u32 = 1;
        while backup.exists() {
            backup = self
                .path
                .with_file_name(format!("{stem}-{timestamp}-{suffix}.json.bak"));
            suffix = suffix.saturating_add(1);
        }

        fs::copy(&self.path, &backup).map_err(|e| Error::io(&backup, e))?;

        Ok(backup)
    }
}
