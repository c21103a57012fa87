use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    Entry, Result,
    repository::{config::CoreConfig, store::StoreHandle},
};

mod store;

pub mod config;

/// Central access point for all persistent data.
///
/// The [`Repository`] owns the entry file and its in-memory cache. Cloning it is cheap and
/// every clone sees the same entries, so it can be handed to background tasks freely.
#[derive(Clone, Debug)]
pub struct Repository {
    store: StoreHandle,
}

impl Repository {
    /// Open the entry file named by the user's [`CoreConfig`].
    pub fn new() -> Result<Self> {
        let cfg = CoreConfig::load()?;
        Self::open(cfg.data_file().clone())
    }

    /// Open the entry file at `path`. The file is created on the first write if it doesn't
    /// exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Opening entry file {}", path.display());

        Ok(Self {
            store: StoreHandle::load(path)?,
        })
    }

    /// Location of the entry file.
    pub fn path(&self) -> PathBuf {
        self.store.read().path().to_path_buf()
    }

    /// All entries, ordered by id.
    pub fn entries(&self) -> Vec<Entry> {
        self.store.read().entries().cloned().collect()
    }

    /// Entries whose title contains `text`. The match is case-sensitive.
    pub fn find_entries(&self, text: &str) -> Vec<Entry> {
        self.store
            .read()
            .entries()
            .filter(|e| e.title.contains(text))
            .cloned()
            .collect()
    }

    pub fn entry(&self, id: u32) -> Option<Entry> {
        self.store.read().get(id).cloned()
    }

    /// Save a new entry. Its id is replaced with the next free one.
    pub fn create_entry(&self, entry: Entry) -> Result<Entry> {
        let created = self.store.write().insert(entry)?;
        info!("Created entry {}: {}", created.id, created.title);

        Ok(created)
    }

    /// Overwrite the stored entry that shares `entry`'s id.
    ///
    /// Returns `None` when no such entry exists; nothing is written in that case.
    pub fn update_entry(&self, entry: Entry) -> Result<Option<Entry>> {
        let updated = self.store.write().replace(entry)?;
        if let Some(entry) = &updated {
            info!("Updated entry {}", entry.id);
        }

        Ok(updated)
    }

    /// Returns `false` if no entry has `id`.
    pub fn delete_entry(&self, id: u32) -> Result<bool> {
        let deleted = self.store.write().remove(id)?;
        if deleted {
            info!("Deleted entry {id}");
        }

        Ok(deleted)
    }

    /// Perform a backup of the entry file, returning the path of the copy.
    pub fn backup(&self) -> Result<PathBuf> {
        let path = self.store.read().backup()?;
        info!("Backed up entries to {}", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    /// Return a [`Repository`] backed by a file in a fresh temporary directory.
    fn mock() -> (TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::open(dir.path().join("entries.json")).unwrap();

        (dir, repo)
    }

    fn entry(title: &str, artist: &str) -> Entry {
        Entry {
            id: 0,
            title: title.into(),
            artist: artist.into(),
            year: "1977".into(),
            genre: "Rock".into(),
            rating: 4,
            listen_date: "2024-01-01".into(),
            review: "".into(),
            favorite_song: "".into(),
        }
    }

    #[test]
    fn test_create() {
        let (_dir, repo) = mock();

        let first = repo.create_entry(entry("Rumours", "Fleetwood Mac")).unwrap();
        let second = repo.create_entry(entry("Low", "David Bowie")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.entries().len(), 2);
        assert!(repo.path().exists());
    }

    #[test]
    fn test_create_ignores_given_id() {
        let (_dir, repo) = mock();

        let mut new = entry("Rumours", "Fleetwood Mac");
        new.id = 42;

        let created = repo.create_entry(new).unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(repo.entry(42), None);
    }

    #[test]
    fn test_reopen() {
        let (dir, repo) = mock();

        repo.create_entry(entry("Rumours", "Fleetwood Mac")).unwrap();
        repo.create_entry(entry("Low", "David Bowie")).unwrap();
        drop(repo);

        let repo = Repository::open(dir.path().join("entries.json")).unwrap();
        let titles: Vec<String> = repo.entries().into_iter().map(|e| e.title).collect();

        assert_eq!(titles, ["Rumours", "Low"]);
        assert_eq!(
            repo.create_entry(entry("Heroes", "David Bowie")).unwrap().id,
            3
        );
    }

    #[test]
    fn test_next_id_follows_greatest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");

        let mut existing = entry("Kid A", "Radiohead");
        existing.id = 17;
        fs::write(&path, serde_json::to_string(&[existing]).unwrap()).unwrap();

        let repo = Repository::open(&path).unwrap();
        let created = repo.create_entry(entry("Amnesiac", "Radiohead")).unwrap();

        assert_eq!(created.id, 18);
    }

    #[test]
    fn test_entries_ordered_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");

        let mut later = entry("Blue Train", "John Coltrane");
        later.id = 9;
        let mut earlier = entry("Kind of Blue", "Miles Davis");
        earlier.id = 3;
        fs::write(&path, serde_json::to_string(&[later, earlier]).unwrap()).unwrap();

        let repo = Repository::open(&path).unwrap();
        let ids: Vec<u32> = repo.entries().iter().map(|e| e.id).collect();

        assert_eq!(ids, [3, 9]);
    }

    #[test]
    fn test_find() {
        let (_dir, repo) = mock();

        repo.create_entry(entry("Kind of Blue", "Miles Davis")).unwrap();
        repo.create_entry(entry("Blue", "Joni Mitchell")).unwrap();
        repo.create_entry(entry("Low", "David Bowie")).unwrap();

        assert_eq!(repo.find_entries("Blue").len(), 2);
        assert!(repo.find_entries("blue").is_empty());
        assert_eq!(repo.find_entries("").len(), 3);
    }

    #[test]
    fn test_update() {
        let (_dir, repo) = mock();

        let mut stored = repo.create_entry(entry("Low", "David Bowie")).unwrap();
        stored.rating = 5;
        stored.favorite_song = "Warszawa".into();

        let updated = repo.update_entry(stored.clone()).unwrap();

        assert_eq!(updated, Some(stored.clone()));
        assert_eq!(repo.entry(stored.id), Some(stored));
    }

    #[test]
    fn test_update_missing() {
        let (_dir, repo) = mock();

        let mut ghost = entry("Smile", "The Beach Boys");
        ghost.id = 7;

        assert_eq!(repo.update_entry(ghost).unwrap(), None);
        assert!(repo.entries().is_empty());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_delete() {
        let (_dir, repo) = mock();

        let stored = repo.create_entry(entry("Low", "David Bowie")).unwrap();

        assert!(repo.delete_entry(stored.id).unwrap());
        assert!(!repo.delete_entry(stored.id).unwrap());
        assert!(repo.entries().is_empty());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "\n").unwrap();

        let repo = Repository::open(&path).unwrap();

        assert!(repo.entries().is_empty());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "[{\"id\": 1,").unwrap();

        assert!(matches!(Repository::open(&path), Err(Error::Json { .. })));
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");

        let repo = Repository::open(blocker.join("entries.json")).unwrap();

        // The entry file's parent is now a regular file, so every save fails
        fs::write(&blocker, "").unwrap();

        assert!(repo.create_entry(entry("Low", "David Bowie")).is_err());
        assert!(repo.entries().is_empty());

        fs::remove_file(&blocker).unwrap();
        assert_eq!(repo.create_entry(entry("Low", "David Bowie")).unwrap().id, 1);
    }

    #[test]
    fn test_create_after_greatest_id_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");

        let mut existing = entry("Existing", "Someone");
        existing.id = u32::MAX;
        fs::write(&path, serde_json::to_string(&[existing.clone()]).unwrap()).unwrap();

        let repo = Repository::open(&path).unwrap();

        assert!(matches!(
            repo.create_entry(entry("New", "Someone Else")),
            Err(Error::IdsExhausted)
        ));
        assert_eq!(repo.entries(), [existing.clone()]);

        let reopened = Repository::open(&path).unwrap();
        assert_eq!(reopened.entries(), [existing]);
    }

    #[test]
    fn test_save_leaves_only_entry_file() {
        let (dir, repo) = mock();

        repo.create_entry(entry("Low", "David Bowie")).unwrap();
        repo.create_entry(entry("Heroes", "David Bowie")).unwrap();
        repo.delete_entry(1).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["entries.json"]);

        let stored: Vec<Entry> =
            serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().unwrap().title, "Heroes");
    }

    #[test]
    fn test_backups_never_overwrite() {
        let (_dir, repo) = mock();

        repo.create_entry(entry("Low", "David Bowie")).unwrap();

        let first = repo.backup().unwrap();
        let second = repo.backup().unwrap();
        let third = repo.backup().unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
        assert!(first.exists() && second.exists() && third.exists());
    }

    #[test]
    fn test_backup() {
        let (_dir, repo) = mock();

        repo.create_entry(entry("Low", "David Bowie")).unwrap();

        let backup = repo.backup().unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();

        assert!(name.starts_with("entries-"));
        assert!(name.ends_with(".json.bak"));
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            fs::read_to_string(repo.path()).unwrap()
        );
    }
}
