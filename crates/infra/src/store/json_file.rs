use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use bookclub_club::Club;
use bookclub_core::{AggregateRoot, CommunityKey};

use super::r#trait::{ClubStore, StoreError, check_revision, decode, encode};

/// Club store backed by one JSON file per community (`<dir>/<key>.json`).
///
/// Writes go to a temporary file that is renamed over the target. A mutex
/// serializes check-then-write within this process; it does not guard against
/// other processes writing the same directory.
#[derive(Debug)]
pub struct JsonFileClubStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileClubStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Io(format!("failed to create {}: {e}", dir.display())))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: CommunityKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read(&self, key: CommunityKey) -> Result<Club, StoreError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(key)),
            Err(e) => return Err(StoreError::Io(format!("failed to read {}: {e}", path.display()))),
        };
        let document =
            serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string()))?;
        decode(document)
    }

    fn write(&self, club: &Club, revision: u64) -> Result<(), StoreError> {
        let document = encode(club, revision)?;
        let body = serde_json::to_vec_pretty(&document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let target = self.path_for(club.key());
        let tmp = self.dir.join(format!(".{}.{}.tmp", club.key(), Uuid::now_v7()));
        let result = fs::write(&tmp, body)
            .map_err(|e| StoreError::Io(format!("failed to write {}: {e}", tmp.display())))
            .and_then(|()| {
                fs::rename(&tmp, &target).map_err(|e| {
                    StoreError::Io(format!("failed to replace {}: {e}", target.display()))
                })
            });
        if result.is_err() {
            // A partial temp file may exist after either step fails.
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl ClubStore for JsonFileClubStore {
    fn load(&self, key: CommunityKey) -> Result<Club, StoreError> {
        self.read(key)
    }

    fn insert(&self, club: &Club) -> Result<u64, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        if self.path_for(club.key()).exists() {
            return Err(StoreError::AlreadyExists(club.key()));
        }
        self.write(club, 1)?;
        Ok(1)
    }

    fn replace(&self, club: &Club) -> Result<u64, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let current = self.read(club.key())?;
        check_revision(club, current.version())?;

        let revision = club.version() + 1;
        self.write(club, revision)?;
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_core::ParticipantId;
    use chrono::Utc;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("bookclub-store-{}", Uuid::now_v7()))
    }

    #[test]
    fn open_creates_directory() {
        let dir = scratch_dir();
        let store = JsonFileClubStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn insert_load_replace_round_trip() {
        let dir = scratch_dir();
        let store = JsonFileClubStore::open(&dir).unwrap();
        let key = CommunityKey::new(-100500);

        assert!(matches!(store.load(key), Err(StoreError::NotFound(_))));
        store.insert(&Club::new(key, Utc::now())).unwrap();

        let mut club = store.load(key).unwrap();
        assert_eq!(club.version(), 1);
        club.add_host(ParticipantId::new(5), "Ana").unwrap();
        let book = club.add_book("Lem", "Solaris");
        club.set_next_book(ParticipantId::new(5), book).unwrap();
        assert_eq!(store.replace(&club).unwrap(), 2);

        let reopened = JsonFileClubStore::open(&dir).unwrap();
        let loaded = reopened.load(key).unwrap();
        assert_eq!(loaded.version(), 2);
        assert_eq!(loaded.host(ParticipantId::new(5)).unwrap().next_book, Some(book));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn stale_replace_is_rejected() {
        let dir = scratch_dir();
        let store = JsonFileClubStore::open(&dir).unwrap();
        let key = CommunityKey::new(3);
        store.insert(&Club::new(key, Utc::now())).unwrap();

        let first = store.load(key).unwrap();
        let second = store.load(key).unwrap();
        store.replace(&first).unwrap();
        assert!(matches!(
            store.replace(&second),
            Err(StoreError::Concurrency { expected: 1, actual: 2 })
        ));
        assert!(matches!(store.insert(&first), Err(StoreError::AlreadyExists(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_write_leaves_no_temp_files() {
        let dir = scratch_dir();
        let store = JsonFileClubStore::open(&dir).unwrap();
        let key = CommunityKey::new(11);
        // A non-empty directory at the target path makes the final rename fail.
        fs::create_dir_all(dir.join("11.json").join("blocker")).unwrap();

        let err = store.write(&Club::new(key, Utc::now()), 1).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));

        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn corrupt_document_is_a_serialization_error() {
        let dir = scratch_dir();
        let store = JsonFileClubStore::open(&dir).unwrap();
        fs::write(dir.join("9.json"), "{ not json").unwrap();
        assert!(matches!(
            store.load(CommunityKey::new(9)),
            Err(StoreError::Serialization(_))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
