//! Durable key/value storage, where serialized collections are kept between two runs

use std::collections::HashMap;
use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A string-keyed store of string values, that survives the application
pub trait Storage {
    /// Returns the value stored for this key, or `None` if nothing is stored for it.
    ///
    /// An error means the stored value exists but could not be read
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Replace the value stored for this key
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}


/// A storage that keeps every key as a JSON file in a local folder
#[derive(Debug, Clone, PartialEq)]
pub struct FileStorage {
    backing_folder: PathBuf,
}

impl FileStorage {
    /// Use the given folder. It will be created on the first write if it does not exist yet
    pub fn new(folder: &Path) -> Self {
        Self { backing_folder: PathBuf::from(folder) }
    }

    /// The file a key is stored in
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        let file_name = sanitize_filename::sanitize(key) + ".json";
        self.backing_folder.join(file_name)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for_key(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No stored value for {} ({:?})", key, path);
                Ok(None)
            },
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;
        let path = self.path_for_key(key);
        std::fs::write(&path, value)
            .map_err(|err| format!("Unable to write file {:?}: {}", path, err))?;
        Ok(())
    }
}


/// A storage that lives in memory only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


/// Load a JSON array stored under `key`.
///
/// Missing or invalid stored data is logged and results in an empty collection.
/// An error is returned only when the stored data exists but cannot be read at all: in this case, callers should not overwrite it
pub fn load_collection<S, T>(storage: &S, key: &str) -> Result<Vec<T>, Box<dyn Error>>
where
    S: Storage,
    T: DeserializeOwned,
{
    match storage.get_item(key)? {
        None => {
            log::debug!("Nothing stored under {:?}. Starting with an empty list", key);
            Ok(Vec::new())
        },
        Some(content) => match serde_json::from_str::<Vec<T>>(&content) {
            Ok(items) => Ok(items),
            Err(err) => {
                log::warn!("Invalid data stored under {:?}: {}. Starting with an empty list", key, err);
                Ok(Vec::new())
            },
        },
    }
}

/// Store a collection as a JSON array under `key`.
///
/// This is best-effort: failures are only logged
pub fn save_collection<S, T>(storage: &mut S, key: &str, items: &[T])
where
    S: Storage,
    T: Serialize,
{
    let serialized = match serde_json::to_string(items) {
        Err(err) => {
            log::warn!("Unable to serialize data for {:?}: {}", key, err);
            return;
        },
        Ok(s) => s,
    };

    if let Err(err) = storage.set_item(key, &serialized) {
        log::warn!("Unable to save {:?}: {}", key, err);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(&dir.path().join("nested"));

        assert_eq!(storage.get_item("tasks").unwrap(), None);
        storage.set_item("tasks", "[]").unwrap();
        assert_eq!(storage.get_item("tasks").unwrap(), Some("[]".to_string()));
        assert!(dir.path().join("nested").join("tasks.json").exists());
    }

    #[test]
    fn unreadable_files_are_not_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A folder where a file is expected cannot be read as a string
        std::fs::create_dir(storage.path_for_key("tasks")).unwrap();
        assert!(storage.get_item("tasks").is_err());
        assert!(load_collection::<_, i32>(&storage, "tasks").is_err());
    }

    #[test]
    fn keys_are_sanitized() {
        let storage = FileStorage::new(Path::new("/tmp/somewhere"));
        let path = storage.path_for_key("../../etc/passwd");
        assert_eq!(path.parent(), Some(Path::new("/tmp/somewhere")));
    }

    #[test]
    fn memory_storage() {
        let mut storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), Some("2".to_string()));
        assert_eq!(storage.get_item("b").unwrap(), None);
    }

    #[test]
    fn collections() {
        let mut storage = MemoryStorage::new();
        save_collection(&mut storage, "numbers", &[1, 2, 3]);
        assert_eq!(load_collection::<_, i32>(&storage, "numbers").unwrap(), vec![1, 2, 3]);
        assert!(load_collection::<_, i32>(&storage, "missing").unwrap().is_empty());

        storage.set_item("broken", "[1, 2,").unwrap();
        assert!(load_collection::<_, i32>(&storage, "broken").unwrap().is_empty());
    }
}
