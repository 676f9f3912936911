use std::{
    fs, io,
    path::{Path, PathBuf},
};

use liftlog_domain::StorageError;

use crate::BlobStore;

/// A durable store keeping one JSON file per key in a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Other(err.into())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !Path::exists(&self.dir) {
            fs::create_dir_all(&self.dir).map_err(|err| StorageError::Other(err.into()))?;
        }
        fs::write(self.path(key), value).map_err(|err| StorageError::Other(err.into()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Other(err.into())),
        }
    }
}
