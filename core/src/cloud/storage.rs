//! Object storage: upload, download and copy single objects.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::ServiceError;

/// A bucketed object store reached through an authenticated handle.
pub trait ObjectStore: Send + Sync {
    fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), ServiceError>;

    /// Fails with `NotFound` when the object does not exist.
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ServiceError>;

    /// Fails with `NotFound` when the source object does not exist.
    fn copy(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> Result<(), ServiceError>;
}

/// Upload `local_dir/key` to `bucket` under `key`.
pub fn upload_file(
    store: &dyn ObjectStore,
    local_dir: &Path,
    key: &str,
    bucket: &str,
) -> Result<(), ServiceError> {
    let path = local_dir.join(checked_name("key", key)?);
    let data = fs::read(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ServiceError::NotFound(path.display().to_string()),
        _ => ServiceError::Io(e),
    })?;
    tracing::debug!(bucket, key, bytes = data.len(), "uploading object");
    store.put(bucket, key, &data)
}

/// Download `key` from `bucket` into `local_dir/key`, creating `local_dir`
/// when needed. Nothing is written locally if the object is missing.
pub fn download_file(
    store: &dyn ObjectStore,
    local_dir: &Path,
    key: &str,
    bucket: &str,
) -> Result<(), ServiceError> {
    let path = local_dir.join(checked_name("key", key)?);
    let data = store.get(bucket, key)?;
    tracing::debug!(bucket, key, bytes = data.len(), "downloaded object");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, data)?;
    Ok(())
}

/// Copy `key` onto itself within `bucket`, refreshing the stored object.
pub fn copy_file(store: &dyn ObjectStore, key: &str, bucket: &str) -> Result<(), ServiceError> {
    checked_name("key", key)?;
    tracing::debug!(bucket, key, "copying object in place");
    store.copy(bucket, key, key)
}

/// Reject empty names and anything that could escape its directory.
fn checked_name<'a>(what: &str, name: &'a str) -> Result<&'a Path, ServiceError> {
    let path = Path::new(name);
    let plain = !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if plain {
        Ok(path)
    } else {
        Err(ServiceError::InvalidInput(format!("{what} {name:?}")))
    }
}

/// Object store on the local filesystem: one directory per bucket under
/// `root`, one file per key.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, ServiceError> {
        Ok(self
            .root
            .join(checked_name("bucket", bucket)?)
            .join(checked_name("key", key)?))
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), ServiceError> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(fs::write(path, data)?)
    }

    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ServiceError> {
        match fs::read(self.object_path(bucket, key)?) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ServiceError::NotFound(format!("{bucket}/{key}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn copy(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> Result<(), ServiceError> {
        let data = self.get(bucket, source_key)?;
        self.put(bucket, dest_key, &data)
    }
}
