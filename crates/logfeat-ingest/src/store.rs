//! Object store access.
//!
//! The pipeline reads log exports out of a bucket-addressed store. The
//! [`ObjectStore`] trait keeps the pipeline independent of where the bytes
//! live; [`FsObjectStore`] maps buckets onto a local directory tree and
//! [`MemoryObjectStore`] backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// Metadata for one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Key relative to the bucket, `/`-separated.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
}

/// Read-side interface to the bucket holding log exports.
pub trait ObjectStore {
    /// Fetches the full contents of `bucket/key`.
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Lists objects in `bucket` whose keys start with `prefix`, sorted by
    /// key. An empty prefix lists the whole bucket.
    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError>;
}

/// Object store backed by a local directory tree laid out as `root/bucket/key`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }
}

impl ObjectStore for FsObjectStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let dir = self.bucket_dir(bucket);
        if !dir.is_dir() {
            return Err(StoreError::bucket_not_found(bucket));
        }
        let path = dir.join(key);
        if !path.is_file() {
            return Err(StoreError::object_not_found(bucket, key));
        }
        debug!(bucket, key, "fetching object");
        fs::read(&path).map_err(|source| StoreError::Read {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source,
        })
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError> {
        let dir = self.bucket_dir(bucket);
        if !dir.is_dir() {
            return Err(StoreError::bucket_not_found(bucket));
        }
        let mut objects = Vec::new();
        collect_objects(&dir, &dir, bucket, &mut objects)?;
        objects.retain(|meta| meta.key.starts_with(prefix));
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(bucket, prefix, count = objects.len(), "listed objects");
        Ok(objects)
    }
}

fn collect_objects(
    root: &Path,
    dir: &Path,
    bucket: &str,
    out: &mut Vec<ObjectMeta>,
) -> Result<(), StoreError> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::List {
        bucket: bucket.to_string(),
        source,
    })?;
    for entry_result in entries {
        let entry = entry_result.map_err(|source| StoreError::List {
            bucket: bucket.to_string(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_objects(root, &path, bucket, out)?;
            continue;
        }
        // Skip entries whose names do not survive the key encoding.
        let Some(key) = relative_key(root, &path) else {
            continue;
        };
        let metadata = entry.metadata().map_err(|source| StoreError::List {
            bucket: bucket.to_string(),
            source,
        })?;
        out.push(ObjectMeta {
            key,
            size: metadata.len(),
        });
    }
    Ok(())
}

fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("/"))
}

/// In-memory object store for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct MemoryObjectStore {
    objects: BTreeMap<(String, String), Vec<u8>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object, replacing any previous contents under the key.
    pub fn put_object(
        &mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) {
        self.objects
            .insert((bucket.into(), key.into()), bytes.into());
    }

    fn has_bucket(&self, bucket: &str) -> bool {
        self.objects.keys().any(|(name, _)| name == bucket)
    }
}

impl ObjectStore for MemoryObjectStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        if !self.has_bucket(bucket) {
            return Err(StoreError::bucket_not_found(bucket));
        }
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::object_not_found(bucket, key))
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError> {
        if !self.has_bucket(bucket) {
            return Err(StoreError::bucket_not_found(bucket));
        }
        // BTreeMap iteration keeps keys sorted within the bucket.
        let objects = self
            .objects
            .iter()
            .filter(|((name, key), _)| name == bucket && key.starts_with(prefix))
            .map(|((_, key), bytes)| ObjectMeta {
                key: key.clone(),
                size: bytes.len() as u64,
            })
            .collect();
        Ok(objects)
    }
}
