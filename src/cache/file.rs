//! On-disk cache persistence.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{CacheError, CacheResult};

/// Current cache file layout version.
pub const CACHE_VERSION: u64 = 1;

/// Contents of a cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheFile {
    pub version: u64,
    /// Serialized route tree.
    pub tree: Value,
    /// Serialized named route registry.
    #[serde(default = "empty_object")]
    pub names: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl CacheFile {
    pub fn new(tree: Value, names: Value) -> Self {
        Self {
            version: CACHE_VERSION,
            tree,
            names,
        }
    }

    /// Write the cache as JSON.
    pub fn save(&self, path: &Path) -> CacheResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        tracing::info!(path = ?path, "Route cache written");
        Ok(())
    }

    /// Read and version-check a cache file.
    pub fn load(path: &Path) -> CacheResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cache: CacheFile = serde_json::from_reader(reader)?;
        if cache.version != CACHE_VERSION {
            return Err(CacheError::UnsupportedVersion(cache.version));
        }
        tracing::info!(path = ?path, "Route cache loaded");
        Ok(cache)
    }
}
