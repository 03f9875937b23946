//! Byte sources supplying raw array files by logical name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{NimbusError, Result};

/// Supplies raw array-file bytes by logical name (`"surface"`, `"upper"`).
///
/// Implementations own the actual transport — filesystem, HTTP, embedded
/// assets. Failures surface as [`NimbusError::Fetch`] and abort the pipeline.
pub trait ByteSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}

/// Filesystem-backed byte source with a logical-name-to-path table.
pub struct FsByteSource {
    paths: HashMap<String, PathBuf>,
}

impl FsByteSource {
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
        }
    }

    /// Register a file path for a logical name.
    pub fn with_path<P: AsRef<Path>>(mut self, name: &str, path: P) -> Self {
        self.paths.insert(name.to_string(), path.as_ref().to_path_buf());
        self
    }
}

impl Default for FsByteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for FsByteSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.paths.get(name).ok_or_else(|| NimbusError::Fetch {
            name: name.to_string(),
            reason: "no path registered".to_string(),
        })?;

        debug!("Fetching '{}' from {}", name, path.display());

        std::fs::read(path).map_err(|e| NimbusError::Fetch {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}
