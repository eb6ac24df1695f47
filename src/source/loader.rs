//! Source Loaders
//!
//! A loader turns a source name (a file name, an include name) into text.
//! Loaders answer `Ok(None)` for names they do not hold so they can be
//! chained; only genuine I/O failures are errors.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{GlintError, Result};

pub trait SourceLoader: Send + Sync {
    /// Loads the text of `name`, or `None` if this loader does not have it.
    fn load(&self, name: &str) -> Result<Option<String>>;
}

/// Loads `name`, turning a miss into [`GlintError::SourceNotFound`].
pub fn load_required(loader: &dyn SourceLoader, name: &str) -> Result<String> {
    loader.load(name)?.ok_or_else(|| GlintError::SourceNotFound {
        name: name.to_string(),
    })
}

// ============================================================================
// Files
// ============================================================================

/// Resolves names against a list of root directories, first match wins.
///
/// Names are never resolved relative to the including file.
#[derive(Debug, Clone, Default)]
pub struct FileSourceLoader {
    roots: Vec<PathBuf>,
}

impl FileSourceLoader {
    #[must_use]
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn read(path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl SourceLoader for FileSourceLoader {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let path = Path::new(name);
        if path.is_absolute() || self.roots.is_empty() {
            return Self::read(path);
        }
        for root in &self.roots {
            if let Some(text) = Self::read(&root.join(path))? {
                log::debug!("Loaded shader source '{}' from {}", name, root.display());
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

// ============================================================================
// Memory
// ============================================================================

/// In-memory name → text table, for embedded shader libraries and tests.
#[derive(Debug, Default)]
pub struct MemorySourceLoader {
    sources: RwLock<FxHashMap<String, String>>,
}

impl MemorySourceLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Adds or replaces a source.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) {
        self.sources.write().insert(name.into(), text.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.sources.write().remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sources.read().contains_key(name)
    }
}

impl SourceLoader for MemorySourceLoader {
    fn load(&self, name: &str) -> Result<Option<String>> {
        Ok(self.sources.read().get(name).cloned())
    }
}

// ============================================================================
// Chaining
// ============================================================================

/// Tries each loader in order; the first hit wins.
#[derive(Clone, Default)]
pub struct ChainedLoader {
    loaders: Vec<Arc<dyn SourceLoader>>,
}

impl ChainedLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, loader: Arc<dyn SourceLoader>) -> Self {
        self.loaders.push(loader);
        self
    }
}

impl SourceLoader for ChainedLoader {
    fn load(&self, name: &str) -> Result<Option<String>> {
        for loader in &self.loaders {
            if let Some(text) = loader.load(name)? {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chained_loader_first_hit_wins() {
        let first = Arc::new(MemorySourceLoader::new().with("a.glsl", "first"));
        let second = Arc::new(
            MemorySourceLoader::new()
                .with("a.glsl", "second")
                .with("b.glsl", "only here"),
        );
        let chain = ChainedLoader::new().with(first).with(second);

        assert_eq!(chain.load("a.glsl").unwrap().as_deref(), Some("first"));
        assert_eq!(chain.load("b.glsl").unwrap().as_deref(), Some("only here"));
        assert_eq!(chain.load("c.glsl").unwrap(), None);
    }

    #[test]
    fn test_missing_required_source() {
        let loader = MemorySourceLoader::new();
        let err = load_required(&loader, "nope.vsh").unwrap_err();
        assert!(matches!(err, GlintError::SourceNotFound { name } if name == "nope.vsh"));
    }

    #[test]
    fn test_file_loader_searches_roots() {
        let dir = std::env::temp_dir().join(format!("glint-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("on_disk.glsl"), "void main() {}\n").unwrap();

        let loader = FileSourceLoader::new([dir.join("missing"), dir.clone()]);
        assert_eq!(
            loader.load("on_disk.glsl").unwrap().as_deref(),
            Some("void main() {}\n")
        );
        assert_eq!(loader.load("absent.glsl").unwrap(), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
