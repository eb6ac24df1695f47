use std::sync::Arc;

use super::Shader;
use crate::backend::ShaderStage;
use crate::cache::NamedCache;
use crate::errors::{GlintError, Result};

/// Compiled shaders keyed by name (the file name, or the name given to
/// inline source).
pub struct ShaderCache {
    shaders: NamedCache<Shader>,
}

impl ShaderCache {
    #[must_use]
    pub fn new(preloading: bool) -> Self {
        Self {
            shaders: NamedCache::new("ShaderCache", preloading),
        }
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &NamedCache<Shader> {
        &self.shaders
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Shader>> {
        self.shaders.get(name)
    }

    /// Adds an already compiled shader under its own name.
    pub fn add(&self, shader: &Arc<Shader>) -> Result<()> {
        self.shaders.add(shader.name(), shader)?;
        self.note_identical_source(shader);
        Ok(())
    }

    /// Returns the cached shader named `name`, or compiles one with
    /// `compile` and caches it.
    ///
    /// A cached shader of the other stage is an error; the compiler is not
    /// invoked in that case.
    pub fn get_or_compile<F>(&self, name: &str, stage: ShaderStage, compile: F) -> Result<Arc<Shader>>
    where
        F: FnOnce() -> Result<Shader>,
    {
        if let Some(shader) = self.shaders.get(name) {
            return check_stage(shader, stage);
        }
        let shader = Arc::new(compile()?);
        self.note_identical_source(&shader);
        check_stage(self.shaders.insert_or_get(name, shader), stage)
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Shader>> {
        self.shaders.remove(name)
    }

    pub fn remove_all(&self) {
        self.shaders.remove_all();
    }

    fn note_identical_source(&self, shader: &Shader) {
        self.shaders.for_each_live(|name, other| {
            if name != shader.name() && other.source_hash() == shader.source_hash() {
                log::debug!(
                    "Shaders '{}' and '{}' compile identical source",
                    name,
                    shader.name()
                );
            }
        });
    }
}

fn check_stage(shader: Arc<Shader>, expected: ShaderStage) -> Result<Arc<Shader>> {
    if shader.stage() == expected {
        Ok(shader)
    } else {
        Err(GlintError::StageMismatch {
            name: shader.name().to_string(),
            expected,
            found: shader.stage(),
        })
    }
}
