use std::sync::Arc;

use super::Program;
use crate::cache::NamedCache;
use crate::errors::Result;

/// Linked programs keyed by name, by default `"<vertex>-<fragment>"`.
pub struct ProgramCache {
    programs: NamedCache<Program>,
}

impl ProgramCache {
    #[must_use]
    pub fn new(preloading: bool) -> Self {
        Self {
            programs: NamedCache::new("ProgramCache", preloading),
        }
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &NamedCache<Program> {
        &self.programs
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Program>> {
        self.programs.get(name)
    }

    /// Adds an already linked program under its own name.
    pub fn add(&self, program: &Arc<Program>) -> Result<()> {
        self.programs.add(program.name(), program)
    }

    /// Returns the cached program named `name`, or links one with `link`
    /// and caches it.
    pub fn get_or_link<F>(&self, name: &str, link: F) -> Result<Arc<Program>>
    where
        F: FnOnce() -> Result<Program>,
    {
        self.programs
            .get_or_try_insert_with(name, || link().map(Arc::new))
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Program>> {
        self.programs.remove(name)
    }

    pub fn remove_all(&self) {
        self.programs.remove_all();
    }

    /// Tells every live program a new scene began, so each repopulates its
    /// scene-scope uniforms on its next bind.
    pub fn begin_scene(&self) {
        self.programs.for_each_live(|_, program| program.begin_scene());
    }
}
