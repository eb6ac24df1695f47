use std::sync::Arc;

use super::{Shader, ShaderCache};
use crate::backend::{ShaderStage, SharedBackend};
use crate::errors::Result;
use crate::settings::ShadingSettings;
use crate::source::{SourceCache, SourceLoader, SourceNode};

/// Source and shader factories over one backend and one loader.
///
/// Shareable across threads: loading workers and the render thread use the
/// same caches.
pub struct ShaderLibrary {
    backend: SharedBackend,
    loader: Arc<dyn SourceLoader>,
    sources: SourceCache,
    shaders: ShaderCache,
    vertex_preamble: Arc<SourceNode>,
    fragment_preamble: Arc<SourceNode>,
}

impl ShaderLibrary {
    #[must_use]
    pub fn new(backend: SharedBackend, loader: Arc<dyn SourceLoader>, settings: &ShadingSettings) -> Self {
        Self {
            backend,
            loader,
            sources: SourceCache::new(settings.preload_sources, settings.keep_discrete_lines),
            shaders: ShaderCache::new(settings.preload_shaders),
            vertex_preamble: Arc::new(SourceNode::preamble(&settings.vertex_preamble)),
            fragment_preamble: Arc::new(SourceNode::preamble(&settings.fragment_preamble)),
        }
    }

    /// Shader compiled from the named file, cached under the file name.
    pub fn shader_from_file(&self, stage: ShaderStage, file_name: &str) -> Result<Arc<Shader>> {
        self.shaders.get_or_compile(file_name, stage, || {
            let tree = self.sources.get_or_load(file_name, self.loader.as_ref())?;
            self.compile(file_name, stage, tree, true)
        })
    }

    /// Shader compiled from inline text, cached under `name`. Include
    /// directives in `text` resolve through the loader; `name` itself is not
    /// visible to include directives.
    pub fn shader_from_source(&self, stage: ShaderStage, name: &str, text: &str) -> Result<Arc<Shader>> {
        self.shaders.get_or_compile(name, stage, || {
            let tree = self.sources.parse_inline(name, text, self.loader.as_ref())?;
            self.compile(name, stage, tree, false)
        })
    }

    /// Shader compiled from an already built tree, cached under `name`.
    pub fn shader_from_tree(
        &self,
        stage: ShaderStage,
        name: &str,
        tree: Arc<SourceNode>,
    ) -> Result<Arc<Shader>> {
        self.shaders
            .get_or_compile(name, stage, || self.compile(name, stage, tree, false))
    }

    fn compile(
        &self,
        name: &str,
        stage: ShaderStage,
        tree: Arc<SourceNode>,
        loaded_from_file: bool,
    ) -> Result<Shader> {
        Shader::compile(
            name,
            stage,
            self.preamble(stage).clone(),
            tree,
            loaded_from_file,
            self.backend.clone(),
        )
    }

    #[must_use]
    pub fn preamble(&self, stage: ShaderStage) -> &Arc<SourceNode> {
        match stage {
            ShaderStage::Vertex => &self.vertex_preamble,
            ShaderStage::Fragment => &self.fragment_preamble,
        }
    }

    #[inline]
    #[must_use]
    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    #[inline]
    #[must_use]
    pub fn loader(&self) -> &Arc<dyn SourceLoader> {
        &self.loader
    }

    #[inline]
    #[must_use]
    pub fn sources(&self) -> &SourceCache {
        &self.sources
    }

    #[inline]
    #[must_use]
    pub fn shaders(&self) -> &ShaderCache {
        &self.shaders
    }
}
