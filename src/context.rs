//! Shading Context
//!
//! [`ShadingContext`] is the entry point: it owns the backend handle, the
//! settings, the source/shader/program caches, the semantic delegate and the
//! binding state of one render context.
//!
//! # Background loading
//!
//! Compiling shaders can happen off the render thread. A [`LoaderHandle`]
//! shares the shader library with the context; workers compile through it and
//! queue the shader pairs they want linked. The render thread then calls
//! [`ShadingContext::link_pending`] once per frame to link, prewarm and cache
//! them.
//!
//! ```rust,ignore
//! let handle = ctx.loader_handle();
//! std::thread::spawn(move || {
//!     handle.request_program("skinned.vsh", "lit.fsh")
//! });
//!
//! // later, on the render thread
//! ctx.link_pending()?;
//! ```

use std::sync::Arc;

use flume::{Receiver, Sender};

use crate::backend::{ShaderStage, SharedBackend};
use crate::errors::{GlintError, Result};
use crate::program::{BindingState, LinkContext, Program, ProgramCache};
use crate::semantics::{DelegateChain, SemanticDelegate, SemanticRegistry};
use crate::settings::ShadingSettings;
use crate::shader::{Shader, ShaderLibrary};
use crate::source::{FileSourceLoader, SourceLoader};

/// A compiled shader pair waiting to be linked on the render thread.
#[derive(Debug, Clone)]
pub struct PendingProgram {
    pub vertex: Arc<Shader>,
    pub fragment: Arc<Shader>,
}

pub struct ShadingContext {
    settings: ShadingSettings,
    library: Arc<ShaderLibrary>,
    programs: ProgramCache,
    registry: Arc<SemanticRegistry>,
    delegate: Arc<dyn SemanticDelegate>,
    binding: Arc<BindingState>,
    pending_tx: Sender<PendingProgram>,
    pending_rx: Receiver<PendingProgram>,
}

impl ShadingContext {
    /// Creates a context whose registry carries the default name mappings
    /// sized from `settings`.
    #[must_use]
    pub fn new(
        backend: SharedBackend,
        loader: Arc<dyn SourceLoader>,
        settings: ShadingSettings,
    ) -> Self {
        let registry = Arc::new(SemanticRegistry::with_default_mappings(&settings));
        let (pending_tx, pending_rx) = flume::unbounded();
        Self {
            library: Arc::new(ShaderLibrary::new(backend, loader, &settings)),
            programs: ProgramCache::new(settings.preload_programs),
            delegate: registry.clone(),
            registry,
            binding: Arc::new(BindingState::new()),
            pending_tx,
            pending_rx,
            settings,
        }
    }

    /// Creates a context that loads sources from `settings.source_roots`.
    #[must_use]
    pub fn with_file_loader(backend: SharedBackend, settings: ShadingSettings) -> Self {
        let loader = Arc::new(FileSourceLoader::new(settings.source_roots.clone()));
        Self::new(backend, loader, settings)
    }

    /// Places an application delegate ahead of the built-in registry.
    ///
    /// Affects programs linked afterwards.
    #[must_use]
    pub fn with_delegate(mut self, delegate: Arc<dyn SemanticDelegate>) -> Self {
        let chain = DelegateChain::new()
            .with(delegate)
            .with(self.registry.clone());
        self.delegate = Arc::new(chain);
        self
    }

    // ── Shaders ─────────────────────────────────────────────────────────────

    pub fn shader_from_file(&self, stage: ShaderStage, file_name: &str) -> Result<Arc<Shader>> {
        self.library.shader_from_file(stage, file_name)
    }

    pub fn shader_from_source(&self, stage: ShaderStage, name: &str, text: &str) -> Result<Arc<Shader>> {
        self.library.shader_from_source(stage, name, text)
    }

    // ── Programs ────────────────────────────────────────────────────────────

    /// Returns the cached program for this shader pair, or links, prewarms
    /// and caches a new one.
    pub fn program_from_shaders(
        &self,
        vertex: Arc<Shader>,
        fragment: Arc<Shader>,
    ) -> Result<Arc<Program>> {
        let name = Program::name_for(vertex.name(), fragment.name());
        let (vertex_name, fragment_name) = (vertex.name().to_string(), fragment.name().to_string());
        let program = self.programs.get_or_link(&name, || {
            Program::link(&name, vertex, fragment, &self.link_context())
        })?;
        if !program.is_linked_from(&vertex_name, &fragment_name) {
            return Err(GlintError::ProgramShaderMismatch {
                name,
                vertex: vertex_name,
                fragment: fragment_name,
                cached_vertex: program.vertex_shader().name().to_string(),
                cached_fragment: program.fragment_shader().name().to_string(),
            });
        }
        if self.settings.prewarm_programs {
            program.prewarm();
        }
        Ok(program)
    }

    pub fn program_from_files(&self, vertex_file: &str, fragment_file: &str) -> Result<Arc<Program>> {
        let vertex = self.shader_from_file(ShaderStage::Vertex, vertex_file)?;
        let fragment = self.shader_from_file(ShaderStage::Fragment, fragment_file)?;
        self.program_from_shaders(vertex, fragment)
    }

    /// Program from two inline sources, cached under their names.
    pub fn program_from_sources(
        &self,
        vertex: (&str, &str),
        fragment: (&str, &str),
    ) -> Result<Arc<Program>> {
        let (vertex_name, vertex_text) = vertex;
        let (fragment_name, fragment_text) = fragment;
        let vertex = self.shader_from_source(ShaderStage::Vertex, vertex_name, vertex_text)?;
        let fragment = self.shader_from_source(ShaderStage::Fragment, fragment_name, fragment_text)?;
        self.program_from_shaders(vertex, fragment)
    }

    /// Environment handed to [`Program::link`] by this context.
    #[must_use]
    pub fn link_context(&self) -> LinkContext {
        LinkContext {
            backend: self.library.backend().clone(),
            delegate: self.delegate.clone(),
            binding: self.binding.clone(),
            allow_default_values: self.settings.allow_default_uniform_values,
        }
    }

    /// Starts a new scene: every live program repopulates its scene-scope
    /// uniforms on its next bind.
    pub fn begin_scene(&self) {
        self.programs.begin_scene();
    }

    // ── Background handoff ──────────────────────────────────────────────────

    #[must_use]
    pub fn loader_handle(&self) -> LoaderHandle {
        LoaderHandle {
            library: self.library.clone(),
            pending: self.pending_tx.clone(),
        }
    }

    /// Links every program queued by loader handles. Returns how many were
    /// linked; stops at the first failure, leaving the rest queued.
    pub fn link_pending(&self) -> Result<usize> {
        let mut linked = 0;
        while let Ok(PendingProgram { vertex, fragment }) = self.pending_rx.try_recv() {
            self.program_from_shaders(vertex, fragment)?;
            linked += 1;
        }
        if linked > 0 {
            log::info!("Linked {linked} pending programs");
        }
        Ok(linked)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending_rx.len()
    }

    // ── Retention ───────────────────────────────────────────────────────────

    /// Switches all three caches between pinning (`true`) and observing
    /// (`false`) new entries.
    pub fn set_preloading(&self, preloading: bool) {
        self.library.sources().entries().set_preloading(preloading);
        self.library.shaders().entries().set_preloading(preloading);
        self.programs.entries().set_preloading(preloading);
    }

    /// Releases everything pinned during preloading.
    pub fn unpin_all(&self) {
        self.library.sources().entries().unpin_all();
        self.library.shaders().entries().unpin_all();
        self.programs.entries().unpin_all();
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ShadingSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn library(&self) -> &Arc<ShaderLibrary> {
        &self.library
    }

    #[inline]
    #[must_use]
    pub fn programs(&self) -> &ProgramCache {
        &self.programs
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<SemanticRegistry> {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn binding_state(&self) -> &Arc<BindingState> {
        &self.binding
    }
}

/// Cloneable handle for compiling shaders off the render thread.
#[derive(Clone)]
pub struct LoaderHandle {
    library: Arc<ShaderLibrary>,
    pending: Sender<PendingProgram>,
}

impl LoaderHandle {
    #[inline]
    #[must_use]
    pub fn library(&self) -> &Arc<ShaderLibrary> {
        &self.library
    }

    /// Compiles both shaders and queues the pair for linking.
    pub fn request_program(&self, vertex_file: &str, fragment_file: &str) -> Result<()> {
        let vertex = self.library.shader_from_file(ShaderStage::Vertex, vertex_file)?;
        let fragment = self.library.shader_from_file(ShaderStage::Fragment, fragment_file)?;
        self.enqueue(PendingProgram { vertex, fragment });
        Ok(())
    }

    /// Queues an already compiled pair for linking.
    pub fn enqueue(&self, pending: PendingProgram) {
        if self.pending.send(pending).is_err() {
            log::warn!("Shading context dropped; pending program discarded");
        }
    }
}
