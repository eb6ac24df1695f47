use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::binding::{BindingState, PopulationStats};
use super::texture_units::TextureUnitRanges;
use super::uniform_cache::LastWrittenCache;
use super::{ShaderVariable, UniformValue, VariableKind};
use crate::backend::{ActiveVariable, GpuProgramId, SharedBackend};
use crate::errors::{GlintError, Result};
use crate::scene::{MeshState, SceneAccessor};
use crate::semantics::{SemanticDelegate, SemanticPopulator, VariableScope};
use crate::shader::Shader;
use crate::utils::interner::{self, Symbol};

/// Everything a program needs from its surroundings at link time.
#[derive(Clone)]
pub struct LinkContext {
    pub backend: SharedBackend,
    pub delegate: Arc<dyn SemanticDelegate>,
    pub binding: Arc<BindingState>,
    /// Initial missing-value policy.
    pub allow_default_values: bool,
}

struct ProgramState {
    attributes: Vec<ShaderVariable>,
    uniforms: Vec<ShaderVariable>,
    scene_uniforms: Vec<usize>,
    node_uniforms: Vec<usize>,
    draw_uniforms: Vec<usize>,
    uniform_writes: LastWrittenCache<UniformValue>,
    attribute_states: LastWrittenCache<bool>,
    overrides: FxHashMap<Symbol, UniformValue>,
    scene_dirty: bool,
    allow_default_values: bool,
    stats: PopulationStats,
    prewarmed: bool,
}

impl ProgramState {
    fn indices(&self, scope: VariableScope) -> &[usize] {
        match scope {
            VariableScope::Scene => &self.scene_uniforms,
            VariableScope::Node => &self.node_uniforms,
            VariableScope::Draw => &self.draw_uniforms,
        }
    }
}

/// A linked vertex + fragment pair with its configured variables.
///
/// # Population
///
/// Uniforms are split by scope at link time:
///
/// | Scope | Populated |
/// |---|---|
/// | `Scene` | on the first bind after [`Program::begin_scene`] |
/// | `Node` | on every [`Program::bind_for_node`] |
/// | `Draw` | on every bind and every [`Program::populate_draw_uniforms`] |
///
/// A uniform's value comes from, in order: an override set with
/// [`Program::set_uniform_override`], the semantic delegate, the sampler's
/// texture-unit assignment, and finally the type's default value if the
/// program allows defaults. Otherwise population fails with
/// [`GlintError::MissingUniformValue`].
pub struct Program {
    name: String,
    id: GpuProgramId,
    vertex: Arc<Shader>,
    fragment: Arc<Shader>,
    backend: SharedBackend,
    delegate: Arc<dyn SemanticDelegate>,
    binding: Arc<BindingState>,
    texture_units: TextureUnitRanges,
    state: Mutex<ProgramState>,
}

impl Program {
    /// Cache name of the program linking `vertex` with `fragment`:
    /// `"<vertex>-<fragment>"`, with `-` and backslashes inside either name
    /// escaped by a backslash. Distinct pairs never share a name.
    #[must_use]
    pub fn name_for(vertex: &str, fragment: &str) -> String {
        let mut name = String::with_capacity(vertex.len() + fragment.len() + 1);
        push_escaped(&mut name, vertex);
        name.push('-');
        push_escaped(&mut name, fragment);
        name
    }

    /// Whether this program was linked from shaders with these names.
    #[must_use]
    pub fn is_linked_from(&self, vertex: &str, fragment: &str) -> bool {
        self.vertex.name() == vertex && self.fragment.name() == fragment
    }

    /// Links the two shaders and configures every active variable.
    ///
    /// Fails if the linker rejects the pair or reports a variable without a
    /// location. The GPU program is released on failure.
    pub fn link(
        name: &str,
        vertex: Arc<Shader>,
        fragment: Arc<Shader>,
        context: &LinkContext,
    ) -> Result<Self> {
        let backend = &context.backend;
        let id = backend.create_program();
        backend.attach_shader(id, vertex.id());
        backend.attach_shader(id, fragment.id());

        if let Err(log) = backend.link_program(id) {
            backend.delete_program(id);
            let err = GlintError::ProgramLink {
                program: name.to_string(),
                log,
            };
            log::error!("{err}");
            return Err(err);
        }

        let introspect = |actives: Vec<ActiveVariable>, kind| -> Result<Vec<ShaderVariable>> {
            actives
                .iter()
                .map(|active| {
                    if active.location < 0 {
                        return Err(GlintError::UnresolvedVariable {
                            program: name.to_string(),
                            variable: active.name.clone(),
                        });
                    }
                    let mut variable = ShaderVariable::from_active(active, kind);
                    if !context.delegate.configure_variable(&mut variable) {
                        log::warn!(
                            "Program '{}': no semantic for {:?} '{}'",
                            name,
                            kind,
                            variable.name()
                        );
                    }
                    Ok(variable)
                })
                .collect()
        };

        let variables = introspect(backend.active_attributes(id), VariableKind::Attribute)
            .and_then(|attributes| {
                introspect(backend.active_uniforms(id), VariableKind::Uniform)
                    .map(|uniforms| (attributes, uniforms))
            });
        let (attributes, mut uniforms) = match variables {
            Ok(variables) => variables,
            Err(err) => {
                backend.delete_program(id);
                log::error!("{err}");
                return Err(err);
            }
        };

        let texture_units = TextureUnitRanges::assign(&mut uniforms);
        let in_scope = |scope| -> Vec<usize> {
            (0..uniforms.len())
                .filter(|&i| uniforms[i].scope() == scope)
                .collect()
        };
        let scene_uniforms = in_scope(VariableScope::Scene);
        let node_uniforms = in_scope(VariableScope::Node);
        let draw_uniforms = in_scope(VariableScope::Draw);

        log::debug!(
            "Linked program '{}': {} attributes, {} uniforms (scene {}, node {}, draw {}), {} texture units",
            name,
            attributes.len(),
            uniforms.len(),
            scene_uniforms.len(),
            node_uniforms.len(),
            draw_uniforms.len(),
            texture_units.total()
        );

        Ok(Self {
            name: name.to_string(),
            id,
            vertex,
            fragment,
            backend: backend.clone(),
            delegate: context.delegate.clone(),
            binding: context.binding.clone(),
            texture_units,
            state: Mutex::new(ProgramState {
                attributes,
                uniforms,
                scene_uniforms,
                node_uniforms,
                draw_uniforms,
                uniform_writes: LastWrittenCache::new(),
                attribute_states: LastWrittenCache::new(),
                overrides: FxHashMap::default(),
                scene_dirty: true,
                allow_default_values: context.allow_default_values,
                stats: PopulationStats::default(),
                prewarmed: false,
            }),
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> GpuProgramId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn vertex_shader(&self) -> &Arc<Shader> {
        &self.vertex
    }

    #[inline]
    #[must_use]
    pub fn fragment_shader(&self) -> &Arc<Shader> {
        &self.fragment
    }

    #[inline]
    #[must_use]
    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    #[inline]
    #[must_use]
    pub fn texture_units(&self) -> &TextureUnitRanges {
        &self.texture_units
    }

    #[must_use]
    pub fn attributes(&self) -> Vec<ShaderVariable> {
        self.state.lock().attributes.clone()
    }

    #[must_use]
    pub fn uniforms(&self) -> Vec<ShaderVariable> {
        self.state.lock().uniforms.clone()
    }

    #[must_use]
    pub fn uniform(&self, name: &str) -> Option<ShaderVariable> {
        let symbol = interner::get(name)?;
        let state = self.state.lock();
        state.uniforms.iter().find(|u| u.symbol() == symbol).cloned()
    }

    /// Names of the uniforms populated at `scope`, in declaration order.
    #[must_use]
    pub fn uniform_names(&self, scope: VariableScope) -> Vec<String> {
        let state = self.state.lock();
        state
            .indices(scope)
            .iter()
            .map(|&i| state.uniforms[i].name().to_string())
            .collect()
    }

    /// Value most recently written to the named uniform.
    #[must_use]
    pub fn last_written(&self, name: &str) -> Option<UniformValue> {
        let uniform = self.uniform(name)?;
        self.state.lock().uniform_writes.last_written(uniform.location()).cloned()
    }

    #[must_use]
    pub fn stats(&self) -> PopulationStats {
        self.state.lock().stats
    }

    pub fn reset_stats(&self) {
        self.state.lock().stats = PopulationStats::default();
    }

    #[must_use]
    pub fn is_prewarmed(&self) -> bool {
        self.state.lock().prewarmed
    }

    // ── Policy & overrides ──────────────────────────────────────────────────

    #[must_use]
    pub fn allows_default_values(&self) -> bool {
        self.state.lock().allow_default_values
    }

    pub fn set_allow_default_values(&self, allow: bool) {
        self.state.lock().allow_default_values = allow;
    }

    /// Pins a value for the named uniform, taking precedence over its
    /// semantic. Returns `false` if the program has no such uniform.
    pub fn set_uniform_override(&self, name: &str, value: impl Into<UniformValue>) -> bool {
        let Some(symbol) = interner::get(name) else {
            return false;
        };
        let mut state = self.state.lock();
        if !state.uniforms.iter().any(|u| u.symbol() == symbol) {
            return false;
        }
        state.overrides.insert(symbol, value.into());
        true
    }

    pub fn clear_uniform_override(&self, name: &str) -> Option<UniformValue> {
        let symbol = interner::get(name)?;
        self.state.lock().overrides.remove(&symbol)
    }

    // ── Binding & population ────────────────────────────────────────────────

    /// Marks scene-scope uniforms for population on the next bind.
    pub fn begin_scene(&self) {
        self.state.lock().scene_dirty = true;
    }

    /// Makes this program current. No GPU call if it already is.
    pub fn bind(&self) {
        if self.binding.make_current(self.id) {
            self.backend.use_program(self.id);
        }
    }

    /// Binds the program and populates it for the node `scene` points at:
    /// attributes, then scene-scope uniforms if a new scene began, then
    /// node- and draw-scope uniforms.
    pub fn bind_for_node(&self, scene: &dyn SceneAccessor) -> Result<()> {
        self.bind();
        let mut state = self.state.lock();
        self.enable_attributes(&mut state, scene.mesh());
        if state.scene_dirty {
            self.populate_scope(&mut state, VariableScope::Scene, scene)?;
            state.scene_dirty = false;
        }
        self.populate_scope(&mut state, VariableScope::Node, scene)?;
        self.populate_scope(&mut state, VariableScope::Draw, scene)
    }

    /// Repopulates draw-scope uniforms for a further draw call of the same
    /// node, e.g. the next skinned batch.
    pub fn populate_draw_uniforms(&self, scene: &dyn SceneAccessor) -> Result<()> {
        self.bind();
        let mut state = self.state.lock();
        self.populate_scope(&mut state, VariableScope::Draw, scene)
    }

    fn enable_attributes(&self, state: &mut ProgramState, mesh: Option<&MeshState>) {
        let populator = SemanticPopulator::new();
        let ProgramState {
            attributes,
            attribute_states,
            ..
        } = state;
        for attribute in attributes.iter() {
            let location = attribute.location();
            let enabled = populator.attribute_enabled(attribute, mesh);
            attribute_states.write(location, enabled, |&enabled| {
                self.backend.set_vertex_attribute_enabled(location, enabled);
            });
        }
    }

    fn populate_scope(
        &self,
        state: &mut ProgramState,
        scope: VariableScope,
        scene: &dyn SceneAccessor,
    ) -> Result<()> {
        let ProgramState {
            uniforms,
            scene_uniforms,
            node_uniforms,
            draw_uniforms,
            uniform_writes,
            overrides,
            allow_default_values,
            stats,
            ..
        } = state;
        let indices = match scope {
            VariableScope::Scene => scene_uniforms,
            VariableScope::Node => node_uniforms,
            VariableScope::Draw => draw_uniforms,
        };

        for &index in indices.iter() {
            let uniform = &mut uniforms[index];
            let value = self.resolve_value(uniform, overrides, *allow_default_values, stats, scene)?;
            let location = uniform.location();
            if uniform_writes.write(location, value, |value| self.backend.set_uniform(location, value)) {
                stats.writes_issued += 1;
            } else {
                stats.writes_suppressed += 1;
            }
        }

        match scope {
            VariableScope::Scene => stats.scene_populations += 1,
            VariableScope::Node => stats.node_populations += 1,
            VariableScope::Draw => stats.draw_populations += 1,
        }
        Ok(())
    }

    fn resolve_value(
        &self,
        uniform: &mut ShaderVariable,
        overrides: &FxHashMap<Symbol, UniformValue>,
        allow_default_values: bool,
        stats: &mut PopulationStats,
        scene: &dyn SceneAccessor,
    ) -> Result<UniformValue> {
        if let Some(value) = overrides.get(&uniform.symbol()) {
            return Ok(value.clone());
        }
        if self.delegate.populate_uniform(uniform, scene) {
            if let Some(value) = uniform.take_staged() {
                return Ok(value);
            }
        }
        if let Some(value) = sampler_units(uniform) {
            return Ok(value);
        }
        if allow_default_values {
            log::debug!(
                "Program '{}': default value for uniform '{}'",
                self.name,
                uniform.name()
            );
            stats.defaults_substituted += 1;
            return Ok(UniformValue::default_for(uniform.ty(), uniform.array_size()));
        }

        let semantic = uniform.semantic();
        let err = GlintError::MissingUniformValue {
            program: self.name.clone(),
            uniform: uniform.name().to_string(),
            semantic: self
                .delegate
                .describe_semantic(semantic)
                .unwrap_or_else(|| semantic.to_string()),
        };
        log::error!("{err}");
        Err(err)
    }

    /// Writes neutral values through the write cache, as prewarming needs
    /// every uniform defined.
    pub(super) fn write_neutral_values(&self) {
        let mut state = self.state.lock();
        let ProgramState {
            uniforms,
            uniform_writes,
            ..
        } = &mut *state;
        for uniform in uniforms.iter() {
            let value = sampler_units(uniform)
                .unwrap_or_else(|| UniformValue::default_for(uniform.ty(), uniform.array_size()));
            let location = uniform.location();
            uniform_writes.write(location, value, |value| self.backend.set_uniform(location, value));
        }
    }

    pub(super) fn mark_prewarmed(&self) {
        self.state.lock().prewarmed = true;
    }
}

fn push_escaped(out: &mut String, name: &str) {
    for c in name.chars() {
        if matches!(c, '-' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// A sampler's own texture units, the value it takes when nothing else
/// provides one.
fn sampler_units(uniform: &ShaderVariable) -> Option<UniformValue> {
    if !uniform.ty().is_sampler() {
        return None;
    }
    let base = uniform.texture_unit()?;
    let units: Vec<i32> = (0..uniform.array_size()).map(|k| (base + k) as i32).collect();
    Some(match units.as_slice() {
        [unit] => UniformValue::Int(*unit),
        _ => UniformValue::IntArray(units.into_iter().collect()),
    })
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("vertex", &self.vertex.name())
            .field("fragment", &self.fragment.name())
            .finish_non_exhaustive()
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        log::debug!("Releasing program '{}'", self.name);
        self.binding.release(self.id);
        self.backend.delete_program(self.id);
    }
}
