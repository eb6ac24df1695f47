//! Headless Backend
//!
//! An in-process [`GpuBackend`] that needs no graphics context. It "compiles"
//! GLSL by scanning top-level `attribute`/`in`/`uniform` declarations, links
//! by merging the declarations of the attached shaders, and records every
//! uniform write and attribute toggle per program for later inspection.
//!
//! Compilation fails on an `#error` directive, with a log in the common
//! `ERROR: <string>:<line>:` shape. Linking fails if either stage is missing
//! or uncompiled, or if both stages declare a uniform with different types.
//!
//! ```rust,ignore
//! let backend = Arc::new(HeadlessBackend::new());
//! let ctx = ShadingContext::new(backend.clone(), loader, ShadingSettings::default());
//! let program = ctx.program_from_files("basic.vsh", "basic.fsh")?;
//! assert_eq!(backend.stats().programs_linked, 1);
//! ```

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    ActiveVariable, GpuBackend, GpuProgramId, GpuShaderId, INVALID_LOCATION, Location, ShaderStage,
    UniformType,
};
use crate::program::UniformValue;

/// Counters of driver work issued through a [`HeadlessBackend`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    pub shaders_compiled: u32,
    pub compile_failures: u32,
    pub programs_linked: u32,
    pub link_failures: u32,
    pub program_binds: u32,
    pub uniform_writes: u32,
    pub attribute_toggles: u32,
    pub prewarm_draws: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Qualifier {
    Attribute,
    Uniform,
}

#[derive(Clone)]
struct Declaration {
    qualifier: Qualifier,
    name: String,
    ty: UniformType,
    size: u32,
}

struct ShaderObject {
    stage: ShaderStage,
    compiled: bool,
    sources: Vec<String>,
    declarations: Vec<Declaration>,
}

#[derive(Default)]
struct ProgramObject {
    shaders: Vec<GpuShaderId>,
    linked: bool,
    attributes: Vec<ActiveVariable>,
    uniforms: Vec<ActiveVariable>,
    uniform_values: FxHashMap<Location, UniformValue>,
    attribute_states: FxHashMap<Location, bool>,
}

#[derive(Default)]
struct HeadlessState {
    next_id: u32,
    shaders: FxHashMap<GpuShaderId, ShaderObject>,
    programs: FxHashMap<GpuProgramId, ProgramObject>,
    current: Option<GpuProgramId>,
    unplaced: FxHashSet<String>,
    stats: HeadlessStats,
}

impl HeadlessState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct HeadlessBackend {
    multi_string: bool,
    string_relative_lines: bool,
    state: Mutex<HeadlessState>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    /// Multi-string submission, error lines counted over the whole unit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            multi_string: true,
            string_relative_lines: false,
            state: Mutex::new(HeadlessState::default()),
        }
    }

    /// Accept only a single source string per compile, like drivers that
    /// mishandle multi-string submission.
    #[must_use]
    pub fn with_multi_string_source(mut self, enabled: bool) -> Self {
        self.multi_string = enabled;
        self
    }

    /// Report error lines relative to the submitted string.
    #[must_use]
    pub fn with_string_relative_lines(mut self, enabled: bool) -> Self {
        self.string_relative_lines = enabled;
        self
    }

    /// Makes introspection report `name` at [`INVALID_LOCATION`], as a
    /// driver does for a variable it could not place.
    pub fn unplace_variable(&self, name: impl Into<String>) {
        self.state.lock().unplaced.insert(name.into());
    }

    #[must_use]
    pub fn stats(&self) -> HeadlessStats {
        self.state.lock().stats
    }

    pub fn reset_stats(&self) {
        self.state.lock().stats = HeadlessStats::default();
    }

    #[must_use]
    pub fn current_program(&self) -> Option<GpuProgramId> {
        self.state.lock().current
    }

    /// Strings submitted by the last compile of `shader`.
    #[must_use]
    pub fn submitted_sources(&self, shader: GpuShaderId) -> Option<Vec<String>> {
        self.state.lock().shaders.get(&shader).map(|s| s.sources.clone())
    }

    /// Last value written to `location` while `program` was bound.
    #[must_use]
    pub fn uniform_value(&self, program: GpuProgramId, location: Location) -> Option<UniformValue> {
        let state = self.state.lock();
        state.programs.get(&program)?.uniform_values.get(&location).cloned()
    }

    /// Last enable state set for the attribute at `location`.
    #[must_use]
    pub fn attribute_enabled(&self, program: GpuProgramId, location: Location) -> Option<bool> {
        let state = self.state.lock();
        state.programs.get(&program)?.attribute_states.get(&location).copied()
    }

    #[must_use]
    pub fn live_shader_count(&self) -> usize {
        self.state.lock().shaders.len()
    }

    #[must_use]
    pub fn live_program_count(&self) -> usize {
        self.state.lock().programs.len()
    }
}

impl GpuBackend for HeadlessBackend {
    fn create_shader(&self, stage: ShaderStage) -> GpuShaderId {
        let mut state = self.state.lock();
        let id = GpuShaderId(state.next_id());
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                compiled: false,
                sources: Vec::new(),
                declarations: Vec::new(),
            },
        );
        id
    }

    fn compile_shader(&self, shader: GpuShaderId, sources: &[&str]) -> Result<(), String> {
        let mut state = self.state.lock();
        let HeadlessState { shaders, stats, .. } = &mut *state;
        let Some(object) = shaders.get_mut(&shader) else {
            return Err(format!("ERROR: invalid shader object {}", shader.0));
        };
        object.sources = sources.iter().map(|s| (*s).to_string()).collect();
        object.compiled = false;
        object.declarations.clear();

        if sources.len() > 1 && !self.multi_string {
            stats.compile_failures += 1;
            return Err("ERROR: multiple source strings are not supported".to_string());
        }

        let mut global_line = 0;
        for (index, source) in sources.iter().enumerate() {
            for (offset, line) in source.lines().enumerate() {
                global_line += 1;
                let line = strip_comment(line).trim();
                if let Some(message) = line.strip_prefix("#error") {
                    let (string_index, line_number) = if self.string_relative_lines {
                        (index, offset + 1)
                    } else {
                        (0, global_line)
                    };
                    stats.compile_failures += 1;
                    return Err(format!(
                        "ERROR: {string_index}:{line_number}: '#error' : {}\n",
                        message.trim()
                    ));
                }
                if let Some(declaration) = parse_declaration(line, object.stage) {
                    object.declarations.extend(declaration);
                }
            }
        }

        object.compiled = true;
        stats.shaders_compiled += 1;
        Ok(())
    }

    fn delete_shader(&self, shader: GpuShaderId) {
        self.state.lock().shaders.remove(&shader);
    }

    fn supports_multi_string_source(&self) -> bool {
        self.multi_string
    }

    fn reports_string_relative_lines(&self) -> bool {
        self.string_relative_lines
    }

    fn create_program(&self) -> GpuProgramId {
        let mut state = self.state.lock();
        let id = GpuProgramId(state.next_id());
        state.programs.insert(id, ProgramObject::default());
        id
    }

    fn attach_shader(&self, program: GpuProgramId, shader: GpuShaderId) {
        if let Some(object) = self.state.lock().programs.get_mut(&program) {
            object.shaders.push(shader);
        }
    }

    fn link_program(&self, program: GpuProgramId) -> Result<(), String> {
        let mut state = self.state.lock();
        let HeadlessState {
            shaders,
            programs,
            unplaced,
            stats,
            ..
        } = &mut *state;
        let Some(object) = programs.get_mut(&program) else {
            return Err(format!("ERROR: invalid program object {}", program.0));
        };

        let linked = link_declarations(&object.shaders, shaders, unplaced);
        match linked {
            Ok((attributes, uniforms)) => {
                object.attributes = attributes;
                object.uniforms = uniforms;
                object.linked = true;
                stats.programs_linked += 1;
                Ok(())
            }
            Err(log) => {
                object.linked = false;
                stats.link_failures += 1;
                Err(log)
            }
        }
    }

    fn delete_program(&self, program: GpuProgramId) {
        let mut state = self.state.lock();
        state.programs.remove(&program);
        if state.current == Some(program) {
            state.current = None;
        }
    }

    fn active_attributes(&self, program: GpuProgramId) -> Vec<ActiveVariable> {
        let state = self.state.lock();
        state
            .programs
            .get(&program)
            .filter(|p| p.linked)
            .map(|p| p.attributes.clone())
            .unwrap_or_default()
    }

    fn active_uniforms(&self, program: GpuProgramId) -> Vec<ActiveVariable> {
        let state = self.state.lock();
        state
            .programs
            .get(&program)
            .filter(|p| p.linked)
            .map(|p| p.uniforms.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: GpuProgramId) {
        let mut state = self.state.lock();
        state.current = Some(program);
        state.stats.program_binds += 1;
    }

    fn set_uniform(&self, location: Location, value: &UniformValue) {
        let mut state = self.state.lock();
        let HeadlessState {
            programs,
            current,
            stats,
            ..
        } = &mut *state;
        let Some(object) = current.and_then(|id| programs.get_mut(&id)) else {
            log::warn!("HeadlessBackend: uniform write at {location} with no program bound");
            return;
        };
        object.uniform_values.insert(location, value.clone());
        stats.uniform_writes += 1;
    }

    fn set_vertex_attribute_enabled(&self, location: Location, enabled: bool) {
        let mut state = self.state.lock();
        let HeadlessState {
            programs,
            current,
            stats,
            ..
        } = &mut *state;
        if let Some(object) = current.and_then(|id| programs.get_mut(&id)) {
            object.attribute_states.insert(location, enabled);
        }
        stats.attribute_toggles += 1;
    }

    fn draw_prewarm_primitive(&self, program: GpuProgramId) {
        let mut state = self.state.lock();
        if state.current != Some(program) {
            log::warn!("HeadlessBackend: prewarm draw for program {} which is not bound", program.0);
        }
        state.stats.prewarm_draws += 1;
    }
}

// ============================================================================
// Declaration scanning
// ============================================================================

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}

/// Parses `uniform highp vec4 a, b[4];` style declarations.
///
/// Struct-typed declarations and anything that is not a top-level
/// declaration yield `None`.
fn parse_declaration(line: &str, stage: ShaderStage) -> Option<Vec<Declaration>> {
    let (keyword, rest) = line.split_once(char::is_whitespace)?;
    let qualifier = match keyword {
        "uniform" => Qualifier::Uniform,
        "attribute" => Qualifier::Attribute,
        "in" if stage == ShaderStage::Vertex => Qualifier::Attribute,
        _ => return None,
    };
    let body = rest.split(';').next()?;
    let mut words = body
        .split_whitespace()
        .skip_while(|w| matches!(*w, "lowp" | "mediump" | "highp"));
    let ty = UniformType::from_glsl(words.next()?)?;
    let names: String = words.collect();

    let declarations = names
        .split(',')
        .filter(|n| !n.is_empty())
        .filter_map(|entry| {
            let (name, size) = match entry.split_once('[') {
                Some((name, size)) => (name, size.trim_end_matches(']').parse().ok()?),
                None => (entry, 1),
            };
            Some(Declaration {
                qualifier,
                name: name.to_string(),
                ty,
                size,
            })
        })
        .collect();
    Some(declarations)
}

type LinkedVariables = (Vec<ActiveVariable>, Vec<ActiveVariable>);

fn link_declarations(
    attached: &[GpuShaderId],
    shaders: &FxHashMap<GpuShaderId, ShaderObject>,
    unplaced: &FxHashSet<String>,
) -> Result<LinkedVariables, String> {
    let stage_object = |stage| {
        attached
            .iter()
            .filter_map(|id| shaders.get(id))
            .find(|s| s.stage == stage)
    };
    let mut ordered = Vec::with_capacity(2);
    for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
        match stage_object(stage) {
            Some(object) if object.compiled => ordered.push(object),
            Some(_) => return Err(format!("ERROR: {stage} shader is not compiled")),
            None => return Err(format!("ERROR: no {stage} shader attached")),
        }
    }

    let mut attributes = Vec::new();
    let mut uniforms: Vec<ActiveVariable> = Vec::new();
    let mut next_attribute = 0;
    let mut next_uniform = 0;

    let place = |next: &mut Location, declaration: &Declaration| -> ActiveVariable {
        let location = if unplaced.contains(&declaration.name) {
            INVALID_LOCATION
        } else {
            let location = *next;
            *next += declaration.size as Location;
            location
        };
        let name = if declaration.size > 1 {
            format!("{}[0]", declaration.name)
        } else {
            declaration.name.clone()
        };
        ActiveVariable {
            name,
            location,
            ty: declaration.ty,
            size: declaration.size,
        }
    };

    for object in ordered {
        for declaration in &object.declarations {
            match declaration.qualifier {
                Qualifier::Attribute => attributes.push(place(&mut next_attribute, declaration)),
                Qualifier::Uniform => {
                    let existing = uniforms
                        .iter()
                        .find(|u| u.name.trim_end_matches("[0]") == declaration.name);
                    match existing {
                        Some(u) if u.ty != declaration.ty || u.size != declaration.size => {
                            return Err(format!(
                                "ERROR: uniform '{}' declared as {} and {}",
                                declaration.name, u.ty, declaration.ty
                            ));
                        }
                        Some(_) => {}
                        None => uniforms.push(place(&mut next_uniform, declaration)),
                    }
                }
            }
        }
    }
    Ok((attributes, uniforms))
}
