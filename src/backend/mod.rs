//! GPU Backend Primitives
//!
//! The shading layer never talks to a graphics API directly. Everything it
//! needs from the driver goes through [`GpuBackend`]: shader and program
//! object lifetimes, compilation and linking with their logs, introspection
//! of active variables, uniform writes and program binding.
//!
//! Ids handed out by the backend are opaque. The crate stores them and hands
//! them back, nothing more.
//!
//! [`HeadlessBackend`] is a complete in-process implementation used by tests,
//! tools and offline validation of shader assets.

pub mod headless;

pub use headless::{HeadlessBackend, HeadlessStats};

use std::fmt;
use std::sync::Arc;

use crate::program::UniformValue;

/// Uniform or attribute location as reported by the driver.
pub type Location = i32;

/// Location value drivers report for variables they could not place.
pub const INVALID_LOCATION: Location = -1;

/// Shared handle to the backend. Shaders and programs keep one so they can
/// release their GPU objects when dropped.
pub type SharedBackend = Arc<dyn GpuBackend>;

/// Pipeline stage of a shader unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Opaque id of a GPU shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuShaderId(pub u32);

/// Opaque id of a GPU program object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuProgramId(pub u32);

/// GLSL type of an active attribute or uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    Bool,
    Mat3,
    Mat4,
    Sampler2D,
    SamplerCube,
}

impl UniformType {
    /// Parses a GLSL type keyword.
    #[must_use]
    pub fn from_glsl(keyword: &str) -> Option<Self> {
        let ty = match keyword {
            "float" => Self::Float,
            "vec2" => Self::Vec2,
            "vec3" => Self::Vec3,
            "vec4" => Self::Vec4,
            "int" => Self::Int,
            "ivec2" => Self::IVec2,
            "ivec3" => Self::IVec3,
            "ivec4" => Self::IVec4,
            "bool" => Self::Bool,
            "mat3" => Self::Mat3,
            "mat4" => Self::Mat4,
            "sampler2D" => Self::Sampler2D,
            "samplerCube" => Self::SamplerCube,
            _ => return None,
        };
        Some(ty)
    }

    /// GLSL spelling of the type.
    #[must_use]
    pub fn glsl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Int => "int",
            Self::IVec2 => "ivec2",
            Self::IVec3 => "ivec3",
            Self::IVec4 => "ivec4",
            Self::Bool => "bool",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
            Self::Sampler2D => "sampler2D",
            Self::SamplerCube => "samplerCube",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_sampler(self) -> bool {
        matches!(self, Self::Sampler2D | Self::SamplerCube)
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

/// One active attribute or uniform reported by program introspection.
///
/// Array uniforms may be reported with a trailing `[0]`, as GL drivers do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    pub name: String,
    pub location: Location,
    pub ty: UniformType,
    /// Number of array elements; 1 for non-arrays.
    pub size: u32,
}

/// Driver primitives consumed by shaders and programs.
///
/// All methods take `&self`: the binding context is single threaded, but the
/// backend object itself is shared between the caches that own GPU objects.
/// Implementations serialize internally.
pub trait GpuBackend: Send + Sync {
    fn create_shader(&self, stage: ShaderStage) -> GpuShaderId;

    /// Compiles `sources` as one compilation unit.
    ///
    /// On failure returns the compiler's info log.
    fn compile_shader(&self, shader: GpuShaderId, sources: &[&str]) -> Result<(), String>;

    fn delete_shader(&self, shader: GpuShaderId);

    /// Whether `compile_shader` accepts more than one source string.
    ///
    /// When `false`, callers join the strings before submitting them.
    fn supports_multi_string_source(&self) -> bool {
        true
    }

    /// Whether error lines in compile logs restart at 1 for each submitted
    /// string (the log then names the string index), instead of counting
    /// across the whole compilation unit.
    fn reports_string_relative_lines(&self) -> bool {
        false
    }

    fn create_program(&self) -> GpuProgramId;

    fn attach_shader(&self, program: GpuProgramId, shader: GpuShaderId);

    /// Links the attached shaders. On failure returns the linker's info log.
    fn link_program(&self, program: GpuProgramId) -> Result<(), String>;

    fn delete_program(&self, program: GpuProgramId);

    fn active_attributes(&self, program: GpuProgramId) -> Vec<ActiveVariable>;

    fn active_uniforms(&self, program: GpuProgramId) -> Vec<ActiveVariable>;

    fn use_program(&self, program: GpuProgramId);

    /// Writes a uniform of the currently bound program.
    fn set_uniform(&self, location: Location, value: &UniformValue);

    /// Enables or disables the vertex attribute array at `location`.
    fn set_vertex_attribute_enabled(&self, location: Location, enabled: bool);

    /// Draws a single minimal primitive into an off-screen target with the
    /// currently bound program, forcing any deferred driver work to happen.
    fn draw_prewarm_primitive(&self, program: GpuProgramId);
}
