//! Glint
//!
//! Shader-semantics binding, modular GLSL source assembly and program
//! caching for 3D engines.
//!
//! | Module | Role |
//! |---|---|
//! | [`source`] | source trees with include resolution and line localization |
//! | [`shader`] | compiled shader units and their cache |
//! | [`program`] | linked programs, variable configuration and uniform population |
//! | [`semantics`] | the semantic catalog, name registry and delegates |
//! | [`scene`] | the scene-access interface population reads from |
//! | [`backend`] | the GPU primitives consumed, and a headless implementation |
//! | [`context`] | [`ShadingContext`], tying it all together |

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod backend;
pub mod cache;
pub mod context;
pub mod errors;
pub mod program;
pub mod scene;
pub mod semantics;
pub mod settings;
pub mod shader;
pub mod source;
pub mod utils;

pub use backend::{GpuBackend, HeadlessBackend, ShaderStage, SharedBackend, UniformType};
pub use cache::NamedCache;
pub use context::{LoaderHandle, PendingProgram, ShadingContext};
pub use errors::{GlintError, Result};
pub use program::{Program, ProgramCache, ShaderVariable, UniformValue};
pub use scene::{SceneAccessor, SceneSnapshot};
pub use semantics::{Semantic, SemanticDelegate, SemanticRegistry, VariableScope};
pub use settings::ShadingSettings;
pub use shader::{Shader, ShaderCache, ShaderLibrary};
pub use source::{SourceCache, SourceLoader, SourceNode};
pub use utils::interner;
