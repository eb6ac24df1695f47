//! Programs
//!
//! A [`Program`] links a vertex and a fragment [`Shader`](crate::shader::Shader),
//! introspects its active variables and configures each one through a
//! [`SemanticDelegate`](crate::semantics::SemanticDelegate). Binding a
//! program for a node then resolves every uniform to a value and writes it
//! through a last-written cache, so unchanged values never reach the GPU.
//!
//! | Type | Role |
//! |---|---|
//! | [`ShaderVariable`] | one attribute or uniform, with its semantic and staged value |
//! | [`UniformValue`] | a typed value as written to the GPU |
//! | [`TextureUnitRanges`] | sampler → texture unit assignment |
//! | [`LastWrittenCache`] | redundant-write suppression per location |
//! | [`BindingState`] | which program is current on the render context |
//! | [`ProgramCache`] | name-keyed registry with strong/weak retention |

pub mod binding;
pub mod cache;
pub mod prewarm;
#[allow(clippy::module_inception)]
pub mod program;
pub mod texture_units;
pub mod uniform_cache;
pub mod value;
pub mod variable;

pub use binding::{BindingState, PopulationStats};
pub use cache::ProgramCache;
pub use program::{LinkContext, Program};
pub use texture_units::TextureUnitRanges;
pub use uniform_cache::{BitwiseEq, LastWrittenCache};
pub use value::{IntArray, UniformValue};
pub use variable::{ShaderVariable, VariableKind};
