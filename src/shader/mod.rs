//! Shaders
//!
//! - [`Shader`]: one compiled unit (preamble + source tree)
//! - [`ShaderCache`]: name-keyed registry with strong/weak retention
//! - [`ShaderLibrary`]: file and inline-source factories over the caches
//! - `diagnostics`: compile-log position parsing

pub mod cache;
pub mod diagnostics;
pub mod library;
#[allow(clippy::module_inception)]
pub mod shader;

pub use cache::ShaderCache;
pub use library::ShaderLibrary;
pub use shader::Shader;
