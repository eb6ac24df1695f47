//! Modular shader source
//!
//! Shader text is held as a tree: each file becomes a [`SourceGroup`] whose
//! children are the file's own fragments interleaved with the groups of the
//! files it includes. Include directives themselves are elided.
//!
//! ```text
//! main.vsh                 Group "main.vsh"
//!   line 1                   ├─ Leaf main.vsh:1
//!   #include "lights.glsl"   ├─ Group "lights.glsl" (shared, cached)
//!   line 3..                 └─ Leaf main.vsh:3..
//! ```
//!
//! Visitors turn a tree into compiler strings and map compiler-reported
//! lines back to files.

pub mod cache;
pub mod include;
pub mod loader;
pub mod node;
pub mod visitor;

pub use cache::SourceCache;
pub use include::parse_include_directive;
pub use loader::{ChainedLoader, FileSourceLoader, MemorySourceLoader, SourceLoader, load_required};
pub use node::{FragmentText, PREAMBLE_NAME, SourceFragment, SourceGroup, SourceNode};
pub use visitor::{
    CompilerStringCounter, CompilerStringFlattener, LineCounter, LineLocalizer, LocalizedLine,
    SourceVisitor, VisitedGroups,
};
