//! Semantic binding
//!
//! Maps shader variable names to scene semantics and scene state to uniform
//! values:
//! - [`Semantic`]: the closed catalog, its categories and scopes
//! - [`SemanticRegistry`]: name table and the default delegate
//! - [`SemanticPopulator`]: per-category value extraction
//! - [`SemanticDelegate`] / [`DelegateChain`]: the extension seam for
//!   application-defined semantics

pub mod defaults;
pub mod delegate;
pub mod populator;
pub mod registry;
pub mod semantic;

pub use delegate::{DelegateChain, SemanticDelegate};
pub use populator::SemanticPopulator;
pub use registry::{SemanticRegistry, VariableConfiguration};
pub use semantic::{Semantic, SemanticCategory, VariableScope};
