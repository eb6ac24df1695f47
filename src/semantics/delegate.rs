//! Semantic Delegates
//!
//! A delegate is anything that can configure a declared variable's semantic
//! and later produce its value from the scene. Delegates answer `false` when
//! a variable or semantic is not theirs, so several of them compose into a
//! [`DelegateChain`] that stops at the first success: an application
//! delegate for its own semantic range placed ahead of the built-in
//! [`SemanticRegistry`](super::SemanticRegistry).

use std::sync::Arc;

use super::Semantic;
use crate::program::ShaderVariable;
use crate::scene::SceneAccessor;

pub trait SemanticDelegate: Send + Sync {
    /// Assigns semantic, index and scope to `variable` if its name is known.
    ///
    /// Returns `false` and leaves the variable untouched otherwise.
    fn configure_variable(&self, variable: &mut ShaderVariable) -> bool;

    /// Stages the current value of `uniform` if its semantic is handled.
    ///
    /// Returns `false` for semantics it does not recognize and for indexed
    /// semantics whose index is past the scene's current item count.
    fn populate_uniform(&self, uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool;

    /// Human-readable name of `semantic`, used in diagnostics.
    fn describe_semantic(&self, semantic: Semantic) -> Option<String>;
}

/// Ordered composition of delegates. The first delegate that succeeds wins.
#[derive(Clone, Default)]
pub struct DelegateChain {
    delegates: Vec<Arc<dyn SemanticDelegate>>,
}

impl DelegateChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a delegate, consulted after those already in the chain.
    #[must_use]
    pub fn with(mut self, delegate: Arc<dyn SemanticDelegate>) -> Self {
        self.delegates.push(delegate);
        self
    }

    /// Inserts a delegate ahead of all others.
    pub fn push_front(&mut self, delegate: Arc<dyn SemanticDelegate>) {
        self.delegates.insert(0, delegate);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl SemanticDelegate for DelegateChain {
    fn configure_variable(&self, variable: &mut ShaderVariable) -> bool {
        self.delegates
            .iter()
            .any(|delegate| delegate.configure_variable(variable))
    }

    fn populate_uniform(&self, uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
        self.delegates
            .iter()
            .any(|delegate| delegate.populate_uniform(uniform, scene))
    }

    fn describe_semantic(&self, semantic: Semantic) -> Option<String> {
        self.delegates
            .iter()
            .find_map(|delegate| delegate.describe_semantic(semantic))
    }
}
