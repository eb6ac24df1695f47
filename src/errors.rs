//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`GlintError`] covers all failure modes including:
//! - Source lookup and include resolution failures
//! - Shader compilation and program link failures
//! - Uniform population failures under the strict missing-value policy
//! - Cache misuse (duplicate insertion, stage mismatch)
//!
//! Compile, link and missing-value errors are not transient: nothing in the
//! crate retries them. They describe an asset or binding bug, and callers are
//! expected to abandon the load that produced them.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, GlintError>`.
//!
//! ```rust,ignore
//! use glint::errors::Result;
//!
//! fn load_program(ctx: &ShadingContext) -> Result<()> {
//!     let program = ctx.program_from_files("basic.vsh", "basic.fsh")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::backend::ShaderStage;

/// The main error type for the shading layer.
#[derive(Error, Debug)]
pub enum GlintError {
    // ========================================================================
    // Source Errors
    // ========================================================================
    /// No loader could provide source text for the requested name.
    #[error("Shader source not found: {name}")]
    SourceNotFound {
        /// Name as written in the request or include directive
        name: String,
    },

    /// A source file includes itself, directly or through other files.
    #[error("Include cycle detected while loading '{name}'")]
    IncludeCycle {
        /// The file that was reached a second time
        name: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Compile & Link Errors
    // ========================================================================
    /// The native compiler rejected a shader.
    ///
    /// `file` and `line` are localized to the source fragment that produced
    /// the error. When the compiler log carries no line number they fall back
    /// to the shader name and line 0.
    #[error("Failed to compile shader '{shader}' at {file}:{line}:\n{log}")]
    ShaderCompile {
        shader: String,
        file: String,
        line: usize,
        log: String,
    },

    /// The native linker rejected a program.
    #[error("Failed to link program '{program}':\n{log}")]
    ProgramLink { program: String, log: String },

    /// Introspection reported an active variable without a valid location.
    #[error("Program '{program}' has no location for active variable '{variable}'")]
    UnresolvedVariable { program: String, variable: String },

    // ========================================================================
    // Binding Errors
    // ========================================================================
    /// A uniform could not be populated and default values are disallowed.
    #[error(
        "Program '{program}' could not resolve a value for uniform '{uniform}' ({semantic}); \
         map it to a semantic, set an override, or allow default values"
    )]
    MissingUniformValue {
        program: String,
        uniform: String,
        semantic: String,
    },

    // ========================================================================
    // Cache Errors
    // ========================================================================
    /// An entry with the same name is already alive in the cache.
    #[error("{cache} already contains an entry named '{name}'")]
    DuplicateCacheEntry { cache: &'static str, name: String },

    /// A cached shader was requested for a different pipeline stage.
    #[error("Shader '{name}' is a {found} shader, but a {expected} shader was requested")]
    StageMismatch {
        name: String,
        expected: ShaderStage,
        found: ShaderStage,
    },

    /// The program cached under a name was linked from other shaders than
    /// the ones requested.
    #[error(
        "Program '{name}' is cached with shaders '{cached_vertex}' + '{cached_fragment}', \
         not '{vertex}' + '{fragment}'"
    )]
    ProgramShaderMismatch {
        name: String,
        vertex: String,
        fragment: String,
        cached_vertex: String,
        cached_fragment: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Settings JSON could not be parsed.
    #[error("Settings parse error: {0}")]
    SettingsError(#[from] serde_json::Error),
}

/// Alias for `Result<T, GlintError>`.
pub type Result<T> = std::result::Result<T, GlintError>;
