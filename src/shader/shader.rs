use std::fmt;
use std::sync::Arc;

use xxhash_rust::xxh3::xxh3_128;

use super::diagnostics::{first_error_location, unit_line};
use crate::backend::{GpuShaderId, ShaderStage, SharedBackend};
use crate::errors::{GlintError, Result};
use crate::source::SourceNode;

// ─── Shader ───────────────────────────────────────────────────────────────────

/// One compiled GPU shader unit.
///
/// The compilation unit is the preamble followed by the flattened source
/// tree, submitted as separate compiler strings. The GPU object is released
/// when the last owner drops the shader.
pub struct Shader {
    name: String,
    stage: ShaderStage,
    id: GpuShaderId,
    preamble: Arc<SourceNode>,
    source: Arc<SourceNode>,
    loaded_from_file: bool,
    string_count: usize,
    source_hash: u128,
    backend: SharedBackend,
}

impl Shader {
    /// Creates and compiles a shader.
    ///
    /// On failure the GPU object is released and the error carries the file
    /// and line the compiler complained about, localized through the source
    /// tree.
    pub fn compile(
        name: &str,
        stage: ShaderStage,
        preamble: Arc<SourceNode>,
        source: Arc<SourceNode>,
        loaded_from_file: bool,
        backend: SharedBackend,
    ) -> Result<Self> {
        let unit = SourceNode::group(name, vec![preamble.clone(), source.clone()]);
        let strings = unit.compiler_strings();
        let joined = strings.concat();
        let source_hash = xxh3_128(joined.as_bytes());

        let id = backend.create_shader(stage);
        let multi_string = backend.supports_multi_string_source();
        let compiled = if multi_string {
            backend.compile_shader(id, &strings)
        } else {
            backend.compile_shader(id, &[joined.as_str()])
        };

        if let Err(log) = compiled {
            backend.delete_shader(id);
            let string_relative = multi_string && backend.reports_string_relative_lines();
            let err = compile_error(name, &unit, &strings, string_relative, log);
            log::error!("{err}");
            return Err(err);
        }

        log::debug!(
            "Compiled {} shader '{}' from {} compiler strings (hash {:032x})",
            stage,
            name,
            strings.len(),
            source_hash
        );

        Ok(Self {
            name: name.to_string(),
            stage,
            id,
            preamble,
            source,
            loaded_from_file,
            string_count: strings.len(),
            source_hash,
            backend,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> GpuShaderId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn preamble(&self) -> &Arc<SourceNode> {
        &self.preamble
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &Arc<SourceNode> {
        &self.source
    }

    /// Whether the body came from a named file rather than inline text.
    #[inline]
    #[must_use]
    pub fn was_loaded_from_file(&self) -> bool {
        self.loaded_from_file
    }

    /// Compiler strings submitted, preamble included.
    #[inline]
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.string_count
    }

    /// xxh3-128 of the full compilation unit.
    #[inline]
    #[must_use]
    pub fn source_hash(&self) -> u128 {
        self.source_hash
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .field("id", &self.id)
            .field("loaded_from_file", &self.loaded_from_file)
            .finish_non_exhaustive()
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        log::debug!("Releasing {} shader '{}'", self.stage, self.name);
        self.backend.delete_shader(self.id);
    }
}

fn compile_error(
    name: &str,
    unit: &SourceNode,
    strings: &[&str],
    string_relative: bool,
    log: String,
) -> GlintError {
    let localized = first_error_location(&log)
        .map(|location| {
            if string_relative {
                unit_line(strings, location)
            } else {
                location.line
            }
        })
        .and_then(|line| unit.localize_line(line));

    match localized {
        Some(at) => GlintError::ShaderCompile {
            shader: name.to_string(),
            file: at.file.to_string(),
            line: at.line,
            log,
        },
        None => GlintError::ShaderCompile {
            shader: name.to_string(),
            file: name.to_string(),
            line: 0,
            log,
        },
    }
}
