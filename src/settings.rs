//! Shading Settings
//!
//! Configuration for the shading layer: preambles prepended to every shader,
//! the retention mode of each cache, the missing-uniform policy and the sizes
//! used to build the default variable-name table.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use glint::ShadingSettings;
//!
//! // Defaults: weak caches, strict uniform policy, prewarm after link
//! let settings = ShadingSettings::default();
//!
//! // Pin everything loaded during a loading screen
//! let settings = ShadingSettings {
//!     preload_shaders: true,
//!     preload_programs: true,
//!     ..Default::default()
//! };
//!
//! // Or read them from a JSON document
//! let settings = ShadingSettings::from_json_str(r#"{ "max_lights": 4 }"#)?;
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::ShaderStage;
use crate::errors::Result;

/// Default vertex preamble: ES 2.0 language level, full float precision.
pub const DEFAULT_VERTEX_PREAMBLE: &str = "#version 100\nprecision highp float;\n";

/// Default fragment preamble: ES 2.0 language level, medium float precision.
pub const DEFAULT_FRAGMENT_PREAMBLE: &str = "#version 100\nprecision mediump float;\n";

/// Configuration for a [`ShadingContext`](crate::ShadingContext).
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingSettings {
    /// Source text prepended to every vertex shader.
    pub vertex_preamble: String,
    /// Source text prepended to every fragment shader.
    pub fragment_preamble: String,

    /// Initial "preloading" mode of the source cache.
    ///
    /// `true` pins entries (strong retention); `false` keeps them only while
    /// something else owns them.
    pub preload_sources: bool,
    /// Initial "preloading" mode of the shader cache.
    pub preload_shaders: bool,
    /// Initial "preloading" mode of the program cache.
    pub preload_programs: bool,

    /// Missing-value policy applied to newly linked programs.
    ///
    /// `false` makes a uniform that resolves to no value a hard error, which
    /// surfaces binding bugs on the first draw. `true` substitutes a zero or
    /// identity value of the uniform's type.
    pub allow_default_uniform_values: bool,

    /// Render one throwaway primitive with each program right after linking.
    pub prewarm_programs: bool,

    /// Build source leaves as one compiler string per line.
    pub keep_discrete_lines: bool,

    /// Light slots covered by the default `u_cc3Lights[i]` name mappings.
    pub max_lights: u32,
    /// Light-probe slots covered by the default name mappings.
    pub max_light_probes: u32,
    /// Texture slots covered by the default name mappings.
    pub max_textures: u32,
    /// Bone matrices a single skinned draw batch may carry.
    pub max_bones_per_batch: u32,

    /// Directories searched, in order, by the file source loader.
    pub source_roots: Vec<PathBuf>,
}

impl Default for ShadingSettings {
    fn default() -> Self {
        Self {
            vertex_preamble: DEFAULT_VERTEX_PREAMBLE.to_string(),
            fragment_preamble: DEFAULT_FRAGMENT_PREAMBLE.to_string(),
            preload_sources: false,
            preload_shaders: false,
            preload_programs: false,
            allow_default_uniform_values: false,
            prewarm_programs: true,
            keep_discrete_lines: false,
            max_lights: 8,
            max_light_probes: 4,
            max_textures: 8,
            max_bones_per_batch: 12,
            source_roots: Vec::new(),
        }
    }
}

impl ShadingSettings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the preamble text for the given stage.
    #[inline]
    #[must_use]
    pub fn preamble(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex_preamble,
            ShaderStage::Fragment => &self.fragment_preamble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            ShadingSettings::from_json_str(r#"{ "max_lights": 4, "preload_shaders": true }"#)
                .unwrap();

        assert_eq!(settings.max_lights, 4);
        assert!(settings.preload_shaders);
        assert!(!settings.preload_programs);
        assert_eq!(settings.vertex_preamble, DEFAULT_VERTEX_PREAMBLE);
        assert!(settings.prewarm_programs);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ShadingSettings::from_json_str("{ max_lights: }").is_err());
    }

    #[test]
    fn test_preamble_per_stage() {
        let settings = ShadingSettings::default();
        assert!(settings.preamble(ShaderStage::Vertex).contains("highp"));
        assert!(settings.preamble(ShaderStage::Fragment).contains("mediump"));
    }
}
