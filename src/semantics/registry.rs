//! Semantic Registry
//!
//! Name → (semantic, index) table plus the built-in populator. The registry
//! is the default [`SemanticDelegate`]: it configures every variable whose
//! name it knows and populates every built-in semantic.
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = SemanticRegistry::with_default_mappings(&settings);
//!
//! // Custom shader naming conventions
//! registry.map_var_name("u_sunDirection", Semantic::LightSpotDirectionEyeSpace);
//! registry.map_var_name_indexed("u_fillLightColor", Semantic::LightColorDiffuse, 1);
//! ```
//!
//! Mapping a name that is already present replaces the earlier mapping.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::defaults::{
    DEFAULT_MAPPINGS, LIGHT_PROBE_STRUCT_FIELDS, LIGHT_STRUCT_FIELDS, TEXTURE_UNIT_STRUCT_FIELDS,
};
use super::{Semantic, SemanticDelegate, SemanticPopulator};
use crate::program::ShaderVariable;
use crate::scene::SceneAccessor;
use crate::settings::ShadingSettings;
use crate::utils::interner::{self, Symbol};

/// Declared intent: the variable named `name` carries instance
/// `semantic_index` of `semantic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableConfiguration {
    pub name: String,
    pub semantic: Semantic,
    pub semantic_index: u32,
}

impl VariableConfiguration {
    #[must_use]
    pub fn new(name: impl Into<String>, semantic: Semantic, semantic_index: u32) -> Self {
        Self {
            name: name.into(),
            semantic,
            semantic_index,
        }
    }
}

#[derive(Debug, Default)]
pub struct SemanticRegistry {
    table: RwLock<FxHashMap<Symbol, VariableConfiguration>>,
    populator: SemanticPopulator,
}

impl SemanticRegistry {
    /// Empty registry: no variable names are known.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the canonical name table, with indexed struct forms
    /// expanded to the limits in `settings`. Skinned batches are read up to
    /// `settings.max_bones_per_batch` bones.
    #[must_use]
    pub fn with_default_mappings(settings: &ShadingSettings) -> Self {
        let registry = Self {
            populator: SemanticPopulator::new().with_max_bones_per_batch(settings.max_bones_per_batch),
            ..Self::default()
        };
        registry.populate_default_mappings(
            settings.max_lights,
            settings.max_light_probes,
            settings.max_textures,
        );
        registry
    }

    /// Adds the canonical name table.
    ///
    /// Struct-form names are registered per element, e.g.
    /// `u_cc3Lights[0].positionEyeSpace` through
    /// `u_cc3Lights[max_lights - 1].positionEyeSpace`.
    pub fn populate_default_mappings(&self, max_lights: u32, max_light_probes: u32, max_textures: u32) {
        for &(name, semantic) in DEFAULT_MAPPINGS {
            self.map_var_name(name, semantic);
        }

        let expand = |prefix: &str, fields: &[(&str, Semantic)], count: u32| {
            for index in 0..count {
                for &(field, semantic) in fields {
                    self.map_var_name_indexed(&format!("{prefix}[{index}].{field}"), semantic, index);
                }
            }
        };
        expand("u_cc3Lights", LIGHT_STRUCT_FIELDS, max_lights);
        expand("u_cc3LightProbes", LIGHT_PROBE_STRUCT_FIELDS, max_light_probes);
        expand("u_cc3TextureUnits", TEXTURE_UNIT_STRUCT_FIELDS, max_textures);

        log::debug!(
            "Semantic registry populated with {} variable names",
            self.table.read().len()
        );
    }

    /// Inserts `config`, replacing any configuration with the same name.
    pub fn add_variable_configuration(&self, config: VariableConfiguration) {
        let symbol = interner::intern(&config.name);
        if let Some(previous) = self.table.write().insert(symbol, config) {
            log::debug!(
                "Variable '{}' remapped (was {}[{}])",
                previous.name,
                previous.semantic,
                previous.semantic_index
            );
        }
    }

    pub fn map_var_name(&self, name: &str, semantic: Semantic) {
        self.map_var_name_indexed(name, semantic, 0);
    }

    pub fn map_var_name_indexed(&self, name: &str, semantic: Semantic, semantic_index: u32) {
        self.add_variable_configuration(VariableConfiguration::new(name, semantic, semantic_index));
    }

    #[must_use]
    pub fn configuration(&self, name: &str) -> Option<VariableConfiguration> {
        let symbol = interner::get(name)?;
        self.table.read().get(&symbol).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    #[inline]
    #[must_use]
    pub fn populator(&self) -> &SemanticPopulator {
        &self.populator
    }
}

impl SemanticDelegate for SemanticRegistry {
    fn configure_variable(&self, variable: &mut ShaderVariable) -> bool {
        let table = self.table.read();
        let Some(config) = table.get(&variable.symbol()) else {
            return false;
        };
        variable.configure(config.semantic, config.semantic_index);
        true
    }

    fn populate_uniform(&self, uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
        self.populator.populate_uniform(uniform, scene)
    }

    fn describe_semantic(&self, semantic: Semantic) -> Option<String> {
        if semantic.is_app_defined() {
            return None;
        }
        Some(semantic.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::UniformType;
    use crate::program::VariableKind;
    use crate::semantics::VariableScope;

    fn variable(name: &str) -> ShaderVariable {
        ShaderVariable::new(name, VariableKind::Uniform, 0, UniformType::Vec4, 1)
    }

    #[test]
    fn test_default_mappings_configure_variables() {
        let registry = SemanticRegistry::with_default_mappings(&ShadingSettings::default());

        let mut var = variable("u_cc3CameraPositionGlobal");
        assert!(registry.configure_variable(&mut var));
        assert_eq!(var.semantic(), Semantic::CameraLocationGlobal);
        assert_eq!(var.scope(), VariableScope::Scene);

        let mut var = variable("u_cc3Lights[3].diffuseColor");
        assert!(registry.configure_variable(&mut var));
        assert_eq!(var.semantic(), Semantic::LightColorDiffuse);
        assert_eq!(var.semantic_index(), 3);
    }

    #[test]
    fn test_struct_forms_respect_limits() {
        let registry = SemanticRegistry::new();
        registry.populate_default_mappings(2, 1, 0);

        assert!(registry.configuration("u_cc3Lights[1].isEnabled").is_some());
        assert!(registry.configuration("u_cc3Lights[2].isEnabled").is_none());
        assert!(registry.configuration("u_cc3TextureUnits[0].mode").is_none());
    }

    #[test]
    fn test_unknown_name_is_left_unconfigured() {
        let registry = SemanticRegistry::with_default_mappings(&ShadingSettings::default());
        let mut var = variable("u_myCustomTint");
        assert!(!registry.configure_variable(&mut var));
        assert_eq!(var.semantic(), Semantic::None);
    }

    #[test]
    fn test_remapping_replaces_previous() {
        let registry = SemanticRegistry::new();
        registry.map_var_name("u_tint", Semantic::MaterialColorDiffuse);
        registry.map_var_name_indexed("u_tint", Semantic::LightColorDiffuse, 2);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.configuration("u_tint"),
            Some(VariableConfiguration::new("u_tint", Semantic::LightColorDiffuse, 2))
        );
    }

    #[test]
    fn test_describes_built_in_semantics_only() {
        let registry = SemanticRegistry::new();
        assert_eq!(
            registry.describe_semantic(Semantic::FogColor).as_deref(),
            Some("FogColor")
        );
        assert_eq!(registry.describe_semantic(Semantic::app(1)), None);
    }
}
