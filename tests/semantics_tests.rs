//! Semantic Binding Integration Tests
//!
//! Tests for:
//! - Name → semantic configuration of linked programs
//! - Remapping (last write wins) through the context's registry
//! - Application delegates chained ahead of the registry
//! - Indexed semantics bounded by the scene's item counts
//! - Skinning values for a bone batch

mod common;

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};
use glint::backend::UniformType;
use glint::program::{ShaderVariable, VariableKind};
use glint::scene::{BoneBatch, CameraState, SceneAccessor};
use glint::semantics::{DelegateChain, SemanticPopulator};
use glint::source::MemorySourceLoader;
use glint::{
    HeadlessBackend, SceneSnapshot, Semantic, SemanticDelegate, SemanticRegistry, ShadingContext,
    ShadingSettings, UniformValue, VariableScope,
};

const TINT: Semantic = Semantic::app(1);

/// Application delegate owning `u_appTint`.
struct TintDelegate {
    tint: Vec4,
}

impl SemanticDelegate for TintDelegate {
    fn configure_variable(&self, variable: &mut ShaderVariable) -> bool {
        if variable.name() != "u_appTint" {
            return false;
        }
        variable.configure(TINT, 0);
        true
    }

    fn populate_uniform(&self, uniform: &mut ShaderVariable, _scene: &dyn SceneAccessor) -> bool {
        if uniform.semantic() != TINT {
            return false;
        }
        uniform.set_vec4(self.tint);
        true
    }

    fn describe_semantic(&self, semantic: Semantic) -> Option<String> {
        (semantic == TINT).then(|| "AppTint".to_string())
    }
}

fn uniform(name: &str, ty: UniformType, size: u32) -> ShaderVariable {
    ShaderVariable::new(name, VariableKind::Uniform, 0, ty, size)
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn linked_uniforms_are_classified_by_scope() {
    let loader = MemorySourceLoader::new()
        .with(
            "scoped.vsh",
            "uniform vec3 u_cc3CameraPositionGlobal;\nuniform mat4 u_cc3MatrixModelLocal;\nuniform int u_cc3BatchBoneCount;\n",
        )
        .with("plain.fsh", "void main() {}\n");
    let (_, ctx) = common::context_with(loader, common::no_prewarm());

    let program = ctx.program_from_files("scoped.vsh", "plain.fsh").unwrap();
    assert_eq!(program.uniform_names(VariableScope::Scene), vec!["u_cc3CameraPositionGlobal"]);
    assert_eq!(program.uniform_names(VariableScope::Node), vec!["u_cc3MatrixModelLocal"]);
    assert_eq!(program.uniform_names(VariableScope::Draw), vec!["u_cc3BatchBoneCount"]);
}

#[test]
fn second_mapping_wins() {
    let registry = SemanticRegistry::with_default_mappings(&ShadingSettings::default());
    registry.map_var_name("u_customColor", Semantic::MaterialColorAmbient);
    registry.map_var_name("u_customColor", Semantic::MaterialColorSpecular);

    let mut var = uniform("u_customColor", UniformType::Vec4, 1);
    assert!(registry.configure_variable(&mut var));
    assert_eq!(var.semantic(), Semantic::MaterialColorSpecular);
}

#[test]
fn remapping_default_name_changes_linked_semantic() {
    let loader = MemorySourceLoader::new()
        .with("remap.vsh", "uniform vec4 u_cc3Color;\n")
        .with("plain.fsh", "void main() {}\n");
    let (_, ctx) = common::context_with(loader, common::no_prewarm());
    ctx.registry().map_var_name("u_cc3Color", Semantic::FogColor);

    let program = ctx.program_from_files("remap.vsh", "plain.fsh").unwrap();
    let color = program.uniform("u_cc3Color").unwrap();
    assert_eq!(color.semantic(), Semantic::FogColor);
    assert_eq!(color.scope(), VariableScope::Scene);
}

// ============================================================================
// Delegate Chaining
// ============================================================================

#[test]
fn app_delegate_runs_ahead_of_registry() -> anyhow::Result<()> {
    common::init_logger();
    let loader = MemorySourceLoader::new()
        .with("tint.vsh", "uniform vec4 u_appTint;\nuniform vec4 u_cc3MaterialDiffuseColor;\n")
        .with("plain.fsh", "void main() {}\n");
    let backend = Arc::new(HeadlessBackend::new());
    let tint = Vec4::new(1.0, 0.5, 0.25, 1.0);
    let ctx = ShadingContext::new(backend.clone(), Arc::new(loader), common::no_prewarm())
        .with_delegate(Arc::new(TintDelegate { tint }));

    let program = ctx.program_from_files("tint.vsh", "plain.fsh")?;
    program.bind_for_node(&SceneSnapshot::default())?;

    assert_eq!(program.last_written("u_appTint"), Some(UniformValue::Vec4(tint)));
    assert!(program.last_written("u_cc3MaterialDiffuseColor").is_some());
    Ok(())
}

#[test]
fn chain_stops_at_first_success() {
    let first = Arc::new(TintDelegate { tint: Vec4::X });
    let second = Arc::new(TintDelegate { tint: Vec4::Y });
    let chain = DelegateChain::new().with(first).with(second);
    assert_eq!(chain.len(), 2);

    let mut var = uniform("u_appTint", UniformType::Vec4, 1);
    assert!(chain.configure_variable(&mut var));
    assert!(chain.populate_uniform(&mut var, &SceneSnapshot::default()));
    assert_eq!(var.staged_value(), Some(&UniformValue::Vec4(Vec4::X)));
    assert_eq!(chain.describe_semantic(TINT).as_deref(), Some("AppTint"));
}

#[test]
fn registry_leaves_app_semantics_unpopulated() {
    let registry = SemanticRegistry::new();
    let mut var = uniform("u_appTint", UniformType::Vec4, 1);
    var.configure(TINT, 0);
    assert!(!registry.populate_uniform(&mut var, &SceneSnapshot::default()));
}

// ============================================================================
// Indexed Semantics
// ============================================================================

#[test]
fn light_struct_index_past_light_count() {
    let registry = SemanticRegistry::with_default_mappings(&ShadingSettings::default());
    let scene = common::lit_scene();
    assert_eq!(scene.light_count(), 2);

    let mut present = uniform("u_cc3Lights[1].diffuseColor", UniformType::Vec4, 1);
    assert!(registry.configure_variable(&mut present));
    assert!(registry.populate_uniform(&mut present, &scene));
    assert_eq!(present.staged_value(), Some(&UniformValue::Vec4(Vec4::splat(0.5))));

    let mut absent = uniform("u_cc3Lights[5].diffuseColor", UniformType::Vec4, 1);
    assert!(registry.configure_variable(&mut absent));
    assert!(!registry.populate_uniform(&mut absent, &scene));
    assert!(absent.staged_value().is_none());
}

#[test]
fn light_arrays_pad_past_light_count() {
    let registry = SemanticRegistry::with_default_mappings(&ShadingSettings::default());
    let scene = common::lit_scene();

    let mut enabled = uniform("u_cc3LightIsLightEnabled", UniformType::Bool, 4);
    assert!(registry.configure_variable(&mut enabled));
    assert!(registry.populate_uniform(&mut enabled, &scene));
    assert_eq!(
        enabled.staged_value(),
        Some(&UniformValue::BoolArray(vec![true, true, false, false]))
    );
}

// ============================================================================
// Skinning
// ============================================================================

#[test]
fn bone_matrices_in_each_space() {
    let mut camera = CameraState::default();
    camera.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let mut scene = SceneSnapshot::new(camera);
    scene.set_node(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));
    let bone = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
    scene.bones = Some(BoneBatch {
        vertex_bone_count: 2,
        global_transforms: vec![bone],
    });

    let populate = |semantic, ty, size| {
        let mut var = uniform("u_bones", ty, size);
        var.configure(semantic, 0);
        assert!(SemanticPopulator::new().populate_uniform(&mut var, &scene));
        var.staged_value().cloned()
    };

    assert_eq!(
        populate(Semantic::BoneMatricesGlobal, UniformType::Mat4, 2),
        Some(UniformValue::Mat4Array(vec![bone, Mat4::IDENTITY]))
    );
    match populate(Semantic::BoneMatricesModelSpace, UniformType::Mat4, 1) {
        Some(UniformValue::Mat4(m)) => {
            let expected = Mat4::from_translation(Vec3::new(2.0, -1.0, 0.0));
            assert!(m.abs_diff_eq(expected, 1e-6));
        }
        other => panic!("unexpected value {other:?}"),
    }
    assert_eq!(
        populate(Semantic::VertexBoneCount, UniformType::Int, 1),
        Some(UniformValue::Int(2))
    );
    match populate(Semantic::BoneTranslationsEyeSpace, UniformType::Vec3, 1) {
        Some(UniformValue::Vec3(t)) => assert!(t.abs_diff_eq(Vec3::new(2.0, 0.0, -5.0), 1e-5)),
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn batch_bones_bounded_by_settings() {
    let settings = ShadingSettings {
        max_bones_per_batch: 2,
        ..Default::default()
    };
    let registry = SemanticRegistry::with_default_mappings(&settings);
    assert_eq!(registry.populator().max_bones_per_batch(), 2);

    let bones: Vec<Mat4> = (1..=3)
        .map(|x| Mat4::from_translation(Vec3::new(x as f32, 0.0, 0.0)))
        .collect();
    let mut scene = SceneSnapshot::default();
    scene.bones = Some(BoneBatch {
        vertex_bone_count: 4,
        global_transforms: bones.clone(),
    });

    let mut matrices = uniform("u_bones", UniformType::Mat4, 3);
    matrices.configure(Semantic::BoneMatricesGlobal, 0);
    assert!(registry.populate_uniform(&mut matrices, &scene));
    assert_eq!(
        matrices.staged_value(),
        Some(&UniformValue::Mat4Array(vec![bones[0], bones[1], Mat4::IDENTITY]))
    );

    let mut count = uniform("u_count", UniformType::Int, 1);
    count.configure(Semantic::BatchBoneCount, 0);
    assert!(registry.populate_uniform(&mut count, &scene));
    assert_eq!(count.staged_value(), Some(&UniformValue::Int(2)));

    let mut past = uniform("u_third", UniformType::Mat4, 1);
    past.configure(Semantic::BoneMatricesGlobal, 2);
    assert!(!registry.populate_uniform(&mut past, &scene));
}
