//! Semantic Populator
//!
//! Pulls the value of a configured uniform out of the scene and stages it on
//! the variable. Dispatch is by [`SemanticCategory`]; each category reads one
//! accessor family.
//!
//! # Indexed semantics
//!
//! Lights, light probes, bones, texture samplers and texture-unit combiners
//! are indexed. A uniform declared `u_cc3LightPositionEyeSpace[4]` with
//! semantic index 1 receives lights 1..5. If the semantic index is at or past
//! the scene's count the uniform is left unpopulated and `false` is returned.
//! Array elements past the count are padded with a neutral value.
//!
//! # Inverse-transpose matrices
//!
//! `*InvTran` semantics are the inverse-transpose of the upper-left 3×3,
//! computed analytically. They transform normals correctly under non-uniform
//! scale.

use glam::{Mat3, Mat4, Vec3, Vec4};

use super::{Semantic, SemanticCategory};
use crate::program::ShaderVariable;
use crate::scene::{MaterialState, MeshState, SceneAccessor, VertexContent};

static DEFAULT_MATERIAL: MaterialState = MaterialState::DEFAULT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatrixForm {
    Plain,
    Inverse,
    InverseTranspose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    Global,
    Eye,
    Model,
}

/// Built-in population for every non-application semantic.
#[derive(Debug, Clone, Copy)]
pub struct SemanticPopulator {
    max_bones_per_batch: u32,
}

impl Default for SemanticPopulator {
    fn default() -> Self {
        Self {
            max_bones_per_batch: u32::MAX,
        }
    }
}

impl SemanticPopulator {
    /// Populator with no bound on the bones of a skinned batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the bones read from a skinned batch. Bones past the bound are
    /// neither counted nor uploaded.
    #[must_use]
    pub fn with_max_bones_per_batch(mut self, max_bones_per_batch: u32) -> Self {
        self.max_bones_per_batch = max_bones_per_batch;
        self
    }

    #[inline]
    #[must_use]
    pub fn max_bones_per_batch(&self) -> u32 {
        self.max_bones_per_batch
    }

    /// Stages the value of `uniform` from `scene`.
    ///
    /// Returns `false` for unconfigured, vertex-content and
    /// application-defined semantics, and for out-of-range indexed semantics.
    pub fn populate_uniform(&self, uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
        match uniform.semantic().category() {
            SemanticCategory::Control
            | SemanticCategory::VertexContent
            | SemanticCategory::Application => false,
            SemanticCategory::MeshState => populate_mesh_state(uniform, scene),
            SemanticCategory::NodeTransform | SemanticCategory::ViewTransform => {
                populate_transform(uniform, scene)
            }
            SemanticCategory::Skinning => {
                populate_skinning(uniform, scene, self.max_bones_per_batch as usize)
            }
            SemanticCategory::Camera | SemanticCategory::CameraRelative => {
                populate_camera(uniform, scene)
            }
            SemanticCategory::Material => populate_material(uniform, scene),
            SemanticCategory::SceneLighting => {
                uniform.set_vec4(scene.ambient_light());
                true
            }
            SemanticCategory::Light => populate_light(uniform, scene),
            SemanticCategory::LightProbe => populate_light_probe(uniform, scene),
            SemanticCategory::Fog => populate_fog(uniform, scene),
            SemanticCategory::Texture => populate_texture(uniform, scene),
            SemanticCategory::TextureUnit => populate_texture_unit(uniform, scene),
            SemanticCategory::Model => populate_model(uniform, scene),
            SemanticCategory::Particles => populate_particles(uniform, scene),
            SemanticCategory::Time => populate_time(uniform, scene),
            SemanticCategory::Misc => populate_misc(uniform, scene),
        }
    }

    /// Whether a vertex attribute should be enabled for the mesh being drawn.
    ///
    /// Only vertex-content semantics depend on the mesh. Everything else,
    /// including a draw without mesh information, stays enabled.
    #[must_use]
    pub fn attribute_enabled(&self, attribute: &ShaderVariable, mesh: Option<&MeshState>) -> bool {
        let Some(mesh) = mesh else {
            return true;
        };
        let flag = match attribute.semantic() {
            Semantic::VertexLocation => VertexContent::LOCATION,
            Semantic::VertexNormal => VertexContent::NORMAL,
            Semantic::VertexTangent => VertexContent::TANGENT,
            Semantic::VertexBitangent => VertexContent::BITANGENT,
            Semantic::VertexColor => VertexContent::COLOR,
            Semantic::VertexBoneWeights => VertexContent::BONE_WEIGHTS,
            Semantic::VertexBoneIndices => VertexContent::BONE_INDICES,
            Semantic::VertexPointSize => VertexContent::POINT_SIZE,
            Semantic::VertexTexture => {
                return mesh.has(VertexContent::TEXTURE_COORDINATES)
                    && attribute.semantic_index() < mesh.texture_coordinate_sets;
            }
            _ => return true,
        };
        mesh.has(flag)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn set_matrix(uniform: &mut ShaderVariable, m: Mat4, form: MatrixForm) {
    match form {
        MatrixForm::Plain => uniform.set_mat4(m),
        MatrixForm::Inverse => uniform.set_mat4(m.inverse()),
        MatrixForm::InverseTranspose => uniform.set_mat3(inverse_transpose(m)),
    }
}

#[inline]
fn inverse_transpose(m: Mat4) -> Mat3 {
    Mat3::from_mat4(m).inverse().transpose()
}

/// Values for an indexed uniform: elements `index..index + array_size`,
/// padded past `count`. `None` when the index itself is out of range.
fn indexed<T: Copy>(
    uniform: &ShaderVariable,
    count: usize,
    pad: T,
    mut value_at: impl FnMut(usize) -> T,
) -> Option<Vec<T>> {
    let start = uniform.semantic_index() as usize;
    if start >= count {
        return None;
    }
    let end = start + uniform.array_size() as usize;
    Some(
        (start..end)
            .map(|i| if i < count { value_at(i) } else { pad })
            .collect(),
    )
}

/// Consecutive texture units starting at the sampler's assigned unit.
fn sampler_units(uniform: &mut ShaderVariable, count: usize) -> bool {
    let Some(base) = uniform.texture_unit() else {
        return false;
    };
    if uniform.semantic_index() as usize >= count {
        return false;
    }
    let units: Vec<i32> = (0..uniform.array_size()).map(|k| (base + k) as i32).collect();
    uniform.set_int_elements(&units);
    true
}

fn mesh_or_default(scene: &dyn SceneAccessor) -> MeshState {
    scene.mesh().cloned().unwrap_or_default()
}

// ============================================================================
// Categories
// ============================================================================

fn populate_mesh_state(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let mesh = mesh_or_default(scene);
    let value = match uniform.semantic() {
        Semantic::HasVertexNormal => mesh.has(VertexContent::NORMAL),
        Semantic::ShouldNormalizeVertexNormal => {
            mesh.should_normalize_normals && mesh.has(VertexContent::NORMAL)
        }
        Semantic::ShouldRescaleVertexNormal => {
            mesh.should_rescale_normals && mesh.has(VertexContent::NORMAL)
        }
        Semantic::HasVertexTangent => mesh.has(VertexContent::TANGENT),
        Semantic::HasVertexBitangent => mesh.has(VertexContent::BITANGENT),
        Semantic::HasVertexColor => mesh.has(VertexContent::COLOR),
        Semantic::HasVertexWeight => mesh.has(VertexContent::BONE_WEIGHTS),
        Semantic::HasVertexMatrixIndex => mesh.has(VertexContent::BONE_INDICES),
        Semantic::HasVertexTextureCoordinate => {
            mesh.has(VertexContent::TEXTURE_COORDINATES)
                && uniform.semantic_index() < mesh.texture_coordinate_sets
        }
        Semantic::HasVertexPointSize => mesh.has(VertexContent::POINT_SIZE),
        Semantic::IsDrawingPoints => mesh.is_drawing_points,
        Semantic::ShouldDrawFrontFaces => mesh.draw_front_faces,
        Semantic::ShouldDrawBackFaces => mesh.draw_back_faces,
        _ => return false,
    };
    uniform.set_bool(value);
    true
}

fn populate_transform(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    use MatrixForm::{Inverse, InverseTranspose, Plain};

    let camera = scene.camera();
    let view = camera.view_matrix();
    let proj = camera.projection_matrix();

    let (m, form) = match uniform.semantic() {
        Semantic::ModelLocalMatrix => (scene.model_local_matrix(), Plain),
        Semantic::ModelLocalMatrixInv => (scene.model_local_matrix(), Inverse),
        Semantic::ModelLocalMatrixInvTran => (scene.model_local_matrix(), InverseTranspose),
        Semantic::ModelMatrix => (scene.model_matrix(), Plain),
        Semantic::ModelMatrixInv => (scene.model_matrix(), Inverse),
        Semantic::ModelMatrixInvTran => (scene.model_matrix(), InverseTranspose),
        Semantic::ModelViewMatrix => (view * scene.model_matrix(), Plain),
        Semantic::ModelViewMatrixInv => (view * scene.model_matrix(), Inverse),
        Semantic::ModelViewMatrixInvTran => (view * scene.model_matrix(), InverseTranspose),
        Semantic::ModelViewProjMatrix => (proj * view * scene.model_matrix(), Plain),
        Semantic::ModelViewProjMatrixInv => (proj * view * scene.model_matrix(), Inverse),
        Semantic::ModelViewProjMatrixInvTran => {
            (proj * view * scene.model_matrix(), InverseTranspose)
        }
        Semantic::ViewMatrix => (view, Plain),
        Semantic::ViewMatrixInv => (view, Inverse),
        Semantic::ViewMatrixInvTran => (view, InverseTranspose),
        Semantic::ProjMatrix => (proj, Plain),
        Semantic::ProjMatrixInv => (proj, Inverse),
        Semantic::ProjMatrixInvTran => (proj, InverseTranspose),
        Semantic::ViewProjMatrix => (proj * view, Plain),
        Semantic::ViewProjMatrixInv => (proj * view, Inverse),
        Semantic::ViewProjMatrixInvTran => (proj * view, InverseTranspose),
        _ => return false,
    };
    set_matrix(uniform, m, form);
    true
}

fn populate_skinning(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor, max_bones: usize) -> bool {
    let batch = scene.bone_batch();
    match uniform.semantic() {
        Semantic::VertexBoneCount => {
            uniform.set_int(batch.map_or(0, |b| b.vertex_bone_count as i32));
            return true;
        }
        Semantic::BatchBoneCount => {
            uniform.set_int(batch.map_or(0, |b| b.len().min(max_bones) as i32));
            return true;
        }
        _ => {}
    }

    let Some(batch) = batch else {
        return false;
    };
    let view = scene.camera().view_matrix();
    let model_inv = scene.model_matrix().inverse();
    let bone = |i: usize, space: Space| {
        let global = batch.global_transforms[i];
        match space {
            Space::Global => global,
            Space::Eye => view * global,
            Space::Model => model_inv * global,
        }
    };
    let count = batch.len().min(max_bones);

    let matrices = |space: Space| indexed(uniform, count, Mat4::IDENTITY, |i| bone(i, space));
    let inv_tran = |space: Space| {
        indexed(uniform, count, Mat3::IDENTITY, |i| inverse_transpose(bone(i, space)))
    };
    let quaternions = |space: Space| {
        indexed(uniform, count, Vec4::W, |i| {
            let (_, rotation, _) = bone(i, space).to_scale_rotation_translation();
            Vec4::from(rotation)
        })
    };
    let translations = |space: Space| {
        indexed(uniform, count, Vec3::ZERO, |i| bone(i, space).w_axis.truncate())
    };

    enum Values {
        Mat4(Option<Vec<Mat4>>),
        Mat3(Option<Vec<Mat3>>),
        Vec4(Option<Vec<Vec4>>),
        Vec3(Option<Vec<Vec3>>),
    }

    let values = match uniform.semantic() {
        Semantic::BoneMatricesGlobal => Values::Mat4(matrices(Space::Global)),
        Semantic::BoneMatricesEyeSpace => Values::Mat4(matrices(Space::Eye)),
        Semantic::BoneMatricesModelSpace => Values::Mat4(matrices(Space::Model)),
        Semantic::BoneMatricesInvTranGlobal => Values::Mat3(inv_tran(Space::Global)),
        Semantic::BoneMatricesInvTranEyeSpace => Values::Mat3(inv_tran(Space::Eye)),
        Semantic::BoneMatricesInvTranModelSpace => Values::Mat3(inv_tran(Space::Model)),
        Semantic::BoneQuaternionsGlobal => Values::Vec4(quaternions(Space::Global)),
        Semantic::BoneQuaternionsEyeSpace => Values::Vec4(quaternions(Space::Eye)),
        Semantic::BoneQuaternionsModelSpace => Values::Vec4(quaternions(Space::Model)),
        Semantic::BoneTranslationsGlobal => Values::Vec3(translations(Space::Global)),
        Semantic::BoneTranslationsEyeSpace => Values::Vec3(translations(Space::Eye)),
        Semantic::BoneTranslationsModelSpace => Values::Vec3(translations(Space::Model)),
        Semantic::BoneScalesGlobal => Values::Vec3(indexed(uniform, count, Vec3::ONE, |i| {
            let (scale, _, _) = bone(i, Space::Global).to_scale_rotation_translation();
            scale
        })),
        _ => return false,
    };

    match values {
        Values::Mat4(Some(v)) => uniform.set_mat4_elements(&v),
        Values::Mat3(Some(v)) => uniform.set_mat3_elements(&v),
        Values::Vec4(Some(v)) => uniform.set_vec4_elements(&v),
        Values::Vec3(Some(v)) => uniform.set_vec3_elements(&v),
        _ => return false,
    }
    true
}

fn populate_camera(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let camera = scene.camera();
    match uniform.semantic() {
        Semantic::CameraLocationGlobal => uniform.set_point(camera.position()),
        Semantic::CameraLocationModelSpace => {
            let local = scene.model_matrix().inverse().transform_point3(camera.position());
            uniform.set_point(local);
        }
        Semantic::CameraFrustum => {
            let (right, top) = camera.half_extents();
            uniform.set_vec4(Vec4::new(right, top, camera.near, camera.far));
        }
        Semantic::CameraFrustumDepth => {
            let (n, f) = (camera.near, camera.far);
            uniform.set_vec4(Vec4::new(
                f,
                n,
                -(f + n) / (f - n),
                -2.0 * f * n / (f - n),
            ));
        }
        Semantic::ViewportSize => {
            let viewport = camera.viewport;
            if uniform.ty() == crate::backend::UniformType::Vec2 {
                uniform.set_vec2(glam::Vec2::new(viewport.z, viewport.w));
            } else {
                uniform.set_vec4(viewport);
            }
        }
        _ => return false,
    }
    true
}

fn populate_material(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let material = scene.material().unwrap_or(&DEFAULT_MATERIAL);
    match uniform.semantic() {
        Semantic::Color => uniform.set_vec4(material.color),
        Semantic::MaterialColorAmbient => uniform.set_vec4(material.ambient),
        Semantic::MaterialColorDiffuse => uniform.set_vec4(material.diffuse),
        Semantic::MaterialColorSpecular => uniform.set_vec4(material.specular),
        Semantic::MaterialColorEmission => uniform.set_vec4(material.emission),
        Semantic::MaterialOpacity => uniform.set_float(material.opacity()),
        Semantic::MaterialShininess => uniform.set_float(material.shininess),
        Semantic::MaterialReflectivity => uniform.set_float(material.reflectivity),
        Semantic::MinimumDrawnAlpha => uniform.set_float(material.minimum_drawn_alpha),
        Semantic::IsUsingLighting => uniform.set_bool(material.uses_lighting),
        _ => return false,
    }
    true
}

fn populate_light(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let count = scene.light_count();
    let view = scene.camera().view_matrix();
    let model_inv = scene.model_matrix().inverse();

    let position = |i: usize, space: Space, inverted: bool| {
        scene.light_at(i).map_or(Vec4::ZERO, |light| {
            let p = light.homogeneous_position();
            let p = match space {
                Space::Global => p,
                Space::Eye => view * p,
                Space::Model => model_inv * p,
            };
            if inverted { (-p.truncate()).extend(p.w) } else { p }
        })
    };
    let spot_direction = |i: usize, space: Space| {
        scene.light_at(i).map_or(Vec3::ZERO, |light| {
            let d = light.spot_direction;
            match space {
                Space::Global => d,
                Space::Eye => view.transform_vector3(d).normalize_or_zero(),
                Space::Model => model_inv.transform_vector3(d).normalize_or_zero(),
            }
        })
    };
    let color = |i: usize, pick: fn(&crate::scene::LightState) -> Vec4| {
        scene.light_at(i).map_or(Vec4::ZERO, pick)
    };
    let scalar = |i: usize, pick: fn(&crate::scene::LightState) -> f32| {
        scene.light_at(i).map_or(0.0, pick)
    };

    macro_rules! set_indexed {
        ($setter:ident, $pad:expr, $f:expr) => {{
            match indexed(uniform, count, $pad, $f) {
                Some(values) => {
                    uniform.$setter(&values);
                    true
                }
                None => false,
            }
        }};
    }

    match uniform.semantic() {
        Semantic::LightIsEnabled => set_indexed!(set_bool_elements, false, |i| {
            scene.light_at(i).is_some_and(|l| l.enabled)
        }),
        Semantic::LightPositionGlobal => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| position(i, Space::Global, false))
        }
        Semantic::LightPositionEyeSpace => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| position(i, Space::Eye, false))
        }
        Semantic::LightPositionModelSpace => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| position(i, Space::Model, false))
        }
        Semantic::LightInvertedPositionGlobal => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| position(i, Space::Global, true))
        }
        Semantic::LightInvertedPositionEyeSpace => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| position(i, Space::Eye, true))
        }
        Semantic::LightInvertedPositionModelSpace => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| position(i, Space::Model, true))
        }
        Semantic::LightColorAmbient => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| color(i, |l| l.ambient))
        }
        Semantic::LightColorDiffuse => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| color(i, |l| l.diffuse))
        }
        Semantic::LightColorSpecular => {
            set_indexed!(set_vec4_elements, Vec4::ZERO, |i| color(i, |l| l.specular))
        }
        Semantic::LightAttenuation => set_indexed!(set_vec3_elements, Vec3::X, |i| {
            scene.light_at(i).map_or(Vec3::X, |l| l.attenuation)
        }),
        Semantic::LightSpotDirectionGlobal => {
            set_indexed!(set_vec3_elements, Vec3::ZERO, |i| spot_direction(i, Space::Global))
        }
        Semantic::LightSpotDirectionEyeSpace => {
            set_indexed!(set_vec3_elements, Vec3::ZERO, |i| spot_direction(i, Space::Eye))
        }
        Semantic::LightSpotDirectionModelSpace => {
            set_indexed!(set_vec3_elements, Vec3::ZERO, |i| spot_direction(i, Space::Model))
        }
        Semantic::LightSpotExponent => {
            set_indexed!(set_float_elements, 0.0, |i| scalar(i, |l| l.spot_exponent))
        }
        Semantic::LightSpotCutoffAngle => {
            set_indexed!(set_float_elements, 180.0, |i| scalar(i, |l| l.spot_cutoff_angle))
        }
        Semantic::LightSpotCutoffAngleCosine => set_indexed!(set_float_elements, -1.0, |i| {
            scalar(i, |l| l.spot_cutoff_angle.to_radians().cos())
        }),
        _ => false,
    }
}

fn populate_light_probe(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let count = scene.light_probe_count();
    match uniform.semantic() {
        Semantic::LightProbeCount => {
            uniform.set_int(count as i32);
            true
        }
        Semantic::LightProbeIntensity => {
            let values = indexed(uniform, count, Vec4::ZERO, |i| {
                scene.light_probe_at(i).map_or(Vec4::ZERO, |p| p.intensity)
            });
            match values {
                Some(values) => {
                    uniform.set_vec4_elements(&values);
                    true
                }
                None => false,
            }
        }
        Semantic::LightProbeTexture => sampler_units(uniform, count),
        _ => false,
    }
}

fn populate_fog(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let fog = scene.fog().cloned().unwrap_or_default();
    match uniform.semantic() {
        Semantic::FogIsEnabled => uniform.set_bool(fog.enabled),
        Semantic::FogColor => uniform.set_vec4(fog.color),
        Semantic::FogAttenuationMode => uniform.set_int(fog.mode.gl_enum()),
        Semantic::FogDensity => uniform.set_float(fog.density),
        Semantic::FogStartDistance => uniform.set_float(fog.start),
        Semantic::FogEndDistance => uniform.set_float(fog.end),
        _ => return false,
    }
    true
}

fn populate_texture(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    match uniform.semantic() {
        Semantic::TextureCount => {
            uniform.set_int(scene.texture_count() as i32);
            true
        }
        Semantic::TextureCubeCount => {
            uniform.set_int(scene.cube_texture_count() as i32);
            true
        }
        Semantic::TextureSampler => sampler_units(uniform, scene.texture_count()),
        Semantic::TextureCubeSampler => sampler_units(uniform, scene.cube_texture_count()),
        _ => false,
    }
}

fn populate_texture_unit(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let units = &scene.material().unwrap_or(&DEFAULT_MATERIAL).texture_units;
    let count = units.len();
    let int_field = |pick: fn(&crate::scene::TextureUnitState) -> i32| {
        indexed(uniform, count, 0, |i| pick(&units[i]))
    };

    let staged = match uniform.semantic() {
        Semantic::TexUnitMode => int_field(|u| u.mode).map(|v| uniform.set_int_elements(&v)),
        Semantic::TexUnitCombineRgbFunction => {
            int_field(|u| u.combine_rgb_function).map(|v| uniform.set_int_elements(&v))
        }
        Semantic::TexUnitCombineAlphaFunction => {
            int_field(|u| u.combine_alpha_function).map(|v| uniform.set_int_elements(&v))
        }
        Semantic::TexUnitConstantColor => indexed(uniform, count, Vec4::ZERO, |i| {
            units[i].constant_color
        })
        .map(|v| uniform.set_vec4_elements(&v)),
        _ => None,
    };
    staged.is_some()
}

fn populate_model(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let mesh = mesh_or_default(scene);
    let bounds = mesh.bounds;
    match uniform.semantic() {
        Semantic::CenterOfGeometry => uniform.set_point(bounds.center()),
        Semantic::BoundingRadius => uniform.set_float(bounds.radius()),
        Semantic::BoundingBoxMin => uniform.set_vec3(bounds.min),
        Semantic::BoundingBoxMax => uniform.set_vec3(bounds.max),
        Semantic::BoundingBoxSize => uniform.set_vec3(bounds.size()),
        Semantic::AnimationFraction => uniform.set_float(mesh.animation_fraction),
        _ => return false,
    }
    true
}

fn populate_particles(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let points = mesh_or_default(scene).points;
    match uniform.semantic() {
        Semantic::PointSize => uniform.set_float(points.size),
        Semantic::PointSizeAttenuation => uniform.set_vec3(points.attenuation),
        Semantic::PointSizeMinimum => uniform.set_float(points.minimum_size),
        Semantic::PointSizeMaximum => uniform.set_float(points.maximum_size),
        Semantic::PointSpritesIsEnabled => uniform.set_bool(points.sprites_enabled),
        _ => return false,
    }
    true
}

fn populate_time(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    let t = scene.scene_time();
    // (t, t/2, t/4, t/8) through the trig function
    let harmonics = |f: fn(f32) -> f32| Vec4::new(f(t), f(t * 0.5), f(t * 0.25), f(t * 0.125));
    match uniform.semantic() {
        Semantic::FrameTime => uniform.set_float(scene.frame_time()),
        Semantic::SceneTime => uniform.set_float(t),
        Semantic::SceneTimeSine => uniform.set_vec4(harmonics(f32::sin)),
        Semantic::SceneTimeCosine => uniform.set_vec4(harmonics(f32::cos)),
        Semantic::SceneTimeTangent => uniform.set_vec4(harmonics(f32::tan)),
        _ => return false,
    }
    true
}

fn populate_misc(uniform: &mut ShaderVariable, scene: &dyn SceneAccessor) -> bool {
    match uniform.semantic() {
        Semantic::Random => uniform.set_float(scene.random()),
        Semantic::DrawCountCurrentFrame => uniform.set_int(scene.draw_call_count() as i32),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::UniformType;
    use crate::program::{UniformValue, VariableKind};
    use crate::scene::{CameraState, LightState, SceneSnapshot};

    fn uniform(semantic: Semantic, index: u32, ty: UniformType, size: u32) -> ShaderVariable {
        let mut var = ShaderVariable::new("u_test", VariableKind::Uniform, 0, ty, size);
        var.configure(semantic, index);
        var
    }

    fn lit_scene(lights: usize) -> SceneSnapshot {
        let mut scene = SceneSnapshot::new(CameraState::default());
        for i in 0..lights {
            scene.lights.push(LightState::new_point(Vec3::new(i as f32, 0.0, 0.0), Vec4::ONE));
        }
        scene
    }

    #[test]
    fn test_light_index_past_count_is_not_populated() {
        let scene = lit_scene(2);
        let populator = SemanticPopulator::new();

        let mut var = uniform(Semantic::LightPositionGlobal, 2, UniformType::Vec4, 1);
        assert!(!populator.populate_uniform(&mut var, &scene));
        assert!(var.staged_value().is_none());

        let mut var = uniform(Semantic::LightPositionGlobal, 1, UniformType::Vec4, 1);
        assert!(populator.populate_uniform(&mut var, &scene));
        assert_eq!(
            var.staged_value(),
            Some(&UniformValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn test_light_array_is_padded() {
        let scene = lit_scene(1);
        let mut var = uniform(Semantic::LightIsEnabled, 0, UniformType::Bool, 3);
        assert!(SemanticPopulator::new().populate_uniform(&mut var, &scene));
        assert_eq!(
            var.staged_value(),
            Some(&UniformValue::BoolArray(vec![true, false, false]))
        );
    }

    #[test]
    fn test_inverse_transpose_is_analytic() {
        let mut scene = lit_scene(0);
        let model = Mat4::from_scale(Vec3::new(2.0, 4.0, 8.0));
        scene.set_node(model);

        let mut var = uniform(Semantic::ModelMatrixInvTran, 0, UniformType::Mat3, 1);
        assert!(SemanticPopulator::new().populate_uniform(&mut var, &scene));
        let expected = Mat3::from_diagonal(Vec3::new(0.5, 0.25, 0.125));
        match var.staged_value() {
            Some(UniformValue::Mat3(m)) => assert!(m.abs_diff_eq(expected, 1e-6)),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_semantics_fall_through() {
        let scene = lit_scene(0);
        for semantic in [Semantic::None, Semantic::VertexNormal, Semantic::app(4)] {
            let mut var = uniform(semantic, 0, UniformType::Vec4, 1);
            assert!(!SemanticPopulator::new().populate_uniform(&mut var, &scene));
        }
    }

    #[test]
    fn test_frustum_depth() {
        let scene = SceneSnapshot::new(CameraState::new_perspective(60.0, 1.0, 1.0, 3.0));
        let mut var = uniform(Semantic::CameraFrustumDepth, 0, UniformType::Vec4, 1);
        assert!(SemanticPopulator::new().populate_uniform(&mut var, &scene));
        assert_eq!(
            var.staged_value(),
            Some(&UniformValue::Vec4(Vec4::new(3.0, 1.0, -2.0, -3.0)))
        );
    }

    #[test]
    fn test_attribute_enabled_follows_mesh_content() {
        let mesh = MeshState::new(VertexContent::LOCATION | VertexContent::NORMAL);
        let mut normal = ShaderVariable::new("a_n", VariableKind::Attribute, 0, UniformType::Vec3, 1);
        normal.configure(Semantic::VertexNormal, 0);
        let mut color = ShaderVariable::new("a_c", VariableKind::Attribute, 1, UniformType::Vec4, 1);
        color.configure(Semantic::VertexColor, 0);

        assert!(SemanticPopulator::new().attribute_enabled(&normal, Some(&mesh)));
        assert!(!SemanticPopulator::new().attribute_enabled(&color, Some(&mesh)));
        assert!(SemanticPopulator::new().attribute_enabled(&color, None));
    }
}
