//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use glam::{Vec3, Vec4};
use glint::scene::{CameraState, LightState, MeshState, VertexContent};
use glint::source::MemorySourceLoader;
use glint::{HeadlessBackend, SceneSnapshot, ShadingContext, ShadingSettings};

pub const BASIC_VSH: &str = "\
attribute vec4 a_cc3Position;
attribute vec3 a_cc3Normal;
uniform mat4 u_cc3MatrixModelViewProj;
uniform mat3 u_cc3MatrixModelViewInvTran;
uniform vec3 u_cc3CameraPositionGlobal;
void main() {
    gl_Position = u_cc3MatrixModelViewProj * a_cc3Position;
}
";

pub const BASIC_FSH: &str = "\
uniform vec4 u_cc3MaterialDiffuseColor;
uniform sampler2D s_cc3Textures[2];
void main() {
    gl_FragColor = u_cc3MaterialDiffuseColor;
}
";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn basic_loader() -> MemorySourceLoader {
    MemorySourceLoader::new()
        .with("basic.vsh", BASIC_VSH)
        .with("basic.fsh", BASIC_FSH)
}

/// Context over a fresh headless backend.
pub fn context_with(
    loader: MemorySourceLoader,
    settings: ShadingSettings,
) -> (Arc<HeadlessBackend>, ShadingContext) {
    init_logger();
    let backend = Arc::new(HeadlessBackend::new());
    let ctx = ShadingContext::new(backend.clone(), Arc::new(loader), settings);
    (backend, ctx)
}

pub fn no_prewarm() -> ShadingSettings {
    ShadingSettings {
        prewarm_programs: false,
        ..Default::default()
    }
}

pub fn lit_scene() -> SceneSnapshot {
    let mut camera = CameraState::new_perspective(60.0, 1.5, 0.1, 100.0).with_viewport(1200.0, 800.0);
    camera.look_at(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO, Vec3::Y);
    SceneSnapshot::new(camera)
        .with_light(LightState::new_point(Vec3::new(1.0, 4.0, 2.0), Vec4::ONE))
        .with_light(LightState::new_directional(Vec3::Y, Vec4::splat(0.5)))
        .with_mesh(MeshState::new(VertexContent::LOCATION | VertexContent::NORMAL))
}
