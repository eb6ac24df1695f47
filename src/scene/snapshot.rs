use glam::{Mat4, Vec4};

use super::accessor::SceneAccessor;
use super::state::{
    BoneBatch, CameraState, FogState, LightProbeState, LightState, MaterialState, MeshState,
};

/// Owned scene state implementing [`SceneAccessor`].
///
/// Suitable for offline rendering, tools and tests. A renderer sets the
/// per-node fields before binding each node.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    pub camera: CameraState,
    pub model_matrix: Mat4,
    /// Defaults to `model_matrix` when `None`.
    pub model_local_matrix: Option<Mat4>,
    pub mesh: Option<MeshState>,
    pub material: Option<MaterialState>,
    pub lights: Vec<LightState>,
    pub ambient_light: Vec4,
    pub light_probes: Vec<LightProbeState>,
    pub fog: Option<FogState>,
    pub texture_count: usize,
    pub cube_texture_count: usize,
    pub bones: Option<BoneBatch>,
    pub draw_call_count: u32,
    pub scene_time: f32,
    pub frame_time: f32,
    pub random: f32,
}

impl SceneSnapshot {
    #[must_use]
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_light(mut self, light: LightState) -> Self {
        self.lights.push(light);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialState) -> Self {
        self.material = Some(material);
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshState) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Moves to the next node to draw.
    pub fn set_node(&mut self, model_matrix: Mat4) {
        self.model_matrix = model_matrix;
        self.model_local_matrix = None;
    }

    /// Advances the clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame_time = dt;
        self.scene_time += dt;
        self.draw_call_count = 0;
    }
}

impl SceneAccessor for SceneSnapshot {
    fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    fn model_local_matrix(&self) -> Mat4 {
        self.model_local_matrix.unwrap_or(self.model_matrix)
    }

    fn camera(&self) -> &CameraState {
        &self.camera
    }

    fn mesh(&self) -> Option<&MeshState> {
        self.mesh.as_ref()
    }

    fn material(&self) -> Option<&MaterialState> {
        self.material.as_ref()
    }

    fn light_count(&self) -> usize {
        self.lights.len()
    }

    fn light_at(&self, index: usize) -> Option<&LightState> {
        self.lights.get(index)
    }

    fn ambient_light(&self) -> Vec4 {
        self.ambient_light
    }

    fn light_probe_count(&self) -> usize {
        self.light_probes.len()
    }

    fn light_probe_at(&self, index: usize) -> Option<&LightProbeState> {
        self.light_probes.get(index)
    }

    fn fog(&self) -> Option<&FogState> {
        self.fog.as_ref()
    }

    fn texture_count(&self) -> usize {
        self.texture_count
    }

    fn cube_texture_count(&self) -> usize {
        self.cube_texture_count
    }

    fn bone_batch(&self) -> Option<&BoneBatch> {
        self.bones.as_ref()
    }

    fn draw_call_count(&self) -> u32 {
        self.draw_call_count
    }

    fn scene_time(&self) -> f32 {
        self.scene_time
    }

    fn frame_time(&self) -> f32 {
        self.frame_time
    }

    fn random(&self) -> f32 {
        self.random
    }
}
