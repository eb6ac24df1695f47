use glam::{Mat4, Vec4};

use super::state::{
    BoneBatch, CameraState, FogState, LightProbeState, LightState, MaterialState, MeshState,
};

/// Read-only view of the scene at the node currently being drawn.
///
/// One method family per semantic category. Optional categories default to
/// "absent" so a minimal accessor only has to provide the transforms and the
/// camera. Indexed getters return `None` past their count.
pub trait SceneAccessor {
    /// Global transform of the current node.
    fn model_matrix(&self) -> Mat4;

    /// Transform of the current node relative to its parent.
    fn model_local_matrix(&self) -> Mat4 {
        self.model_matrix()
    }

    fn camera(&self) -> &CameraState;

    fn mesh(&self) -> Option<&MeshState> {
        None
    }

    fn material(&self) -> Option<&MaterialState> {
        None
    }

    fn light_count(&self) -> usize {
        0
    }

    fn light_at(&self, _index: usize) -> Option<&LightState> {
        None
    }

    fn ambient_light(&self) -> Vec4 {
        Vec4::ZERO
    }

    fn light_probe_count(&self) -> usize {
        0
    }

    fn light_probe_at(&self, _index: usize) -> Option<&LightProbeState> {
        None
    }

    fn fog(&self) -> Option<&FogState> {
        None
    }

    /// 2D textures bound by the current material.
    fn texture_count(&self) -> usize {
        0
    }

    fn cube_texture_count(&self) -> usize {
        0
    }

    fn bone_batch(&self) -> Option<&BoneBatch> {
        None
    }

    /// Draw calls issued so far in the current frame.
    fn draw_call_count(&self) -> u32 {
        0
    }

    /// Seconds since the scene started.
    fn scene_time(&self) -> f32 {
        0.0
    }

    /// Seconds since the previous frame.
    fn frame_time(&self) -> f32 {
        0.0
    }

    /// A value in `[0, 1)`, fresh for each draw.
    fn random(&self) -> f32 {
        0.0
    }
}
