//! Plain Scene State
//!
//! Value types handed out by a [`SceneAccessor`](super::SceneAccessor). They
//! carry only what the semantic populator reads; the owning scene graph
//! keeps its own richer representation.

use bitflags::bitflags;
use glam::{Mat4, Vec3, Vec4};

// ============================================================================
// Camera
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone)]
pub struct CameraState {
    pub projection_type: ProjectionType,
    /// Vertical field of view, radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_size: f32,
    /// `(x, y, width, height)` in pixels.
    pub viewport: Vec4,

    pub(crate) position: Vec3,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
}

impl CameraState {
    /// `fov` is given in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            projection_type: ProjectionType::Perspective,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,
            viewport: Vec4::new(0.0, 0.0, 1.0, 1.0),
            position: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    #[must_use]
    pub fn new_orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self::new_perspective(60.0, aspect, near, far);
        cam.projection_type = ProjectionType::Orthographic;
        cam.ortho_size = ortho_size;
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // GLSL ES clip space: depth in [-1, 1]
        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective => {
                Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let (w, h) = self.half_extents();
                Mat4::orthographic_rh_gl(-w, w, -h, h, self.near, self.far)
            }
        };
    }

    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.position = eye;
        self.view_matrix = Mat4::look_at_rh(eye, target, up);
    }

    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec4::new(0.0, 0.0, width, height);
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Half width and half height of the near clipping plane.
    #[must_use]
    pub fn half_extents(&self) -> (f32, f32) {
        match self.projection_type {
            ProjectionType::Perspective => {
                let top = self.near * (self.fov * 0.5).tan();
                (top * self.aspect, top)
            }
            ProjectionType::Orthographic => (self.ortho_size * self.aspect, self.ortho_size),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new_perspective(60.0, 1.0, 0.1, 1000.0)
    }
}

// ============================================================================
// Lights
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// `position` holds the direction toward the light.
    Directional,
    Point,
    Spot,
}

#[derive(Debug, Clone)]
pub struct LightState {
    pub kind: LightKind,
    pub enabled: bool,
    /// Global position, or direction toward the light for directional lights.
    pub position: Vec3,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// Constant, linear and quadratic attenuation coefficients.
    pub attenuation: Vec3,
    pub spot_direction: Vec3,
    pub spot_exponent: f32,
    /// Degrees. 180 disables the spot cone.
    pub spot_cutoff_angle: f32,
}

impl LightState {
    fn base(kind: LightKind, position: Vec3, color: Vec4) -> Self {
        Self {
            kind,
            enabled: true,
            position,
            ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: color,
            specular: color,
            attenuation: Vec3::X,
            spot_direction: Vec3::NEG_Z,
            spot_exponent: 0.0,
            spot_cutoff_angle: 180.0,
        }
    }

    #[must_use]
    pub fn new_directional(direction_to_light: Vec3, color: Vec4) -> Self {
        Self::base(LightKind::Directional, direction_to_light.normalize_or_zero(), color)
    }

    #[must_use]
    pub fn new_point(position: Vec3, color: Vec4) -> Self {
        Self::base(LightKind::Point, position, color)
    }

    #[must_use]
    pub fn new_spot(position: Vec3, direction: Vec3, color: Vec4, cutoff_angle: f32) -> Self {
        let mut light = Self::base(LightKind::Spot, position, color);
        light.spot_direction = direction.normalize_or_zero();
        light.spot_cutoff_angle = cutoff_angle;
        light
    }

    /// Homogeneous global position: `w = 0` for directional lights.
    #[must_use]
    pub fn homogeneous_position(&self) -> Vec4 {
        match self.kind {
            LightKind::Directional => self.position.extend(0.0),
            LightKind::Point | LightKind::Spot => self.position.extend(1.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LightProbeState {
    /// Per-channel intensity multiplier.
    pub intensity: Vec4,
}

// ============================================================================
// Material
// ============================================================================

/// Fixed-function texture combiner settings for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureUnitState {
    pub mode: i32,
    pub constant_color: Vec4,
    pub combine_rgb_function: i32,
    pub combine_alpha_function: i32,
}

impl TextureUnitState {
    /// `GL_MODULATE`
    pub const MODULATE: i32 = 0x2100;

    pub const DEFAULT: Self = Self {
        mode: Self::MODULATE,
        constant_color: Vec4::ZERO,
        combine_rgb_function: Self::MODULATE,
        combine_alpha_function: Self::MODULATE,
    };
}

impl Default for TextureUnitState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone)]
pub struct MaterialState {
    /// Pure color used when lighting is off.
    pub color: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub emission: Vec4,
    pub shininess: f32,
    pub reflectivity: f32,
    /// Fragments with alpha at or below this value are discarded.
    pub minimum_drawn_alpha: f32,
    pub uses_lighting: bool,
    pub texture_units: Vec<TextureUnitState>,
}

impl MaterialState {
    pub const DEFAULT: Self = Self {
        color: Vec4::ONE,
        ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
        diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
        specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
        emission: Vec4::new(0.0, 0.0, 0.0, 1.0),
        shininess: 0.0,
        reflectivity: 0.0,
        minimum_drawn_alpha: 0.0,
        uses_lighting: true,
        texture_units: Vec::new(),
    };

    /// Overall opacity, taken from the diffuse alpha.
    #[inline]
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.diffuse.w
    }
}

impl Default for MaterialState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Fog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FogMode {
    #[default]
    Linear,
    Exp,
    Exp2,
}

impl FogMode {
    /// GL enum value passed to shaders.
    #[must_use]
    pub fn gl_enum(self) -> i32 {
        match self {
            Self::Linear => 0x2601,
            Self::Exp => 0x0800,
            Self::Exp2 => 0x0801,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FogState {
    pub enabled: bool,
    pub color: Vec4,
    pub mode: FogMode,
    pub density: f32,
    pub start: f32,
    pub end: f32,
}

impl Default for FogState {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            mode: FogMode::Linear,
            density: 1.0,
            start: 0.0,
            end: 1.0,
        }
    }
}

// ============================================================================
// Mesh
// ============================================================================

bitflags! {
    /// Vertex streams present in the mesh being drawn.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct VertexContent: u32 {
        const LOCATION            = 1 << 0;
        const NORMAL              = 1 << 1;
        const TANGENT             = 1 << 2;
        const BITANGENT           = 1 << 3;
        const COLOR               = 1 << 4;
        const TEXTURE_COORDINATES = 1 << 5;
        const POINT_SIZE          = 1 << 6;
        const BONE_WEIGHTS        = 1 << 7;
        const BONE_INDICES        = 1 << 8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

/// Point-particle sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointState {
    pub size: f32,
    /// Constant, linear and quadratic distance attenuation.
    pub attenuation: Vec3,
    pub minimum_size: f32,
    pub maximum_size: f32,
    pub sprites_enabled: bool,
}

impl Default for PointState {
    fn default() -> Self {
        Self {
            size: 1.0,
            attenuation: Vec3::X,
            minimum_size: 0.0,
            maximum_size: 64.0,
            sprites_enabled: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MeshState {
    pub content: VertexContent,
    pub texture_coordinate_sets: u32,
    pub should_normalize_normals: bool,
    pub should_rescale_normals: bool,
    pub draw_front_faces: bool,
    pub draw_back_faces: bool,
    pub is_drawing_points: bool,
    pub bounds: BoundingBox,
    pub points: PointState,
    /// Animation progress in `[0, 1]`.
    pub animation_fraction: f32,
}

impl MeshState {
    #[must_use]
    pub fn new(content: VertexContent) -> Self {
        Self {
            content,
            texture_coordinate_sets: u32::from(content.contains(VertexContent::TEXTURE_COORDINATES)),
            should_normalize_normals: false,
            should_rescale_normals: false,
            draw_front_faces: true,
            draw_back_faces: false,
            is_drawing_points: false,
            bounds: BoundingBox::default(),
            points: PointState::default(),
            animation_fraction: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn has(&self, content: VertexContent) -> bool {
        self.content.contains(content)
    }
}

impl Default for MeshState {
    fn default() -> Self {
        Self::new(VertexContent::LOCATION)
    }
}

// ============================================================================
// Skinning
// ============================================================================

/// Bones used by the current skinned draw batch.
#[derive(Debug, Clone, Default)]
pub struct BoneBatch {
    /// Bones influencing each vertex.
    pub vertex_bone_count: u32,
    /// Global transform of each bone.
    pub global_transforms: Vec<Mat4>,
}

impl BoneBatch {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.global_transforms.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global_transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light_is_at_infinity() {
        let light = LightState::new_directional(Vec3::new(0.0, 2.0, 0.0), Vec4::ONE);
        assert_eq!(light.homogeneous_position(), Vec4::new(0.0, 1.0, 0.0, 0.0));

        let light = LightState::new_point(Vec3::new(1.0, 2.0, 3.0), Vec4::ONE);
        assert_eq!(light.homogeneous_position().w, 1.0);
    }

    #[test]
    fn test_camera_half_extents() {
        let cam = CameraState::new_perspective(90.0, 2.0, 1.0, 100.0);
        let (right, top) = cam.half_extents();
        assert!((top - 1.0).abs() < 1e-5);
        assert!((right - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounding_box_metrics() {
        let bounds = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.size(), Vec3::splat(2.0));
        assert!((bounds.radius() - 3f32.sqrt()).abs() < 1e-5);
    }
}
