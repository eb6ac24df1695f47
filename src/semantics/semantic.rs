//! Scene Semantic Catalog
//!
//! A [`Semantic`] names the scene quantity a shader variable carries: a
//! vertex stream, a transform, a material color, a property of the i-th
//! light, the scene time. The set is closed and ordered; declaration order
//! below is the canonical order.
//!
//! Values in the application range ([`Semantic::App`]) are never interpreted
//! by this crate. Only application delegates give them meaning.

use std::fmt;

/// Population frequency tier of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableScope {
    /// Once per frame, on the first use of the program after `begin_scene`.
    Scene,
    /// Once per drawn node.
    #[default]
    Node,
    /// Once per draw call.
    Draw,
}

/// Coarse grouping of semantics. Determines the default [`VariableScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticCategory {
    Control,
    VertexContent,
    MeshState,
    NodeTransform,
    ViewTransform,
    Skinning,
    Camera,
    CameraRelative,
    Material,
    SceneLighting,
    Light,
    LightProbe,
    Fog,
    Texture,
    TextureUnit,
    Model,
    Particles,
    Time,
    Misc,
    Application,
}

impl SemanticCategory {
    /// Vertex content and per-batch data populate per draw call. Global
    /// camera, view, fog, ambient and time data populate once per scene.
    /// Everything relative to the drawn node populates once per node.
    #[must_use]
    pub fn scope(self) -> VariableScope {
        match self {
            Self::VertexContent | Self::Skinning | Self::Misc => VariableScope::Draw,
            Self::ViewTransform | Self::Camera | Self::SceneLighting | Self::Fog | Self::Time => {
                VariableScope::Scene
            }
            Self::Control
            | Self::MeshState
            | Self::NodeTransform
            | Self::CameraRelative
            | Self::Material
            | Self::Light
            | Self::LightProbe
            | Self::Texture
            | Self::TextureUnit
            | Self::Model
            | Self::Particles
            | Self::Application => VariableScope::Node,
        }
    }
}

macro_rules! define_semantics {
    (
        $(
            $category:ident {
                $( $(#[$meta:meta])* $variant:ident ),* $(,)?
            }
        )*
    ) => {
        /// Enumerated scene semantic.
        ///
        /// The ordering derives from declaration order, with every
        /// application-defined value ordered after the built-in set.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub enum Semantic {
            #[default]
            None,
            $( $( $(#[$meta])* $variant, )* )*
            /// Application-defined semantic. Never interpreted by this crate.
            App(u16),
        }

        impl Semantic {
            /// Every built-in semantic, in canonical order (excluding `None`).
            pub const ALL: &'static [Semantic] = &[ $( $( Semantic::$variant, )* )* ];

            /// Stable identifier of the semantic.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    Semantic::None => "None",
                    $( $( Semantic::$variant => stringify!($variant), )* )*
                    Semantic::App(_) => "App",
                }
            }

            #[must_use]
            pub fn category(self) -> SemanticCategory {
                match self {
                    Semantic::None => SemanticCategory::Control,
                    $( $( Semantic::$variant => SemanticCategory::$category, )* )*
                    Semantic::App(_) => SemanticCategory::Application,
                }
            }
        }
    };
}

define_semantics! {
    VertexContent {
        VertexLocation,
        VertexNormal,
        VertexTangent,
        VertexBitangent,
        VertexColor,
        VertexBoneWeights,
        VertexBoneIndices,
        VertexPointSize,
        /// Texture coordinates; the semantic index selects the texture unit.
        VertexTexture,
    }
    MeshState {
        HasVertexNormal,
        ShouldNormalizeVertexNormal,
        ShouldRescaleVertexNormal,
        HasVertexTangent,
        HasVertexBitangent,
        HasVertexColor,
        HasVertexWeight,
        HasVertexMatrixIndex,
        HasVertexTextureCoordinate,
        HasVertexPointSize,
        IsDrawingPoints,
        ShouldDrawFrontFaces,
        ShouldDrawBackFaces,
    }
    NodeTransform {
        ModelLocalMatrix,
        ModelLocalMatrixInv,
        ModelLocalMatrixInvTran,
        ModelMatrix,
        ModelMatrixInv,
        ModelMatrixInvTran,
        ModelViewMatrix,
        ModelViewMatrixInv,
        ModelViewMatrixInvTran,
        ModelViewProjMatrix,
        ModelViewProjMatrixInv,
        ModelViewProjMatrixInvTran,
    }
    ViewTransform {
        ViewMatrix,
        ViewMatrixInv,
        ViewMatrixInvTran,
        ProjMatrix,
        ProjMatrixInv,
        ProjMatrixInvTran,
        ViewProjMatrix,
        ViewProjMatrixInv,
        ViewProjMatrixInvTran,
    }
    Skinning {
        /// Bones influencing each vertex of the current batch.
        VertexBoneCount,
        /// Bones carried by the current batch.
        BatchBoneCount,
        BoneMatricesGlobal,
        BoneMatricesInvTranGlobal,
        BoneMatricesEyeSpace,
        BoneMatricesInvTranEyeSpace,
        BoneMatricesModelSpace,
        BoneMatricesInvTranModelSpace,
        BoneQuaternionsGlobal,
        BoneTranslationsGlobal,
        BoneScalesGlobal,
        BoneQuaternionsEyeSpace,
        BoneTranslationsEyeSpace,
        BoneQuaternionsModelSpace,
        BoneTranslationsModelSpace,
    }
    Camera {
        CameraLocationGlobal,
        /// `(right, top, near, far)` of the near clipping plane.
        CameraFrustum,
        /// `(far, near, -(f+n)/(f-n), -2fn/(f-n))`.
        CameraFrustumDepth,
        ViewportSize,
    }
    CameraRelative {
        CameraLocationModelSpace,
    }
    Material {
        Color,
        MaterialColorAmbient,
        MaterialColorDiffuse,
        MaterialColorSpecular,
        MaterialColorEmission,
        MaterialOpacity,
        MaterialShininess,
        MaterialReflectivity,
        MinimumDrawnAlpha,
        IsUsingLighting,
    }
    SceneLighting {
        SceneLightColorAmbient,
    }
    Light {
        LightIsEnabled,
        LightPositionGlobal,
        LightPositionEyeSpace,
        LightPositionModelSpace,
        LightInvertedPositionGlobal,
        LightInvertedPositionEyeSpace,
        LightInvertedPositionModelSpace,
        LightColorAmbient,
        LightColorDiffuse,
        LightColorSpecular,
        LightAttenuation,
        LightSpotDirectionGlobal,
        LightSpotDirectionEyeSpace,
        LightSpotDirectionModelSpace,
        LightSpotExponent,
        LightSpotCutoffAngle,
        LightSpotCutoffAngleCosine,
    }
    LightProbe {
        LightProbeCount,
        LightProbeIntensity,
        /// Cube-map sampler of the light probe's environment.
        LightProbeTexture,
    }
    Fog {
        FogIsEnabled,
        FogColor,
        FogAttenuationMode,
        FogDensity,
        FogStartDistance,
        FogEndDistance,
    }
    Texture {
        TextureCount,
        TextureSampler,
        TextureCubeCount,
        TextureCubeSampler,
    }
    TextureUnit {
        TexUnitMode,
        TexUnitConstantColor,
        TexUnitCombineRgbFunction,
        TexUnitCombineAlphaFunction,
    }
    Model {
        CenterOfGeometry,
        BoundingRadius,
        BoundingBoxMin,
        BoundingBoxMax,
        BoundingBoxSize,
        AnimationFraction,
    }
    Particles {
        PointSize,
        PointSizeAttenuation,
        PointSizeMinimum,
        PointSizeMaximum,
        PointSpritesIsEnabled,
    }
    Time {
        FrameTime,
        SceneTime,
        SceneTimeSine,
        SceneTimeCosine,
        SceneTimeTangent,
    }
    Misc {
        Random,
        DrawCountCurrentFrame,
    }
}

impl Semantic {
    /// Application-defined semantic with the given identifier.
    #[inline]
    #[must_use]
    pub const fn app(id: u16) -> Self {
        Self::App(id)
    }

    #[inline]
    #[must_use]
    pub fn is_app_defined(self) -> bool {
        matches!(self, Self::App(_))
    }

    #[inline]
    #[must_use]
    pub fn scope(self) -> VariableScope {
        self.category().scope()
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App(id) => write!(f, "App({id})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_classification() {
        assert_eq!(Semantic::CameraLocationGlobal.scope(), VariableScope::Scene);
        assert_eq!(Semantic::ProjMatrix.scope(), VariableScope::Scene);
        assert_eq!(Semantic::FogColor.scope(), VariableScope::Scene);
        assert_eq!(Semantic::ModelLocalMatrix.scope(), VariableScope::Node);
        assert_eq!(Semantic::LightPositionEyeSpace.scope(), VariableScope::Node);
        assert_eq!(Semantic::BoneMatricesEyeSpace.scope(), VariableScope::Draw);
        assert_eq!(Semantic::VertexLocation.scope(), VariableScope::Draw);
        assert_eq!(Semantic::app(7).scope(), VariableScope::Node);
    }

    #[test]
    fn test_ordering_follows_declaration() {
        assert!(Semantic::None < Semantic::VertexLocation);
        assert!(Semantic::VertexLocation < Semantic::ModelMatrix);
        assert!(Semantic::DrawCountCurrentFrame < Semantic::app(0));
        assert!(Semantic::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_names() {
        assert_eq!(Semantic::ModelViewProjMatrix.name(), "ModelViewProjMatrix");
        assert_eq!(Semantic::app(3).to_string(), "App(3)");
        assert_eq!(Semantic::None.category(), SemanticCategory::Control);
    }
}
