//! Default Variable Names
//!
//! Canonical shader variable names and the semantics they carry. Attributes
//! use an `a_` prefix, uniforms `u_`, samplers `s_`.
//!
//! Names listed in [`DEFAULT_MAPPINGS`] map with semantic index 0; array
//! uniforms such as `u_cc3LightPositionEyeSpace[8]` then cover lights 0..8.
//! The indexed struct forms (`u_cc3Lights[2].positionEyeSpace`) are expanded
//! by [`SemanticRegistry::populate_default_mappings`] up to the configured
//! limits.
//!
//! [`SemanticRegistry::populate_default_mappings`]: super::SemanticRegistry::populate_default_mappings

use super::Semantic;

/// Name → semantic pairs registered with semantic index 0.
pub static DEFAULT_MAPPINGS: &[(&str, Semantic)] = &[
    // Vertex content
    ("a_cc3Position", Semantic::VertexLocation),
    ("a_cc3Normal", Semantic::VertexNormal),
    ("a_cc3Tangent", Semantic::VertexTangent),
    ("a_cc3Bitangent", Semantic::VertexBitangent),
    ("a_cc3Color", Semantic::VertexColor),
    ("a_cc3BoneWeights", Semantic::VertexBoneWeights),
    ("a_cc3BoneIndices", Semantic::VertexBoneIndices),
    ("a_cc3PointSize", Semantic::VertexPointSize),
    ("a_cc3TexCoord", Semantic::VertexTexture),
    // Mesh state
    ("u_cc3VertexHasNormal", Semantic::HasVertexNormal),
    ("u_cc3VertexShouldNormalizeNormal", Semantic::ShouldNormalizeVertexNormal),
    ("u_cc3VertexShouldRescaleNormal", Semantic::ShouldRescaleVertexNormal),
    ("u_cc3VertexHasTangent", Semantic::HasVertexTangent),
    ("u_cc3VertexHasBitangent", Semantic::HasVertexBitangent),
    ("u_cc3VertexHasColor", Semantic::HasVertexColor),
    ("u_cc3VertexHasWeight", Semantic::HasVertexWeight),
    ("u_cc3VertexHasMatrixIndex", Semantic::HasVertexMatrixIndex),
    ("u_cc3VertexHasTexCoord", Semantic::HasVertexTextureCoordinate),
    ("u_cc3VertexHasPointSize", Semantic::HasVertexPointSize),
    ("u_cc3IsDrawingPoints", Semantic::IsDrawingPoints),
    ("u_cc3VertexShouldDrawFrontFaces", Semantic::ShouldDrawFrontFaces),
    ("u_cc3VertexShouldDrawBackFaces", Semantic::ShouldDrawBackFaces),
    // Node transforms
    ("u_cc3MatrixModelLocal", Semantic::ModelLocalMatrix),
    ("u_cc3MatrixModelLocalInv", Semantic::ModelLocalMatrixInv),
    ("u_cc3MatrixModelLocalInvTran", Semantic::ModelLocalMatrixInvTran),
    ("u_cc3MatrixModel", Semantic::ModelMatrix),
    ("u_cc3MatrixModelInv", Semantic::ModelMatrixInv),
    ("u_cc3MatrixModelInvTran", Semantic::ModelMatrixInvTran),
    ("u_cc3MatrixModelView", Semantic::ModelViewMatrix),
    ("u_cc3MatrixModelViewInv", Semantic::ModelViewMatrixInv),
    ("u_cc3MatrixModelViewInvTran", Semantic::ModelViewMatrixInvTran),
    ("u_cc3MatrixModelViewProj", Semantic::ModelViewProjMatrix),
    ("u_cc3MatrixModelViewProjInv", Semantic::ModelViewProjMatrixInv),
    ("u_cc3MatrixModelViewProjInvTran", Semantic::ModelViewProjMatrixInvTran),
    // View transforms
    ("u_cc3MatrixView", Semantic::ViewMatrix),
    ("u_cc3MatrixViewInv", Semantic::ViewMatrixInv),
    ("u_cc3MatrixViewInvTran", Semantic::ViewMatrixInvTran),
    ("u_cc3MatrixProj", Semantic::ProjMatrix),
    ("u_cc3MatrixProjInv", Semantic::ProjMatrixInv),
    ("u_cc3MatrixProjInvTran", Semantic::ProjMatrixInvTran),
    ("u_cc3MatrixViewProj", Semantic::ViewProjMatrix),
    ("u_cc3MatrixViewProjInv", Semantic::ViewProjMatrixInv),
    ("u_cc3MatrixViewProjInvTran", Semantic::ViewProjMatrixInvTran),
    // Skinning
    ("u_cc3VertexBoneCount", Semantic::VertexBoneCount),
    ("u_cc3BatchBoneCount", Semantic::BatchBoneCount),
    ("u_cc3BoneMatricesGlobal", Semantic::BoneMatricesGlobal),
    ("u_cc3BoneMatricesInvTranGlobal", Semantic::BoneMatricesInvTranGlobal),
    ("u_cc3BoneMatricesEyeSpace", Semantic::BoneMatricesEyeSpace),
    ("u_cc3BoneMatricesInvTranEyeSpace", Semantic::BoneMatricesInvTranEyeSpace),
    ("u_cc3BoneMatricesModelSpace", Semantic::BoneMatricesModelSpace),
    ("u_cc3BoneMatricesInvTranModelSpace", Semantic::BoneMatricesInvTranModelSpace),
    ("u_cc3BoneQuaternionsGlobal", Semantic::BoneQuaternionsGlobal),
    ("u_cc3BoneTranslationsGlobal", Semantic::BoneTranslationsGlobal),
    ("u_cc3BoneScalesGlobal", Semantic::BoneScalesGlobal),
    ("u_cc3BoneQuaternionsEyeSpace", Semantic::BoneQuaternionsEyeSpace),
    ("u_cc3BoneTranslationsEyeSpace", Semantic::BoneTranslationsEyeSpace),
    ("u_cc3BoneQuaternionsModelSpace", Semantic::BoneQuaternionsModelSpace),
    ("u_cc3BoneTranslationsModelSpace", Semantic::BoneTranslationsModelSpace),
    // Camera
    ("u_cc3CameraPositionGlobal", Semantic::CameraLocationGlobal),
    ("u_cc3CameraPositionModel", Semantic::CameraLocationModelSpace),
    ("u_cc3CameraFrustum", Semantic::CameraFrustum),
    ("u_cc3CameraFrustumDepth", Semantic::CameraFrustumDepth),
    ("u_cc3CameraViewport", Semantic::ViewportSize),
    // Material
    ("u_cc3Color", Semantic::Color),
    ("u_cc3MaterialAmbientColor", Semantic::MaterialColorAmbient),
    ("u_cc3MaterialDiffuseColor", Semantic::MaterialColorDiffuse),
    ("u_cc3MaterialSpecularColor", Semantic::MaterialColorSpecular),
    ("u_cc3MaterialEmissionColor", Semantic::MaterialColorEmission),
    ("u_cc3MaterialOpacity", Semantic::MaterialOpacity),
    ("u_cc3MaterialShininess", Semantic::MaterialShininess),
    ("u_cc3MaterialReflectivity", Semantic::MaterialReflectivity),
    ("u_cc3MaterialMinimumDrawnAlpha", Semantic::MinimumDrawnAlpha),
    ("u_cc3LightIsUsingLighting", Semantic::IsUsingLighting),
    // Lighting, array forms
    ("u_cc3LightSceneAmbientLightColor", Semantic::SceneLightColorAmbient),
    ("u_cc3LightIsLightEnabled", Semantic::LightIsEnabled),
    ("u_cc3LightPositionGlobal", Semantic::LightPositionGlobal),
    ("u_cc3LightPositionEyeSpace", Semantic::LightPositionEyeSpace),
    ("u_cc3LightPositionModel", Semantic::LightPositionModelSpace),
    ("u_cc3LightInvertedPositionGlobal", Semantic::LightInvertedPositionGlobal),
    ("u_cc3LightInvertedPositionEyeSpace", Semantic::LightInvertedPositionEyeSpace),
    ("u_cc3LightInvertedPositionModel", Semantic::LightInvertedPositionModelSpace),
    ("u_cc3LightAmbientColor", Semantic::LightColorAmbient),
    ("u_cc3LightDiffuseColor", Semantic::LightColorDiffuse),
    ("u_cc3LightSpecularColor", Semantic::LightColorSpecular),
    ("u_cc3LightAttenuation", Semantic::LightAttenuation),
    ("u_cc3LightSpotDirectionGlobal", Semantic::LightSpotDirectionGlobal),
    ("u_cc3LightSpotDirectionEyeSpace", Semantic::LightSpotDirectionEyeSpace),
    ("u_cc3LightSpotDirectionModel", Semantic::LightSpotDirectionModelSpace),
    ("u_cc3LightSpotExponent", Semantic::LightSpotExponent),
    ("u_cc3LightSpotCutoffAngle", Semantic::LightSpotCutoffAngle),
    ("u_cc3LightSpotCutoffAngleCosine", Semantic::LightSpotCutoffAngleCosine),
    // Light probes
    ("u_cc3LightProbeCount", Semantic::LightProbeCount),
    ("u_cc3LightProbeIntensity", Semantic::LightProbeIntensity),
    ("s_cc3LightProbeTextures", Semantic::LightProbeTexture),
    // Fog
    ("u_cc3FogIsEnabled", Semantic::FogIsEnabled),
    ("u_cc3FogColor", Semantic::FogColor),
    ("u_cc3FogAttenuationMode", Semantic::FogAttenuationMode),
    ("u_cc3FogDensity", Semantic::FogDensity),
    ("u_cc3FogStartDistance", Semantic::FogStartDistance),
    ("u_cc3FogEndDistance", Semantic::FogEndDistance),
    // Textures
    ("u_cc3TextureCount", Semantic::TextureCount),
    ("s_cc3Textures", Semantic::TextureSampler),
    ("u_cc3TextureCubeCount", Semantic::TextureCubeCount),
    ("s_cc3TextureCubes", Semantic::TextureCubeSampler),
    // Texture unit combiners
    ("u_cc3TextureUnitMode", Semantic::TexUnitMode),
    ("u_cc3TextureUnitColor", Semantic::TexUnitConstantColor),
    ("u_cc3TextureUnitCombineRGBFunction", Semantic::TexUnitCombineRgbFunction),
    ("u_cc3TextureUnitCombineAlphaFunction", Semantic::TexUnitCombineAlphaFunction),
    // Model
    ("u_cc3ModelCenterOfGeometry", Semantic::CenterOfGeometry),
    ("u_cc3ModelBoundingRadius", Semantic::BoundingRadius),
    ("u_cc3ModelBoundingBoxMinimum", Semantic::BoundingBoxMin),
    ("u_cc3ModelBoundingBoxMaximum", Semantic::BoundingBoxMax),
    ("u_cc3ModelBoundingBoxSize", Semantic::BoundingBoxSize),
    ("u_cc3ModelAnimationFraction", Semantic::AnimationFraction),
    // Particles
    ("u_cc3PointSize", Semantic::PointSize),
    ("u_cc3PointSizeAttenuation", Semantic::PointSizeAttenuation),
    ("u_cc3PointMinimumSize", Semantic::PointSizeMinimum),
    ("u_cc3PointMaximumSize", Semantic::PointSizeMaximum),
    ("u_cc3PointShouldDisplayAsSprites", Semantic::PointSpritesIsEnabled),
    // Time
    ("u_cc3FrameTime", Semantic::FrameTime),
    ("u_cc3SceneTime", Semantic::SceneTime),
    ("u_cc3SceneTimeSin", Semantic::SceneTimeSine),
    ("u_cc3SceneTimeCos", Semantic::SceneTimeCosine),
    ("u_cc3SceneTimeTan", Semantic::SceneTimeTangent),
    // Misc
    ("u_cc3Random", Semantic::Random),
    ("u_cc3DrawCount", Semantic::DrawCountCurrentFrame),
];

/// Field names of the `u_cc3Lights[i]` struct form.
pub static LIGHT_STRUCT_FIELDS: &[(&str, Semantic)] = &[
    ("isEnabled", Semantic::LightIsEnabled),
    ("positionGlobal", Semantic::LightPositionGlobal),
    ("positionEyeSpace", Semantic::LightPositionEyeSpace),
    ("positionModel", Semantic::LightPositionModelSpace),
    ("ambientColor", Semantic::LightColorAmbient),
    ("diffuseColor", Semantic::LightColorDiffuse),
    ("specularColor", Semantic::LightColorSpecular),
    ("attenuation", Semantic::LightAttenuation),
    ("spotDirectionGlobal", Semantic::LightSpotDirectionGlobal),
    ("spotDirectionEyeSpace", Semantic::LightSpotDirectionEyeSpace),
    ("spotDirectionModel", Semantic::LightSpotDirectionModelSpace),
    ("spotExponent", Semantic::LightSpotExponent),
    ("spotCutoffAngle", Semantic::LightSpotCutoffAngle),
    ("spotCutoffAngleCosine", Semantic::LightSpotCutoffAngleCosine),
];

/// Field names of the `u_cc3LightProbes[i]` struct form.
pub static LIGHT_PROBE_STRUCT_FIELDS: &[(&str, Semantic)] =
    &[("intensity", Semantic::LightProbeIntensity)];

/// Field names of the `u_cc3TextureUnits[i]` struct form.
pub static TEXTURE_UNIT_STRUCT_FIELDS: &[(&str, Semantic)] = &[
    ("mode", Semantic::TexUnitMode),
    ("color", Semantic::TexUnitConstantColor),
    ("combineRGBFunction", Semantic::TexUnitCombineRgbFunction),
    ("combineAlphaFunction", Semantic::TexUnitCombineAlphaFunction),
];
