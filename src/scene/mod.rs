//! Scene access
//!
//! The scene graph itself lives outside this crate. Population reads it
//! through the [`SceneAccessor`] trait:
//! - `state`: plain camera, light, material, fog, mesh and bone values
//! - `accessor`: the per-category query trait
//! - `snapshot`: an owned implementation for tools and tests

pub mod accessor;
pub mod snapshot;
pub mod state;

pub use accessor::SceneAccessor;
pub use snapshot::SceneSnapshot;
pub use state::{
    BoneBatch, BoundingBox, CameraState, FogMode, FogState, LightKind, LightProbeState,
    LightState, MaterialState, MeshState, PointState, ProjectionType, TextureUnitState,
    VertexContent,
};
