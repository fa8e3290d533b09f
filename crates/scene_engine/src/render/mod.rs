//! Render collaborator boundary
//!
//! Traits and plain data the scene graph hands to a renderer: the pipeline
//! trait, draw toggles, meshes and materials, uniform blocks and the owned
//! debug sphere resource.

pub mod flags;
pub mod material;
pub mod mesh;
pub mod pipeline;
pub mod recording;

pub use flags::DrawFlags;
pub use material::{Material, TextureHandle};
pub use mesh::{Mesh, MeshError, MeshLibrary, MeshSource};
pub use pipeline::{CameraUniform, DebugSphereMesh, ModelUniform, RenderPipeline};
pub use recording::{DrawCommand, RecordingPipeline};
