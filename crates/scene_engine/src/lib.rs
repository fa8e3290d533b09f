//! # Scene Engine
//!
//! A hierarchical scene graph with animated transforms, bounding spheres,
//! three camera models and frustum culling.
//!
//! ## Features
//!
//! - **Scene graph**: groups own entities and child groups, each with a
//!   composite transform of up to one translation, rotation and scale
//! - **Animation**: looping Catmull-Rom translations and timed rotations
//! - **Cameras**: orbital, free-look and third-person follow cameras
//! - **Culling**: world-space bounding spheres tested against the view frustum
//! - **Pluggable output**: everything is drawn through [`render::RenderPipeline`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let camera = Camera::orbital(CameraParams::default(), CameraLimits::default())?;
//!     let mut scene = Scene::new(1280, 720, camera);
//!     scene.add_group(Group::new("empty"));
//!
//!     let mut pipeline = RecordingPipeline::new();
//!     scene.update(0.0);
//!     let stats = scene.draw(&mut pipeline, DrawFlags::default());
//!     println!("{} entities drawn", stats.entities_drawn);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod camera;
pub mod input;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::{Camera, CameraLimits, CameraParams, CameraType},
        config::{Config, ConfigError, ViewerConfig},
        foundation::{
            math::{Mat4, Vec2, Vec3},
            time::FrameClock,
        },
        input::{CameraController, InputManager, KeyCode, MouseButton},
        render::{DrawFlags, Material, Mesh, MeshLibrary, MeshSource, RecordingPipeline, RenderPipeline},
        scene::{
            BoundingSphere, CompositeTransform, Entity, FrameStats, Group, Light, Scene, SceneDescription, SceneError,
            Transform,
        },
    };
}
