//! Mesh data and path-deduplicated mesh library
//!
//! Meshes are produced by an external [`MeshSource`] (file parser or
//! procedural generator) and shared between entities through `Arc`. The
//! library loads each path once; every later request for the same path
//! returns the same mesh.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::foundation::math::Vec3;

/// Errors produced while obtaining mesh data
#[derive(Debug, Error)]
pub enum MeshError {
    /// No mesh exists for the path
    #[error("Mesh not found: {0}")]
    NotFound(String),

    /// Mesh data is inconsistent
    #[error("Invalid mesh data in {path}: {reason}")]
    InvalidData {
        /// Mesh path
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// IO error while reading mesh data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    path: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh, checking normals and indices against the positions
    pub fn new(path: impl Into<String>, positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        let path = path.into();
        let invalid = |reason: String| MeshError::InvalidData { path: path.clone(), reason };

        if !normals.is_empty() && normals.len() != positions.len() {
            return Err(invalid(format!(
                "{} normals for {} positions",
                normals.len(),
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(invalid(format!("index count {} is not a multiple of 3", indices.len())));
        }
        if let Some(index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(invalid(format!("index {index} out of range")));
        }
        if positions.iter().any(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(invalid("non-finite vertex position".to_string()));
        }

        Ok(Self { path, positions, normals, indices })
    }

    /// Mesh built by in-crate generators whose topology is correct by construction
    pub(crate) fn generated(path: &str, positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
        Self {
            path: path.to_string(),
            positions,
            normals,
            indices,
        }
    }

    /// Path the mesh was loaded from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Vertex positions in model space
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals, empty when the source has none
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle list indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Producer of mesh data for a path
pub trait MeshSource {
    /// Load the mesh identified by `path`
    fn load(&mut self, path: &str) -> Result<Mesh, MeshError>;
}

/// Shared mesh cache keyed by path
pub struct MeshLibrary {
    source: Box<dyn MeshSource>,
    meshes: HashMap<String, Arc<Mesh>>,
}

impl MeshLibrary {
    /// Create an empty library backed by `source`
    pub fn new(source: Box<dyn MeshSource>) -> Self {
        Self {
            source,
            meshes: HashMap::new(),
        }
    }

    /// Return the mesh for `path`, loading it on first use
    pub fn get_or_load(&mut self, path: &str) -> Result<Arc<Mesh>, MeshError> {
        if let Some(mesh) = self.meshes.get(path) {
            log::trace!("Mesh cache hit: {}", path);
            return Ok(Arc::clone(mesh));
        }

        let mesh = Arc::new(self.source.load(path)?);
        log::debug!("Loaded mesh {} ({} triangles)", path, mesh.triangle_count());
        self.meshes.insert(path.to_string(), Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Register an already built mesh under its path
    pub fn insert(&mut self, mesh: Mesh) -> Arc<Mesh> {
        let mesh = Arc::new(mesh);
        self.meshes.insert(mesh.path().to_string(), Arc::clone(&mesh));
        mesh
    }

    /// Number of distinct meshes loaded
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// True when nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl std::fmt::Debug for MeshLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshLibrary")
            .field("meshes", &self.meshes.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
