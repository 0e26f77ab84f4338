//! Wavefront OBJ models
//!
//! [`ModelData`] is the CPU side: triangulated, single-indexed meshes with
//! interleaved position, normal and texture coordinates. [`Model`] uploads
//! it, one vertex/index buffer and one diffuse texture per mesh.

use std::fmt;
use std::path::{Path, PathBuf};

use learngfx_math::Vec3;

use crate::mesh::{Mesh, VertexLayout};
use crate::texture::{texture_bind_group, Texture, TextureError, TextureOptions};

/// Floats per model vertex: position (3), normal (3), uv (2)
pub const MODEL_VERTEX_FLOATS: u32 = 8;

/// Layout for model vertices at locations 0 (position), 1 (normal), 2 (uv)
pub fn model_vertex_layout() -> VertexLayout {
    VertexLayout::new(MODEL_VERTEX_FLOATS)
        .attribute(0, 3, 0)
        .attribute(1, 3, 3)
        .attribute(2, 2, 6)
}

#[derive(Debug)]
pub enum ModelError {
    Load { path: PathBuf, source: tobj::LoadError },
    MissingNormals(String),
    Texture(TextureError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Load { path, source } => {
                write!(f, "Failed to load model {}: {}", path.display(), source)
            }
            ModelError::MissingNormals(name) => write!(f, "Mesh {} has no normals", name),
            ModelError::Texture(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Load { source, .. } => Some(source),
            ModelError::Texture(e) => Some(e),
            ModelError::MissingNormals(_) => None,
        }
    }
}

impl From<TextureError> for ModelError {
    fn from(e: TextureError) -> Self {
        ModelError::Texture(e)
    }
}

/// One mesh of a model, ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    /// Interleaved position, normal, uv
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    /// Resolved against the OBJ's directory
    pub diffuse_texture: Option<PathBuf>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / MODEL_VERTEX_FLOATS as usize
    }
}

/// All meshes of an OBJ file
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
}

impl ModelData {
    /// Parse an OBJ and its materials
    ///
    /// Missing texture coordinates become (0, 0). Missing normals are an
    /// error, since every model slide is lit. A broken or missing material
    /// library is logged and the meshes load untextured.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let (models, materials) =
            tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| ModelError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let materials = materials.unwrap_or_else(|e| {
            log::warn!("Materials for {}: {}", path.display(), e);
            Vec::new()
        });
        let dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut meshes = Vec::with_capacity(models.len());
        for model in models {
            let mesh = model.mesh;
            if mesh.normals.is_empty() {
                return Err(ModelError::MissingNormals(model.name));
            }

            let vertex_count = mesh.positions.len() / 3;
            let mut vertices = Vec::with_capacity(vertex_count * MODEL_VERTEX_FLOATS as usize);
            for i in 0..vertex_count {
                vertices.extend_from_slice(&mesh.positions[3 * i..3 * i + 3]);
                vertices.extend_from_slice(&mesh.normals[3 * i..3 * i + 3]);
                match mesh.texcoords.get(2 * i..2 * i + 2) {
                    Some(uv) => vertices.extend_from_slice(uv),
                    None => vertices.extend_from_slice(&[0.0, 0.0]),
                }
            }

            let diffuse_texture = mesh
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|m| m.diffuse_texture.as_ref())
                .map(|name| dir.join(name));

            meshes.push(MeshData {
                name: model.name,
                vertices,
                indices: mesh.indices,
                diffuse_texture,
            });
        }

        log::debug!("Parsed {} ({} meshes)", path.display(), meshes.len());
        Ok(Self { meshes })
    }

    /// Axis-aligned bounds of every vertex, `None` for an empty model
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self
            .meshes
            .iter()
            .flat_map(|m| m.vertices.chunks_exact(MODEL_VERTEX_FLOATS as usize))
            .map(|v| Vec3::new(v[0], v[1], v[2]));

        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (
                Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }
}

struct ModelMesh {
    mesh: Mesh,
    texture: wgpu::BindGroup,
}

/// An uploaded model
pub struct Model {
    meshes: Vec<ModelMesh>,
    bounds: Option<(Vec3, Vec3)>,
    path: PathBuf,
}

impl Model {
    /// Load and upload an OBJ
    ///
    /// Each mesh's diffuse map is bound through `texture_layout` (one
    /// texture/sampler pair). A mesh without one, or whose image fails to
    /// load, gets a white texture.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let data = ModelData::load(path)?;
        let layout = model_vertex_layout();

        let meshes = data
            .meshes
            .iter()
            .map(|m| {
                let texture = match &m.diffuse_texture {
                    Some(tex_path) => Texture::from_file(device, queue, tex_path, TextureOptions::default())
                        .unwrap_or_else(|e| {
                            log::warn!("{}", e);
                            Texture::white(device, queue)
                        }),
                    None => Texture::white(device, queue),
                };
                ModelMesh {
                    mesh: Mesh::new(device, &m.name, &m.vertices, &layout, Some(&m.indices)),
                    texture: texture_bind_group(device, texture_layout, &m.name, &[&texture]),
                }
            })
            .collect();

        log::info!("Loaded model {}", path.display());
        Ok(Self {
            meshes,
            bounds: data.bounds(),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.bounds
    }

    /// Draw every mesh, binding its texture at `bind_group_index`
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, bind_group_index: u32) {
        for m in &self.meshes {
            pass.set_bind_group(bind_group_index, &m.texture, &[]);
            m.mesh.draw(pass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("learngfx_model_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const TRIANGLE: &str = "\
mtllib tri.mtl
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 1.0
usemtl red
f 1/1/1 2/2/1 3/3/1
";

    const TRIANGLE_MTL: &str = "\
newmtl red
Kd 1.0 0.0 0.0
map_Kd red.png
";

    #[test]
    fn test_vertex_layout() {
        let layout = model_vertex_layout();
        assert_eq!(layout.stride(), 8);
        assert_eq!(layout.attributes()[2].offset, 24);
    }

    #[test]
    fn test_load_triangle() {
        write_temp("tri.mtl", TRIANGLE_MTL);
        let path = write_temp("tri.obj", TRIANGLE);

        let data = ModelData::load(&path).unwrap();
        assert_eq!(data.meshes.len(), 1);
        let mesh = &data.meshes[0];
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices.len(), 3);
        // Second vertex: position, normal, uv
        assert_eq!(&mesh.vertices[8..16], &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        assert_eq!(mesh.diffuse_texture, Some(path.parent().unwrap().join("red.png")));
    }

    #[test]
    fn test_quad_is_triangulated() {
        let path = write_temp(
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
        );
        let data = ModelData::load(&path).unwrap();
        assert_eq!(data.meshes[0].indices.len(), 6);
        // No texture coordinates in the file
        assert_eq!(&data.meshes[0].vertices[6..8], &[0.0, 0.0]);
        assert_eq!(data.meshes[0].diffuse_texture, None);
    }

    #[test]
    fn test_bounds() {
        let path = write_temp(
            "wide.obj",
            "v -2 0 0\nv 3 1 0\nv 0 -1 4\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        );
        let (min, max) = ModelData::load(&path).unwrap().bounds().unwrap();
        assert_eq!(min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 1.0, 4.0));
        assert_eq!(ModelData { meshes: Vec::new() }.bounds(), None);
    }

    #[test]
    fn test_missing_normals() {
        let path = write_temp("flat.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(matches!(ModelData::load(&path), Err(ModelError::MissingNormals(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = ModelData::load("/no/such/nanosuit.obj").unwrap_err();
        assert!(matches!(err, ModelError::Load { .. }));
        assert!(err.to_string().contains("nanosuit.obj"));
    }
}
