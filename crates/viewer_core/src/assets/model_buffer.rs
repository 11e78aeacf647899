//! Indexed geometry produced by the OBJ loader
//!
//! Face lists keep the file's 1-based indices exactly as written. Consumers
//! either resolve them themselves or go through [`ModelBuffer::corners`].

use crate::foundation::math::Vec3;

/// Which index components a face vertex carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacePattern {
    /// `v`
    Vertex,
    /// `v/t`
    VertexTexture,
    /// `v/t/n`
    VertexTextureNormal,
    /// `v//n`
    VertexNormal,
}

impl FacePattern {
    /// Whether texture indices are present
    pub fn has_texture(self) -> bool {
        matches!(self, Self::VertexTexture | Self::VertexTextureNormal)
    }

    /// Whether normal indices are present
    pub fn has_normal(self) -> bool {
        matches!(self, Self::VertexNormal | Self::VertexTextureNormal)
    }

    /// Notation used in OBJ files
    pub fn notation(self) -> &'static str {
        match self {
            Self::Vertex => "v",
            Self::VertexTexture => "v/t",
            Self::VertexTextureNormal => "v/t/n",
            Self::VertexNormal => "v//n",
        }
    }
}

/// One vertex reference of a face line, indices as written in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    /// Position index
    pub vertex: i32,
    /// Texture coordinate index
    pub texture: Option<i32>,
    /// Normal index
    pub normal: Option<i32>,
}

impl FaceVertex {
    /// Pattern implied by the present components
    pub fn pattern(&self) -> FacePattern {
        match (self.texture, self.normal) {
            (None, None) => FacePattern::Vertex,
            (Some(_), None) => FacePattern::VertexTexture,
            (Some(_), Some(_)) => FacePattern::VertexTextureNormal,
            (None, Some(_)) => FacePattern::VertexNormal,
        }
    }
}

/// A face corner with its indices resolved against the buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCorner {
    /// Vertex position
    pub position: Vec3,
    /// Vertex normal, when the face carries normals and the index resolves
    pub normal: Option<Vec3>,
    /// Texture coordinate (z is always 0), when present and resolvable
    pub tex_coord: Option<Vec3>,
}

/// Geometry container filled by [`ObjLoader`](super::ObjLoader)
///
/// `vertex_faces` always holds whole triangles. `normal_faces` and
/// `texture_faces` are either empty or exactly as long as `vertex_faces`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelBuffer {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec3>,
    vertex_faces: Vec<i32>,
    normal_faces: Vec<i32>,
    texture_faces: Vec<i32>,
    smooth_shading: bool,
    material: Option<String>,
}

impl ModelBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex positions in file order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals in file order
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Texture coordinates in file order; `z` is always 0
    pub fn tex_coords(&self) -> &[Vec3] {
        &self.tex_coords
    }

    /// 1-based position indices, three per triangle
    pub fn vertex_faces(&self) -> &[i32] {
        &self.vertex_faces
    }

    /// 1-based normal indices, parallel to [`vertex_faces`](Self::vertex_faces) or empty
    pub fn normal_faces(&self) -> &[i32] {
        &self.normal_faces
    }

    /// 1-based texture indices, parallel to [`vertex_faces`](Self::vertex_faces) or empty
    pub fn texture_faces(&self) -> &[i32] {
        &self.texture_faces
    }

    /// Whether the model asked for smooth shading (`s` with a positive group)
    pub fn is_smooth_shaded(&self) -> bool {
        self.smooth_shading
    }

    /// Material named by the last `usemtl` line
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertex_faces.len() / 3
    }

    /// Whether no geometry has been read
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.vertex_faces.is_empty()
    }

    /// Layout shared by every face in the buffer, `None` before the first face
    pub fn face_layout(&self) -> Option<FacePattern> {
        if self.vertex_faces.is_empty() {
            return None;
        }
        Some(match (!self.texture_faces.is_empty(), !self.normal_faces.is_empty()) {
            (false, false) => FacePattern::Vertex,
            (true, false) => FacePattern::VertexTexture,
            (true, true) => FacePattern::VertexTextureNormal,
            (false, true) => FacePattern::VertexNormal,
        })
    }

    /// Resolve a file index against a list of `len` elements.
    ///
    /// Positive indices are 1-based; negative ones count back from the end
    /// (`-1` is the last element). Zero and out-of-range indices yield `None`.
    pub fn resolve_index(index: i32, len: usize) -> Option<usize> {
        let resolved = match index {
            0 => return None,
            i if i > 0 => usize::try_from(i - 1).ok()?,
            i => len.checked_sub(usize::try_from(i.unsigned_abs()).ok()?)?,
        };
        (resolved < len).then_some(resolved)
    }

    /// Resolve the `i`-th face corner. `None` when `i` is past the end or the
    /// position index does not resolve.
    pub fn corner(&self, i: usize) -> Option<FaceCorner> {
        let vertex = *self.vertex_faces.get(i)?;
        let position = self.positions[Self::resolve_index(vertex, self.positions.len())?];
        let normal = self
            .normal_faces
            .get(i)
            .and_then(|&n| Self::resolve_index(n, self.normals.len()))
            .map(|n| self.normals[n]);
        let tex_coord = self
            .texture_faces
            .get(i)
            .and_then(|&t| Self::resolve_index(t, self.tex_coords.len()))
            .map(|t| self.tex_coords[t]);

        Some(FaceCorner { position, normal, tex_coord })
    }

    /// Every face corner in triangle order, resolved to 0-based data
    pub fn corners(&self) -> impl Iterator<Item = Option<FaceCorner>> + '_ {
        (0..self.vertex_faces.len()).map(|i| self.corner(i))
    }

    /// Drop all geometry and reset the flags
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn push_position(&mut self, position: Vec3) {
        self.positions.push(position);
    }

    pub(crate) fn push_normal(&mut self, normal: Vec3) {
        self.normals.push(normal);
    }

    pub(crate) fn push_tex_coord(&mut self, u: f32, v: f32) {
        self.tex_coords.push(Vec3::new(u, v, 0.0));
    }

    pub(crate) fn set_smooth_shading(&mut self, smooth: bool) {
        self.smooth_shading = smooth;
    }

    pub(crate) fn set_material(&mut self, name: impl Into<String>) {
        self.material = Some(name.into());
    }

    /// Append one triangle. All three corners must share `pattern`, and
    /// `pattern` must match [`face_layout`](Self::face_layout) when faces exist.
    pub(crate) fn push_triangle(&mut self, corners: [FaceVertex; 3], pattern: FacePattern) {
        debug_assert!(self.face_layout().map_or(true, |layout| layout == pattern));

        for corner in &corners {
            self.vertex_faces.push(corner.vertex);
            if pattern.has_texture() {
                self.texture_faces.push(corner.texture.unwrap_or_default());
            }
            if pattern.has_normal() {
                self.normal_faces.push(corner.normal.unwrap_or_default());
            }
        }
    }
}
