//! Quad geometry
//!
//! The fixed unit quad drawn by the client, and the description of how its
//! vertex bytes map onto shader inputs.

use std::mem::{offset_of, size_of};

/// A single vertex: position followed by texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Unit quad centered at the origin.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new([0.5, 0.5, 0.0], [1.0, 1.0]),   // top right
    Vertex::new([0.5, -0.5, 0.0], [1.0, 0.0]),  // bottom right
    Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0]), // bottom left
    Vertex::new([-0.5, 0.5, 0.0], [0.0, 1.0]),  // top left
];

/// Two triangles covering [`QUAD_VERTICES`].
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// One float attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Name of the `in` variable in the vertex shader.
    pub name: &'static str,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// Interleaved layout of a vertex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: i32,
    pub attributes: &'static [VertexAttribute],
}

/// Layout of [`Vertex`]: `aPosition` then `aTexCoord`.
pub const QUAD_LAYOUT: VertexLayout = VertexLayout {
    stride: size_of::<Vertex>() as i32,
    attributes: &[
        VertexAttribute {
            name: "aPosition",
            components: 3,
            offset: offset_of!(Vertex, position) as i32,
        },
        VertexAttribute {
            name: "aTexCoord",
            components: 2,
            offset: offset_of!(Vertex, uv) as i32,
        },
    ],
};

/// Checks that the index list describes whole triangles and never points
/// past the end of the vertex list.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<(), String> {
    if indices.len() % 3 != 0 {
        return Err(format!(
            "Index count {} is not a multiple of 3",
            indices.len()
        ));
    }
    if let Some((at, index)) = indices
        .iter()
        .enumerate()
        .find(|(_, i)| **i as usize >= vertex_count)
    {
        return Err(format!(
            "Index {} at position {} is out of range for {} vertices",
            index, at, vertex_count
        ));
    }
    Ok(())
}

/// Views a vertex slice as raw bytes for buffer upload.
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    // SAFETY: `Vertex` is `repr(C)` and made only of `f32`s, so it has no padding.
    unsafe {
        std::slice::from_raw_parts(
            vertices.as_ptr() as *const u8,
            std::mem::size_of_val(vertices),
        )
    }
}

/// Views an index slice as raw bytes for buffer upload.
pub fn index_bytes(indices: &[u32]) -> &[u8] {
    // SAFETY: `u32` has no padding and any byte pattern is a valid `u8`.
    unsafe {
        std::slice::from_raw_parts(indices.as_ptr() as *const u8, std::mem::size_of_val(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_indices_stay_in_range() {
        assert!(validate_indices(&QUAD_INDICES, QUAD_VERTICES.len()).is_ok());
        assert!(QUAD_INDICES.iter().all(|i| *i <= 3));
    }

    #[test]
    fn test_validate_indices_rejects_bad_input() {
        assert!(validate_indices(&[0, 1, 4], 4).is_err());
        assert!(validate_indices(&[0, 1], 4).is_err());
    }

    #[test]
    fn test_quad_layout_matches_vertex() {
        assert_eq!(QUAD_LAYOUT.stride, 5 * 4);
        assert_eq!(QUAD_LAYOUT.attributes.len(), 2);
        assert_eq!(QUAD_LAYOUT.attributes[0].name, "aPosition");
        assert_eq!(QUAD_LAYOUT.attributes[0].components, 3);
        assert_eq!(QUAD_LAYOUT.attributes[0].offset, 0);
        assert_eq!(QUAD_LAYOUT.attributes[1].name, "aTexCoord");
        assert_eq!(QUAD_LAYOUT.attributes[1].components, 2);
        assert_eq!(QUAD_LAYOUT.attributes[1].offset, 3 * 4);
    }

    #[test]
    fn test_quad_is_unit_square_around_origin() {
        for vertex in QUAD_VERTICES {
            assert!(vertex.position.iter().all(|c| (-0.5..=0.5).contains(c)));
            assert!(vertex.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
        assert_eq!(vertex_bytes(&QUAD_VERTICES).len(), 4 * 20);
        assert_eq!(index_bytes(&QUAD_INDICES).len(), 6 * 4);
    }

    #[test]
    fn test_vertex_bytes_are_interleaved() {
        let bytes = vertex_bytes(&QUAD_VERTICES[..1]);
        let u = f32::from_ne_bytes(bytes[12..16].try_into().unwrap());
        let v = f32::from_ne_bytes(bytes[16..20].try_into().unwrap());
        assert_eq!((u, v), (1.0, 1.0));
    }
}
