//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing indexed vertex data on the GPU side.
//! The attribute layout is described by a [`VertexLayout`] and resolved by name against a
//! [`ShaderProgram`].

use std::sync::Arc;

use coordspace_core::{
    Guard,
    geometry::{self, Vertex, VertexLayout},
    interface::{self, NameKind},
};
use glow::HasContext;

use super::ShaderProgram;

/// Represents an indexed triangle mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: usize,
}

impl Mesh {
    /// Uploads the given vertex and index data and wires the layout's
    /// attributes to the matching inputs of `program`.
    pub fn new(
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
        vertices: &[Vertex],
        indices: &[u32],
        layout: &VertexLayout,
    ) -> Result<Self, String> {
        geometry::validate_indices(indices, vertices.len())?;

        let locations = interface::locate_all(
            NameKind::Attribute,
            layout.attributes.iter().map(|attr| attr.name),
            |name| program.attrib_location(name),
        )?;

        unsafe {
            // Handles created before a failing call are deleted on return.
            let vao = Guard::new(gl.create_vertex_array()?, |vao| gl.delete_vertex_array(vao));
            let vbo = Guard::new(gl.create_buffer()?, |vbo| gl.delete_buffer(vbo));
            let ebo = gl.create_buffer()?;
            let (vao, vbo) = (vao.into_inner(), vbo.into_inner());

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                geometry::vertex_bytes(vertices),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                geometry::index_bytes(indices),
                glow::STATIC_DRAW,
            );

            for (location, attr) in locations.into_iter().zip(layout.attributes) {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    layout.stride,
                    attr.offset,
                );
            }

            // The element buffer binding is VAO state, so the VAO goes first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                vao,
                vbo,
                ebo,
                index_count: indices.len(),
            })
        }
    }

    /// Binds the vertex array so following draws use this mesh.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
        }
    }

    /// Draws the mesh. The vertex array must be bound.
    pub fn draw(&self) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, self.index_count as i32, glow::UNSIGNED_INT, 0);
        }
    }

    // Returns the amount of of indices used in the mesh
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
