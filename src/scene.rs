//! The rotating, textured quad.
//!
//! [`QuadScene`] owns every GPU object of the demo together with the
//! transform [`Pipeline`]. Dropping it releases the objects: the scene's own
//! `Drop` unbinds the active state, then the fields drop in declaration
//! order (mesh buffers and vertex array, program, textures).

use std::sync::Arc;

use coordspace_core::{
    MATRIX_UNIFORMS, Pipeline, QUAD_INDICES, QUAD_LAYOUT, QUAD_VERTICES, Settings, Viewport,
};
use glow::HasContext;

use crate::{
    abs::{Mesh, ShaderProgram, Texture},
    error::AppError,
};

pub struct QuadScene {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: ShaderProgram,
    textures: Vec<Texture>,
    pipeline: Pipeline,
}

impl QuadScene {
    /// Sets global GL state and creates the program, textures and mesh.
    pub fn load(
        gl: &Arc<glow::Context>,
        settings: &Settings,
        viewport: Viewport,
    ) -> Result<Self, AppError> {
        let [r, g, b, a] = settings.render.clear_color;
        unsafe {
            gl.clear_color(r, g, b, a);
            gl.enable(glow::DEPTH_TEST);
        }

        let program = ShaderProgram::from_files(
            gl,
            &settings.assets.vertex_shader,
            &settings.assets.fragment_shader,
        )
        .map_err(AppError::Shader)?;
        program.use_program();
        program
            .require_uniforms(&MATRIX_UNIFORMS)
            .map_err(AppError::Shader)?;

        let mut textures = Vec::with_capacity(settings.assets.textures.len());
        for (unit, entry) in settings.assets.textures.iter().enumerate() {
            let texture = Texture::from_path(gl, &entry.path).map_err(AppError::Texture)?;
            texture.bind(unit as u32);
            program
                .set_uniform(&entry.sampler, unit as i32)
                .map_err(AppError::Shader)?;
            textures.push(texture);
        }

        let mesh = Mesh::new(
            gl,
            &program,
            &QUAD_VERTICES,
            &QUAD_INDICES,
            &QUAD_LAYOUT,
        )
        .map_err(AppError::Mesh)?;

        let scene = Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            textures,
            pipeline: Pipeline::new(viewport, settings.render.spin_rate),
        };
        scene.apply_viewport();

        log::info!(
            "Loaded quad: {} indices, {} textures, viewport {}x{}",
            scene.mesh.index_count(),
            scene.textures.len(),
            viewport.width(),
            viewport.height()
        );
        Ok(scene)
    }

    /// Advances the animation by `elapsed_seconds` and draws one frame.
    /// Presenting is left to the caller.
    pub fn render(&mut self, elapsed_seconds: f64) -> Result<(), AppError> {
        let frame = self.pipeline.update(elapsed_seconds);

        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.mesh.bind();
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
        }
        self.program.use_program();

        let [model, view, projection] = MATRIX_UNIFORMS;
        self.program
            .set_uniform(model, frame.model)
            .and_then(|_| self.program.set_uniform(view, frame.view))
            .and_then(|_| self.program.set_uniform(projection, frame.projection))
            .map_err(AppError::Shader)?;

        self.mesh.draw();
        Ok(())
    }

    /// Follows a change of the drawable size. Returns `false` for zero-sized
    /// viewports, which leave the projection as it was.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.pipeline.resize(width, height) {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return false;
        }
        self.apply_viewport();
        log::debug!(
            "Viewport resized to {}x{} (aspect {:.3})",
            width,
            height,
            self.pipeline.viewport().aspect_ratio()
        );
        true
    }

    fn apply_viewport(&self) {
        let viewport = self.pipeline.viewport();
        unsafe {
            self.gl
                .viewport(0, 0, viewport.width() as i32, viewport.height() as i32);
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Drop for QuadScene {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_vertex_array(None);
            self.gl.use_program(None);
        }
        log::debug!("Releasing quad GPU objects");
    }
}
