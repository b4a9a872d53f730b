//! Thin owning wrappers around the SDL2 window and the OpenGL objects the
//! quad needs: shader programs, textures and meshes.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
