//! The GL-free core of coordspace. This crate holds everything about the
//! rotating quad that can be reasoned about without a window or a driver:
//! the quad geometry and its vertex layout, the names the shaders must
//! expose, the model/view/projection pipeline, the render lifecycle and the
//! persisted settings.

pub mod geometry;
pub mod guard;
pub mod interface;
pub mod lifecycle;
pub mod settings;
pub mod transform;

pub use guard::Guard;
pub use interface::{MATRIX_UNIFORMS, NameKind};
pub use geometry::{QUAD_INDICES, QUAD_LAYOUT, QUAD_VERTICES, Vertex, VertexAttribute, VertexLayout};
pub use lifecycle::{Lifecycle, LifecycleError, Stage};
pub use settings::{ConfigError, Settings};
pub use transform::{FrameMatrices, Pipeline, Projection, TimeAccumulator, Viewport};
