use coordspace_core::{ConfigError, LifecycleError};
use thiserror::Error;

/// Everything that can stop the program. All of it is fatal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("window: {0}")]
    Window(String),
    #[error("shader: {0}")]
    Shader(String),
    #[error("texture: {0}")]
    Texture(String),
    #[error("mesh: {0}")]
    Mesh(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("logging: {0}")]
    Logging(#[from] fern::InitError),
}
