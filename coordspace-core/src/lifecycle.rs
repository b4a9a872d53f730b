//! Render lifecycle
//!
//! The host drives the scene through `load`, a run of frames, any number of
//! resizes and a single `unload`. [`Lifecycle`] enforces that order so GPU
//! objects are created once and released once.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    Loaded,
    Rendering,
    Unloaded,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot {action} while {stage:?}")]
    InvalidTransition { action: &'static str, stage: Stage },
}

#[derive(Debug)]
pub struct Lifecycle {
    stage: Stage,
    frames: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            stage: Stage::Uninitialized,
            frames: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Number of frames started so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn invalid(&self, action: &'static str) -> LifecycleError {
        LifecycleError::InvalidTransition {
            action,
            stage: self.stage,
        }
    }

    pub fn load(&mut self) -> Result<(), LifecycleError> {
        match self.stage {
            Stage::Uninitialized => {
                self.stage = Stage::Loaded;
                Ok(())
            }
            _ => Err(self.invalid("load")),
        }
    }

    /// Marks the start of a frame and returns its number, starting at 1.
    pub fn begin_frame(&mut self) -> Result<u64, LifecycleError> {
        match self.stage {
            Stage::Loaded | Stage::Rendering => {
                self.stage = Stage::Rendering;
                self.frames += 1;
                Ok(self.frames)
            }
            _ => Err(self.invalid("render")),
        }
    }

    pub fn check_resize(&self) -> Result<(), LifecycleError> {
        match self.stage {
            Stage::Loaded | Stage::Rendering => Ok(()),
            _ => Err(self.invalid("resize")),
        }
    }

    pub fn unload(&mut self) -> Result<(), LifecycleError> {
        match self.stage {
            Stage::Loaded | Stage::Rendering => {
                self.stage = Stage::Unloaded;
                Ok(())
            }
            _ => Err(self.invalid("unload")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.load().unwrap();
        lifecycle.check_resize().unwrap();
        assert_eq!(lifecycle.begin_frame(), Ok(1));
        assert_eq!(lifecycle.begin_frame(), Ok(2));
        assert_eq!(lifecycle.stage(), Stage::Rendering);
        lifecycle.unload().unwrap();
        assert_eq!(lifecycle.stage(), Stage::Unloaded);
        assert_eq!(lifecycle.frames(), 2);
    }

    #[test]
    fn test_no_double_unload() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.load().unwrap();
        lifecycle.unload().unwrap();
        assert_eq!(
            lifecycle.unload(),
            Err(LifecycleError::InvalidTransition {
                action: "unload",
                stage: Stage::Unloaded
            })
        );
    }

    #[test]
    fn test_no_render_before_load_or_after_unload() {
        let mut lifecycle = Lifecycle::new();
        assert!(lifecycle.begin_frame().is_err());
        assert!(lifecycle.check_resize().is_err());
        assert!(lifecycle.unload().is_err());
        lifecycle.load().unwrap();
        assert!(lifecycle.load().is_err());
        lifecycle.unload().unwrap();
        assert!(lifecycle.begin_frame().is_err());
        assert!(lifecycle.check_resize().is_err());
    }
}
