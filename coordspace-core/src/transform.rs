//! Coordinate transforms
//!
//! This module turns elapsed frame time and viewport size into the three
//! matrices the vertex shader multiplies together: model (local to world),
//! view (world to camera) and projection (camera to clip space).

use glam::{Mat4, Vec3};

/// Degrees the quad turns per second of wall time.
pub const DEFAULT_SPIN_RATE: f64 = 4.0;

/// Where the camera sits relative to the quad.
pub const VIEW_TRANSLATION: Vec3 = Vec3::new(0.0, 0.0, -3.0);

/// Pixel size of the drawable area. Both sides are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Returns `None` when either side is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective frustum parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Builds the OpenGL-style perspective matrix for the given viewport.
    pub fn matrix(&self, viewport: Viewport) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            viewport.aspect_ratio(),
            self.near,
            self.far,
        )
    }
}

/// Running rotation angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAccumulator {
    value: f64,
    rate: f64,
}

impl Default for TimeAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_RATE)
    }
}

impl TimeAccumulator {
    pub fn new(rate: f64) -> Self {
        Self { value: 0.0, rate }
    }

    /// Adds `rate * elapsed_seconds` and returns the new value. Negative or
    /// non-finite elapsed times count as zero so the value never goes back.
    pub fn advance(&mut self, elapsed_seconds: f64) -> f64 {
        if elapsed_seconds.is_finite() && elapsed_seconds > 0.0 {
            self.value += self.rate * elapsed_seconds;
        }
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Identity rotated about X by `degrees`.
pub fn model_matrix(degrees: f64) -> Mat4 {
    Mat4::IDENTITY * Mat4::from_rotation_x(degrees.to_radians() as f32)
}

/// Fixed camera, pushed back along Z.
pub fn view_matrix() -> Mat4 {
    Mat4::from_translation(VIEW_TRANSLATION)
}

/// The matrices uploaded for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Per-frame transform state owned by the render loop.
#[derive(Debug, Clone)]
pub struct Pipeline {
    time: TimeAccumulator,
    frustum: Projection,
    viewport: Viewport,
    model: Mat4,
    view: Mat4,
    projection: Mat4,
}

impl Pipeline {
    /// Creates a pipeline with the accumulator at zero.
    pub fn new(viewport: Viewport, spin_rate: f64) -> Self {
        let frustum = Projection::default();
        let time = TimeAccumulator::new(spin_rate);
        Self {
            model: model_matrix(time.value()),
            view: view_matrix(),
            projection: frustum.matrix(viewport),
            time,
            frustum,
            viewport,
        }
    }

    /// Advances time by `elapsed_seconds` and recomputes the model matrix.
    pub fn update(&mut self, elapsed_seconds: f64) -> FrameMatrices {
        let degrees = self.time.advance(elapsed_seconds);
        self.model = model_matrix(degrees);
        self.matrices()
    }

    /// Applies a new drawable size. Zero-sized viewports (a minimised
    /// window) are ignored and `false` is returned.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Some(viewport) = Viewport::new(width, height) else {
            return false;
        };
        self.viewport = viewport;
        self.projection = self.frustum.matrix(viewport);
        true
    }

    pub fn matrices(&self) -> FrameMatrices {
        FrameMatrices {
            model: self.model,
            view: self.view,
            projection: self.projection,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn angle_degrees(&self) -> f64 {
        self.time.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(width: u32, height: u32) -> Pipeline {
        Pipeline::new(Viewport::new(width, height).unwrap(), DEFAULT_SPIN_RATE)
    }

    #[test]
    fn test_first_frame_with_no_elapsed_time_is_identity() {
        let mut pipeline = pipeline(800, 600);
        let frame = pipeline.update(0.0);
        assert_eq!(frame.model, Mat4::IDENTITY);
        assert_eq!(frame.view, Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_accumulator_is_linear_in_elapsed_time() {
        let mut time = TimeAccumulator::default();
        let frames = [0.016, 0.017, 0.5, 0.0, 1.25];
        for elapsed in frames {
            time.advance(elapsed);
        }
        let expected = 4.0 * frames.iter().sum::<f64>();
        assert!((time.value() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_ignores_negative_and_nan() {
        let mut time = TimeAccumulator::default();
        time.advance(1.0);
        time.advance(-3.0);
        time.advance(f64::NAN);
        assert_eq!(time.value(), 4.0);
    }

    #[test]
    fn test_rotation_is_periodic_in_whole_turns() {
        let a = model_matrix(30.0);
        let b = model_matrix(390.0);
        assert!(a.abs_diff_eq(b, 1e-5));
    }

    #[test]
    fn test_model_rotates_about_x() {
        let model = model_matrix(90.0);
        let y = model.transform_vector3(Vec3::Y);
        assert!(y.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(model.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_resize_sets_exact_aspect() {
        let mut pipeline = pipeline(1, 1);
        assert!(pipeline.resize(800, 600));
        assert_eq!(pipeline.viewport().aspect_ratio(), 800.0 / 600.0);
        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0);
        assert_eq!(pipeline.matrices().projection, expected);
    }

    #[test]
    fn test_resize_to_zero_height_is_ignored() {
        let mut pipeline = pipeline(800, 600);
        let before = pipeline.matrices();
        assert!(!pipeline.resize(800, 0));
        assert!(!pipeline.resize(0, 600));
        assert_eq!(pipeline.matrices(), before);
        assert_eq!(pipeline.viewport(), Viewport::new(800, 600).unwrap());
    }

    #[test]
    fn test_resize_only_touches_projection() {
        let mut pipeline = pipeline(1, 1);
        let loaded = pipeline.update(0.25);
        pipeline.resize(800, 600);
        let resized = pipeline.matrices();
        assert_eq!(resized.model, loaded.model);
        assert_eq!(resized.view, loaded.view);
        assert_ne!(resized.projection, loaded.projection);
        // Only the x scale depends on the aspect ratio.
        assert_ne!(resized.projection.x_axis.x, loaded.projection.x_axis.x);
        assert_eq!(resized.projection.y_axis, loaded.projection.y_axis);
        assert_eq!(resized.projection.z_axis, loaded.projection.z_axis);
        assert_eq!(resized.projection.w_axis, loaded.projection.w_axis);
    }

    #[test]
    fn test_viewport_rejects_zero() {
        assert!(Viewport::new(0, 10).is_none());
        assert!(Viewport::new(10, 0).is_none());
    }
}
