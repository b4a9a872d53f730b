//! Window host and frame loop.
//!
//! [`Host`] maps window events onto the scene's lifecycle: one load, a frame
//! per loop iteration, resizes as they arrive and one unload when the window
//! closes.

use std::{path::PathBuf, time::Instant};

use coordspace_core::{Lifecycle, Settings, Viewport};
use sdl2::{event::Event, event::WindowEvent, keyboard::Keycode};

use crate::{abs::App, error::AppError, scene::QuadScene};

pub struct Host {
    // Declared before `app` so GPU objects are released while the context is alive.
    scene: Option<QuadScene>,
    app: App,
    lifecycle: Lifecycle,
    settings: Settings,
    settings_path: Option<PathBuf>,
}

impl Host {
    pub fn new(settings: Settings, settings_path: Option<PathBuf>) -> Result<Self, AppError> {
        let app = App::new(&settings.window).map_err(AppError::Window)?;
        Ok(Self {
            scene: None,
            app,
            lifecycle: Lifecycle::new(),
            settings,
            settings_path,
        })
    }

    fn on_load(&mut self) -> Result<(), AppError> {
        self.lifecycle.load()?;
        let (width, height) = self.app.drawable_size();
        let viewport = Viewport::new(width, height)
            .or(Viewport::new(self.settings.window.width, self.settings.window.height))
            .ok_or_else(|| AppError::Window(format!("window has no area ({}x{})", width, height)))?;
        self.scene = Some(QuadScene::load(&self.app.gl, &self.settings, viewport)?);
        Ok(())
    }

    fn on_render_frame(&mut self, elapsed_seconds: f64) -> Result<(), AppError> {
        let frame = self.lifecycle.begin_frame()?;
        if let Some(scene) = self.scene.as_mut() {
            scene.render(elapsed_seconds)?;
            if frame % 600 == 0 {
                log::trace!(
                    "Frame {}: angle {:.1} degrees",
                    frame,
                    scene.pipeline().angle_degrees() % 360.0
                );
            }
        }
        self.app.swap();
        Ok(())
    }

    fn on_resize(&mut self) -> Result<(), AppError> {
        self.lifecycle.check_resize()?;
        let (width, height) = self.app.drawable_size();
        if let Some(scene) = self.scene.as_mut() {
            scene.resize(width, height);
        }
        Ok(())
    }

    fn on_unload(&mut self) -> Result<(), AppError> {
        self.lifecycle.unload()?;
        if let Some(scene) = self.scene.take() {
            log::info!(
                "Shutting down after {} frames at {:.1} degrees",
                self.lifecycle.frames(),
                scene.pipeline().angle_degrees() % 360.0
            );
        }
        self.persist_window_size();
        Ok(())
    }

    /// Writes the current window size back to the settings file.
    fn persist_window_size(&mut self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if !self.settings.window.fullscreen {
            let (width, height) = self.app.window.size();
            self.settings.window.width = width;
            self.settings.window.height = height;
        }
        match self.settings.save(path) {
            Ok(()) => log::debug!("Saved settings to {}", path.display()),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }

    /// Runs until the window is closed or Escape is pressed.
    pub fn run(mut self) -> Result<(), AppError> {
        self.on_load()?;

        let mut last_frame_time = Instant::now();

        'running: loop {
            let mut resized = false;
            for event in self.app.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => break 'running,
                    Event::Window {
                        win_event: WindowEvent::Resized(..) | WindowEvent::SizeChanged(..),
                        ..
                    } => resized = true,
                    _ => {}
                }
            }
            if resized {
                self.on_resize()?;
            }

            let now = Instant::now();
            let elapsed = now.duration_since(last_frame_time).as_secs_f64();
            last_frame_time = now;

            self.on_render_frame(elapsed)?;
        }

        self.on_unload()
    }
}
