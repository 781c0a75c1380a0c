//! Window management system
//!
//! Handles window creation, fullscreen toggle, and the status title. Nothing is
//! drawn into the window; the title bar carries the clock, the live cameras and
//! the vehicle positions.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use stagehand_core::Stage;
use stagehand_core::behaviours::DualAxisController;
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title from the stage state
    pub fn update_title(&self, stage: &Stage, paused: bool) {
        let mut title = format_title(&self.base_title, stage);
        if paused {
            title.push_str(" [paused]");
        }
        self.window.set_title(&title);
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Status line: `base - HH:MM - cam: A, B - Vehicle1 (x, z) ...`
///
/// Vehicles are the entities driven by a controller; they are listed by name
/// with their ground-plane position.
pub fn format_title(base: &str, stage: &Stage) -> String {
    let world = stage.world();
    let cameras = world.active_cameras();
    let cameras = if cameras.is_empty() {
        "none".to_string()
    } else {
        cameras.join(", ")
    };

    let mut vehicles: Vec<String> = stage
        .owners::<DualAxisController>()
        .into_iter()
        .filter_map(|key| world.get(key))
        .map(|entity| {
            let p = entity.transform.position;
            format!("{} ({:.1}, {:.1})", entity.name.as_deref().unwrap_or("?"), p.x, p.z)
        })
        .collect();
    vehicles.sort();

    let mut title = format!("{} - {} - cam: {}", base, stage.clock().display(), cameras);
    for vehicle in vehicles {
        title.push_str(" - ");
        title.push_str(&vehicle);
    }
    title
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
