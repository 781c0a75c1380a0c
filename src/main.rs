//! Stagehand - behaviour lab runner
//!
//! Opens a window, runs the lab scene every redraw and reports the clock,
//! the live cameras and the vehicle positions in the title bar.

use std::error::Error;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use stagehand::config::AppConfig;
use stagehand::input::{InputAction, InputMapper};
use stagehand::scene::SceneBuilder;
use stagehand::systems::{SimulationSystem, WindowSystem};
use stagehand_core::{Scene, SceneError, Stage};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Scene template, kept for resets
    scene: Scene,
    stage: Stage,
    window: Option<WindowSystem>,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SceneError> {
        let scene = Scene::load(&config.scene.path).unwrap_or_else(|e| {
            log::warn!(
                "Failed to load scene '{}': {}. Using the built-in lab scene.",
                config.scene.path,
                e
            );
            SceneBuilder::lab_scene()
        });

        let stage = Self::build_stage(&scene, &config)?;
        let simulation = SimulationSystem::new(config.simulation.max_dt);

        Ok(Self {
            config,
            scene,
            stage,
            window: None,
            simulation,
        })
    }

    /// Instantiate the scene; the configured clock applies if the scene has none
    fn build_stage(scene: &Scene, config: &AppConfig) -> Result<Stage, SceneError> {
        let mut stage = scene.instantiate(&config.input.axes)?;
        if scene.clock.is_none() {
            stage.set_clock(config.clock.to_clock());
        }
        log::info!("Clock starts at {}", stage.clock().display());
        Ok(stage)
    }

    fn reset_scene(&mut self) {
        match Self::build_stage(&self.scene, &self.config) {
            Ok(stage) => {
                self.stage = stage;
                log::info!("Scene '{}' reset", self.scene.name);
            }
            Err(e) => log::error!("Failed to reset scene: {}", e),
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ResetScene => self.reset_scene(),
            InputAction::TogglePause => {
                self.simulation.toggle_pause();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match WindowSystem::create(event_loop, &self.config.window) {
                Ok(window) => {
                    window.update_title(&self.stage, self.simulation.is_paused());
                    self.window = Some(window);
                }
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                        return;
                    }
                    // Everything else is for the behaviours
                    self.stage.input_mut().process_keyboard(key, event.state);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(report) = self.simulation.update(&mut self.stage) {
                    if !report.errors.is_empty() {
                        log::debug!(
                            "Frame {}: {} behaviour error(s)",
                            report.frame,
                            report.errors.len()
                        );
                    }
                }

                if let Some(window) = &self.window {
                    window.update_title(&self.stage, self.simulation.is_paused());
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Config first so the log level can come from it
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging (RUST_LOG still wins)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Stagehand");

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
