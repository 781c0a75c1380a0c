//! Application systems
//!
//! Modular systems kept out of main.rs for testability.

mod simulation;
mod window;

pub use simulation::SimulationSystem;
pub use window::{format_title, WindowError, WindowSystem};
