//! Stagehand application library
//!
//! Configuration, scene construction and the window-side systems used by the
//! `stagehand` binary. The runtime itself lives in `stagehand_core`.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
