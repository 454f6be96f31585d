//! Orbitscape - decorative orbit scene
//!
//! A library crate providing the scene components, camera rig and
//! scripted terminal for testing and integration purposes.

pub mod camera;
pub mod input;
pub mod lifecycle;
pub mod render;
pub mod terminal;
pub mod time;
pub mod types;
pub mod ui;
