//! LearnOpenGL tutorials as a wgpu slideshow
//!
//! The binary wires these together: [`config`] loads settings, [`slides`]
//! builds the deck, [`systems`] owns the window and GPU, and [`input`] decides
//! which keys drive the deck and which go to the current slide.

pub mod config;
pub mod input;
pub mod slides;
pub mod systems;
