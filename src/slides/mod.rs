//! The slide catalogue
//!
//! Slides are grouped the way the tutorial is: getting started, lighting and
//! model loading, each introduced by a [`TitleSlide`]. [`build_deck`] turns
//! the configuration into a colored deck ready for `init_all`.

pub mod common;
pub mod getstarted;
pub mod lighting;
pub mod modelloading;
pub mod title;

use std::path::PathBuf;

use learngfx_render::{GpuDeck, GpuSlide, ShaderSource};

use crate::config::{AppConfig, CameraConfig, InputConfig};
use common::CameraRig;
use getstarted::{
    CameraSlide, CoordinateSystems, HelloRectangle, HelloTriangle, HelloTwoTriangles, HelloWindow,
    ShaderExercise, ShadersSlide, TextureExercise, TexturesSlide, Transformations,
};
use lighting::{BasicLighting, Colors, Materials};
use modelloading::ModelLoading;
use title::TitleSlide;

/// What slides need from the configuration
#[derive(Debug, Clone)]
pub struct SlideSettings {
    pub shaders: PathBuf,
    pub textures: PathBuf,
    /// Model shown when the model loading slide starts
    pub model: PathBuf,
    pub camera: CameraConfig,
    pub input: InputConfig,
}

impl SlideSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            shaders: config.assets.shaders_dir(),
            textures: config.assets.textures_dir(),
            model: config.assets.model_path(),
            camera: config.camera.clone(),
            input: config.input.clone(),
        }
    }

    /// A WGSL file in the shader directory
    pub fn shader(&self, name: &str) -> ShaderSource<'static> {
        ShaderSource::file(&self.shaders, name)
    }

    /// A fresh fly camera at the configured start position
    pub fn camera_rig(&self) -> CameraRig {
        CameraRig::new(&self.camera, &self.input)
    }
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Every slide, in presentation order
pub fn catalogue(settings: &SlideSettings) -> Vec<Box<GpuSlide>> {
    let mut slides: Vec<Box<GpuSlide>> = Vec::new();
    slides.push(Box::new(TitleSlide::new("Getting started")));
    slides.push(Box::new(HelloWindow::new()));
    slides.push(Box::new(HelloTriangle::new()));
    slides.push(Box::new(HelloRectangle::new(settings)));
    slides.push(Box::new(HelloTwoTriangles::new(settings)));
    for exercise in ShaderExercise::ALL {
        slides.push(Box::new(ShadersSlide::new(settings, exercise)));
    }
    for exercise in TextureExercise::ALL {
        slides.push(Box::new(TexturesSlide::new(settings, exercise)));
    }
    slides.push(Box::new(Transformations::new(settings)));
    slides.push(Box::new(CoordinateSystems::new(settings)));
    slides.push(Box::new(CameraSlide::new(settings)));

    slides.push(Box::new(TitleSlide::new("Lighting")));
    slides.push(Box::new(Colors::new(settings)));
    slides.push(Box::new(BasicLighting::new(settings)));
    slides.push(Box::new(Materials::new(settings)));

    slides.push(Box::new(TitleSlide::new("Model Loading")));
    slides.push(Box::new(ModelLoading::new(settings)));
    slides
}

/// The colored deck, positioned on the configured start slide
///
/// An out-of-range start index is clamped to the last slide.
pub fn build_deck(config: &AppConfig) -> GpuDeck {
    let settings = SlideSettings::from_config(config);
    let mut deck = GpuDeck::new(catalogue(&settings));
    deck.apply_gradient(config.slides.gradient_start, config.slides.gradient_end);

    let start = config.slides.start_index.min(deck.len().saturating_sub(1));
    if start != config.slides.start_index {
        log::warn!(
            "Start slide {} out of range, using {}",
            config.slides.start_index,
            start
        );
    }
    if let Err(e) = deck.go_to(start) {
        log::warn!("{}", e);
    }
    deck
}
