//! Lighting: colors, Phong shading and materials

mod basic_lighting;
mod colors;
mod lamp;
mod materials;

pub use basic_lighting::{orbit, BasicLighting, BasicLightingParams};
pub use colors::{Colors, ColorsParams};
pub use lamp::{lamp_model, LightingRig, LIGHT_POS};
pub use materials::{LightUniform, MaterialParams, MaterialUniform, Materials};
