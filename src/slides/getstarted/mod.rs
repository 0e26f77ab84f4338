//! Getting started: windows, triangles, shaders, textures, transformations,
//! coordinate systems and the camera

mod coordinates;
mod hello_triangle;
mod hello_window;
mod shaders;
mod textures;
mod transformations;

pub use coordinates::{cube_models, CameraSlide, CoordinateSystems, CubeScene};
pub use hello_triangle::{HelloRectangle, HelloTriangle, HelloTwoTriangles};
pub use hello_window::HelloWindow;
pub use shaders::{ShaderExercise, ShaderParams, ShadersSlide};
pub use textures::{TextureExercise, TextureParams, TexturesSlide};
pub use transformations::{spinning_transform, Transformations};
