//! Model loading: OBJ files through `tobj`

mod model_loading;

pub use model_loading::{fit_transform, is_obj, ModelLoading, ModelParams};
