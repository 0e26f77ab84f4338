use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_math::{mat4, Mat4, Vec3};
use learngfx_render::model::model_vertex_layout;
use learngfx_render::texture::texture_bind_group_layout;
use learngfx_render::uniforms::{vec3_padded, LitTransforms};
use learngfx_render::{
    load_shader, FrameTarget, Model, PipelineBuilder, RenderContext, UniformBuffer,
};

use crate::slides::common::CameraRig;
use crate::slides::SlideSettings;

const SHADER: &str = "model.wgsl";

/// Largest extent of a model after fitting
const FIT_SIZE: f32 = 2.0;

/// Sun shining down and away from the camera
const LIGHT_DIR: Vec3 = Vec3::new(-0.3, -1.0, -0.5);

/// Matches `Params` in model.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ModelParams {
    pub transforms: LitTransforms,
    pub light_dir: [f32; 4],
}

/// Center a model on the origin and scale its largest side to `FIT_SIZE`
pub fn fit_transform(bounds: Option<(Vec3, Vec3)>) -> Mat4 {
    let Some((min, max)) = bounds else {
        return mat4::IDENTITY;
    };
    let extent = max - min;
    let largest = extent.x.max(extent.y).max(extent.z);
    if largest <= f32::EPSILON {
        return mat4::translation(-((min + max) * 0.5));
    }
    let center = (min + max) * 0.5;
    mat4::mul(
        mat4::scaling(Vec3::splat(FIT_SIZE / largest)),
        mat4::translation(-center),
    )
}

/// Whether a dropped file looks like a Wavefront OBJ
pub fn is_obj(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"))
}

struct ModelGpu {
    pipeline: wgpu::RenderPipeline,
    params: UniformBuffer<ModelParams>,
    texture_layout: wgpu::BindGroupLayout,
    model: Model,
    fit: Mat4,
}

/// An OBJ model lit by a single light; drop another `.obj` on the window to
/// swap it
pub struct ModelLoading {
    base: SlideBase,
    settings: SlideSettings,
    rig: CameraRig,
    pending: Option<PathBuf>,
    gpu: Option<ModelGpu>,
}

impl ModelLoading {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("1. Model Loading")
                .with_sub_header("drop an .obj file on the window to load it"),
            settings: settings.clone(),
            rig: settings.camera_rig(),
            pending: None,
            gpu: None,
        }
    }

    /// A dropped model waiting to be loaded on the next draw
    pub fn pending(&self) -> Option<&Path> {
        self.pending.as_deref()
    }

    fn reload(&mut self, gpu: &RenderContext, path: PathBuf) {
        let Some(res) = &mut self.gpu else {
            return;
        };
        match Model::load(&gpu.device, &gpu.queue, &path, &res.texture_layout) {
            Ok(model) => {
                res.fit = fit_transform(model.bounds());
                res.model = model;
            }
            Err(e) => log::warn!("Keeping {}: {}", res.model.path().display(), e),
        }
    }
}

impl Slide for ModelLoading {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let texture_layout = texture_bind_group_layout(&gpu.device, "Model Texture", 1);
        let model = Model::load(&gpu.device, &gpu.queue, &self.settings.model, &texture_layout)?;

        let shader = load_shader(&gpu.device, "Model Loading", &self.settings.shader(SHADER))?;
        let params = UniformBuffer::new(&gpu.device, "Model Params", &ModelParams::zeroed());
        let layout = model_vertex_layout();

        let pipeline = PipelineBuilder::new("Model Loading", &shader)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .with_bind_group_layout(&texture_layout)
            .with_depth_test(true)
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(ModelGpu {
            pipeline,
            params,
            texture_layout,
            fit: fit_transform(model.bounds()),
            model,
        });
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.rig.update(time.dt);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        if let Some(path) = self.pending.take() {
            self.reload(gpu, path);
        }

        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let transforms = LitTransforms::new(
            res.fit,
            self.rig.view(),
            self.rig.projection(frame.aspect_ratio()),
        );
        res.params.write(
            &gpu.queue,
            &ModelParams {
                transforms,
                light_dir: vec3_padded(LIGHT_DIR),
            },
        );

        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, res.params.bind_group(), &[]);
        res.model.draw(&mut pass, 1);
    }

    fn close(&mut self) {
        self.gpu = None;
    }

    fn handle_event(&mut self, event: &SketchEvent) -> bool {
        if let SketchEvent::FileDropped(path) = event {
            if !is_obj(path) {
                log::warn!("Ignoring dropped file {}: not an .obj", path.display());
                return false;
            }
            log::info!("Queued model {}", path.display());
            self.pending = Some(path.clone());
            return true;
        }
        self.rig.handle_event(event)
    }

    fn is_sketch(&self) -> bool {
        true
    }

    fn on_exit(&mut self) {
        self.rig.release();
    }
}
