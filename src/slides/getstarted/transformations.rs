use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_math::{mat4, Mat4, Vec3};
use learngfx_render::{
    load_shader, FrameTarget, Mesh, PipelineBuilder, RenderContext, TextureOptions, UniformBuffer,
    VertexLayout,
};

use crate::slides::common::{textured_quad, TexturePair, QUAD_INDICES};
use crate::slides::SlideSettings;

const SHADER: &str = "transformations.wgsl";

/// Matches `Params` in transformations.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformParams {
    pub transform: Mat4,
}

/// Move to the bottom right corner, then spin around Z
pub fn spinning_transform(elapsed: f32) -> Mat4 {
    mat4::mul(
        mat4::translation(Vec3::new(0.5, -0.5, 0.0)),
        mat4::rotation(elapsed, Vec3::Z),
    )
}

struct TransformationsGpu {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    textures: TexturePair,
    params: UniformBuffer<TransformParams>,
}

/// The textured quad rotating in a corner of the screen
pub struct Transformations {
    base: SlideBase,
    settings: SlideSettings,
    transform: Mat4,
    gpu: Option<TransformationsGpu>,
}

impl Transformations {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("5. Transformations")
                .with_sub_header("translate, then rotate with time"),
            settings: settings.clone(),
            transform: spinning_transform(0.0),
            gpu: None,
        }
    }
}

impl Slide for Transformations {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let textures = TexturePair::load(
            gpu,
            &self.settings.textures,
            TextureOptions::default(),
            TextureOptions::default(),
        )?;
        let shader = load_shader(&gpu.device, "Transformations", &self.settings.shader(SHADER))?;
        // Same quad as the texture slides; the color floats are skipped
        let layout = VertexLayout::new(8).attribute(0, 3, 0).attribute(1, 2, 6);
        let params = UniformBuffer::new(&gpu.device, "Transform", &TransformParams { transform: self.transform });

        let pipeline = PipelineBuilder::new("Transformations", &shader)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .with_bind_group_layout(&textures.layout)
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(TransformationsGpu {
            pipeline,
            mesh: Mesh::new(&gpu.device, "Textured Quad", &textured_quad(0.0, 1.0), &layout, Some(&QUAD_INDICES)),
            textures,
            params,
        });
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.transform = spinning_transform(time.elapsed);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        res.params.write(&gpu.queue, &TransformParams { transform: self.transform });

        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, res.params.bind_group(), &[]);
        pass.set_bind_group(1, &res.textures.bind_group, &[]);
        res.mesh.draw(&mut pass);
    }

    fn close(&mut self) {
        self.gpu = None;
    }
}
