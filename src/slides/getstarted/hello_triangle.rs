//! First triangles: a single triangle, an indexed rectangle and two
//! triangles with their own pipelines

use learngfx_core::{Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_render::mesh::wireframe_indices;
use learngfx_render::{
    load_shader, FrameTarget, Mesh, PipelineBuilder, RenderContext, ShaderSource, VertexLayout,
};
use winit::keyboard::KeyCode;

use crate::slides::common::{QUAD, QUAD_INDICES, TRIANGLE};
use crate::slides::SlideSettings;

const TRIANGLE_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 0.2, 1.0);
}
"#;

const HELLO_TRIANGLE_SHADER: &str = "hello_triangle.wgsl";

#[rustfmt::skip]
const FIRST_TRIANGLE: [f32; 9] = [
     0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

/// Drawn through `vs_half`, so it lands in the lower right quadrant
#[rustfmt::skip]
const SECOND_TRIANGLE: [f32; 9] = [
    1.0, -1.0, 0.0,
    1.0,  0.0, 0.0,
    0.0, -1.0, 0.0,
];

fn position_layout() -> VertexLayout {
    VertexLayout::new(3).attribute(0, 3, 0)
}

struct MeshPipeline {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
}

impl MeshPipeline {
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        self.mesh.draw(pass);
    }
}

// --- 2a ---

/// One triangle from an inline shader
pub struct HelloTriangle {
    base: SlideBase,
    gpu: Option<MeshPipeline>,
}

impl HelloTriangle {
    pub fn new() -> Self {
        Self {
            base: SlideBase::new("2a. Hello Triangle"),
            gpu: None,
        }
    }
}

impl Default for HelloTriangle {
    fn default() -> Self {
        Self::new()
    }
}

impl Slide for HelloTriangle {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let shader = load_shader(&gpu.device, "Hello Triangle", &ShaderSource::Inline(TRIANGLE_SHADER))?;
        let layout = position_layout();
        let pipeline = PipelineBuilder::new("Hello Triangle", &shader)
            .with_vertex_layout(layout.buffer_layout())
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(MeshPipeline {
            pipeline,
            mesh: Mesh::new(&gpu.device, "Hello Triangle", &TRIANGLE, &layout, None),
        });
        Ok(())
    }

    fn draw(&mut self, _gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(triangle) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        triangle.draw(&mut pass);
    }

    fn close(&mut self) {
        self.gpu = None;
    }
}

// --- 2b ---

struct RectangleGpu {
    fill: MeshPipeline,
    wireframe: MeshPipeline,
}

/// An indexed quad, drawn as outlines until `Space` is pressed
pub struct HelloRectangle {
    base: SlideBase,
    settings: SlideSettings,
    wireframe: bool,
    gpu: Option<RectangleGpu>,
}

impl HelloRectangle {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("2b. Hello Rectangle")
                .with_sub_header("space toggles between filled and wireframe polygons"),
            settings: settings.clone(),
            wireframe: true,
            gpu: None,
        }
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }
}

impl Slide for HelloRectangle {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let shader = load_shader(&gpu.device, "Hello Rectangle", &self.settings.shader(HELLO_TRIANGLE_SHADER))?;
        let layout = position_layout();
        let format = gpu.surface_format();

        let fill = PipelineBuilder::new("Hello Rectangle", &shader)
            .with_entry_points("vs_main", "fs_yellow")
            .with_vertex_layout(layout.buffer_layout())
            .build(&gpu.device, format);
        let lines = PipelineBuilder::new("Hello Rectangle Wireframe", &shader)
            .with_entry_points("vs_main", "fs_yellow")
            .with_vertex_layout(layout.buffer_layout())
            .with_topology(wgpu::PrimitiveTopology::LineList)
            .build(&gpu.device, format);

        let outline = wireframe_indices(&QUAD_INDICES);
        self.gpu = Some(RectangleGpu {
            fill: MeshPipeline {
                pipeline: fill,
                mesh: Mesh::new(&gpu.device, "Rectangle", &QUAD, &layout, Some(&QUAD_INDICES)),
            },
            wireframe: MeshPipeline {
                pipeline: lines,
                mesh: Mesh::new(&gpu.device, "Rectangle Outline", &QUAD, &layout, Some(&outline)),
            },
        });
        Ok(())
    }

    fn draw(&mut self, _gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(rect) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        if self.wireframe {
            rect.wireframe.draw(&mut pass);
        } else {
            rect.fill.draw(&mut pass);
        }
    }

    fn close(&mut self) {
        self.gpu = None;
    }

    fn handle_event(&mut self, event: &SketchEvent) -> bool {
        if event.key_pressed() == Some(KeyCode::Space) {
            self.wireframe = !self.wireframe;
            log::debug!("Wireframe: {}", self.wireframe);
            return true;
        }
        false
    }
}

// --- 2c ---

/// Two triangles, each with its own vertex buffer and pipeline
pub struct HelloTwoTriangles {
    base: SlideBase,
    settings: SlideSettings,
    gpu: Option<[MeshPipeline; 2]>,
}

impl HelloTwoTriangles {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("2c. Hello 2 Triangles")
                .with_sub_header("two vertex buffers, two pipelines"),
            settings: settings.clone(),
            gpu: None,
        }
    }
}

impl Slide for HelloTwoTriangles {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let shader = load_shader(&gpu.device, "Hello 2 Triangles", &self.settings.shader(HELLO_TRIANGLE_SHADER))?;
        let layout = position_layout();
        let format = gpu.surface_format();

        let yellow = PipelineBuilder::new("Yellow Triangle", &shader)
            .with_entry_points("vs_main", "fs_yellow")
            .with_vertex_layout(layout.buffer_layout())
            .build(&gpu.device, format);
        let purple = PipelineBuilder::new("Purple Triangle", &shader)
            .with_entry_points("vs_half", "fs_purple")
            .with_vertex_layout(layout.buffer_layout())
            .build(&gpu.device, format);

        self.gpu = Some([
            MeshPipeline {
                pipeline: yellow,
                mesh: Mesh::new(&gpu.device, "Yellow Triangle", &FIRST_TRIANGLE, &layout, None),
            },
            MeshPipeline {
                pipeline: purple,
                mesh: Mesh::new(&gpu.device, "Purple Triangle", &SECOND_TRIANGLE, &layout, None),
            },
        ]);
        Ok(())
    }

    fn draw(&mut self, _gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(triangles) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        for triangle in triangles {
            triangle.draw(&mut pass);
        }
    }

    fn close(&mut self) {
        self.gpu = None;
    }
}
