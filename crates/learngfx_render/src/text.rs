//! Screen-space text overlay
//!
//! Printable ASCII is rasterized once with fontdue at a fixed pixel size and
//! shelf-packed into an R8 atlas. Lines are laid out on the CPU into textured
//! quads and drawn in a single alpha-blended pass after the slide.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use learngfx_core::Color;
use learngfx_math::{mat4, Mat4};

use crate::context::RenderContext;
use crate::frame::FrameTarget;
use crate::mesh::VertexLayout;
use crate::pipeline::{PipelineBuilder, UniformBuffer};
use crate::shader::{load_shader, ShaderError, ShaderSource};
use crate::texture::{check_dimensions, texture_bind_group, texture_bind_group_layout, Texture, TextureError};

/// Narrowest atlas; widened when a single glyph needs more room
const ATLAS_WIDTH: u32 = 512;
const GLYPH_PADDING: u32 = 1;
const FALLBACK_GLYPH: char = '?';

/// One line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Left edge in pixels
    pub x: f32,
    /// Top of the line in pixels, measured down from the top of the window
    pub y: f32,
    /// Multiplier on the atlas pixel size
    pub scale: f32,
    pub color: Color,
}

impl TextLine {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            scale: 1.0,
            color: Color::WHITE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Font loading and text pipeline errors
#[derive(Debug)]
pub enum TextError {
    Io { path: PathBuf, source: io::Error },
    Font(String),
    Shader(ShaderError),
    /// The glyph atlas does not fit in a device texture
    Atlas(TextureError),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::Io { path, source } => {
                write!(f, "Failed to read font {}: {}", path.display(), source)
            }
            TextError::Font(msg) => write!(f, "Failed to parse font: {}", msg),
            TextError::Shader(e) => write!(f, "Text shader: {}", e),
            TextError::Atlas(e) => write!(f, "Glyph atlas: {}", e),
        }
    }
}

impl std::error::Error for TextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextError::Io { source, .. } => Some(source),
            TextError::Shader(e) => Some(e),
            TextError::Atlas(e) => Some(e),
            TextError::Font(_) => None,
        }
    }
}

impl From<ShaderError> for TextError {
    fn from(e: ShaderError) -> Self {
        TextError::Shader(e)
    }
}

/// Where a glyph lives in the atlas and how it sits on the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInfo {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub width: u32,
    pub height: u32,
    pub xmin: f32,
    pub ymin: f32,
    pub advance: f32,
}

/// A textured, colored overlay vertex in pixel coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// Glyph bitmaps for printable ASCII packed into one coverage image
pub struct GlyphAtlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    glyphs: HashMap<char, GlyphInfo>,
    px: f32,
    ascent: f32,
    line_height: f32,
}

impl GlyphAtlas {
    /// Parse `bytes` as a TrueType/OpenType font and rasterize at `px`
    pub fn new(bytes: &[u8], px: f32) -> Result<Self, TextError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| TextError::Font(e.to_string()))?;

        let (ascent, line_height) = match font.horizontal_line_metrics(px) {
            Some(m) => (m.ascent, m.new_line_size),
            None => (px, px * 1.2),
        };

        let rasterized: Vec<(char, fontdue::Metrics, Vec<u8>)> = (' '..='~')
            .map(|c| {
                let (metrics, bitmap) = font.rasterize(c, px);
                (c, metrics, bitmap)
            })
            .collect();

        let widest = rasterized.iter().map(|(_, m, _)| m.width as u32).max().unwrap_or(0);
        let width = ATLAS_WIDTH.max((widest + 2 * GLYPH_PADDING).next_power_of_two());

        // Shelf packing
        let mut placements = Vec::with_capacity(rasterized.len());
        let (mut cursor_x, mut cursor_y, mut row_height) = (GLYPH_PADDING, GLYPH_PADDING, 0);
        for (_, metrics, _) in &rasterized {
            let (w, h) = (metrics.width as u32, metrics.height as u32);
            if cursor_x + w + GLYPH_PADDING > width {
                cursor_y += row_height + GLYPH_PADDING;
                cursor_x = GLYPH_PADDING;
                row_height = 0;
            }
            placements.push((cursor_x, cursor_y));
            cursor_x += w + GLYPH_PADDING;
            row_height = row_height.max(h);
        }
        let height = (cursor_y + row_height + GLYPH_PADDING).next_power_of_two();

        let mut pixels = vec![0u8; (width * height) as usize];
        let mut glyphs = HashMap::with_capacity(rasterized.len());
        for ((c, metrics, bitmap), (gx, gy)) in rasterized.into_iter().zip(placements) {
            let (w, h) = (metrics.width as u32, metrics.height as u32);
            for row in 0..h {
                let src = (row * w) as usize;
                let dst = ((gy + row) * width + gx) as usize;
                pixels[dst..dst + w as usize].copy_from_slice(&bitmap[src..src + w as usize]);
            }
            glyphs.insert(
                c,
                GlyphInfo {
                    uv_min: [gx as f32 / width as f32, gy as f32 / height as f32],
                    uv_max: [(gx + w) as f32 / width as f32, (gy + h) as f32 / height as f32],
                    width: w,
                    height: h,
                    xmin: metrics.xmin as f32,
                    ymin: metrics.ymin as f32,
                    advance: metrics.advance_width,
                },
            );
        }

        log::debug!("Glyph atlas {}x{} for {} glyphs at {}px", width, height, glyphs.len(), px);

        Ok(Self {
            width,
            height,
            pixels,
            glyphs,
            px,
            ascent,
            line_height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Coverage bytes, one per texel, row-major from the top
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel size the glyphs were rasterized at
    pub fn px(&self) -> f32 {
        self.px
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c)
    }

    /// Width of `text` in pixels at `scale`
    pub fn measure(&self, text: &str, scale: f32) -> f32 {
        text.lines()
            .map(|line| line.chars().filter_map(|c| self.lookup(c)).map(|g| g.advance * scale).sum::<f32>())
            .fold(0.0, f32::max)
    }

    fn lookup(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c).or_else(|| self.glyphs.get(&FALLBACK_GLYPH))
    }

    /// Two triangles per visible glyph of `line`
    ///
    /// Characters outside the atlas render as `?`. A `\n` starts a new line
    /// below the previous one.
    pub fn layout(&self, line: &TextLine) -> Vec<TextVertex> {
        let color = line.color.to_array();
        let scale = line.scale;
        let mut vertices = Vec::with_capacity(line.text.len() * 6);
        let mut pen_x = line.x;
        let mut baseline = line.y + self.ascent * scale;

        for c in line.text.chars() {
            if c == '\n' {
                pen_x = line.x;
                baseline += self.line_height * scale;
                continue;
            }
            let Some(glyph) = self.lookup(c) else { continue };

            if glyph.width > 0 && glyph.height > 0 {
                let left = pen_x + glyph.xmin * scale;
                let right = left + glyph.width as f32 * scale;
                let top = baseline - (glyph.ymin + glyph.height as f32) * scale;
                let bottom = top + glyph.height as f32 * scale;
                let [u0, v0] = glyph.uv_min;
                let [u1, v1] = glyph.uv_max;

                let vertex = |x, y, u, v| TextVertex {
                    position: [x, y],
                    uv: [u, v],
                    color,
                };
                vertices.extend_from_slice(&[
                    vertex(left, top, u0, v0),
                    vertex(left, bottom, u0, v1),
                    vertex(right, bottom, u1, v1),
                    vertex(left, top, u0, v0),
                    vertex(right, bottom, u1, v1),
                    vertex(right, top, u1, v0),
                ]);
            }
            pen_x += glyph.advance * scale;
        }
        vertices
    }
}

/// Matches `Screen` in text.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct ScreenUniform {
    projection: Mat4,
}

impl ScreenUniform {
    fn new(width: u32, height: u32) -> Self {
        Self {
            projection: screen_projection(width, height),
        }
    }
}

/// Pixel coordinates (origin top-left, Y down) to clip space
pub fn screen_projection(width: u32, height: u32) -> Mat4 {
    mat4::orthographic(0.0, width.max(1) as f32, height.max(1) as f32, 0.0, -1.0, 1.0)
}

/// Draws [`TextLine`]s on top of a frame
pub struct TextRenderer {
    atlas: GlyphAtlas,
    pipeline: wgpu::RenderPipeline,
    screen: UniformBuffer<ScreenUniform>,
    atlas_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    capacity: usize,
}

impl TextRenderer {
    /// Load the font at `path`
    pub fn from_file(ctx: &RenderContext, path: impl AsRef<Path>, px: f32) -> Result<Self, TextError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded font {}", path.display());
        Self::new(ctx, &bytes, px)
    }

    pub fn new(ctx: &RenderContext, font: &[u8], px: f32) -> Result<Self, TextError> {
        let atlas = GlyphAtlas::new(font, px)?;
        let device = &ctx.device;
        let (width, height) = atlas.size();
        check_dimensions(width, height, device.limits().max_texture_dimension_2d).map_err(TextError::Atlas)?;

        let shader = load_shader(
            device,
            "Text Shader",
            &ShaderSource::Inline(include_str!("shaders/text.wgsl")),
        )?;

        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glyph Atlas"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            atlas.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: Some(height),
            },
            extent,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let atlas_texture = Texture {
            texture,
            view,
            sampler,
            size: (width, height),
        };

        let atlas_layout = texture_bind_group_layout(device, "Glyph Atlas Layout", 1);
        let atlas_bind_group = texture_bind_group(device, &atlas_layout, "Glyph Atlas", &[&atlas_texture]);

        let screen = UniformBuffer::new(
            device,
            "Text Screen Uniform",
            &ScreenUniform::new(ctx.config.width, ctx.config.height),
        );

        let vertex_layout = VertexLayout::new(8)
            .attribute(0, 2, 0)
            .attribute(1, 2, 2)
            .attribute(2, 4, 4);

        let pipeline = PipelineBuilder::new("Text Pipeline", &shader)
            .with_vertex_layout(vertex_layout.buffer_layout())
            .with_bind_group_layout(screen.layout())
            .with_bind_group_layout(&atlas_layout)
            .with_blend(Some(wgpu::BlendState::ALPHA_BLENDING))
            .build(device, ctx.surface_format());

        let capacity = 1024;
        let vertex_buffer = create_vertex_buffer(device, capacity);

        Ok(Self {
            atlas,
            pipeline,
            screen,
            atlas_bind_group,
            vertex_buffer,
            capacity,
        })
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    /// Draw `lines` over whatever the frame already holds
    pub fn draw(&mut self, ctx: &RenderContext, frame: &mut FrameTarget, lines: &[TextLine]) {
        let vertices: Vec<TextVertex> = lines.iter().flat_map(|line| self.atlas.layout(line)).collect();
        if vertices.is_empty() {
            return;
        }

        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&ctx.device, self.capacity);
        }
        ctx.queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        let (width, height) = frame.size();
        self.screen.write(&ctx.queue, &ScreenUniform::new(width, height));

        let mut pass = frame.begin_pass("Text Pass", None);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.screen.bind_group(), &[]);
        pass.set_bind_group(1, &self.atlas_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..vertices.len() as u32, 0..1);
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Text Vertices"),
        size: (capacity * std::mem::size_of::<TextVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
