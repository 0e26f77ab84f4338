//! Per-frame render target
//!
//! A [`FrameTarget`] is handed to the current slide's `draw`. It owns the
//! command encoder for the frame, the swapchain view and the shared depth
//! view, and collects overlay text to be drawn after the slide.

use learngfx_core::Color;

use crate::text::TextLine;

/// Convert a slide color to a wgpu clear color
pub fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// One acquired frame
pub struct FrameTarget {
    surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
    size: (u32, u32),
    overlay: Vec<TextLine>,
}

impl FrameTarget {
    pub(crate) fn new(
        surface_texture: wgpu::SurfaceTexture,
        view: wgpu::TextureView,
        depth_view: wgpu::TextureView,
        encoder: wgpu::CommandEncoder,
        size: (u32, u32),
    ) -> Self {
        Self {
            surface_texture,
            view,
            depth_view,
            encoder,
            size,
            overlay: Vec::new(),
        }
    }

    /// Frame size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size.0 as f32 / self.size.1.max(1) as f32
    }

    /// Begin a render pass on the swapchain view with the shared depth buffer
    ///
    /// With `clear` set, color is cleared to it and depth to 1.0; otherwise
    /// both are loaded so passes can be layered.
    pub fn begin_pass(&mut self, label: &str, clear: Option<Color>) -> wgpu::RenderPass<'_> {
        let (color_load, depth_load) = match clear {
            Some(color) => (wgpu::LoadOp::Clear(clear_color(color)), wgpu::LoadOp::Clear(1.0)),
            None => (wgpu::LoadOp::Load, wgpu::LoadOp::Load),
        };

        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    /// Clear color and depth without drawing anything
    pub fn clear(&mut self, color: Color) {
        let _pass = self.begin_pass("Clear Pass", Some(color));
    }

    /// Queue a line of overlay text
    pub fn text(&mut self, line: TextLine) {
        self.overlay.push(line);
    }

    /// Take the queued overlay text
    pub fn take_overlay(&mut self) -> Vec<TextLine> {
        std::mem::take(&mut self.overlay)
    }

    pub(crate) fn finish(self) -> (wgpu::CommandEncoder, wgpu::SurfaceTexture) {
        (self.encoder, self.surface_texture)
    }
}
