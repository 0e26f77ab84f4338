//! GPU context
//!
//! Owns the wgpu device, queue and window surface, plus the depth buffer that
//! every frame shares. Slides receive a `&RenderContext` to create resources
//! in `init` and to upload uniforms in `draw`.

use std::fmt;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::frame::FrameTarget;

/// Depth format used by every pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Errors while creating the GPU context
#[derive(Debug)]
pub enum ContextError {
    /// The window surface could not be created
    Surface(wgpu::CreateSurfaceError),
    /// No adapter is compatible with the surface
    NoAdapter,
    /// The adapter refused to create a device
    Device(wgpu::RequestDeviceError),
    /// The surface reports no supported formats
    NoSurfaceFormat,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Surface(e) => write!(f, "Failed to create surface: {}", e),
            ContextError::NoAdapter => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(e) => write!(f, "Failed to create device: {}", e),
            ContextError::NoSurfaceFormat => write!(f, "Surface has no supported formats"),
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContextError::Surface(e) => Some(e),
            ContextError::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for ContextError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        ContextError::Surface(e)
    }
}

impl From<wgpu::RequestDeviceError> for ContextError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        ContextError::Device(e)
    }
}

/// WGPU device, queue, and surface management
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
}

impl RenderContext {
    /// Create a context bound to `window`
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("learngfx device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats).ok_or(ContextError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth_view,
        })
    }

    /// Reconfigure the surface and depth buffer after a resize
    ///
    /// A zero-sized window (minimized) only records the size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
    }

    /// Reconfigure the surface with its current settings (after `Lost`/`Outdated`)
    pub fn reconfigure(&mut self) {
        if self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Acquire the next surface texture and start recording
    pub fn begin_frame(&self) -> Result<FrameTarget, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        Ok(FrameTarget::new(
            surface_texture,
            view,
            self.depth_view.clone(),
            encoder,
            (self.config.width, self.config.height),
        ))
    }

    /// Submit the recorded commands and present
    pub fn submit(&self, frame: FrameTarget) {
        let (encoder, surface_texture) = frame.finish();
        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }
}

/// Prefer a non-sRGB format so colors written by the shaders land on screen
/// unchanged, the way a default OpenGL framebuffer behaves.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn test_choose_surface_format_prefers_linear() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn test_choose_surface_format_falls_back_to_first() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn test_context_error_display() {
        assert_eq!(ContextError::NoAdapter.to_string(), "No suitable GPU adapter found");
        assert!(ContextError::NoSurfaceFormat.to_string().contains("formats"));
    }
}
