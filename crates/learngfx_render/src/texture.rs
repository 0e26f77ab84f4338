//! 2D textures loaded with the `image` crate
//!
//! Images are flipped vertically on load so texture coordinate (0, 0) is the
//! bottom-left corner of the picture, matching the vertex data the slides
//! share with the classic OpenGL tutorials.

use std::fmt;
use std::path::{Path, PathBuf};

/// Texture addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    Repeat,
    MirrorRepeat,
    ClampToEdge,
}

impl From<Wrap> for wgpu::AddressMode {
    fn from(w: Wrap) -> Self {
        match w {
            Wrap::Repeat => wgpu::AddressMode::Repeat,
            Wrap::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
            Wrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        }
    }
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Linear,
    Nearest,
}

impl From<Filter> for wgpu::FilterMode {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Linear => wgpu::FilterMode::Linear,
            Filter::Nearest => wgpu::FilterMode::Nearest,
        }
    }
}

/// Sampler settings for a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    pub wrap_u: Wrap,
    pub wrap_v: Wrap,
    pub filter: Filter,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            wrap_u: Wrap::Repeat,
            wrap_v: Wrap::Repeat,
            filter: Filter::Linear,
        }
    }
}

impl TextureOptions {
    /// Builder: same wrap mode on both axes
    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap_u = wrap;
        self.wrap_v = wrap;
        self
    }

    /// Builder: set the filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    fn sampler_descriptor(&self) -> wgpu::SamplerDescriptor<'static> {
        wgpu::SamplerDescriptor {
            label: Some("Texture Sampler"),
            address_mode_u: self.wrap_u.into(),
            address_mode_v: self.wrap_v.into(),
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: self.filter.into(),
            min_filter: self.filter.into(),
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        }
    }
}

/// Texture loading error
#[derive(Debug)]
pub enum TextureError {
    /// Image could not be opened or decoded
    Decode { path: PathBuf, source: image::ImageError },
    /// Pixel data does not match the declared size
    Size { expected: usize, actual: usize },
    /// Empty, or larger than the device allows
    Dimensions { width: u32, height: u32, max: u32 },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode { path, source } => {
                write!(f, "Failed to load image {}: {}", path.display(), source)
            }
            TextureError::Size { expected, actual } => {
                write!(f, "Expected {} bytes of RGBA data, got {}", expected, actual)
            }
            TextureError::Dimensions { width, height, max } => {
                write!(f, "Texture size {}x{} is outside 1..={} per side", width, height, max)
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode { source, .. } => Some(source),
            TextureError::Size { .. } | TextureError::Dimensions { .. } => None,
        }
    }
}

/// Decoded RGBA8 pixels, bottom row first
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Decode an image file and flip it vertically
    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// Check that a `width` x `height` texture can be created when sides may be
/// at most `max` texels
pub fn check_dimensions(width: u32, height: u32, max: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(TextureError::Dimensions { width, height, max });
    }
    Ok(())
}

/// A sampled 2D texture
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    /// Load an image file
    pub fn from_file(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        options: TextureOptions,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let data = ImageData::load(path)?;
        log::debug!("Loaded texture {} ({}x{})", path.display(), data.width, data.height);
        let label = path.file_name().and_then(|n| n.to_str()).unwrap_or("texture");
        Self::from_rgba(device, queue, label, &data.rgba, data.width, data.height, options)
    }

    /// Upload raw RGBA8 pixels
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        rgba: &[u8],
        width: u32,
        height: u32,
        options: TextureOptions,
    ) -> Result<Self, TextureError> {
        check_dimensions(width, height, device.limits().max_texture_dimension_2d)?;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::Size {
                expected,
                actual: rgba.len(),
            });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&options.sampler_descriptor());

        Ok(Self {
            texture,
            view,
            sampler,
            size: (width, height),
        })
    }

    /// 1x1 white texture, used when a material has no diffuse map
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let sampler = device.create_sampler(&TextureOptions::default().sampler_descriptor());
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("White Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &[255, 255, 255, 255],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            sampler,
            size: (1, 1),
        }
    }
}

/// Bind group layout with `count` texture/sampler pairs
///
/// Texture `i` is at binding `2 * i`, its sampler at `2 * i + 1`.
pub fn texture_bind_group_layout(device: &wgpu::Device, label: &str, count: u32) -> wgpu::BindGroupLayout {
    let entries: Vec<wgpu::BindGroupLayoutEntry> = (0..count)
        .flat_map(|i| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * i,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * i + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        })
        .collect();

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &entries,
    })
}

/// Bind group for textures laid out by [`texture_bind_group_layout`]
pub fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    textures: &[&Texture],
) -> wgpu::BindGroup {
    let entries: Vec<wgpu::BindGroupEntry> = textures
        .iter()
        .enumerate()
        .flat_map(|(i, tex)| {
            let i = i as u32;
            [
                wgpu::BindGroupEntry {
                    binding: 2 * i,
                    resource: wgpu::BindingResource::TextureView(&tex.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2 * i + 1,
                    resource: wgpu::BindingResource::Sampler(&tex.sampler),
                },
            ]
        })
        .collect();

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &entries,
    })
}
