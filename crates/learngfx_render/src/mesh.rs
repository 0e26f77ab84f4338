//! Vertex data on the GPU
//!
//! Slides describe vertices as flat `f32` slices (position, then color or
//! texture coordinates, ...) and a [`VertexLayout`] naming which floats feed
//! which shader location.

use std::ops::Range;
use wgpu::util::DeviceExt;

/// Interleaved float vertex layout
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    stride: u32,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexLayout {
    /// Layout for vertices of `floats_per_vertex` floats
    pub fn new(floats_per_vertex: u32) -> Self {
        Self {
            stride: floats_per_vertex,
            attributes: Vec::new(),
        }
    }

    /// Builder: `components` floats starting at float `offset` feed `location`
    ///
    /// # Panics
    ///
    /// If `components` is not 1 to 4, or the attribute runs past the stride.
    pub fn attribute(mut self, location: u32, components: u32, offset: u32) -> Self {
        let format = match components {
            1 => wgpu::VertexFormat::Float32,
            2 => wgpu::VertexFormat::Float32x2,
            3 => wgpu::VertexFormat::Float32x3,
            4 => wgpu::VertexFormat::Float32x4,
            n => panic!("Vertex attribute at location {} has {} components, expected 1 to 4", location, n),
        };
        assert!(
            offset + components <= self.stride,
            "Vertex attribute at location {} ends past the {}-float stride",
            location,
            self.stride
        );
        self.attributes.push(wgpu::VertexAttribute {
            format,
            offset: offset as u64 * 4,
            shader_location: location,
        });
        self
    }

    /// Floats per vertex
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride as u64 * 4,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

/// Vertex buffer plus optional index buffer
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Upload `vertices` (laid out per `layout`) and optional `indices`
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[f32],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = indices.map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: vertex_count(vertices.len(), layout.stride()),
            index_count: indices.map_or(0, |i| i.len() as u32),
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind buffers and draw once
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.draw_instances(pass, 0..1);
    }

    /// Bind buffers and draw `instances`
    pub fn draw_instances(&self, pass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.index_count, 0, instances);
            }
            None => pass.draw(0..self.vertex_count, instances),
        }
    }
}

fn vertex_count(floats: usize, stride: u32) -> u32 {
    if stride == 0 {
        0
    } else {
        (floats / stride as usize) as u32
    }
}

/// Line-list indices outlining every triangle of a triangle-list index buffer
///
/// Each triangle `a b c` becomes the edges `a-b`, `b-c`, `c-a`. Trailing
/// indices that don't form a whole triangle are ignored.
pub fn wireframe_indices(indices: &[u32]) -> Vec<u32> {
    indices
        .chunks_exact(3)
        .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_offsets_in_bytes() {
        let layout = VertexLayout::new(8)
            .attribute(0, 3, 0)
            .attribute(1, 3, 3)
            .attribute(2, 2, 6);

        let attrs = layout.attributes();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[1].offset, 12);
        assert_eq!(attrs[2].offset, 24);
        assert_eq!(attrs[2].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[2].shader_location, 2);
        assert_eq!(layout.buffer_layout().array_stride, 32);
    }

    #[test]
    #[should_panic(expected = "expected 1 to 4")]
    fn test_layout_rejects_five_components() {
        let _ = VertexLayout::new(8).attribute(0, 5, 0);
    }

    #[test]
    #[should_panic(expected = "past the 5-float stride")]
    fn test_layout_rejects_attribute_past_stride() {
        let _ = VertexLayout::new(5).attribute(0, 3, 0).attribute(1, 3, 3);
    }

    #[test]
    fn test_layout_formats() {
        let layout = VertexLayout::new(10)
            .attribute(0, 1, 0)
            .attribute(1, 2, 1)
            .attribute(2, 3, 3)
            .attribute(3, 4, 6);
        let formats: Vec<_> = layout.attributes().iter().map(|a| a.format).collect();
        assert_eq!(
            formats,
            vec![
                wgpu::VertexFormat::Float32,
                wgpu::VertexFormat::Float32x2,
                wgpu::VertexFormat::Float32x3,
                wgpu::VertexFormat::Float32x4,
            ]
        );
    }

    #[test]
    fn test_vertex_count() {
        assert_eq!(vertex_count(9, 3), 3);
        assert_eq!(vertex_count(180, 5), 36);
        assert_eq!(vertex_count(10, 0), 0);
    }

    #[test]
    fn test_wireframe_indices() {
        // The two triangles of the hello-rectangle quad
        let quad = [0, 1, 3, 1, 2, 3];
        assert_eq!(
            wireframe_indices(&quad),
            vec![0, 1, 1, 3, 3, 0, 1, 2, 2, 3, 3, 1]
        );
        assert!(wireframe_indices(&[0, 1]).is_empty());
    }
}
