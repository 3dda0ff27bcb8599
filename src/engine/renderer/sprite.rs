// Sprite rendering system

use super::{Camera, CameraUniform, Texture, Vertex};
use crate::engine::assets::{AssetId, AssetManager, TextureHandle};
use glam::{Mat4, Vec2, Vec4};
use log::warn;
use std::collections::HashMap;
use std::ops::Range;
use wgpu::util::DeviceExt;

/// A textured or solid quad in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Center position in pixels
    pub position: Vec2,
    /// Size in pixels (width, height)
    pub size: Vec2,
    /// Color tint (RGBA, 1.0 = full color)
    pub color: Vec4,
    /// Texture handle (None = white texture)
    pub texture: Option<TextureHandle>,
    /// Mirror the texture horizontally
    pub flip_x: bool,
}

impl Sprite {
    /// Create a solid white sprite; tint it for other colors
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            color: Vec4::ONE,
            texture: None,
            flip_x: false,
        }
    }

    /// Create a sprite with a texture
    pub fn with_texture(position: Vec2, size: Vec2, texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Self::new(position, size)
        }
    }

    pub fn tinted(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    /// The four corner vertices of this sprite
    pub fn vertices(&self) -> [Vertex; 4] {
        Vertex::quad(self.position, self.size, self.flip_x, self.color)
    }
}

/// Which texture a batch samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BatchTexture {
    White,
    Asset(AssetId),
}

impl From<Option<TextureHandle>> for BatchTexture {
    fn from(texture: Option<TextureHandle>) -> Self {
        texture.map_or(BatchTexture::White, |handle| BatchTexture::Asset(handle.id()))
    }
}

/// A run of consecutive sprites sharing one texture
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    texture: BatchTexture,
    indices: Range<u32>,
}

/// Geometry for one frame: every queued sprite, grouped into draw calls
#[derive(Debug, Default)]
struct FrameGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    batches: Vec<Batch>,
}

impl FrameGeometry {
    /// Build geometry in submission order so later sprites draw on top.
    /// Adjacent sprites with the same texture share a draw call.
    fn build(sprites: &[Sprite]) -> Self {
        let mut geometry = Self::default();

        for sprite in sprites {
            let texture = BatchTexture::from(sprite.texture);
            let base = geometry.vertices.len() as u32;
            geometry.vertices.extend_from_slice(&sprite.vertices());

            let start = geometry.indices.len() as u32;
            geometry.indices.extend_from_slice(&Vertex::quad_indices(base));
            let end = geometry.indices.len() as u32;

            match geometry.batches.last_mut() {
                Some(batch) if batch.texture == texture => batch.indices.end = end,
                _ => geometry.batches.push(Batch {
                    texture,
                    indices: start..end,
                }),
            }
        }

        geometry
    }
}

/// GPU buffers for the current frame
struct FrameBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    batches: Vec<Batch>,
}

/// Sprite renderer batching quads by texture
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    bind_group_layout: wgpu::BindGroupLayout,
    /// Sampled by untextured sprites
    _white: Texture,
    white_bind_group: wgpu::BindGroup,
    /// Bind groups created on first use of each texture
    bind_groups: HashMap<AssetId, wgpu::BindGroup>,
    sprites: Vec<Sprite>,
    frame: Option<FrameBuffers>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &wgpu::SurfaceConfiguration,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection flips winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let white = Texture::from_color(device, queue, [255, 255, 255, 255], Some("White"));
        let white_bind_group = white.bind_group(device, &texture_bind_group_layout);

        Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            bind_group_layout: texture_bind_group_layout,
            _white: white,
            white_bind_group,
            bind_groups: HashMap::new(),
            sprites: Vec::new(),
            frame: None,
        }
    }

    /// Queue a sprite for this frame
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    /// Queue a rectangle outline of the given stroke width.
    /// `top_left` and `size` describe the outer edge.
    pub fn add_outline(&mut self, top_left: Vec2, size: Vec2, stroke: f32, color: Vec4) {
        for (position, edge) in outline_edges(top_left, size, stroke) {
            self.add_sprite(Sprite::new(position, edge).tinted(color));
        }
    }

    /// Upload the queued sprites and the camera for drawing, then clear the
    /// queue. Sprites whose texture is not loaded are skipped.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        assets: &AssetManager,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(camera)]),
        );

        let mut sprites = std::mem::take(&mut self.sprites);
        sprites.retain(|sprite| match sprite.texture {
            None => true,
            Some(handle) => {
                let id = handle.id();
                if self.bind_groups.contains_key(&id) {
                    return true;
                }
                match assets.get_texture(handle) {
                    Some(texture) => {
                        let bind_group = texture.bind_group(device, &self.bind_group_layout);
                        self.bind_groups.insert(id, bind_group);
                        true
                    }
                    None => {
                        warn!("Skipping sprite with unloaded texture {:?}", id);
                        false
                    }
                }
            }
        });

        let geometry = FrameGeometry::build(&sprites);
        self.frame = if geometry.batches.is_empty() {
            None
        } else {
            Some(FrameBuffers {
                vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Vertex Buffer"),
                    contents: bytemuck::cast_slice(&geometry.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Index Buffer"),
                    contents: bytemuck::cast_slice(&geometry.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                batches: geometry.batches,
            })
        };

        // Keep the allocation for the next frame
        sprites.clear();
        self.sprites = sprites;
    }

    /// Draw what the last `prepare` uploaded
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(frame) = &self.frame else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, frame.vertex_buffer.slice(..));
        render_pass.set_index_buffer(frame.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for batch in &frame.batches {
            let bind_group = match batch.texture {
                BatchTexture::White => &self.white_bind_group,
                BatchTexture::Asset(id) => match self.bind_groups.get(&id) {
                    Some(bind_group) => bind_group,
                    None => continue,
                },
            };
            render_pass.set_bind_group(1, bind_group, &[]);
            render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }
}

/// Center and size of the four strips forming a rectangle outline
fn outline_edges(top_left: Vec2, size: Vec2, stroke: f32) -> [(Vec2, Vec2); 4] {
    let stroke = stroke.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    let center = top_left + size / 2.0;
    let horizontal = Vec2::new(size.x, stroke);
    let vertical = Vec2::new(stroke, size.y - 2.0 * stroke);
    [
        (Vec2::new(center.x, top_left.y + stroke / 2.0), horizontal),
        (Vec2::new(center.x, top_left.y + size.y - stroke / 2.0), horizontal),
        (Vec2::new(top_left.x + stroke / 2.0, center.y), vertical),
        (Vec2::new(top_left.x + size.x - stroke / 2.0, center.y), vertical),
    ]
}
