use crate::camera::OrbitCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use tileflip_common::Color;
use tileflip_scene::Scene;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: Color) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: color.to_linear_rgba(),
        }
    }
}

/// Corners of the unit cube centered on the origin. Corner `i` has bit 0
/// set for +X, bit 1 for +Y, bit 2 for +Z.
fn cube_corners() -> Vec<Vertex> {
    (0..8u32)
        .map(|i| {
            let pick = |bit: u32| if i & bit != 0 { 0.5 } else { -0.5 };
            Vertex {
                position: [pick(1), pick(2), pick(4)],
            }
        })
        .collect()
}

/// Triangle indices for the six cube faces.
#[rustfmt::skip]
fn cube_triangles() -> Vec<u16> {
    vec![
        1, 3, 7, 7, 5, 1, // +X
        0, 4, 6, 6, 2, 0, // -X
        2, 6, 7, 7, 3, 2, // +Y
        0, 1, 5, 5, 4, 0, // -Y
        4, 5, 7, 7, 6, 4, // +Z
        0, 2, 3, 3, 1, 0, // -Z
    ]
}

/// Line-list indices for the twelve cube edges: every pair of corners that
/// differ in exactly one axis.
fn cube_edges() -> Vec<u16> {
    let mut indices = Vec::with_capacity(24);
    for a in 0..8u16 {
        for bit in [1u16, 2, 4] {
            if a & bit == 0 {
                indices.push(a);
                indices.push(a | bit);
            }
        }
    }
    indices
}

/// Instance data for every node: all bodies first, then all outlines.
/// Returns the instances and the number of bodies.
fn build_instances(scene: &Scene) -> (Vec<InstanceData>, u32) {
    let mut bodies = Vec::with_capacity(scene.tile_count());
    let mut outlines = Vec::with_capacity(scene.tile_count());
    for visual in scene.tiles() {
        for (id, out) in [(visual.body, &mut bodies), (visual.outline, &mut outlines)] {
            if let (Some(node), Some(model)) = (scene.node(id), scene.world_matrix(id)) {
                out.push(InstanceData::new(model, node.color));
            }
        }
    }
    let body_count = bodies.len() as u32;
    bodies.append(&mut outlines);
    (bodies, body_count)
}

fn color_target(format: wgpu::TextureFormat) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Draws every tile as a solid body plus its edge outline.
pub struct TileRenderer {
    body_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    triangle_buffer: wgpu::Buffer,
    triangle_count: u32,
    edge_buffer: wgpu::Buffer,
    edge_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl TileRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tile_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tile_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::TILE_SHADER.into()),
        });

        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x4,
                    2 => Float32x4,
                    3 => Float32x4,
                    4 => Float32x4,
                    5 => Float32x4,
                ],
            },
        ];
        let targets = color_target(surface_format);

        // Bodies are pushed back slightly so the coplanar outline edges win.
        let body_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("body_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &targets,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 1.0,
                    clamp: 0.0,
                },
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let outline_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("outline_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &targets,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let corners = cube_corners();
        let triangles = cube_triangles();
        let edges = cube_edges();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&corners),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_triangle_buffer"),
            contents: bytemuck::cast_slice(&triangles),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_edge_buffer"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_capacity = 512;
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            body_pipeline,
            outline_pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            triangle_buffer,
            triangle_count: triangles.len() as u32,
            edge_buffer,
            edge_count: edges.len() as u32,
            instance_buffer,
            instance_capacity,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: clear to `background`, draw bodies, then outlines.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        scene: &Scene,
        background: Color,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
            }),
        );

        let (instances, body_count) = build_instances(scene);
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.instance_capacity);
            tracing::debug!(capacity = self.instance_capacity, "grew instance buffer");
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        let total = instances.len() as u32;

        let [r, g, b, a] = background.to_linear_rgba();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tile_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if total > 0 {
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

                pass.set_pipeline(&self.body_pipeline);
                pass.set_index_buffer(self.triangle_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.triangle_count, 0, 0..body_count);

                pass.set_pipeline(&self.outline_pipeline);
                pass.set_index_buffer(self.edge_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.edge_count, 0, body_count..total);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (capacity * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tileflip_scene::SceneConfig;

    #[test]
    fn cube_has_eight_unit_corners() {
        let corners = cube_corners();
        assert_eq!(corners.len(), 8);
        for v in &corners {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn triangles_cover_six_faces() {
        let triangles = cube_triangles();
        assert_eq!(triangles.len(), 36);
        assert!(triangles.iter().all(|&i| i < 8));
        // Each face's triangles share one constant coordinate.
        let corners = cube_corners();
        for face in triangles.chunks(6) {
            let shared = (0..3).any(|axis| {
                face.iter()
                    .all(|&i| corners[i as usize].position[axis] == corners[face[0] as usize].position[axis])
            });
            assert!(shared, "face {face:?} is not planar");
        }
    }

    #[test]
    fn edges_are_the_twelve_box_edges() {
        let edges = cube_edges();
        assert_eq!(edges.len(), 24);
        let corners = cube_corners();
        for pair in edges.chunks(2) {
            let a = Vec3::from(corners[pair[0] as usize].position);
            let b = Vec3::from(corners[pair[1] as usize].position);
            assert_eq!((a - b).length(), 1.0);
        }
    }

    #[test]
    fn instances_put_bodies_before_outlines() {
        let (_, scene, _) = SceneConfig::default().build().unwrap();
        let (instances, body_count) = build_instances(&scene);
        assert_eq!(body_count, 225);
        assert_eq!(instances.len(), 450);

        let charcoal = scene.node(scene.tiles()[0].body).unwrap().color.to_linear_rgba();
        assert!(instances[..225].iter().all(|i| i.color == charcoal));
        let first_outline = scene.node(scene.tiles()[0].outline).unwrap().color;
        assert_eq!(instances[225].color, first_outline.to_linear_rgba());
    }

    #[test]
    fn instance_matrix_is_world_matrix() {
        let (_, scene, _) = SceneConfig::default().build().unwrap();
        let (instances, _) = build_instances(&scene);
        let tile = scene.tiles()[17];
        let expected = scene.world_matrix(tile.body).unwrap().to_cols_array_2d();
        assert_eq!(instances[17].model_3, expected[3]);
        assert_eq!(instances[17].model_0, expected[0]);
    }
}
