use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use log::info;
use wgpu::{
    include_wgsl, BindGroup, BindGroupLayout, BlendState, Buffer, ColorTargetState, ColorWrites,
    CompareFunction, DepthBiasState, DepthStencilState, Device, FragmentState, LoadOp,
    MultisampleState, Operations, PipelineLayout, PipelineLayoutDescriptor,
    RenderPassColorAttachment, RenderPassDepthStencilAttachment, RenderPassDescriptor,
    RenderPipeline, RenderPipelineDescriptor, ShaderModule, StencilState, StoreOp,
    TextureFormat, VertexState,
};

use crate::utils::{create_uniform_init, create_uniform_layout, mesh::Topology};

use super::{
    buffer::VertexArray,
    mesh::Mesh,
    render_manager::RenderManager,
    renderer::{Renderer, RenderingContext},
    texture::{SurfaceTextures, TextureSettings},
};

/// Where a shape sits in the scene and how it spins over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    pub scale: f32,
    pub spin_axis: Vec3,
    /// Radians per second.
    pub spin_speed: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
            spin_axis: Vec3::Y,
            spin_speed: 0.0,
        }
    }
}

impl Placement {
    pub fn at(translation: Vec3) -> Placement {
        Placement {
            translation,
            ..Default::default()
        }
    }

    pub fn spinning(self, spin_axis: Vec3, spin_speed: f32) -> Placement {
        Placement {
            spin_axis,
            spin_speed,
            ..self
        }
    }

    pub fn model_matrix(&self, time: f32) -> Mat4 {
        let rotation = match self.spin_axis.try_normalize() {
            Some(axis) => Quat::from_axis_angle(axis, self.spin_speed * time),
            None => Quat::IDENTITY,
        };

        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.translation)
    }
}

/// How the shader colors a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// 0 draws the base color as is, 1 fully applies the scene lighting.
    pub lighting: f32,
    /// How much of the sampled texture replaces the vertex color.
    pub texture_weight: f32,
    /// 0 samples the checker texture, 1 the stripes.
    pub texture_mix: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            lighting: 1.0,
            texture_weight: 0.0,
            texture_mix: 0.0,
        }
    }
}

impl Material {
    pub const UNLIT: Material = Material {
        lighting: 0.0,
        texture_weight: 0.0,
        texture_mix: 0.0,
    };

    pub fn textured(self, texture_weight: f32, texture_mix: f32) -> Material {
        Material {
            texture_weight,
            texture_mix,
            ..self
        }
    }
}

/// Per-shape values, bound at group 1.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model_matrix: Mat4,
    pub lighting: f32,
    pub texture_weight: f32,
    pub texture_mix: f32,
    _padding: f32,
}

impl ObjectUniform {
    pub fn new(model_matrix: Mat4, material: &Material) -> ObjectUniform {
        ObjectUniform {
            model_matrix,
            lighting: material.lighting,
            texture_weight: material.texture_weight,
            texture_mix: material.texture_mix,
            _padding: 0.0,
        }
    }
}

/// One render pipeline per topology, all sharing the vertex layout.
pub struct MeshPipelines {
    triangles: RenderPipeline,
    lines: RenderPipeline,
}

impl MeshPipelines {
    fn new(
        device: &Device,
        shader: &ShaderModule,
        layout: &PipelineLayout,
        surface_format: TextureFormat,
        depth_format: TextureFormat,
    ) -> MeshPipelines {
        let create = |topology: Topology| {
            let vertex_array = VertexArray::new(topology);

            device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(match topology {
                    Topology::Triangles => "mesh triangles",
                    Topology::Lines => "mesh lines",
                }),
                layout: Some(layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: "vs_main",
                    buffers: &[vertex_array.buffer_layout()],
                },
                primitive: vertex_array.primitive_state(),
                depth_stencil: Some(DepthStencilState {
                    format: depth_format,
                    depth_write_enabled: true,
                    depth_compare: CompareFunction::Less,
                    stencil: StencilState::default(),
                    bias: DepthBiasState::default(),
                }),
                multisample: MultisampleState::default(),
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: "fs_main",
                    targets: &[Some(ColorTargetState {
                        format: surface_format,
                        blend: Some(BlendState::REPLACE),
                        write_mask: ColorWrites::ALL,
                    })],
                }),
                multiview: None,
            })
        };

        MeshPipelines {
            triangles: create(Topology::Triangles),
            lines: create(Topology::Lines),
        }
    }

    pub fn get(&self, topology: Topology) -> &RenderPipeline {
        match topology {
            Topology::Triangles => &self.triangles,
            Topology::Lines => &self.lines,
        }
    }
}

pub struct ShapeInstance {
    mesh: Mesh,
    placement: Placement,
    material: Material,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

impl ShapeInstance {
    fn uniform(&self, time: f32) -> ObjectUniform {
        ObjectUniform::new(self.placement.model_matrix(time), &self.material)
    }
}

pub struct MeshRenderer {
    object_layout: BindGroupLayout,
    textures: SurfaceTextures,
    pipelines: MeshPipelines,
    instances: Vec<ShapeInstance>,
}

impl MeshRenderer {
    pub fn new(render_manager: &RenderManager, texture_settings: &TextureSettings) -> MeshRenderer {
        let device = render_manager.device();

        let shader = device.create_shader_module(include_wgsl!("../shaders/mesh.wgsl"));
        let object_layout = create_uniform_layout(device, "object");
        let textures =
            SurfaceTextures::new(device, &render_manager.queue().borrow(), texture_settings);

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[
                render_manager.scene_bind_group().layout(),
                &object_layout,
                textures.layout(),
            ],
            push_constant_ranges: &[],
        });

        let pipelines = MeshPipelines::new(
            device,
            &shader,
            &pipeline_layout,
            render_manager.surface_format(),
            render_manager.depth_format(),
        );

        MeshRenderer {
            object_layout,
            textures,
            pipelines,
            instances: Vec::new(),
        }
    }

    /// Takes ownership of `mesh` and draws it every frame at `placement`.
    pub fn add_instance(
        &mut self,
        device: &Device,
        mesh: Mesh,
        placement: Placement,
        material: Material,
    ) {
        let uniform = ObjectUniform::new(placement.model_matrix(0.0), &material);
        let (uniform_buffer, bind_group) =
            create_uniform_init(&uniform, &self.object_layout, device);

        info!(
            "added {} ({} {:?} primitives) at {}",
            mesh.label(),
            mesh.data().primitive_count(),
            mesh.topology(),
            placement.translation
        );

        self.instances.push(ShapeInstance {
            mesh,
            placement,
            material,
            uniform_buffer,
            bind_group,
        });
    }
}

impl Renderer for MeshRenderer {
    fn render(&mut self, context: &RenderingContext) {
        {
            let queue = context.queue().borrow();
            for instance in &self.instances {
                let uniform = instance.uniform(context.time());
                queue.write_buffer(&instance.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
            }
        }

        let mut encoder_ref = context.encoder().borrow_mut();
        let Some(encoder) = encoder_ref.as_mut() else {
            return;
        };

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("meshes"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: context.surface_view(),
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: context.depth_view(),
                depth_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, context.scene_bind_group(), &[]);
        pass.set_bind_group(2, self.textures.bind_group(), &[]);

        for instance in &self.instances {
            pass.set_bind_group(1, &instance.bind_group, &[]);
            instance.mesh.draw(&mut pass, &self.pipelines);
        }
    }
}
