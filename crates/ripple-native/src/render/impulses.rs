use super::helpers;
use super::targets::DISPLACEMENT_FORMAT;
use ripple_core::{ImpulseInstance, RenderError, ViewUniforms};
use wgpu;
use wgpu::util::DeviceExt;

// Unit quad centred on the origin, two triangles.
const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

/// src * alpha + dst. Impulses only ever brighten the displacement field,
/// so draw order doesn't matter.
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub(crate) struct ImpulseResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) quad_vb: wgpu::Buffer,
    pub(crate) instance_vb: wgpu::Buffer,
    pub(crate) max_instances: usize,
}

pub(crate) fn create_impulse_resources(
    device: &wgpu::Device,
    max_instances: usize,
) -> Result<ImpulseResources, RenderError> {
    let shader = helpers::validated(device, "impulses_shader", || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("impulses_shader"),
            source: wgpu::ShaderSource::Wgsl(super::IMPULSES_WGSL.into()),
        })
    })?;
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("impulses_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("impulses_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: one ImpulseInstance per sprite
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImpulseInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 8,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 16,
                    shader_location: 4,
                },
            ],
        },
    ];

    let pipeline = helpers::validated(device, "impulses_pipeline", || {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("impulses_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            // no depth: impulses never occlude each other
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: DISPLACEMENT_FORMAT,
                    blend: Some(ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    })?;

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("impulses_uniforms"),
        size: std::mem::size_of::<ViewUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("impulses_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("impulses_quad_vb"),
        contents: bytemuck::cast_slice(&QUAD_CORNERS),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let max_instances = max_instances.max(1);
    let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("impulses_instance_vb"),
        size: (std::mem::size_of::<ImpulseInstance>() * max_instances) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    Ok(ImpulseResources {
        pipeline,
        uniform_buffer,
        bind_group,
        quad_vb,
        instance_vb,
        max_instances,
    })
}

impl ImpulseResources {
    /// Clear `target` and draw `instances` into it.
    pub(crate) fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        instances: &[ImpulseInstance],
        view: &ViewUniforms,
    ) {
        let count = instances.len().min(self.max_instances);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(view));
        if count > 0 {
            queue.write_buffer(
                &self.instance_vb,
                0,
                bytemuck::cast_slice(&instances[..count]),
            );
        }

        let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("impulses_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if count > 0 {
            r.set_pipeline(&self.pipeline);
            r.set_bind_group(0, &self.bind_group, &[]);
            r.set_vertex_buffer(0, self.quad_vb.slice(..));
            r.set_vertex_buffer(1, self.instance_vb.slice(..));
            r.draw(0..6, 0..count as u32);
        }
        drop(r);
    }
}
