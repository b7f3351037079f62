use crate::pool::ImpulsePool;
use crate::viewport::ViewportState;

/// Per-sprite data uploaded to the instance buffer, one per active impulse.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ImpulseInstance {
    pub position: [f32; 2],
    pub rotation: f32,
    pub opacity: f32,
    pub scale: [f32; 2],
}

/// Camera and sprite size for the impulse pass (80 bytes, 16-aligned).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub sprite_size: f32,
    pub _pad: [f32; 3],
}

impl ViewUniforms {
    pub fn new(viewport: &ViewportState, sprite_size: f32) -> Self {
        Self {
            view_proj: viewport.view_projection().to_cols_array_2d(),
            sprite_size,
            _pad: [0.0; 3],
        }
    }
}

/// Inputs for the compositor's fragment shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub strength: f32,
}

/// Rebuild `out` from the pool's active slots, in slot order.
pub fn pack_instances(pool: &ImpulsePool, out: &mut Vec<ImpulseInstance>) {
    out.clear();
    pool.for_each_active(|_, imp| {
        out.push(ImpulseInstance {
            position: imp.position.to_array(),
            rotation: imp.rotation,
            opacity: imp.opacity,
            scale: [imp.scale_x, imp.scale_y],
        });
    });
}
