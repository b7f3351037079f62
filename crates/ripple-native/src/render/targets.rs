use super::helpers;
use ripple_core::RenderError;
use wgpu;

pub const DISPLACEMENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const SOURCE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Size-dependent textures, rebuilt together on every resize.
///
/// - `displacement_*` receives the impulse pass (float, so additive
///   overlaps can exceed 1).
/// - `source_*` holds the content image the compositor distorts.
pub(crate) struct RenderTargets {
    // only the view is sampled; the texture is held so it outlives it
    #[allow(dead_code)]
    pub(crate) displacement_tex: wgpu::Texture,
    pub(crate) displacement_view: wgpu::TextureView,
    pub(crate) source_tex: wgpu::Texture,
    pub(crate) source_view: wgpu::TextureView,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Result<Self, RenderError> {
        let (width, height) = (width.max(1), height.max(1));
        helpers::allocated(device, "render_targets", || {
            let (displacement_tex, displacement_view) = helpers::create_color_texture(
                device,
                "displacement_tex",
                width,
                height,
                DISPLACEMENT_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            );
            let (source_tex, source_view) = helpers::create_color_texture(
                device,
                "source_tex",
                width,
                height,
                SOURCE_FORMAT,
                wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
            );
            Self {
                displacement_tex,
                displacement_view,
                source_tex,
                source_view,
                width,
                height,
            }
        })
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        *self = Self::new(device, width, height)?;
        log::info!("[targets] recreated at {}x{}", self.width, self.height);
        Ok(())
    }

    pub(crate) fn write_source(&self, queue: &wgpu::Queue, pixels: &[u8]) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.source_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}
