use ripple_core::{
    CompositeUniforms, FrameBackend, ImpulseInstance, RenderError, SourceFrame, ViewUniforms,
    ViewportState,
};
use winit::window::Window;

use crate::render::composite::{create_composite_resources, CompositeBindings, CompositeResources};
use crate::render::helpers;
use crate::render::impulses::{create_impulse_resources, ImpulseResources};
use crate::render::targets::RenderTargets;

/// Surface texture and encoder for the frame being recorded.
struct InFlight {
    surface_tex: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

pub struct GpuState<'w> {
    window: &'w Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sampler: wgpu::Sampler,
    targets: RenderTargets,
    impulses: ImpulseResources,
    composite: CompositeResources,
    bindings: CompositeBindings,
    frame: Option<InFlight>,
}

impl<'w> GpuState<'w> {
    /// `max_instances` must cover the impulse pool's capacity.
    pub async fn new(window: &'w Window, max_instances: usize) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("[gpu] adapter: {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sampler = helpers::linear_clamp_sampler(&device);
        let targets = RenderTargets::new(&device, config.width, config.height)?;
        let impulses = create_impulse_resources(&device, max_instances)?;
        let composite = create_composite_resources(&device, format)?;
        let bindings = composite.bind(&device, &targets, &sampler);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sampler,
            targets,
            impulses,
            composite,
            bindings,
            frame: None,
        })
    }

    pub fn window(&self) -> &'w Window {
        self.window
    }

    fn configure_surface(&mut self) {
        let size = self.window.inner_size();
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.frame = None;
    }
}

impl FrameBackend for GpuState<'_> {
    fn resize(&mut self, viewport: &ViewportState) -> Result<(), RenderError> {
        // The swapchain follows the window; offscreen targets follow the
        // (pixel-ratio capped) viewport.
        self.configure_surface();
        let (tw, th) = viewport.target_size();
        if (tw, th) != (self.targets.width, self.targets.height) {
            self.targets.recreate(&self.device, tw, th)?;
            self.bindings = self
                .composite
                .bind(&self.device, &self.targets, &self.sampler);
        }
        Ok(())
    }

    fn recover_surface(&mut self, _viewport: &ViewportState) -> Result<(), RenderError> {
        log::info!("[gpu] reconfiguring lost surface");
        self.configure_surface();
        Ok(())
    }

    fn upload_source(&mut self, frame: &SourceFrame<'_>) -> Result<(), RenderError> {
        if (frame.width, frame.height) != (self.targets.width, self.targets.height) {
            self.targets
                .recreate(&self.device, frame.width, frame.height)?;
            self.bindings = self
                .composite
                .bind(&self.device, &self.targets, &self.sampler);
        }
        self.targets.write_source(&self.queue, frame.pixels);
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::Timeout) => return Err(RenderError::SurfaceTimeout),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => {
                return Err(RenderError::TargetCreation {
                    label: "surface".to_string(),
                    message: e.to_string(),
                })
            }
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.frame = Some(InFlight {
            surface_tex,
            view,
            encoder,
        });
        Ok(())
    }

    fn draw_impulses(
        &mut self,
        instances: &[ImpulseInstance],
        view: &ViewUniforms,
    ) -> Result<(), RenderError> {
        let Some(frame) = self.frame.as_mut() else {
            return Err(RenderError::SurfaceLost);
        };
        self.impulses.encode(
            &self.queue,
            &mut frame.encoder,
            &self.targets.displacement_view,
            instances,
            view,
        );
        Ok(())
    }

    fn composite(&mut self, uniforms: &CompositeUniforms) -> Result<(), RenderError> {
        let Some(mut frame) = self.frame.take() else {
            return Err(RenderError::SurfaceLost);
        };
        self.composite.encode(
            &self.queue,
            &mut frame.encoder,
            &frame.view,
            &self.bindings,
            uniforms,
        );
        self.queue.submit(Some(frame.encoder.finish()));
        frame.surface_tex.present();
        Ok(())
    }
}
