//! Per-frame orchestration.
//!
//! `FrameDriver` owns every piece of mutable effect state and runs one frame
//! per `step`, in a fixed order: resize, pointer samples, spawn, decay,
//! source refresh, impulse pass, composite pass. The GPU side sits behind
//! `FrameBackend` so the ordering can be driven (and tested) without a device.

use std::time::Duration;

use crate::error::RenderError;
use crate::input::{InputQueue, ResizeEvent};
use crate::instance::{pack_instances, CompositeUniforms, ImpulseInstance, ViewUniforms};
use crate::params::WaveParams;
use crate::pointer::PointerTracker;
use crate::pool::ImpulsePool;
use crate::source::{SourceFeed, SourceFrame, SourceProvider};
use crate::viewport::{ViewportController, ViewportState};

/// GPU half of the pipeline. Calls arrive in frame order:
/// `upload_source?` → `begin_frame` → `draw_impulses` → `composite`.
pub trait FrameBackend {
    /// Recreate size-dependent resources (displacement target, surface).
    fn resize(&mut self, viewport: &ViewportState) -> Result<(), RenderError>;
    /// Reconfigure after a lost or outdated surface. Offscreen targets keep
    /// their size, so backends that can should only touch the swapchain.
    fn recover_surface(&mut self, viewport: &ViewportState) -> Result<(), RenderError> {
        self.resize(viewport)
    }
    fn upload_source(&mut self, frame: &SourceFrame<'_>) -> Result<(), RenderError>;
    /// Acquire the surface for this frame.
    fn begin_frame(&mut self) -> Result<(), RenderError>;
    /// Clear the displacement target and draw every instance additively.
    fn draw_impulses(
        &mut self,
        instances: &[ImpulseInstance],
        view: &ViewUniforms,
    ) -> Result<(), RenderError>;
    /// Distort the source by the displacement target onto the surface and present.
    fn composite(&mut self, uniforms: &CompositeUniforms) -> Result<(), RenderError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameContext {
    /// Time since the effect started; feeds the shader clock.
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Pool slot written this frame, if the pointer moved far enough.
    pub spawned: Option<usize>,
    /// Impulses drawn this frame.
    pub active: usize,
    /// False when a recoverable surface error skipped the GPU passes.
    pub rendered: bool,
}

pub struct FrameDriver<B: FrameBackend> {
    params: WaveParams,
    pool: ImpulsePool,
    tracker: PointerTracker,
    viewport: ViewportController,
    input: InputQueue,
    source: SourceFeed,
    backend: B,
    instances: Vec<ImpulseInstance>,
}

impl<B: FrameBackend> FrameDriver<B> {
    /// Validate `params`, size everything to `initial` and let the backend
    /// build its targets. Any failure here is fatal for the effect.
    pub fn new(
        params: WaveParams,
        mut backend: B,
        provider: Box<dyn SourceProvider>,
        initial: ResizeEvent,
        seed: u64,
    ) -> Result<Self, RenderError> {
        params.validate()?;
        let viewport = ViewportController::new(
            initial.width,
            initial.height,
            initial.pixel_ratio,
            params.max_pixel_ratio,
        );
        backend.resize(viewport.state())?;
        let (tw, th) = viewport.state().target_size();
        Ok(Self {
            pool: ImpulsePool::new(&params, seed),
            tracker: PointerTracker::new(params.capacity, params.dead_zone),
            input: InputQueue::default(),
            source: SourceFeed::new(provider, tw, th),
            instances: Vec::with_capacity(params.capacity),
            params,
            viewport,
            backend,
        })
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn pool(&self) -> &ImpulsePool {
        &self.pool
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn viewport(&self) -> &ViewportState {
        self.viewport.state()
    }

    pub fn source(&self) -> &SourceFeed {
        &self.source
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn set_displacement_strength(&mut self, value: f32) {
        self.params.set_displacement_strength(value);
    }

    /// Queue a pointer position in logical pixels (origin top-left, y down).
    pub fn queue_pointer(&mut self, x: f32, y: f32) {
        self.input.push_pointer(x, y);
    }

    /// Queue a resize in logical pixels; only the latest one before a frame is applied.
    pub fn queue_resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.input.push_resize(width, height, pixel_ratio);
    }

    pub fn step(&mut self, ctx: FrameContext) -> Result<FrameReport, RenderError> {
        let (resize, samples) = self.input.drain();
        if let Some(r) = resize {
            self.apply_resize(r)?;
        }
        for s in &samples {
            self.tracker.on_sample(s.x, s.y, self.viewport.state());
        }

        let spawned = self.tracker.tick().map(|req| {
            let slot = self.pool.spawn(req.position);
            log::debug!(
                "[frame] wave {} -> slot {} at ({:.1}, {:.1})",
                req.wave_index,
                slot,
                req.position.x,
                req.position.y
            );
            slot
        });
        self.pool.advance();

        self.source.refresh();
        pack_instances(&self.pool, &mut self.instances);

        let rendered = match self.render(ctx) {
            Ok(()) => true,
            Err(e) if e.is_recoverable() => {
                log::warn!("[frame] skipped: {}", e);
                if matches!(e, RenderError::SurfaceLost) {
                    self.backend.recover_surface(self.viewport.state())?;
                }
                false
            }
            Err(e) => return Err(e),
        };

        Ok(FrameReport {
            spawned,
            active: self.instances.len(),
            rendered,
        })
    }

    fn apply_resize(&mut self, r: ResizeEvent) -> Result<(), RenderError> {
        let state = *self.viewport.on_resize(r.width, r.height, r.pixel_ratio);
        self.backend.resize(&state)?;
        let (tw, th) = state.target_size();
        self.source.resize(tw, th);
        log::info!(
            "[frame] resized to {}x{} (target {}x{})",
            state.width,
            state.height,
            tw,
            th
        );
        Ok(())
    }

    fn render(&mut self, ctx: FrameContext) -> Result<(), RenderError> {
        if let Some(frame) = self.source.take_update() {
            self.backend.upload_source(&frame)?;
        }
        self.backend.begin_frame()?;

        let state = *self.viewport.state();
        let view = ViewUniforms::new(&state, self.params.sprite_size);
        self.backend.draw_impulses(&self.instances, &view)?;

        let (tw, th) = state.target_size();
        let uniforms = CompositeUniforms {
            resolution: [tw as f32, th as f32],
            time: ctx.elapsed.as_secs_f32(),
            strength: self.params.displacement_strength,
        };
        self.backend.composite(&uniforms)
    }
}
