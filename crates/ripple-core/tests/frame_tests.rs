// Host-side tests for frame ordering, event draining and error handling,
// using a backend that records calls instead of touching a GPU.

use std::collections::VecDeque;
use std::time::Duration;

use ripple_core::{
    CompositeUniforms, ConfigError, FrameBackend, FrameContext, FrameDriver, ImpulseInstance,
    MovingSquare, RenderError, ResizeEvent, SourceFrame, ViewUniforms, ViewportState, WaveParams,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize(u32, u32),
    Recover(u32, u32),
    Upload(u32, u32, usize),
    Begin,
    Draw(usize),
    Composite(f32),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    begin_results: VecDeque<Result<(), RenderError>>,
    last_instances: Vec<ImpulseInstance>,
    last_view: Option<ViewUniforms>,
    last_composite: Option<CompositeUniforms>,
}

impl FrameBackend for Recorder {
    fn resize(&mut self, viewport: &ViewportState) -> Result<(), RenderError> {
        let (w, h) = viewport.target_size();
        self.calls.push(Call::Resize(w, h));
        Ok(())
    }

    fn recover_surface(&mut self, viewport: &ViewportState) -> Result<(), RenderError> {
        let (w, h) = viewport.target_size();
        self.calls.push(Call::Recover(w, h));
        Ok(())
    }

    fn upload_source(&mut self, frame: &SourceFrame<'_>) -> Result<(), RenderError> {
        self.calls
            .push(Call::Upload(frame.width, frame.height, frame.pixels.len()));
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.calls.push(Call::Begin);
        self.begin_results.pop_front().unwrap_or(Ok(()))
    }

    fn draw_impulses(
        &mut self,
        instances: &[ImpulseInstance],
        view: &ViewUniforms,
    ) -> Result<(), RenderError> {
        self.calls.push(Call::Draw(instances.len()));
        self.last_instances = instances.to_vec();
        self.last_view = Some(*view);
        Ok(())
    }

    fn composite(&mut self, uniforms: &CompositeUniforms) -> Result<(), RenderError> {
        self.calls.push(Call::Composite(uniforms.strength));
        self.last_composite = Some(*uniforms);
        Ok(())
    }
}

fn driver(width: f32, height: f32) -> FrameDriver<Recorder> {
    FrameDriver::new(
        WaveParams::default(),
        Recorder::default(),
        Box::new(MovingSquare::default()),
        ResizeEvent {
            width,
            height,
            pixel_ratio: 1.0,
        },
        7,
    )
    .expect("valid params")
}

fn step(d: &mut FrameDriver<Recorder>) -> ripple_core::FrameReport {
    d.step(FrameContext::default()).expect("frame")
}

#[test]
fn construction_sizes_backend() {
    let d = driver(800.0, 600.0);
    assert_eq!(d.backend().calls, vec![Call::Resize(800, 600)]);
    assert_eq!(d.source().size(), (800, 600));
}

#[test]
fn invalid_params_are_rejected() {
    let params = WaveParams {
        capacity: 0,
        ..WaveParams::default()
    };
    let err = FrameDriver::new(
        params,
        Recorder::default(),
        Box::new(MovingSquare::default()),
        ResizeEvent {
            width: 10.0,
            height: 10.0,
            pixel_ratio: 1.0,
        },
        0,
    )
    .err()
    .expect("capacity 0 must fail");
    assert!(matches!(
        err,
        RenderError::Config(ConfigError::Invalid {
            field: "capacity",
            ..
        })
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn passes_run_in_order() {
    let mut d = driver(800.0, 600.0);
    d.backend_mut().calls.clear();
    d.queue_pointer(100.0, 100.0);
    let report = step(&mut d);

    assert_eq!(report.spawned, Some(0));
    assert_eq!(report.active, 1);
    assert!(report.rendered);
    assert_eq!(
        d.backend().calls,
        vec![
            Call::Upload(800, 600, 800 * 600 * 4),
            Call::Begin,
            Call::Draw(1),
            Call::Composite(0.08),
        ]
    );
}

#[test]
fn spawned_impulse_is_drawn_same_frame_after_one_decay() {
    let mut d = driver(800.0, 600.0);
    d.queue_pointer(500.0, 200.0);
    step(&mut d);

    let inst = d.backend().last_instances[0];
    assert_eq!(inst.position, [100.0, 100.0]);
    assert!((inst.opacity - 0.93).abs() < 1e-6);
    assert!((inst.scale[1] - 1.01 * inst.scale[0]).abs() < 1e-6);
    assert_eq!(d.backend().last_view.unwrap().sprite_size, 80.0);
}

#[test]
fn only_last_pointer_sample_counts_for_spawn() {
    let mut d = driver(800.0, 600.0);
    d.queue_pointer(100.0, 100.0);
    d.queue_pointer(300.0, 250.0);
    d.queue_pointer(401.0, 299.0);
    let report = step(&mut d);
    // Final sample sits next to the centre, so no spawn against (0, 0).
    assert_eq!(report.spawned, None);
    assert_eq!(d.tracker().previous(), glam::Vec2::new(1.0, 1.0));
}

#[test]
fn idle_frames_decay_and_empty_out() {
    let mut d = driver(800.0, 600.0);
    d.queue_pointer(10.0, 10.0);
    step(&mut d);
    let mut frames = 1;
    while step(&mut d).active > 0 {
        frames += 1;
        assert!(frames < 200);
    }
    assert_eq!(frames, 85);
    assert_eq!(d.pool().active_count(), 0);
}

#[test]
fn last_resize_wins_and_applies_before_pointer() {
    let mut d = driver(800.0, 600.0);
    d.backend_mut().calls.clear();
    d.queue_resize(320.0, 240.0, 1.0);
    d.queue_resize(1600.0, 900.0, 1.0);
    d.queue_pointer(1600.0, 0.0);
    let report = step(&mut d);

    assert_eq!(d.backend().calls[0], Call::Resize(1600, 900));
    assert_eq!(
        d.backend()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Resize(..)))
            .count(),
        1
    );
    assert_eq!(d.viewport().width, 1600.0);
    assert!((d.viewport().frustum.top - 450.0).abs() < 1e-3);
    assert_eq!(d.source().size(), (1600, 900));
    // Converted with the new size: right edge, top edge.
    assert_eq!(report.spawned, Some(0));
    assert_eq!(d.backend().last_instances[0].position, [800.0, 450.0]);
    assert_eq!(
        d.backend().last_composite.unwrap().resolution,
        [1600.0, 900.0]
    );
}

#[test]
fn degenerate_resize_does_not_fail() {
    let mut d = driver(800.0, 600.0);
    d.queue_resize(0.0, 0.0, 1.0);
    let report = step(&mut d);
    assert!(report.rendered);
    assert_eq!(d.viewport().target_size(), (1, 1));
    assert_eq!(d.source().size(), (1, 1));
}

#[test]
fn surface_lost_skips_frame_and_reconfigures() {
    let mut d = driver(800.0, 600.0);
    d.backend_mut().calls.clear();
    d.backend_mut()
        .begin_results
        .push_back(Err(RenderError::SurfaceLost));
    d.queue_pointer(100.0, 100.0);
    let report = step(&mut d);

    assert!(!report.rendered);
    assert_eq!(report.spawned, Some(0));
    assert_eq!(
        d.backend().calls,
        vec![
            Call::Upload(800, 600, 800 * 600 * 4),
            Call::Begin,
            Call::Recover(800, 600),
        ]
    );

    // Next frame renders normally and nothing size-dependent is rebuilt.
    d.backend_mut().calls.clear();
    assert!(step(&mut d).rendered);
    assert!(!d
        .backend()
        .calls
        .iter()
        .any(|c| matches!(c, Call::Resize(..) | Call::Recover(..))));
}

#[derive(Default)]
struct ResizeOnly {
    resizes: usize,
    lost_once: bool,
}

impl FrameBackend for ResizeOnly {
    fn resize(&mut self, _viewport: &ViewportState) -> Result<(), RenderError> {
        self.resizes += 1;
        Ok(())
    }

    fn upload_source(&mut self, _frame: &SourceFrame<'_>) -> Result<(), RenderError> {
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        if self.lost_once {
            return Ok(());
        }
        self.lost_once = true;
        Err(RenderError::SurfaceLost)
    }

    fn draw_impulses(
        &mut self,
        _instances: &[ImpulseInstance],
        _view: &ViewUniforms,
    ) -> Result<(), RenderError> {
        Ok(())
    }

    fn composite(&mut self, _uniforms: &CompositeUniforms) -> Result<(), RenderError> {
        Ok(())
    }
}

#[test]
fn surface_recovery_falls_back_to_resize() {
    let mut d = FrameDriver::new(
        WaveParams::default(),
        ResizeOnly::default(),
        Box::new(MovingSquare::default()),
        ResizeEvent {
            width: 320.0,
            height: 240.0,
            pixel_ratio: 1.0,
        },
        3,
    )
    .expect("valid params");
    assert_eq!(d.backend().resizes, 1);
    assert!(!d.step(FrameContext::default()).expect("frame").rendered);
    assert_eq!(d.backend().resizes, 2);
    assert!(d.step(FrameContext::default()).expect("frame").rendered);
    assert_eq!(d.backend().resizes, 2);
}

#[test]
fn timeout_skips_without_reconfigure() {
    let mut d = driver(800.0, 600.0);
    d.backend_mut().calls.clear();
    d.backend_mut()
        .begin_results
        .push_back(Err(RenderError::SurfaceTimeout));
    let report = step(&mut d);
    assert!(!report.rendered);
    assert!(!d
        .backend()
        .calls
        .iter()
        .any(|c| matches!(c, Call::Resize(..) | Call::Draw(_))));
}

#[test]
fn fatal_errors_propagate() {
    let mut d = driver(800.0, 600.0);
    d.backend_mut()
        .begin_results
        .push_back(Err(RenderError::OutOfMemory));
    let err = d.step(FrameContext::default()).unwrap_err();
    assert!(matches!(err, RenderError::OutOfMemory));
}

#[test]
fn strength_and_time_reach_compositor() {
    let mut d = driver(800.0, 600.0);
    d.set_displacement_strength(1.7);
    d.step(FrameContext {
        elapsed: Duration::from_millis(1500),
    })
    .unwrap();
    let u = d.backend().last_composite.unwrap();
    assert_eq!(u.strength, 1.0);
    assert!((u.time - 1.5).abs() < 1e-6);
}
