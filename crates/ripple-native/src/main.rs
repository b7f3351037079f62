use std::time::{Instant, SystemTime, UNIX_EPOCH};

use ripple_core::{FrameContext, FrameDriver, MovingSquare, ResizeEvent, WaveParams};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod gpu;
mod keys;
mod render;

use gpu::GpuState;
use keys::KeyAction;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = WaveParams::default();
    params.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("Ripple trail (native)")
        .build(&event_loop)?;

    let gpu = pollster::block_on(GpuState::new(&window, params.capacity))?;
    let mut scale = window.scale_factor() as f32;
    let size = window.inner_size();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42);
    let mut driver = FrameDriver::new(
        params,
        gpu,
        Box::new(MovingSquare::default()),
        ResizeEvent {
            width: size.width as f32 / scale,
            height: size.height as f32 / scale,
            pixel_ratio: scale,
        },
        seed,
    )?;
    log::info!(
        "ripple-native started: {}x{} @{}",
        size.width,
        size.height,
        scale
    );

    let start = Instant::now();
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                driver.queue_resize(
                    size.width as f32 / scale,
                    size.height as f32 / scale,
                    scale,
                );
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                scale = scale_factor as f32;
                let size = driver.backend().window().inner_size();
                driver.queue_resize(
                    size.width as f32 / scale,
                    size.height as f32 / scale,
                    scale,
                );
            }
            WindowEvent::CursorMoved { position, .. } => {
                driver.queue_pointer(position.x as f32 / scale, position.y as f32 / scale);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match keys::action_for_key(&logical_key) {
                Some(KeyAction::NudgeStrength(delta)) => {
                    let next = driver.params().displacement_strength + delta;
                    driver.set_displacement_strength(next);
                    log::info!(
                        "[keys] displacement strength {:.2}",
                        driver.params().displacement_strength
                    );
                }
                Some(KeyAction::SetStrength(value)) => {
                    driver.set_displacement_strength(value);
                    log::info!("[keys] displacement strength {:.2}", value);
                }
                Some(KeyAction::Quit) => elwt.exit(),
                None => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            let ctx = FrameContext {
                elapsed: start.elapsed(),
            };
            match driver.step(ctx) {
                Ok(_) => driver.backend().window().request_redraw(),
                Err(e) => {
                    log::error!("frame error: {}", e);
                    elwt.exit();
                }
            }
        }
        _ => {}
    })?;
    Ok(())
}
