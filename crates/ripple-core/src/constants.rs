// Default tuning for the wave trail. Every value here can be overridden through
// `WaveParams`; these are the literals the effect was designed around.

// Pool
pub const DEFAULT_CAPACITY: usize = 100; // impulses alive at once

// Pointer
pub const DEFAULT_DEAD_ZONE: f32 = 4.0; // per-axis movement needed to spawn

// Per-frame decay
pub const DEFAULT_OPACITY_DECAY: f32 = 0.93; // opacity *= decay each frame
pub const DEFAULT_OPACITY_EPSILON: f32 = 0.002; // deactivate below this
pub const DEFAULT_ROTATION_STEP: f32 = 0.02; // radians per frame

// Scale smoothing: x eases toward the target, y follows x with a small gain
pub const DEFAULT_SCALE_X_SMOOTH: f32 = 0.98;
pub const DEFAULT_SCALE_TARGET: f32 = 1.0;
pub const DEFAULT_SCALE_Y_GAIN: f32 = 1.01;

// Sprites
pub const DEFAULT_SPRITE_SIZE: f32 = 80.0; // base edge length in viewport units

// Compositor
pub const DEFAULT_DISPLACEMENT_STRENGTH: f32 = 0.08;
pub const DISPLACEMENT_STRENGTH_STEP: f32 = 0.01; // keyboard nudge size

// Viewport
pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

// Camera: orthographic, looking down -Z from a fixed eye
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1000.0;

// Demo content: a square sliding across the middle of the source texture
pub const DEMO_SQUARE_SIZE: u32 = 200;
pub const DEMO_SQUARE_SPEED: i32 = 2; // pixels per frame
pub const DEMO_SQUARE_RGBA: [u8; 4] = [255, 0, 0, 255];
