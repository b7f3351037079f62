//! Platform-agnostic core of the wave trail effect.
//!
//! Pointer movement spawns impulses into a fixed ring; each frame the ring
//! decays, is drawn into a displacement target and then used to distort a
//! source image. Everything GPU-specific lives behind `FrameBackend`.

pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod instance;
pub mod params;
pub mod pointer;
pub mod pool;
pub mod source;
pub mod viewport;

pub use constants::*;
pub use error::*;
pub use frame::*;
pub use input::*;
pub use instance::*;
pub use params::*;
pub use pointer::*;
pub use pool::*;
pub use source::*;
pub use viewport::*;
