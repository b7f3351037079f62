//! GPU side of the effect: an impulse pass into an offscreen displacement
//! target, then a compositor pass onto the window surface.

pub(crate) mod composite;
pub(crate) mod helpers;
pub(crate) mod impulses;
pub(crate) mod targets;

pub static IMPULSES_WGSL: &str = include_str!("../../shaders/impulses.wgsl");
pub static COMPOSITE_WGSL: &str = include_str!("../../shaders/composite.wgsl");
