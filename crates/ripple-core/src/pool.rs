//! Fixed-capacity ring of wave impulses.
//!
//! Slots are allocated once and recycled forever: spawning writes into the
//! slot under the cursor and moves the cursor on, so a burst of pointer
//! movement overwrites the oldest impulse instead of growing the pool.

use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::params::WaveParams;

/// One slot of the pool. Inactive slots keep their last values but are
/// neither advanced nor drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impulse {
    pub position: Vec2,
    pub rotation: f32,
    pub opacity: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub active: bool,
}

impl Default for Impulse {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            opacity: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            active: false,
        }
    }
}

/// Per-frame evolution constants, copied out of `WaveParams` so the pool
/// doesn't hold on to unrelated settings.
#[derive(Clone, Copy, Debug)]
struct Decay {
    rotation_step: f32,
    opacity_decay: f32,
    opacity_epsilon: f32,
    scale_x_smooth: f32,
    scale_target: f32,
    scale_y_gain: f32,
}

impl From<&WaveParams> for Decay {
    fn from(p: &WaveParams) -> Self {
        Self {
            rotation_step: p.rotation_step,
            opacity_decay: p.opacity_decay,
            opacity_epsilon: p.opacity_epsilon,
            scale_x_smooth: p.scale_x_smooth,
            scale_target: p.scale_target,
            scale_y_gain: p.scale_y_gain,
        }
    }
}

pub struct ImpulsePool {
    slots: Box<[Impulse]>,
    cursor: usize,
    decay: Decay,
    rng: StdRng,
}

impl ImpulsePool {
    /// Pre-allocates `params.capacity` slots (at least one).
    pub fn new(params: &WaveParams, seed: u64) -> Self {
        let capacity = params.capacity.max(1);
        Self {
            slots: vec![Impulse::default(); capacity].into_boxed_slice(),
            cursor: 0,
            decay: Decay::from(params),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot the next spawn will overwrite.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slot(&self, index: usize) -> Option<&Impulse> {
        self.slots.get(index)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Activate the slot under the cursor at `position` and return its index.
    /// Never fails: a live impulse in that slot is simply replaced.
    pub fn spawn(&mut self, position: Vec2) -> usize {
        let index = self.cursor;
        let rotation = self.rng.gen_range(0.0..TAU);
        self.slots[index] = Impulse {
            position,
            rotation,
            opacity: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            active: true,
        };
        self.cursor = (self.cursor + 1) % self.slots.len();
        log::trace!("[pool] spawn slot {} at ({:.1}, {:.1})", index, position.x, position.y);
        index
    }

    /// Step every active impulse by one frame.
    pub fn advance(&mut self) {
        let d = self.decay;
        for s in self.slots.iter_mut().filter(|s| s.active) {
            s.rotation += d.rotation_step;
            s.opacity *= d.opacity_decay;
            if s.opacity < d.opacity_epsilon {
                s.active = false;
            }
            s.scale_x = d.scale_x_smooth * s.scale_x + (1.0 - d.scale_x_smooth) * d.scale_target;
            s.scale_y = d.scale_y_gain * s.scale_x;
        }
    }

    /// Active slots in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Impulse)> + '_ {
        self.slots.iter().enumerate().filter(|(_, s)| s.active)
    }

    pub fn for_each_active(&self, mut visit: impl FnMut(usize, &Impulse)) {
        for (i, s) in self.iter_active() {
            visit(i, s);
        }
    }
}
