use glam::Vec2;

use crate::viewport::ViewportState;

/// Ask the pool for a new impulse at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    /// Round-robin counter kept alongside the pool's own cursor; the two are
    /// not required to agree.
    pub wave_index: usize,
}

/// Turns raw pointer samples into spawn requests once per frame.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    current: Vec2,
    previous: Vec2,
    wave_index: usize,
    capacity: usize,
    dead_zone: f32,
}

impl PointerTracker {
    pub fn new(capacity: usize, dead_zone: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            previous: Vec2::ZERO,
            wave_index: 0,
            capacity: capacity.max(1),
            dead_zone,
        }
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn previous(&self) -> Vec2 {
        self.previous
    }

    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    /// Store a screen-space sample (origin top-left, y down) as a
    /// viewport-centred, y-up position.
    pub fn on_sample(&mut self, raw_x: f32, raw_y: f32, viewport: &ViewportState) {
        self.current = screen_to_centered(raw_x, raw_y, viewport.width, viewport.height);
    }

    pub fn tick(&mut self) -> Option<SpawnRequest> {
        let delta = (self.current - self.previous).abs();
        let request = if delta.x < self.dead_zone && delta.y < self.dead_zone {
            None
        } else {
            let req = SpawnRequest {
                position: self.current,
                wave_index: self.wave_index,
            };
            self.wave_index = (self.wave_index + 1) % self.capacity;
            Some(req)
        };
        self.previous = self.current;
        request
    }
}

#[inline]
pub fn screen_to_centered(raw_x: f32, raw_y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(raw_x - width / 2.0, -raw_y + height / 2.0)
}
