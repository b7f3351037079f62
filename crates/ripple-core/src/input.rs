use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

pub type PointerSamples = SmallVec<[PointerSample; 8]>;

/// Events collected between frames. Every pointer sample is kept in arrival
/// order; resizes collapse so only the latest one is applied.
#[derive(Default, Debug)]
pub struct InputQueue {
    samples: PointerSamples,
    resize: Option<ResizeEvent>,
}

impl InputQueue {
    pub fn push_pointer(&mut self, x: f32, y: f32) {
        self.samples.push(PointerSample { x, y });
    }

    pub fn push_resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.resize = Some(ResizeEvent {
            width,
            height,
            pixel_ratio,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.resize.is_none()
    }

    pub fn drain(&mut self) -> (Option<ResizeEvent>, PointerSamples) {
        (self.resize.take(), std::mem::take(&mut self.samples))
    }
}
