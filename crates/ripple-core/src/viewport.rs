//! Orthographic viewport shared by the impulse pass and the compositor.
//!
//! Bounds are always derived from the current size; nothing caches them.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_NEAR, CAMERA_Z};

/// Left/right/top/bottom extents of the orthographic camera, in viewport units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl FrustumBounds {
    /// Height-driven symmetric bounds. Callers pass already-clamped sizes.
    pub fn from_size(width: f32, height: f32) -> Self {
        let aspect = width / height;
        let half_h = height / 2.0;
        Self {
            left: -aspect * half_h,
            right: aspect * half_h,
            top: half_h,
            bottom: -half_h,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportPhase {
    Stable,
    Resizing,
}

/// Read-only snapshot handed to the renderer and compositor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    pub frustum: FrustumBounds,
}

impl ViewportState {
    /// Backing-store size in physical pixels, never zero.
    pub fn target_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).ceil().max(1.0) as u32;
        let h = (self.height * self.pixel_ratio).ceil().max(1.0) as u32;
        (w, h)
    }

    /// Orthographic projection times the fixed camera view (eye on +Z).
    pub fn view_projection(&self) -> Mat4 {
        let f = self.frustum;
        let proj = Mat4::orthographic_rh(f.left, f.right, f.bottom, f.top, CAMERA_NEAR, CAMERA_FAR);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);
        proj * view
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() && v >= 1.0 {
        v
    } else {
        1.0
    }
}

pub struct ViewportController {
    state: ViewportState,
    phase: ViewportPhase,
    max_pixel_ratio: f32,
}

impl ViewportController {
    pub fn new(width: f32, height: f32, pixel_ratio: f32, max_pixel_ratio: f32) -> Self {
        let mut vc = Self {
            state: ViewportState {
                width: 1.0,
                height: 1.0,
                pixel_ratio: 1.0,
                frustum: FrustumBounds::from_size(1.0, 1.0),
            },
            phase: ViewportPhase::Stable,
            max_pixel_ratio: max_pixel_ratio.max(1.0),
        };
        vc.on_resize(width, height, pixel_ratio);
        vc
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn phase(&self) -> ViewportPhase {
        self.phase
    }

    /// Recompute the frustum for a new size. Degenerate extents (minimised
    /// windows, NaN) clamp to 1 so the aspect ratio stays finite.
    pub fn on_resize(&mut self, width: f32, height: f32, pixel_ratio: f32) -> &ViewportState {
        self.phase = ViewportPhase::Resizing;
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
        self.state = ViewportState {
            width,
            height,
            pixel_ratio,
            frustum: FrustumBounds::from_size(width, height),
        };
        log::debug!(
            "[viewport] {}x{} @{} -> l={:.1} r={:.1} t={:.1} b={:.1}",
            width,
            height,
            pixel_ratio,
            self.state.frustum.left,
            self.state.frustum.right,
            self.state.frustum.top,
            self.state.frustum.bottom
        );
        self.phase = ViewportPhase::Stable;
        &self.state
    }
}
