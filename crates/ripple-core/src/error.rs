use thiserror::Error;

/// Rejected tuning values. Carries the offending field so the host can report it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Failures surfaced by a `FrameBackend`.
///
/// Only surface hiccups are recoverable; anything that leaves the pipeline
/// half-built is fatal and must reach the host.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create render target `{label}`: {message}")]
    TargetCreation { label: String, message: String },
    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompile { label: String, message: String },
    #[error("surface lost")]
    SurfaceLost,
    #[error("surface timed out")]
    SurfaceTimeout,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RenderError {
    /// Whether the frame can simply be skipped (and the surface reconfigured).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RenderError::SurfaceLost | RenderError::SurfaceTimeout)
    }
}
