use thiserror::Error;

/// Errors returned by the [`Renderer`](crate::Renderer) entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot resize to {width}x{height}: dimensions must be non-zero")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("render called before the first resize")]
    NotSized,

    #[error("camera provides {actual} ray directions, expected {expected}")]
    CameraMismatch { expected: usize, actual: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
