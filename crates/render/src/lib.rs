//! Rendering Adapter: camera and frame composition over the [`Canvas`] trait.
//!
//! # Invariants
//! - Rendering never mutates the world.
//! - Per-frame cost follows the viewport, not the world size.
//!
//! Backends only need to fill rectangles. [`RecordingCanvas`] and
//! [`TextCanvas`] cover tests and terminal output.
//!
//! [`Canvas`]: sandbox_common::Canvas

mod camera;
mod canvas;
mod renderer;

pub use camera::{Camera, CameraConfig};
pub use canvas::{DrawCommand, RecordingCanvas, TextCanvas};
pub use renderer::{FrameStats, RenderView, draw_frame};
