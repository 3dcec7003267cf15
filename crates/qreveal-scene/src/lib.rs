//! qreveal-scene: the staggered QR reveal.
//!
//! A [`QrCodeItem`] owns the text and the global reveal progress. Each frame
//! the host calls [`QrCodeItem::update_paint`]: a text change replaces the
//! code and its quad geometry, a progress change only re-poses the dots of
//! the existing geometry. [`GpuRevealScene`] mirrors that split on the GPU.

pub mod geometry;
pub mod gpu;
pub mod item;
pub mod reveal;
pub mod timeline;

pub use geometry::{GeometryLayout, GeometryStyle, QrGeometry};
pub use gpu::GpuRevealScene;
pub use item::{GeometryState, ItemChange, PaintUpdate, QrCodeItem};
pub use reveal::{DEFAULT_OFFSET_SCALE, DotPose, RevealParams, dot_progress, smoothstep};
pub use timeline::{RevealEasing, RevealMode, RevealTimeline};
