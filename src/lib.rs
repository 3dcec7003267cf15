//! qreveal: text in, animated QR dots out.
//!
//! ```
//! use qreveal::{GeometryLayout, PaintUpdate, QrCodeItem};
//!
//! let mut item = QrCodeItem::new();
//! item.set_text("A");
//! let layout = GeometryLayout { origin: [0.0, 0.0], width: 230.0 };
//! assert_eq!(item.update_paint(layout), PaintUpdate::Rebuilt);
//! assert_eq!(item.code().width, 21);
//!
//! item.set_reveal_progress(0.5);
//! assert_eq!(item.update_paint(layout), PaintUpdate::Animated);
//! ```

pub use qreveal_code::{
    BitMatrix, Code, Dot, EncodeError, EncodeOptions, ErrorCorrection, ModuleGrid, encode, extract,
    extract_with,
};
pub use qreveal_scene::{
    DEFAULT_OFFSET_SCALE, DotPose, GeometryLayout, GeometryStyle, ItemChange, PaintUpdate, QrCodeItem,
    QrGeometry, RevealEasing, RevealMode, RevealParams, RevealTimeline, dot_progress,
};
