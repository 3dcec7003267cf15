//! The rendered QR instance: owns the text, the reveal progress, the current
//! [`Code`] and its retained geometry.

use std::fmt;
use std::sync::Arc;

use qreveal_code::{Code, EncodeOptions, extract_with};

use crate::geometry::{GeometryLayout, GeometryStyle, QrGeometry};
use crate::reveal::RevealParams;

/// Whether the retained geometry still matches the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryState {
    Clean,
    Dirty,
}

/// Observable property changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemChange {
    Text,
    RevealProgress,
}

/// What a paint pass had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintUpdate {
    /// Geometry was replaced wholesale; upload it again.
    Rebuilt,
    /// Only dot vertices moved; rewrite the existing buffer.
    Animated,
    Unchanged,
}

type Observer = Box<dyn FnMut(ItemChange)>;

pub struct QrCodeItem {
    text: String,
    reveal_progress: f32,
    encode_options: EncodeOptions,
    style: GeometryStyle,
    params: RevealParams,
    state: GeometryState,
    code: Arc<Code>,
    geometry: Option<QrGeometry>,
    observers: Vec<Observer>,
}

impl Default for QrCodeItem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QrCodeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QrCodeItem")
            .field("text", &self.text)
            .field("reveal_progress", &self.reveal_progress)
            .field("state", &self.state)
            .field("width", &self.code.width)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl QrCodeItem {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            reveal_progress: 0.0,
            encode_options: EncodeOptions::default(),
            style: GeometryStyle::default(),
            params: RevealParams::default(),
            state: GeometryState::Dirty,
            code: Arc::new(Code::empty()),
            geometry: None,
            observers: Vec::new(),
        }
    }

    pub fn with_encode_options(mut self, options: EncodeOptions) -> Self {
        self.encode_options = options;
        self.state = GeometryState::Dirty;
        self
    }

    pub fn with_style(mut self, style: GeometryStyle) -> Self {
        self.style = style;
        self.state = GeometryState::Dirty;
        self
    }

    pub fn with_params(mut self, params: RevealParams) -> Self {
        self.params = params;
        self.state = GeometryState::Dirty;
        self
    }

    /// Register a callback for property changes.
    pub fn subscribe(&mut self, observer: impl FnMut(ItemChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Returns false when it is unchanged.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        self.state = GeometryState::Dirty;
        self.notify(ItemChange::Text);
        true
    }

    pub fn reveal_progress(&self) -> f32 {
        self.reveal_progress
    }

    /// Set the global reveal progress, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_reveal_progress(&mut self, progress: f32) -> bool {
        if progress.is_nan() {
            return false;
        }
        let progress = progress.clamp(0.0, 1.0);
        if progress == self.reveal_progress {
            return false;
        }
        self.reveal_progress = progress;
        self.notify(ItemChange::RevealProgress);
        true
    }

    pub fn state(&self) -> GeometryState {
        self.state
    }

    /// The code for the text as of the last paint pass.
    pub fn code(&self) -> &Arc<Code> {
        &self.code
    }

    pub fn geometry(&self) -> Option<&QrGeometry> {
        self.geometry.as_ref()
    }

    /// Bring the geometry up to date for this frame.
    ///
    /// A dirty item re-extracts its code and replaces the geometry before the
    /// current progress is applied. A clean item only re-poses its dots,
    /// unless the layout moved, which rebuilds the geometry from the same code.
    pub fn update_paint(&mut self, layout: GeometryLayout) -> PaintUpdate {
        if self.state == GeometryState::Dirty {
            self.state = GeometryState::Clean;
            self.code = Arc::new(self.extract());
            self.rebuild(layout);
            return PaintUpdate::Rebuilt;
        }
        if self.geometry.as_ref().is_none_or(|g| g.layout() != layout) {
            self.rebuild(layout);
            return PaintUpdate::Rebuilt;
        }
        let progress = self.reveal_progress;
        match self.geometry.as_mut() {
            Some(g) => {
                if g.apply_progress(progress) {
                    log::trace!("re-posed {} dots at {progress:.3}", g.code().dots.len());
                    PaintUpdate::Animated
                } else {
                    PaintUpdate::Unchanged
                }
            }
            None => PaintUpdate::Unchanged,
        }
    }

    fn extract(&self) -> Code {
        // An empty text shows nothing, even though it would encode.
        if self.text.is_empty() {
            return Code::empty();
        }
        extract_with(&self.text, &self.encode_options)
    }

    fn rebuild(&mut self, layout: GeometryLayout) {
        log::debug!(
            "rebuilding geometry: {} dots, {:.1}px wide",
            self.code.dots.len(),
            layout.width
        );
        self.geometry = Some(QrGeometry::build(
            self.code.clone(),
            layout,
            self.style,
            self.params,
            self.reveal_progress,
        ));
    }

    fn notify(&mut self, change: ItemChange) {
        for observer in &mut self.observers {
            observer(change);
        }
    }
}
