use winit::dpi::PhysicalSize;

/// Keyboard input the window forwards, already reduced to editing actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable text, possibly more than one character (IME, dead keys).
    Text(String),
    Backspace,
    Escape,
    Enter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevealWindowEvent {
    Resized(PhysicalSize<u32>),
    ScaleFactorChanged(f64),
    Key(KeyInput),
    RedrawRequested,
    CloseRequested,
}
