pub mod types;

pub use types::{KeyInput, RevealWindowEvent};

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

pub fn translate_window_event(event: &WindowEvent) -> Option<RevealWindowEvent> {
    match event {
        WindowEvent::Resized(sz) => Some(RevealWindowEvent::Resized(*sz)),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            Some(RevealWindowEvent::ScaleFactorChanged(*scale_factor))
        }
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            key_input(&event.logical_key, event.text.as_deref()).map(RevealWindowEvent::Key)
        }
        WindowEvent::RedrawRequested => Some(RevealWindowEvent::RedrawRequested),
        WindowEvent::CloseRequested => Some(RevealWindowEvent::CloseRequested),
        _ => None,
    }
}

/// Map a pressed key and the text it produced to an editing action.
/// Control characters in `text` are dropped.
pub fn key_input(key: &Key, text: Option<&str>) -> Option<KeyInput> {
    match key {
        Key::Named(NamedKey::Backspace) => Some(KeyInput::Backspace),
        Key::Named(NamedKey::Escape) => Some(KeyInput::Escape),
        Key::Named(NamedKey::Enter) => Some(KeyInput::Enter),
        Key::Named(NamedKey::Space) => Some(KeyInput::Text(" ".to_string())),
        _ => {
            let printable: String = text?.chars().filter(|c| !c.is_control()).collect();
            (!printable.is_empty()).then_some(KeyInput::Text(printable))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKey;

    #[test]
    fn named_keys_become_actions() {
        assert_eq!(key_input(&Key::Named(NamedKey::Backspace), None), Some(KeyInput::Backspace));
        assert_eq!(key_input(&Key::Named(NamedKey::Escape), Some("\u{1b}")), Some(KeyInput::Escape));
        assert_eq!(key_input(&Key::Named(NamedKey::Enter), Some("\r")), Some(KeyInput::Enter));
    }

    #[test]
    fn space_types_a_space() {
        assert_eq!(key_input(&Key::Named(NamedKey::Space), Some(" ")), Some(KeyInput::Text(" ".into())));
        assert_eq!(key_input(&Key::Named(NamedKey::Space), None), Some(KeyInput::Text(" ".into())));
    }

    #[test]
    fn text_is_forwarded_without_control_chars() {
        let key = Key::Unidentified(NativeKey::Unidentified);
        assert_eq!(key_input(&key, Some("é")), Some(KeyInput::Text("é".into())));
        assert_eq!(key_input(&key, Some("a\u{7f}")), Some(KeyInput::Text("a".into())));
        assert_eq!(key_input(&key, Some("\t")), None);
        assert_eq!(key_input(&key, None), None);
    }

    #[test]
    fn other_named_keys_are_ignored() {
        assert_eq!(key_input(&Key::Named(NamedKey::ArrowLeft), None), None);
        assert_eq!(key_input(&Key::Named(NamedKey::Shift), None), None);
    }
}
