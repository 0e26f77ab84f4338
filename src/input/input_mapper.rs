//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to deck and window actions like NextSlide,
//! ToggleCursor, Exit. Everything not mapped here is forwarded to the current
//! slide as a `SketchEvent`.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions handled by the application rather than the current slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Advance to the next slide (Right, PageDown)
    NextSlide,
    /// Go back one slide (Left, PageUp)
    PreviousSlide,
    /// Jump to the first slide (Home)
    FirstSlide,
    /// Jump to the last slide (End)
    LastSlide,
    /// Toggle cursor capture (Tab, Escape when captured, click when released)
    ToggleCursor,
    /// Exit application (Escape when not captured)
    Exit,
    /// Toggle fullscreen mode (F11)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases, auto-repeats and keys the current slide
    /// should see. A held key acts once.
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        repeat: bool,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::ArrowRight | KeyCode::PageDown => Some(InputAction::NextSlide),
            KeyCode::ArrowLeft | KeyCode::PageUp => Some(InputAction::PreviousSlide),
            KeyCode::Home => Some(InputAction::FirstSlide),
            KeyCode::End => Some(InputAction::LastSlide),
            KeyCode::Escape => {
                if cursor_captured {
                    Some(InputAction::ToggleCursor)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::Tab => Some(InputAction::ToggleCursor),
            KeyCode::F11 => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }

    /// Keys the application keeps for itself; slides never see them
    pub fn is_reserved(key: KeyCode) -> bool {
        matches!(
            key,
            KeyCode::ArrowRight
                | KeyCode::PageDown
                | KeyCode::ArrowLeft
                | KeyCode::PageUp
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::Escape
                | KeyCode::Tab
                | KeyCode::F11
        )
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(ToggleCursor)` for left click when cursor not captured
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed && !cursor_captured {
            Some(InputAction::ToggleCursor)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        let cases = [
            (KeyCode::ArrowRight, InputAction::NextSlide),
            (KeyCode::PageDown, InputAction::NextSlide),
            (KeyCode::ArrowLeft, InputAction::PreviousSlide),
            (KeyCode::PageUp, InputAction::PreviousSlide),
            (KeyCode::Home, InputAction::FirstSlide),
            (KeyCode::End, InputAction::LastSlide),
        ];
        for (key, expected) in cases {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed, false, false),
                Some(expected),
                "Key {:?}",
                key
            );
        }
    }

    #[test]
    fn test_escape_when_captured_releases() {
        let action = InputMapper::map_keyboard(
            KeyCode::Escape,
            ElementState::Pressed,
            false,
            true, // cursor captured
        );
        assert_eq!(action, Some(InputAction::ToggleCursor));
    }

    #[test]
    fn test_escape_when_released_exits() {
        let action = InputMapper::map_keyboard(
            KeyCode::Escape,
            ElementState::Pressed,
            false,
            false, // cursor not captured
        );
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_slide_keys_not_mapped() {
        // WASD, Space and the arrows a slide uses go to the slide
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::Space,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
        ] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, false, true);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        for key in [KeyCode::Escape, KeyCode::ArrowRight, KeyCode::F11] {
            assert_eq!(InputMapper::map_keyboard(key, ElementState::Released, false, true), None);
        }
    }

    #[test]
    fn test_click_to_capture() {
        let action = InputMapper::map_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            false, // cursor not captured
        );
        assert_eq!(action, Some(InputAction::ToggleCursor));
    }

    #[test]
    fn test_click_when_captured_no_action() {
        let action = InputMapper::map_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            true, // cursor already captured
        );
        assert_eq!(action, None);
    }

    #[test]
    fn test_window_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::F11, ElementState::Pressed, false, true),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Tab, ElementState::Pressed, false, false),
            Some(InputAction::ToggleCursor)
        );
    }

    #[test]
    fn test_auto_repeat_ignored() {
        for key in [KeyCode::ArrowRight, KeyCode::Tab, KeyCode::F11, KeyCode::Escape] {
            assert_eq!(InputMapper::map_keyboard(key, ElementState::Pressed, true, false), None);
        }
    }

    #[test]
    fn test_held_escape_releases_without_exiting() {
        // First press releases the cursor
        let first = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false, true);
        assert_eq!(first, Some(InputAction::ToggleCursor));
        // Repeats arrive with the cursor already released
        let repeat = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, true, false);
        assert_eq!(repeat, None);
    }

    #[test]
    fn test_reserved_keys() {
        for key in [KeyCode::ArrowRight, KeyCode::PageUp, KeyCode::Escape, KeyCode::Tab, KeyCode::F11] {
            assert!(InputMapper::is_reserved(key), "Key {:?}", key);
        }
        for key in [KeyCode::KeyW, KeyCode::KeyR, KeyCode::Space, KeyCode::ArrowUp] {
            assert!(!InputMapper::is_reserved(key), "Key {:?}", key);
        }
    }
}
