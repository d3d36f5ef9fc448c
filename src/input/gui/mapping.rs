use winit::dpi::PhysicalPosition;
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, ModifiersState};

use crate::controllers::session::commands::{Command, Modifiers, PointerButton};
use crate::core::data::point::PixelPoint;

/// Pixels of touchpad scroll that count as one wheel notch.
pub const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

#[must_use]
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

#[must_use]
pub fn key_command(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Escape => Some(Command::Quit),
        KeyCode::Backspace => Some(Command::ResetView),
        KeyCode::KeyH => Some(Command::ToggleHistogram),
        KeyCode::KeyR => Some(Command::ResizeToWindow),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(Command::DecreaseIterations),
        KeyCode::Equal | KeyCode::NumpadAdd => Some(Command::IncreaseIterations),
        KeyCode::KeyJ => Some(Command::ToggleJulia),
        KeyCode::KeyP => Some(Command::TogglePinnedConstant),
        _ => None,
    }
}

#[must_use]
pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        speed: state.shift_key(),
        alternate: state.alt_key(),
    }
}

/// Vertical scroll in wheel notches; positive when scrolling up (zoom in).
#[must_use]
pub fn scroll_delta(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_SCROLL_LINE,
    }
}

#[must_use]
pub fn pointer_position(position: PhysicalPosition<f64>) -> PixelPoint {
    PixelPoint::new(position.x, position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_and_right_pan_middle_zooms() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Middle), Some(PointerButton::Middle));
        assert_eq!(pointer_button(MouseButton::Back), None);
    }

    #[test]
    fn every_command_has_a_key() {
        let keys = [
            KeyCode::Escape,
            KeyCode::Backspace,
            KeyCode::KeyH,
            KeyCode::KeyR,
            KeyCode::Minus,
            KeyCode::Equal,
            KeyCode::KeyJ,
            KeyCode::KeyP,
        ];

        let commands: Vec<_> = keys.iter().filter_map(|&k| key_command(k)).collect();

        assert_eq!(
            commands,
            vec![
                Command::Quit,
                Command::ResetView,
                Command::ToggleHistogram,
                Command::ResizeToWindow,
                Command::DecreaseIterations,
                Command::IncreaseIterations,
                Command::ToggleJulia,
                Command::TogglePinnedConstant,
            ]
        );
        assert_eq!(key_command(KeyCode::KeyW), None);
    }

    #[test]
    fn shift_is_speed_and_alt_is_alternate() {
        assert_eq!(
            modifiers(ModifiersState::SHIFT),
            Modifiers {
                speed: true,
                alternate: false
            }
        );
        assert_eq!(
            modifiers(ModifiersState::ALT),
            Modifiers {
                speed: false,
                alternate: true
            }
        );
        assert_eq!(modifiers(ModifiersState::empty()), Modifiers::default());
    }

    #[test]
    fn pixel_scroll_is_converted_to_notches() {
        assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(0.0, -2.0)), -2.0);
        assert_eq!(
            scroll_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0))),
            2.0
        );
    }
}
