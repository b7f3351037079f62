use ripple_core::{DEFAULT_DISPLACEMENT_STRENGTH, DISPLACEMENT_STRENGTH_STEP};
use winit::keyboard::{Key, NamedKey};

/// What a key press does to the running effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    /// Add to the displacement strength (clamped by the driver).
    NudgeStrength(f32),
    SetStrength(f32),
    Quit,
}

#[inline]
pub fn action_for_key(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some(KeyAction::NudgeStrength(DISPLACEMENT_STRENGTH_STEP)),
        Key::Named(NamedKey::ArrowDown) => {
            Some(KeyAction::NudgeStrength(-DISPLACEMENT_STRENGTH_STEP))
        }
        Key::Named(NamedKey::Escape) => Some(KeyAction::Quit),
        Key::Character(c) => match c.as_str() {
            "r" | "R" => Some(KeyAction::SetStrength(DEFAULT_DISPLACEMENT_STRENGTH)),
            "0" => Some(KeyAction::SetStrength(0.0)),
            "q" | "Q" => Some(KeyAction::Quit),
            _ => None,
        },
        _ => None,
    }
}
