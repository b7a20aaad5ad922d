use serde::{Deserialize, Serialize};

/// A single controller button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Select,
    Start,
    Y,
    B,
    X,
    A,
    L,
    R,
}

impl Button {
    /// Directional buttons register while held; everything else needs an edge
    pub fn is_directional(self) -> bool {
        matches!(self, Button::Up | Button::Down | Button::Left | Button::Right)
    }
}

/// Set of asserted buttons for one controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buttons {
    #[serde(rename = "Up")]
    pub up: bool,
    #[serde(rename = "Down")]
    pub down: bool,
    #[serde(rename = "Left")]
    pub left: bool,
    #[serde(rename = "Right")]
    pub right: bool,
    #[serde(rename = "Select")]
    pub select: bool,
    #[serde(rename = "Start")]
    pub start: bool,
    #[serde(rename = "Y")]
    pub y: bool,
    #[serde(rename = "B")]
    pub b: bool,
    #[serde(rename = "X")]
    pub x: bool,
    #[serde(rename = "A")]
    pub a: bool,
    #[serde(rename = "L")]
    pub l: bool,
    #[serde(rename = "R")]
    pub r: bool,
}

impl Buttons {
    /// All buttons released
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Select => self.select,
            Button::Start => self.start,
            Button::Y => self.y,
            Button::B => self.b,
            Button::X => self.x,
            Button::A => self.a,
            Button::L => self.l,
            Button::R => self.r,
        }
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        let slot = match button {
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Select => &mut self.select,
            Button::Start => &mut self.start,
            Button::Y => &mut self.y,
            Button::B => &mut self.b,
            Button::X => &mut self.x,
            Button::A => &mut self.a,
            Button::L => &mut self.l,
            Button::R => &mut self.r,
        };
        *slot = pressed;
    }

    /// Punch or kick currently held
    pub fn is_attacking(&self) -> bool {
        self.y || self.b
    }
}

/// Flip `button` in `frame` relative to the state the game reports as held.
///
/// The game only registers a new press on a false→true transition, so an
/// action button that is already held must be released for a frame before
/// it can fire again.
pub fn toggle(mut frame: Buttons, held: &Buttons, button: Button) -> Buttons {
    frame.set(button, !held.get(button));
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_presses_released_button() {
        let frame = Buttons::neutral();
        let held = Buttons::neutral();
        let next = toggle(frame, &held, Button::R);
        assert!(next.r);
    }

    #[test]
    fn test_toggle_releases_held_button() {
        let mut frame = Buttons::neutral();
        frame.r = true;
        frame.down = true;
        let held = frame;
        let next = toggle(frame, &held, Button::R);
        assert!(!next.r);
        assert!(next.down);
    }

    #[test]
    fn test_attacking_is_y_or_b() {
        let mut buttons = Buttons::neutral();
        assert!(!buttons.is_attacking());
        buttons.r = true;
        assert!(!buttons.is_attacking());
        buttons.b = true;
        assert!(buttons.is_attacking());
    }

    #[test]
    fn test_buttons_wire_names() {
        let mut buttons = Buttons::neutral();
        buttons.left = true;
        let json = serde_json::to_value(buttons).unwrap();
        assert_eq!(json["Left"], true);
        assert_eq!(json["Right"], false);

        let parsed: Buttons = serde_json::from_str(r#"{"Y": true}"#).unwrap();
        assert!(parsed.y);
        assert!(!parsed.up);
    }
}
