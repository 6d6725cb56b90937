//! Floor button model
//!
//! One button per floor inside the car. A stuck button ignores presses but
//! can still be released, and un-sticking it does not press it.

use serde::{Deserialize, Serialize};

use super::FloorNumber;

/// Call point for a single floor
///
/// # Example
/// ```
/// use elevator_sim_core_rs::Button;
///
/// let mut button = Button::new(5);
/// assert!(button.press());
/// assert!(button.is_pressed());
///
/// button.release();
/// button.set_stuck(true);
/// assert!(!button.press());
/// assert!(!button.is_pressed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    floor: FloorNumber,
    pressed: bool,
    stuck: bool,
}

impl Button {
    pub fn new(floor: FloorNumber) -> Self {
        Self {
            floor,
            pressed: false,
            stuck: false,
        }
    }

    pub fn floor(&self) -> FloorNumber {
        self.floor
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Press the button
    ///
    /// Returns `false` and leaves the button untouched when it is stuck.
    pub fn press(&mut self) -> bool {
        if self.stuck {
            return false;
        }
        self.pressed = true;
        true
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn set_stuck(&mut self, stuck: bool) {
        self.stuck = stuck;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_button_is_idle() {
        let button = Button::new(3);
        assert_eq!(button.floor(), 3);
        assert!(!button.is_pressed());
        assert!(!button.is_stuck());
    }

    #[test]
    fn test_stuck_press_keeps_state() {
        let mut button = Button::new(3);
        button.set_stuck(true);
        assert!(!button.press());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_set_stuck_does_not_touch_pressed() {
        let mut button = Button::new(3);
        assert!(button.press());
        button.set_stuck(true);
        assert!(button.is_pressed());
        button.set_stuck(false);
        assert!(button.is_pressed());
    }

    #[test]
    fn test_release_is_unconditional() {
        let mut button = Button::new(3);
        button.release();
        assert!(!button.is_pressed());

        button.press();
        button.set_stuck(true);
        button.release();
        assert!(!button.is_pressed());
    }
}
