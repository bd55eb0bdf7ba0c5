use crate::{Action, PointerButton};

/// Turns pointer presses, motion and wheel ticks into [`Action`]s.
///
/// Primary drag orbits. Secondary or middle drag pans. The wheel dollies.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    held: Option<PointerButton>,
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<PointerButton> {
        self.held
    }

    /// Start a drag. A second button pressed mid-drag is ignored.
    pub fn press(&mut self, button: PointerButton) {
        if self.held.is_none() {
            self.held = Some(button);
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.held == Some(button) {
            self.held = None;
        }
    }

    /// Record the pointer at `(x, y)` and report the drag since the last move.
    pub fn moved(&mut self, x: f32, y: f32) -> Action {
        let previous = self.last.replace((x, y));
        let (Some(button), Some((px, py))) = (self.held, previous) else {
            return Action::Noop;
        };
        let (dx, dy) = (x - px, y - py);
        if dx == 0.0 && dy == 0.0 {
            return Action::Noop;
        }
        match button {
            PointerButton::Primary => Action::Orbit { dx, dy },
            PointerButton::Secondary | PointerButton::Middle => Action::Pan { dx, dy },
        }
    }

    /// Wheel scrolled by `lines`; positive scrolls away from the user.
    pub fn wheel(&self, lines: f32) -> Action {
        if lines == 0.0 || !lines.is_finite() {
            Action::Noop
        } else {
            Action::Dolly(lines)
        }
    }

    /// Forget every button and the last position, e.g. when the pointer leaves.
    pub fn reset(&mut self) {
        tracing::trace!("pointer tracker reset");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_without_button_is_noop() {
        let mut t = PointerTracker::new();
        assert_eq!(t.moved(10.0, 10.0), Action::Noop);
        assert_eq!(t.moved(20.0, 15.0), Action::Noop);
    }

    #[test]
    fn primary_drag_orbits() {
        let mut t = PointerTracker::new();
        t.moved(10.0, 10.0);
        t.press(PointerButton::Primary);
        assert_eq!(t.moved(14.0, 7.0), Action::Orbit { dx: 4.0, dy: -3.0 });
        t.release(PointerButton::Primary);
        assert_eq!(t.moved(20.0, 20.0), Action::Noop);
    }

    #[test]
    fn secondary_and_middle_drag_pan() {
        for button in [PointerButton::Secondary, PointerButton::Middle] {
            let mut t = PointerTracker::new();
            t.moved(0.0, 0.0);
            t.press(button);
            assert_eq!(t.moved(2.0, 1.0), Action::Pan { dx: 2.0, dy: 1.0 });
        }
    }

    #[test]
    fn first_motion_after_press_needs_an_anchor() {
        let mut t = PointerTracker::new();
        t.press(PointerButton::Primary);
        assert_eq!(t.moved(5.0, 5.0), Action::Noop);
        assert_eq!(t.moved(6.0, 5.0), Action::Orbit { dx: 1.0, dy: 0.0 });
    }

    #[test]
    fn second_button_does_not_steal_drag() {
        let mut t = PointerTracker::new();
        t.moved(0.0, 0.0);
        t.press(PointerButton::Primary);
        t.press(PointerButton::Secondary);
        t.release(PointerButton::Secondary);
        assert_eq!(t.held(), Some(PointerButton::Primary));
        assert!(matches!(t.moved(1.0, 1.0), Action::Orbit { .. }));
    }

    #[test]
    fn wheel_dollies() {
        let t = PointerTracker::new();
        assert_eq!(t.wheel(2.0), Action::Dolly(2.0));
        assert_eq!(t.wheel(0.0), Action::Noop);
        assert_eq!(t.wheel(f32::NAN), Action::Noop);
    }

    #[test]
    fn reset_drops_drag() {
        let mut t = PointerTracker::new();
        t.moved(0.0, 0.0);
        t.press(PointerButton::Primary);
        t.reset();
        assert_eq!(t.held(), None);
        assert_eq!(t.moved(3.0, 3.0), Action::Noop);
    }
}
