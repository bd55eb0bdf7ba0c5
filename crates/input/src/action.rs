/// A high-level camera action produced from pointer input.
///
/// Deltas are in physical pixels; the camera decides how far a pixel moves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Rotate around the orbit target.
    Orbit { dx: f32, dy: f32 },
    /// Move toward (positive) or away from (negative) the target.
    Dolly(f32),
    /// Slide the orbit target in the view plane.
    Pan { dx: f32, dy: f32 },
    /// Input that maps to nothing.
    Noop,
}

impl Action {
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}
