//! Raw input sources sampled by the input tasks

/// A contact read as active/inactive
pub trait LevelInput {
    /// True when the contact is closed (wiring polarity already applied)
    fn is_active(&mut self) -> bool;
}

/// Missing buttons are never pressed
impl<T: LevelInput> LevelInput for Option<T> {
    fn is_active(&mut self) -> bool {
        self.as_mut().is_some_and(LevelInput::is_active)
    }
}

/// Absolute encoder position
pub trait PositionSource {
    /// Detents since power-on, clockwise positive
    fn position(&mut self) -> i32;
}

/// A missing encoder never moves
impl<T: PositionSource> PositionSource for Option<T> {
    fn position(&mut self) -> i32 {
        self.as_mut().map_or(0, PositionSource::position)
    }
}
