/// Events a window delivers to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user asked to close the window.
    Closed,
    KeyPressed(Key),
    KeyReleased(Key),
}

/// Symbolic name for the keyboard keys the examples care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Return,
    Left,
    Right,
    Up,
    Down,
    /// Any letter key, in upper case.
    Char(char),
}
