//! The boundary between the game and whatever draws it.

use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Default,
    Dim,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Esc,
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Resize(u16, u16),
    Other,
}

/// Blocking source of input events. Lives on the input dispatcher thread.
pub trait EventSource {
    fn poll_event(&mut self) -> io::Result<Event>;
}

/// A cell grid that is drawn into and then presented in one go.
pub trait Screen {
    type Events: EventSource + Send + 'static;

    fn init(&mut self) -> io::Result<()>;
    /// `(width, height)` in cells, as measured by `init`.
    fn size(&self) -> (u16, u16);
    fn clear(&mut self);
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style);
    fn show(&mut self) -> io::Result<()>;
    fn event_source(&self) -> Self::Events;
    fn close(&mut self) -> io::Result<()>;
}
