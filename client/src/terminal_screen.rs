use std::io::{self, stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use scene::screen::{Event, EventSource, Key, Screen, Style};

type Cell = Option<(char, Style)>;

/// crossterm backed screen. draws into a back buffer and only writes the
/// cells that changed since the last `show`.
#[derive(Default)]
pub struct TerminalScreen {
    width: u16,
    height: u16,
    back: Vec<Cell>,
    front: Vec<Cell>,
    active: bool,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Screen for TerminalScreen {
    type Events = TerminalEvents;

    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        let (width, height) = terminal::size()?;
        debug!("terminal is {width}x{height}");
        self.width = width;
        self.height = height;
        self.back = vec![None; width as usize * height as usize];
        self.front = self.back.clone();
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.back.fill(None);
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style) {
        if let Some(idx) = self.index(x, y) {
            self.back[idx] = Some((glyph, style));
        }
    }

    fn show(&mut self) -> io::Result<()> {
        let mut out = stdout().lock();
        let width = self.width.max(1) as usize;
        for (idx, (back, front)) in self.back.iter().zip(&self.front).enumerate() {
            if back == front {
                continue;
            }
            queue!(out, MoveTo((idx % width) as u16, (idx / width) as u16))?;
            match back {
                Some((glyph, Style::Default)) => queue!(out, Print(glyph))?,
                Some((glyph, Style::Dim)) => queue!(
                    out,
                    SetAttribute(Attribute::Dim),
                    Print(glyph),
                    SetAttribute(Attribute::Reset)
                )?,
                None => queue!(out, Print(' '))?,
            }
        }
        out.flush()?;
        self.front.clone_from(&self.back);
        Ok(())
    }

    fn event_source(&self) -> TerminalEvents {
        TerminalEvents
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(stdout(), Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll_event(&mut self) -> io::Result<Event> {
        Ok(match event::read()? {
            event::Event::Key(key_event) => translate_key(key_event),
            event::Event::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Other,
        })
    }
}

fn translate_key(key_event: KeyEvent) -> Event {
    if key_event.kind != KeyEventKind::Press {
        return Event::Other;
    }
    let key = match key_event.code {
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Char(c) if key_event.modifiers.contains(KeyModifiers::CONTROL) => Key::Ctrl(c),
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    Event::Key(key)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use scene::screen::{Event, Key, Screen, Style};

    use crate::terminal_screen::{translate_key, TerminalScreen};

    #[test]
    fn translates_keys() {
        let press = |code, modifiers| translate_key(KeyEvent::new(code, modifiers));
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), Event::Key(Key::Esc));
        assert_eq!(press(KeyCode::Up, KeyModifiers::NONE), Event::Key(Key::Up));
        assert_eq!(press(KeyCode::Down, KeyModifiers::NONE), Event::Key(Key::Down));
        assert_eq!(
            press(KeyCode::Char('w'), KeyModifiers::NONE),
            Event::Key(Key::Char('w'))
        );
        assert_eq!(
            press(KeyCode::Char('W'), KeyModifiers::SHIFT),
            Event::Key(Key::Char('W'))
        );
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Event::Key(Key::Ctrl('c'))
        );
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), Event::Key(Key::Other));
    }

    #[test]
    fn ignores_releases() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('w'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(translate_key(release), Event::Other);
    }

    #[test]
    fn uninitialised_screen_drops_cells() {
        let mut screen = TerminalScreen::new();
        screen.set_cell(3, 3, 'x', Style::Default);
        assert_eq!(screen.size(), (0, 0));
        assert!(screen.close().is_ok());
    }
}
