use std::{
    cell::RefCell,
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{channel, Receiver, Sender},
        Arc,
    },
};

use crate::screen::{Event, EventSource, Screen, Style};

type Cell = (char, Style);

/// In-memory screen. `cell` reads the last frame that was shown.
pub struct FakeScreen {
    width: u16,
    height: u16,
    back: HashMap<(u16, u16), Cell>,
    front: HashMap<(u16, u16), Cell>,
    frames_shown: Arc<AtomicUsize>,
    events: RefCell<Option<Receiver<Event>>>,
    pub fail_show: bool,
    pub closed: bool,
}

impl FakeScreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            back: HashMap::new(),
            front: HashMap::new(),
            frames_shown: Arc::new(AtomicUsize::new(0)),
            events: RefCell::new(None),
            fail_show: false,
            closed: false,
        }
    }

    /// a screen whose event source replays whatever is sent on the returned
    /// sender. dropping the sender makes `poll_event` fail.
    pub fn scripted(width: u16, height: u16) -> (Self, Sender<Event>) {
        let (tx, rx) = channel();
        let screen = Self::new(width, height);
        screen.events.replace(Some(rx));
        (screen, tx)
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.front.get(&(x, y)).copied()
    }

    pub fn frames_shown(&self) -> usize {
        self.frames_shown.load(Ordering::SeqCst)
    }

    pub fn frame_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.frames_shown)
    }
}

pub struct ScriptedEvents {
    rx: Option<Receiver<Event>>,
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> io::Result<Event> {
        self.rx
            .as_ref()
            .and_then(|rx| rx.recv().ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "event script ended"))
    }
}

impl Screen for FakeScreen {
    type Events = ScriptedEvents;

    fn init(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.back.clear();
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style) {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) off screen");
        self.back.insert((x, y), (glyph, style));
    }

    fn show(&mut self) -> io::Result<()> {
        if self.fail_show {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "screen gone"));
        }
        self.front = self.back.clone();
        self.frames_shown.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn event_source(&self) -> ScriptedEvents {
        ScriptedEvents {
            rx: self.events.take(),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}
