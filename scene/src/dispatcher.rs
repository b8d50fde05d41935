use std::sync::mpsc::{SyncSender, TrySendError};

use log::{debug, error, trace};

use crate::{
    game_state::{PaddleCommand, PaddleController, RightPaddleControl},
    screen::{Event, EventSource, Key},
    GameError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatcherStatus {
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Move(PaddleCommand),
    Ignore,
}

/// Maps an input event to what the game should do with it. Right paddle
/// keys only count when a human owns the right paddle.
pub fn translate(event: Event, control: RightPaddleControl) -> Action {
    let key = match event {
        Event::Key(key) => key,
        Event::Resize(..) | Event::Other => return Action::Ignore,
    };
    match (key, control) {
        (Key::Esc, _) | (Key::Ctrl('c'), _) => Action::Quit,
        (Key::Char('w' | 'W'), _) => Action::Move(PaddleCommand::LeftUp),
        (Key::Char('s' | 'S'), _) => Action::Move(PaddleCommand::LeftDown),
        (Key::Up, RightPaddleControl::Human) => Action::Move(PaddleCommand::RightUp),
        (Key::Down, RightPaddleControl::Human) => Action::Move(PaddleCommand::RightDown),
        _ => Action::Ignore,
    }
}

/// Reads input on its own thread and moves paddles as keys arrive.
pub struct InputDispatcher {
    controller: PaddleController,
    control: RightPaddleControl,
}

impl InputDispatcher {
    pub fn new(controller: PaddleController, control: RightPaddleControl) -> Self {
        Self {
            controller,
            control,
        }
    }

    /// Blocks on `events` until a quit key or an input error.
    ///
    /// Reports `Running` once before the first event and again after each
    /// event, then `Stopped` on the way out. `Running` is dropped when the
    /// slot is still full, `Stopped` never is.
    pub fn run<E: EventSource>(
        self,
        mut events: E,
        status_tx: SyncSender<DispatcherStatus>,
    ) -> Result<(), GameError> {
        debug!("input dispatcher started ({:?} right paddle)", self.control);
        if status_tx.send(DispatcherStatus::Running).is_err() {
            return Ok(());
        }
        loop {
            let event = match events.poll_event() {
                Ok(event) => event,
                Err(err) => {
                    error!("failed to poll input event: {err}");
                    let _ = status_tx.send(DispatcherStatus::Stopped);
                    return Err(GameError::Input(err));
                }
            };
            match translate(event, self.control) {
                Action::Quit => {
                    debug!("quit key pressed");
                    let _ = status_tx.send(DispatcherStatus::Stopped);
                    return Ok(());
                }
                Action::Move(command) => {
                    if !self.controller.apply(command) {
                        trace!("{command:?} blocked by the wall");
                    }
                }
                Action::Ignore => match event {
                    Event::Resize(width, height) => {
                        debug!("ignoring resize to {width}x{height}")
                    }
                    _ => trace!("ignoring {event:?}"),
                },
            }
            match status_tx.try_send(DispatcherStatus::Running) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => {
                    debug!("game loop gone, input dispatcher exiting");
                    return Ok(());
                }
            }
        }
    }
}
