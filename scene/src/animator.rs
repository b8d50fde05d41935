use std::{
    sync::mpsc::{sync_channel, Receiver, TryRecvError},
    thread::{sleep, Builder},
    time::Duration,
};

use log::{error, info};

use crate::{
    dispatcher::{DispatcherStatus, InputDispatcher},
    draw::draw_scene,
    game_state::{GameState, RightPaddleControl},
    screen::Screen,
    GameError,
};

pub const TICK: Duration = Duration::from_millis(10);

/// Runs the game until the input dispatcher stops, then waits for it to
/// exit. The screen is left open for the caller to close.
///
/// Each tick advances the ball, lets the ai move (unless a human owns the
/// right paddle), draws a frame and peeks at the dispatcher's status
/// without blocking.
pub fn animate<S: Screen>(
    screen: &mut S,
    state: &mut GameState,
    control: RightPaddleControl,
    tick: Duration,
) -> Result<(), GameError> {
    let (status_tx, status_rx) = sync_channel(1);
    let dispatcher = InputDispatcher::new(state.controller(), control);
    let events = screen.event_source();
    let dispatcher = Builder::new()
        .name("input_dispatcher".to_owned())
        .spawn(move || dispatcher.run(events, status_tx))
        .map_err(GameError::Spawn)?;

    // wait for the dispatcher to come up before the first tick.
    let mut status = status_rx.recv().unwrap_or(DispatcherStatus::Stopped);
    while status == DispatcherStatus::Running {
        state.advance();
        if control == RightPaddleControl::Ai {
            state.apply_ai();
        }
        if let Err(err) = draw_scene(screen, state) {
            // the dispatcher is still blocked on input, so it can't be joined.
            error!("failed to draw frame: {err}");
            return Err(GameError::Render(err));
        }
        status = poll_status(&status_rx);
        if status == DispatcherStatus::Running {
            sleep(tick);
        }
    }

    info!(
        "game over at {} - {}",
        state.player1_score(),
        state.player2_score()
    );
    dispatcher
        .join()
        .map_err(|_| GameError::DispatcherPanicked)?
}

fn poll_status(status_rx: &Receiver<DispatcherStatus>) -> DispatcherStatus {
    match status_rx.try_recv() {
        Ok(status) => status,
        Err(TryRecvError::Empty) => DispatcherStatus::Running,
        Err(TryRecvError::Disconnected) => DispatcherStatus::Stopped,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::mpsc::sync_channel,
        thread::{sleep, spawn},
        time::{Duration, Instant},
    };

    use crate::{
        animator::{animate, poll_status},
        dispatcher::DispatcherStatus,
        entity::Entity,
        fake_screen::FakeScreen,
        game_state::{GameState, RightPaddleControl},
        screen::{Event, Key},
        GameError,
    };

    /// slow enough that the ball can't reach a paddle before input lands.
    const SLOW_TICK: Duration = Duration::from_millis(1);

    fn court(width: u16, height: u16) -> GameState {
        let mut state = GameState::new();
        state.setup(width.into(), height.into()).unwrap();
        state
    }

    fn wait_until(what: &str, mut done: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !done() {
            assert!(Instant::now() < deadline, "timed out waiting for {what}");
            sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn poll_status_never_blocks() {
        let (status_tx, status_rx) = sync_channel(1);
        assert_eq!(poll_status(&status_rx), DispatcherStatus::Running);
        status_tx.send(DispatcherStatus::Stopped).unwrap();
        assert_eq!(poll_status(&status_rx), DispatcherStatus::Stopped);
        drop(status_tx);
        assert_eq!(poll_status(&status_rx), DispatcherStatus::Stopped);
    }

    #[test]
    fn stops_on_escape() {
        let (mut screen, events_tx) = FakeScreen::scripted(200, 20);
        let mut state = court(200, 20);
        events_tx.send(Event::Key(Key::Char('w'))).unwrap();
        events_tx.send(Event::Key(Key::Esc)).unwrap();
        animate(&mut screen, &mut state, RightPaddleControl::Ai, SLOW_TICK).unwrap();
        assert!(screen.frames_shown() >= 1);
        assert_eq!(state.left_paddle().y(), 8);
        assert!(!screen.closed);
    }

    #[test]
    fn keeps_ticking_while_input_is_quiet() {
        let (screen, events_tx) = FakeScreen::scripted(200, 20);
        let frames = screen.frame_counter();
        let game = spawn(move || {
            let mut screen = screen;
            let mut state = court(200, 20);
            let result = animate(
                &mut screen,
                &mut state,
                RightPaddleControl::Ai,
                SLOW_TICK,
            );
            (result, state)
        });
        wait_until("frames", || frames.load(std::sync::atomic::Ordering::SeqCst) >= 5);
        events_tx.send(Event::Key(Key::Esc)).unwrap();
        let (result, state) = game.join().unwrap();
        assert!(result.is_ok());
        // ball started at y 10 with the paddle at 9, so the ai stepped down.
        assert_eq!(state.right_paddle().y(), 10);
        assert!(state.ball().x() < 100);
    }

    #[test]
    fn human_right_paddle_disables_ai() {
        let (mut screen, events_tx) = FakeScreen::scripted(200, 20);
        let mut state = court(200, 20);
        events_tx.send(Event::Key(Key::Up)).unwrap();
        events_tx.send(Event::Key(Key::Up)).unwrap();
        events_tx.send(Event::Key(Key::Esc)).unwrap();
        animate(
            &mut screen,
            &mut state,
            RightPaddleControl::Human,
            SLOW_TICK,
        )
        .unwrap();
        assert_eq!(state.right_paddle().y(), 7);
    }

    #[test]
    fn input_failure_ends_the_game() {
        let (mut screen, events_tx) = FakeScreen::scripted(40, 20);
        let mut state = court(40, 20);
        drop(events_tx);
        let result = animate(&mut screen, &mut state, RightPaddleControl::Ai, Duration::ZERO);
        assert!(matches!(result, Err(GameError::Input(_))));
    }

    #[test]
    fn render_failure_ends_the_game() {
        let (mut screen, _events_tx) = FakeScreen::scripted(40, 20);
        screen.fail_show = true;
        let mut state = court(40, 20);
        let result = animate(&mut screen, &mut state, RightPaddleControl::Ai, Duration::ZERO);
        assert!(matches!(result, Err(GameError::Render(_))));
        assert_eq!(screen.frames_shown(), 0);
    }
}
