use std::{error::Error, fmt::Display, io};

pub mod animator;
pub mod direction;
pub mod dispatcher;
pub mod draw;
pub mod entity;
pub mod game_state;
pub mod screen;

#[cfg(test)]
pub(crate) mod fake_screen;

pub const PADDLE_HEIGHT: i32 = 3;
/// the narrowest court with room for both paddles and a ball between them.
pub const MIN_WIDTH: i32 = 4;

#[derive(Debug)]
pub enum GameError {
    CourtTooSmall { width: i32, height: i32 },
    Render(io::Error),
    Input(io::Error),
    Spawn(io::Error),
    DispatcherPanicked,
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::CourtTooSmall { width, height } => write!(
                f,
                "terminal too small: {width}x{height}, need at least {MIN_WIDTH}x{PADDLE_HEIGHT}"
            ),
            GameError::Render(err) => write!(f, "failed to draw frame: {err}"),
            GameError::Input(err) => write!(f, "failed to read input: {err}"),
            GameError::Spawn(err) => write!(f, "failed to start input dispatcher: {err}"),
            GameError::DispatcherPanicked => Display::fmt("input dispatcher panicked", f),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::CourtTooSmall { .. } | GameError::DispatcherPanicked => None,
            GameError::Render(source) | GameError::Input(source) | GameError::Spawn(source) => {
                Some(source)
            }
        }
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_at {
    ($entity:expr, ($x:expr, $y:expr) $(,)?) => {{
        use $crate::entity::Entity as _;
        let entity = $entity;
        assert_eq!((entity.x(), entity.y()), ($x, $y))
    }};
}
