use crate::PADDLE_HEIGHT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    pub fn step(self) -> i32 {
        match self {
            Horizontal::Left => -1,
            Horizontal::Right => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Straight,
    Down,
}

impl Vertical {
    pub fn step(self) -> i32 {
        match self {
            Vertical::Up => -1,
            Vertical::Straight => 0,
            Vertical::Down => 1,
        }
    }
}

/// Picks the ball's vertical direction after it hits a paddle.
///
/// The paddle face is split in three: the top cell sends the ball up, the
/// middle cell sends it straight back and the bottom cell sends it down.
pub fn resolve_vertical_direction(ball_y: i32, paddle_y: i32) -> Vertical {
    let center = PADDLE_HEIGHT / 2;
    let offset = (ball_y - paddle_y).rem_euclid(PADDLE_HEIGHT);
    if offset < center {
        Vertical::Up
    } else if offset == center {
        Vertical::Straight
    } else {
        Vertical::Down
    }
}
