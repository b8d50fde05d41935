use std::sync::atomic::{AtomicI32, Ordering};

/// Something with a position on the court.
///
/// Setters overwrite unconditionally. Keeping an entity inside the court
/// is the caller's job.
pub trait Entity {
    fn x(&self) -> i32;
    fn y(&self) -> i32;
    fn set_x(&self, x: i32);
    fn set_y(&self, y: i32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Ball,
    LeftPaddle,
    RightPaddle,
}

/// A position that can be read and written through a shared reference, so
/// paddles can be moved from the input thread while the game loop reads
/// them.
#[derive(Debug)]
pub struct Position {
    role: Role,
    x: AtomicI32,
    y: AtomicI32,
}

impl Position {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            x: AtomicI32::new(0),
            y: AtomicI32::new(0),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// moves vertically by `delta` only if the result keeps `[y, y + span)`
    /// inside `[0, limit)`. returns whether the move happened.
    pub(crate) fn shift_y_within(&self, delta: i32, span: i32, limit: i32) -> bool {
        self.y
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |y| {
                let next = y + delta;
                if next >= 0 && next + span <= limit {
                    Some(next)
                } else {
                    None
                }
            })
            .is_ok()
    }
}

impl Entity for Position {
    fn x(&self) -> i32 {
        self.x.load(Ordering::Relaxed)
    }

    fn y(&self) -> i32 {
        self.y.load(Ordering::Relaxed)
    }

    fn set_x(&self, x: i32) {
        self.x.store(x, Ordering::Relaxed);
    }

    fn set_y(&self, y: i32) {
        self.y.store(y, Ordering::Relaxed);
    }
}
