use std::sync::Arc;

use log::{debug, info};

use crate::{
    direction::{resolve_vertical_direction, Horizontal, Vertical},
    entity::{Entity, Position, Role},
    GameError, MIN_WIDTH, PADDLE_HEIGHT,
};

/// cells per tick. a power-of-two fraction keeps the accumulator exact.
pub const DEFAULT_BALL_VELOCITY: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddleCommand {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

/// Who is allowed to move the right paddle. Exactly one writer per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RightPaddleControl {
    Ai,
    Human,
}

/// Shared handle used to move the paddles from any thread.
#[derive(Clone, Debug)]
pub struct PaddleController {
    left_paddle: Arc<Position>,
    right_paddle: Arc<Position>,
    court_height: i32,
}

impl PaddleController {
    /// applies a one cell move. moves that would push the paddle out of the
    /// court are ignored and return false.
    pub fn apply(&self, command: PaddleCommand) -> bool {
        let (paddle, delta) = match command {
            PaddleCommand::LeftUp => (&self.left_paddle, -1),
            PaddleCommand::LeftDown => (&self.left_paddle, 1),
            PaddleCommand::RightUp => (&self.right_paddle, -1),
            PaddleCommand::RightDown => (&self.right_paddle, 1),
        };
        paddle.shift_y_within(delta, PADDLE_HEIGHT, self.court_height)
    }
}

pub struct GameState {
    left_paddle: Arc<Position>,
    right_paddle: Arc<Position>,
    ball: Position,
    width: i32,
    height: i32,
    horizontal: Horizontal,
    vertical: Vertical,
    accumulator: f32,
    velocity: f32,
    player1_score: u64,
    player2_score: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a state with every entity at the origin. Call [`setup`]
    /// before the first [`advance`].
    ///
    /// [`setup`]: GameState::setup
    /// [`advance`]: GameState::advance
    pub fn new() -> Self {
        Self {
            left_paddle: Arc::new(Position::new(Role::LeftPaddle)),
            right_paddle: Arc::new(Position::new(Role::RightPaddle)),
            ball: Position::new(Role::Ball),
            width: 0,
            height: 0,
            horizontal: Horizontal::Left,
            vertical: Vertical::Straight,
            accumulator: 0.0,
            velocity: DEFAULT_BALL_VELOCITY,
            player1_score: 0,
            player2_score: 0,
        }
    }

    /// Fixes the court size for the session, pins the paddles to the side
    /// columns and centres everything.
    pub fn setup(&mut self, width: i32, height: i32) -> Result<(), GameError> {
        if width < MIN_WIDTH || height < PADDLE_HEIGHT {
            return Err(GameError::CourtTooSmall { width, height });
        }
        self.width = width;
        self.height = height;
        self.left_paddle.set_x(0);
        self.right_paddle.set_x(width - 1);
        self.initial_position();
        info!("court set up at {width}x{height}");
        Ok(())
    }

    /// Centres both paddles and the ball and serves towards the left.
    pub fn initial_position(&mut self) {
        let paddle_y = self.height / 2 - PADDLE_HEIGHT / 2;
        self.left_paddle.set_y(paddle_y);
        self.right_paddle.set_y(paddle_y);
        self.ball.set_x(self.width / 2);
        self.ball.set_y(self.height / 2);
        self.vertical = Vertical::Straight;
        self.horizontal = Horizontal::Left;
    }

    /// Runs one tick of ball physics: accumulate, maybe step, then resolve
    /// paddle hits, wall bounces and scoring in that order.
    pub fn advance(&mut self) {
        self.accumulator += self.velocity;
        if self.accumulator < 1.0 {
            return;
        }
        self.accumulator = 0.0;

        self.ball.set_x(self.ball.x() + self.horizontal.step());
        self.ball.set_y(self.ball.y() + self.vertical.step());
        let (x, y) = (self.ball.x(), self.ball.y());

        let left_paddle = &*self.left_paddle;
        let right_paddle = &*self.right_paddle;
        if x == left_paddle.x() + 1 && in_contact_band(y, left_paddle) {
            self.horizontal = Horizontal::Right;
            self.vertical = resolve_vertical_direction(y, left_paddle.y());
        } else if x == right_paddle.x() - 1 && in_contact_band(y, right_paddle) {
            self.horizontal = Horizontal::Left;
            self.vertical = resolve_vertical_direction(y, right_paddle.y());
        }

        if x > left_paddle.x() && x < right_paddle.x() {
            if y == 0 {
                self.vertical = Vertical::Down;
            } else if y == self.height - 1 {
                self.vertical = Vertical::Up;
            }
        }

        if x == self.width {
            self.player1_score += 1;
            info!(
                "player 1 scored: {} - {}",
                self.player1_score, self.player2_score
            );
            self.initial_position();
        } else if x == 0 {
            self.player2_score += 1;
            info!(
                "player 2 scored: {} - {}",
                self.player1_score, self.player2_score
            );
            self.initial_position();
        }
        self.debug_check_invariants();
    }

    /// Follows the ball with the right paddle, one cell per tick at most.
    /// Returns the command it issued, if any.
    pub fn apply_ai(&self) -> Option<PaddleCommand> {
        let ball_y = self.ball.y();
        let paddle_y = self.right_paddle.y();
        let command = if ball_y > paddle_y {
            PaddleCommand::RightDown
        } else if ball_y < paddle_y {
            PaddleCommand::RightUp
        } else {
            return None;
        };
        if !self.controller().apply(command) {
            debug!("ai move {command:?} blocked by the wall");
        }
        Some(command)
    }

    pub fn controller(&self) -> PaddleController {
        PaddleController {
            left_paddle: Arc::clone(&self.left_paddle),
            right_paddle: Arc::clone(&self.right_paddle),
            court_height: self.height,
        }
    }

    pub fn left_paddle(&self) -> &Position {
        &self.left_paddle
    }

    pub fn right_paddle(&self) -> &Position {
        &self.right_paddle
    }

    pub fn ball(&self) -> &Position {
        &self.ball
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn direction(&self) -> (Horizontal, Vertical) {
        (self.horizontal, self.vertical)
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn player1_score(&self) -> u64 {
        self.player1_score
    }

    pub fn player2_score(&self) -> u64 {
        self.player2_score
    }

    #[cfg(test)]
    pub(crate) fn set_scores(&mut self, player1_score: u64, player2_score: u64) {
        self.player1_score = player1_score;
        self.player2_score = player2_score;
    }

    fn debug_check_invariants(&self) {
        for paddle in [&*self.left_paddle, &*self.right_paddle] {
            debug_assert!(
                (0..=self.height - PADDLE_HEIGHT).contains(&paddle.y()),
                "{:?} out of court at y {}",
                paddle.role(),
                paddle.y()
            );
        }
        debug_assert!(
            (1..self.width).contains(&self.ball.x()) && (0..self.height).contains(&self.ball.y()),
            "ball out of court at ({}, {})",
            self.ball.x(),
            self.ball.y()
        );
        debug_assert!(self.accumulator < 1.0);
    }
}

fn in_contact_band(ball_y: i32, paddle: &impl Entity) -> bool {
    (paddle.y()..paddle.y() + PADDLE_HEIGHT).contains(&ball_y)
}
