use std::io;

use crate::{
    entity::Entity,
    game_state::GameState,
    screen::{Screen, Style},
    PADDLE_HEIGHT,
};

pub const BALL_GLYPH: char = '●';
pub const PADDLE_GLYPH: char = '█';
pub const NET_GLYPH: char = '│';

/// Draws a full frame of `state` and presents it.
pub fn draw_scene<S: Screen>(screen: &mut S, state: &GameState) -> io::Result<()> {
    let (width, height) = (state.width(), state.height());
    screen.clear();

    let half = width / 2;
    for y in 0..height {
        put(screen, half, y, NET_GLYPH, Style::Dim);
    }

    let score_column = half - half / 2;
    draw_score(screen, score_column, state.player1_score());
    draw_score(screen, score_column + half, state.player2_score());

    for paddle in [state.left_paddle(), state.right_paddle()] {
        for dy in 0..PADDLE_HEIGHT {
            put(screen, paddle.x(), paddle.y() + dy, PADDLE_GLYPH, Style::Default);
        }
    }

    let ball = state.ball();
    put(screen, ball.x(), ball.y(), BALL_GLYPH, Style::Default);

    screen.show()
}

fn draw_score<S: Screen>(screen: &mut S, column: i32, score: u64) {
    for (offset, digit) in score.to_string().chars().enumerate() {
        put(screen, column + offset as i32, 0, digit, Style::Default);
    }
}

/// clips anything outside the screen.
fn put<S: Screen>(screen: &mut S, x: i32, y: i32, glyph: char, style: Style) {
    let (width, height) = screen.size();
    if (0..i32::from(width)).contains(&x) && (0..i32::from(height)).contains(&y) {
        screen.set_cell(x as u16, y as u16, glyph, style);
    }
}
