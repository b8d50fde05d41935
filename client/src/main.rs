use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use log::error;
use scene::{
    animator::{animate, TICK},
    game_state::{GameState, RightPaddleControl},
    screen::Screen,
    GameError,
};
use terminal_screen::TerminalScreen;

mod terminal_screen;

#[derive(Parser)]
#[command(about = "Pong in the terminal. W/S moves the left paddle, Esc quits.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Mode>,
    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
enum Mode {
    /// Play against the computer (default)
    Solo,
    /// Two players on one keyboard, the right paddle uses the arrow keys
    Versus,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        if let Err(err) = init_logging(path) {
            eprintln!("failed to open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }
    let control = match cli.command.unwrap_or(Mode::Solo) {
        Mode::Solo => RightPaddleControl::Ai,
        Mode::Versus => RightPaddleControl::Human,
    };

    let mut screen = TerminalScreen::new();
    if let Err(err) = screen.init() {
        let _ = screen.close();
        error!("failed to initialise terminal: {err}");
        eprintln!("failed to initialise terminal: {err}");
        return ExitCode::FAILURE;
    }
    let result = play(&mut screen, control);
    // the input dispatcher has exited by now, unless drawing failed.
    if let Err(err) = screen.close() {
        eprintln!("failed to restore terminal: {err}");
    }
    match result {
        Ok((player1_score, player2_score)) => {
            println!("player 1: {player1_score}  player 2: {player2_score}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn play(screen: &mut TerminalScreen, control: RightPaddleControl) -> Result<(u64, u64), GameError> {
    let (width, height) = screen.size();
    let mut state = GameState::new();
    state.setup(width.into(), height.into())?;
    animate(screen, &mut state, control, TICK)?;
    Ok((state.player1_score(), state.player2_score()))
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
