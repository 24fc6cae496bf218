/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;

use clap::Parser;
use simplelog::{LevelFilter, WriteLogger};

use config::GameConfig;
use domain::entity::Command;
use error::{GameError, Result};
use sim::event::{GameEvent, Outcome};
use sim::level::{load_maze, Maze};
use sim::step;
use sim::world::GameState;
use ui::input::spawn_pump;
use ui::renderer::Renderer;
use ui::terminal::TerminalGuard;

#[derive(Parser, Debug)]
#[command(name = "mazechase", version, about = "Terminal maze chase game")]
struct Cli {
    /// Path to the glyph/timing configuration (.json or .toml)
    #[arg(long, default_value = "config.json")]
    config_file: PathBuf,

    /// Path to a custom maze file
    #[arg(long, default_value = "maze01.txt")]
    maze_file: PathBuf,

    /// Write debug logs to this file (the terminal is busy with the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.log_file.as_deref());

    let (maze, config) = match load_resources(&cli) {
        Ok(loaded) => loaded,
        Err(e) => return fail(&e),
    };

    let mut world = GameState::new(maze, config.pill_duration());
    log::info!(
        "starting run: {} adversaries, {} dots, {} lives",
        world.adversaries.len(),
        world.dots_remaining,
        world.lives,
    );

    let result = match TerminalGuard::acquire() {
        Ok(_terminal) => {
            let input = spawn_pump(io::stdin());
            let mut renderer = Renderer::new(BufWriter::with_capacity(16384, io::stdout()), &config);
            game_loop(&mut world, &mut renderer, &input, &config)
            // _terminal dropped here: cooked mode is back before we print.
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        return fail(&e);
    }

    if world.power_up.is_armed() {
        log::debug!("abandoning pending power-up timer");
    }
    log::info!("{} power-up windows completed", world.power_up.reverts());

    match world.outcome() {
        Some(Outcome::Cleared) => println!("Maze cleared!"),
        _ => println!("Game over."),
    }
    println!("Final Score: {}", world.score);
    println!("Lives: {}", world.lives.max(0));
    ExitCode::SUCCESS
}

/// Both resources must load before anything touches the terminal.
fn load_resources(cli: &Cli) -> Result<(Maze, GameConfig)> {
    let maze = load_maze(&cli.maze_file)?;
    let config = GameConfig::load(&cli.config_file)?;
    Ok((maze, config))
}

fn fail(e: &GameError) -> ExitCode {
    log::error!("{e}");
    eprintln!("{e}");
    ExitCode::FAILURE
}

fn setup_logging(path: Option<&Path>) {
    let Some(path) = path else { return };
    match File::create(path) {
        Ok(file) => {
            let config = simplelog::ConfigBuilder::new()
                .set_target_level(LevelFilter::Error)
                .build();
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, config, file) {
                eprintln!("Warning: logger already initialized: {e}");
            }
        }
        Err(e) => eprintln!("Warning: could not create log file {}: {e}", path.display()),
    }
}

/// Render → poll input → step → death pause / final frame → sleep.
///
/// Only a catch with lives left pauses. Game over draws the final frame
/// and returns at once; it stays on screen after the terminal is restored.
fn game_loop<W: Write>(
    world: &mut GameState,
    renderer: &mut Renderer<W>,
    input: &Receiver<Command>,
    config: &GameConfig,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let tick_rate = config.tick_interval();
    let mut input_lost = false;

    while world.is_running() {
        renderer.render(world).map_err(GameError::Render)?;

        let command = poll_input(input, &mut input_lost);
        let events = step::step(world, command, &mut rng);

        for event in &events {
            match *event {
                GameEvent::PlayerCaught { at, lives_left, .. } if lives_left > 0 => {
                    renderer.draw_death(world, at).map_err(GameError::Render)?;
                    thread::sleep(config.death_pause());
                }
                GameEvent::GameOver(outcome) => {
                    renderer.render(world).map_err(GameError::Render)?;
                    let drawn = match outcome {
                        Outcome::Defeated => renderer.draw_death(world, world.player.pos),
                        Outcome::Cleared => renderer.park_cursor(world),
                    };
                    drawn.map_err(GameError::Render)?;
                }
                _ => {}
            }
        }

        if world.is_running() {
            thread::sleep(tick_rate);
        }
    }

    Ok(())
}

/// At most one pending command; never waits. `input_lost` latches the
/// first disconnect so it is logged once.
fn poll_input(input: &Receiver<Command>, input_lost: &mut bool) -> Option<Command> {
    match input.try_recv() {
        Ok(command) => Some(command),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            if !*input_lost {
                log::warn!("input pump is gone, playing on without input");
                *input_lost = true;
            }
            None
        }
    }
}
