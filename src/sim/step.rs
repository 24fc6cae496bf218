/// The step function: advances the game by one tick.
///
/// Processing order (rendering happens before, in the loop):
///   1. Input (at most one command)
///   2. Adversary movement
///   3. Collision check
///   4. Game-over check
///
/// The death pause and the final death frame are the loop's job; it reads
/// them off the returned events.

use rand::Rng;

use crate::domain::cell::Cell;
use crate::domain::entity::Command;
use crate::domain::motion::resolve_move;
use super::event::{GameEvent, Outcome};
use super::world::{GameState, Phase, DOT_SCORE, PILL_SCORE};

pub fn step<R: Rng + ?Sized>(world: &mut GameState, command: Option<Command>, rng: &mut R) -> Vec<GameEvent> {
    if !world.is_running() { return vec![]; }

    let mut events = Vec::new();
    world.tick += 1;

    resolve_input(world, command, &mut events);
    resolve_adversary_movement(world, rng);
    resolve_collisions(world, &mut events);
    resolve_game_over(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Input
// ══════════════════════════════════════════════════════════════

fn resolve_input(world: &mut GameState, command: Option<Command>, events: &mut Vec<GameEvent>) {
    let dir = match command {
        None => return,
        Some(Command::Escape) => {
            log::info!("escape pressed, ending run");
            world.lives = 0;
            events.push(GameEvent::Quit);
            return;
        }
        Some(Command::Move(dir)) => dir,
    };

    world.player.pos = resolve_move(&world.grid, world.player.pos, dir);
    let at = world.player.pos;

    match world.grid.remove_dot(at) {
        Some(Cell::Dot) => {
            world.score += DOT_SCORE;
            world.dots_remaining = world.dots_remaining.saturating_sub(1);
            events.push(GameEvent::DotEaten { at });
        }
        Some(Cell::PowerPill) => {
            world.score += PILL_SCORE;
            log::debug!("power pill eaten at {at:?}");
            world.power_up.trigger();
            events.push(GameEvent::PillEaten { at });
        }
        _ => {}
    }
}

// ══════════════════════════════════════════════════════════════
// Adversaries
// ══════════════════════════════════════════════════════════════

fn resolve_adversary_movement<R: Rng + ?Sized>(world: &mut GameState, rng: &mut R) {
    world.adversaries.move_all(&world.grid, rng);
}

// ══════════════════════════════════════════════════════════════
// Collisions
// ══════════════════════════════════════════════════════════════

/// Every adversary on the player's cell costs a life, whatever its status.
/// The player respawns only while lives remain. Adversaries are checked in
/// order against the player's current cell, so after a respawn the rest
/// are compared against the spawn cell.
fn resolve_collisions(world: &mut GameState, events: &mut Vec<GameEvent>) {
    for adversary in world.adversaries.snapshot() {
        if adversary.pos != world.player.pos { continue; }

        let at = world.player.pos;
        world.lives -= 1;
        if world.lives > 0 {
            world.player.respawn();
        }
        log::debug!("caught at {at:?} by {:?} adversary, {} lives left", adversary.status, world.lives);
        events.push(GameEvent::PlayerCaught { at, status: adversary.status, lives_left: world.lives });
    }
}

// ══════════════════════════════════════════════════════════════
// Game over
// ══════════════════════════════════════════════════════════════

fn resolve_game_over(world: &mut GameState, events: &mut Vec<GameEvent>) {
    let outcome = if world.lives <= 0 {
        Outcome::Defeated
    } else if world.dots_remaining == 0 {
        Outcome::Cleared
    } else {
        return;
    };

    world.phase = Phase::GameOver(outcome);
    log::info!("game over after {} ticks: {outcome:?}, score {}", world.tick, world.score);
    events.push(GameEvent::GameOver(outcome));
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
