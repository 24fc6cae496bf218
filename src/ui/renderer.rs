/// Presentation layer: draws one frame of the maze per tick.
///
/// How it works:
///   1. Every maze row is redrawn in place (no full-screen clear, so no flicker)
///   2. Player and adversaries are drawn on top at `col * cell_width`
///   3. The HUD goes one row below the maze
///   4. All commands are batched with `queue!`, flushed once at the end
///
/// Glyphs narrower than a cell are padded with spaces so emoji and ASCII
/// configurations both line up.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::config::GameConfig;
use crate::domain::cell::Cell;
use crate::domain::entity::Status;
use crate::domain::grid::Position;
use crate::sim::world::GameState;

/// Configured glyphs, already padded to the cell width.
#[derive(Clone, Debug)]
struct Glyphs {
    player: String,
    ghost: String,
    ghost_blue: String,
    wall: String,
    dot: String,
    pill: String,
    death: String,
    space: String,
}

impl Glyphs {
    fn from_config(config: &GameConfig) -> Self {
        let w = config.cell_width();
        Glyphs {
            player: fit(&config.player, w),
            ghost: fit(&config.ghost, w),
            ghost_blue: fit(&config.ghost_blue, w),
            wall: fit(&config.wall, w),
            dot: fit(&config.dot, w),
            pill: fit(&config.pill, w),
            death: fit(&config.death, w),
            space: fit(&config.space, w),
        }
    }
}

fn fit(glyph: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(glyph);
    if w >= width {
        glyph.to_string()
    } else {
        format!("{glyph}{}", " ".repeat(width - w))
    }
}

pub struct Renderer<W: Write> {
    writer: W,
    glyphs: Glyphs,
    cell_w: usize,
    use_emoji: bool,
    /// Raw (unpadded) player glyph, used for the emoji lives counter.
    lives_glyph: String,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W, config: &GameConfig) -> Self {
        Renderer {
            writer,
            glyphs: Glyphs::from_config(config),
            cell_w: config.cell_width(),
            use_emoji: config.use_emoji,
            lives_glyph: config.player.clone(),
        }
    }

    pub fn render(&mut self, world: &GameState) -> io::Result<()> {
        for (row, cells) in world.grid.rows().enumerate() {
            queue!(self.writer, MoveTo(0, to_u16(row)))?;
            for &cell in cells {
                match cell {
                    Cell::Wall => queue!(
                        self.writer,
                        SetBackgroundColor(Color::Blue),
                        Print(&self.glyphs.wall),
                        ResetColor
                    )?,
                    Cell::Dot => queue!(self.writer, Print(&self.glyphs.dot))?,
                    Cell::PowerPill => queue!(self.writer, Print(&self.glyphs.pill))?,
                    Cell::Empty | Cell::Space => queue!(self.writer, Print(&self.glyphs.space))?,
                }
            }
        }

        let player = self.glyphs.player.clone();
        self.put(world.player.pos, &player)?;

        for adversary in world.adversaries.snapshot() {
            let glyph = match adversary.status {
                Status::Normal => self.glyphs.ghost.clone(),
                Status::Empowered => self.glyphs.ghost_blue.clone(),
            };
            self.put(adversary.pos, &glyph)?;
        }

        let hud = self.hud(world);
        queue!(
            self.writer,
            MoveTo(0, to_u16(world.grid.height() + 1)),
            Clear(ClearType::UntilNewLine),
            Print(hud)
        )?;

        self.writer.flush()
    }

    /// Overlay the death glyph at `pos` and park the cursor below the HUD.
    pub fn draw_death(&mut self, world: &GameState, pos: Position) -> io::Result<()> {
        let death = self.glyphs.death.clone();
        self.put(pos, &death)?;
        self.park_cursor(world)
    }

    /// Move the cursor under the HUD so later output doesn't overwrite the maze.
    pub fn park_cursor(&mut self, world: &GameState) -> io::Result<()> {
        queue!(self.writer, MoveTo(0, to_u16(world.grid.height() + 2)))?;
        self.writer.flush()
    }

    fn put(&mut self, pos: Position, glyph: &str) -> io::Result<()> {
        queue!(
            self.writer,
            MoveTo(to_u16(pos.col * self.cell_w), to_u16(pos.row)),
            Print(glyph)
        )
    }

    fn hud(&self, world: &GameState) -> String {
        let lives = world.lives.max(0) as usize;
        let lives = if self.use_emoji {
            self.lives_glyph.repeat(lives)
        } else {
            lives.to_string()
        };
        format!("Score: {}    Lives: {}", world.score, lives)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::sim::level::parse_maze;

    fn config(use_emoji: bool) -> GameConfig {
        GameConfig {
            player: if use_emoji { "😀".into() } else { "P".into() },
            ghost: "G".into(),
            wall: "#".into(),
            dot: ".".into(),
            pill: "X".into(),
            death: "*".into(),
            space: " ".into(),
            use_emoji,
            ghost_blue: "B".into(),
            pill_duration_secs: 10,
            tick_ms: 200,
            death_pause_ms: 1000,
        }
    }

    fn world() -> GameState {
        GameState::new(parse_maze("#P.G#\n#X..#").unwrap(), Duration::from_secs(10))
    }

    fn render_to_string(config: &GameConfig, world: &GameState) -> String {
        let mut r = Renderer::new(Vec::new(), config);
        r.render(world).unwrap();
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn narrow_glyphs_are_padded() {
        assert_eq!(fit(".", 2), ". ");
        assert_eq!(fit("😀", 2), "😀");
        assert_eq!(fit("#", 1), "#");
    }

    #[test]
    fn frame_contains_hud_and_sprites() {
        let out = render_to_string(&config(false), &world());
        assert!(out.contains("Score: 0    Lives: 3"));
        assert!(out.contains('P'));
        assert!(out.contains('G'));
        assert!(out.contains('X'));
    }

    #[test]
    fn empowered_adversaries_use_blue_glyph() {
        let w = world();
        w.adversaries.bulk_set_status(Status::Empowered);
        let out = render_to_string(&config(false), &w);
        assert!(out.contains('B'));
    }

    #[test]
    fn emoji_lives_repeat_the_player_glyph() {
        let out = render_to_string(&config(true), &world());
        assert!(out.contains("Lives: 😀😀😀"));
    }

    #[test]
    fn death_overlay_parks_cursor_below_hud() {
        let w = world();
        let mut r = Renderer::new(Vec::new(), &config(false));
        r.draw_death(&w, w.player.pos).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert!(out.contains('*'));
        // Two maze rows, HUD on row 3 (1-based), cursor parked on row 5.
        assert!(out.ends_with("\x1b[5;1H"));
    }

    #[test]
    fn negative_lives_show_as_zero() {
        let mut w = world();
        w.lives = -1;
        let out = render_to_string(&config(false), &w);
        assert!(out.contains("Lives: 0"));
    }
}
