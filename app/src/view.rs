use std::future::Future;

use engine::game::{FoodKind, GamePhase, GameSnapshot, SnapshotSink, Vec2, in_bounds};
use engine::log;

const HEAD_CHAR: char = '0';
const BODY_CHAR: char = 'o';
const TAIL_CHAR: char = '.';
const FOOD_CHAR: char = '*';
const DANGER_CHAR: char = '!';
const DEATH_CHAR: char = 'X';

/// Draws each snapshot as a bordered glyph grid, or in headless mode logs a
/// line per death. Reads snapshots only; never talks back to the game.
#[derive(Clone)]
pub struct TerminalView {
    headless: bool,
}

impl TerminalView {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

impl SnapshotSink for TerminalView {
    fn publish(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send {
        if self.headless {
            if snapshot.phase == GamePhase::PostDead {
                log!(
                    "death #{}: score {}, length {}",
                    snapshot.death_count + 1,
                    snapshot.score,
                    snapshot.snake_body.len()
                );
            }
        } else if snapshot.phase != GamePhase::Initializing {
            draw(&snapshot);
        }
        std::future::ready(())
    }
}

fn draw(snapshot: &GameSnapshot) {
    let arena = snapshot.arena_size;
    let width = arena.x as usize;
    let mut rows = vec![vec![' '; width]; arena.y as usize];

    for food in &snapshot.foods {
        let glyph = match food.kind {
            FoodKind::Danger => DANGER_CHAR,
            _ => FOOD_CHAR,
        };
        plot(&mut rows, arena, food.position, glyph);
    }

    let body = &snapshot.snake_body;
    if body.len() > 1 {
        plot(&mut rows, arena, body[body.len() - 1], TAIL_CHAR);
    }
    for &segment in body.iter().skip(1).take(body.len().saturating_sub(2)) {
        plot(&mut rows, arena, segment, BODY_CHAR);
    }
    let head_glyph = if snapshot.phase == GamePhase::Dead {
        DEATH_CHAR
    } else {
        HEAD_CHAR
    };
    plot(&mut rows, arena, body[0], head_glyph);

    let border = "-".repeat(width);

    // Redraw in place instead of scrolling.
    print!("\x1b[2J\x1b[H");
    println!(
        "{}",
        text_line(
            &snapshot.text_box_top_left,
            &snapshot.text_box_top_right,
            width + 2,
            snapshot
        )
    );
    println!("+{}+", border);
    for row in rows {
        println!("|{}|", row.into_iter().collect::<String>());
    }
    println!("+{}+", border);
    println!(
        "{}",
        text_line(
            &snapshot.text_box_bottom_left,
            &snapshot.text_box_bottom_right,
            width + 2,
            snapshot
        )
    );
}

fn plot(rows: &mut [Vec<char>], arena: Vec2, position: Vec2, glyph: char) {
    // An invincible player-controlled head can sit off-grid; skip it.
    if in_bounds(position, arena) {
        rows[position.y as usize][position.x as usize] = glyph;
    }
}

fn text_line(left: &str, right: &str, width: usize, snapshot: &GameSnapshot) -> String {
    let left = substitute(left, snapshot);
    let right = substitute(right, snapshot);
    let pad = width.saturating_sub(left.chars().count() + right.chars().count());
    format!("{}{}{}", left, " ".repeat(pad), right)
}

/// The template strings are opaque to the engine; the placeholders are
/// resolved only here, at render time.
fn substitute(template: &str, snapshot: &GameSnapshot) -> String {
    template
        .replace("{score}", &snapshot.score.to_string())
        .replace("{bestScore}", &snapshot.best_score.to_string())
        .replace("{snakeLength}", &snapshot.snake_body.len().to_string())
        .replace(
            "{largestSnakeLength}",
            &snapshot.largest_snake_size.to_string(),
        )
        .replace("{deathCount}", &snapshot.death_count.to_string())
}
