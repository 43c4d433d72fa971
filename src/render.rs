use crate::canvas::{Canvas, Rgb};
use crate::config::GameConfig;
use crate::food::Food;
use crate::game::{GameState, Round, SnakeGame};

const BLACK: Rgb = Rgb(10, 10, 15);
const DARK_GRAY: Rgb = Rgb(40, 40, 50);
const PS1_BG: Rgb = Rgb(20, 0, 30);
const PLAYFIELD_LINE: Rgb = Rgb(30, 0, 40);
const NEON_GREEN: Rgb = Rgb(0, 255, 100);
const BLOOD_RED: Rgb = Rgb(200, 20, 20);
const WHITE: Rgb = Rgb(220, 220, 220);
const GOLD: Rgb = Rgb(255, 215, 0);
const ORANGE: Rgb = Rgb(255, 165, 0);
const DEATH_BG: Rgb = Rgb(50, 0, 0);

pub const PARTICLE_COLOR: Rgb = BLOOD_RED;

pub fn draw(canvas: &mut impl Canvas, game: &SnakeGame) {
    let config = game.config();

    match game.state() {
        GameState::Boot { .. } => draw_boot(canvas),
        GameState::Menu { frames } => draw_menu(canvas, config, *frames),
        GameState::Playing(round) => draw_round(canvas, config, round),
        GameState::GameOver { score, won } => draw_game_over(canvas, *score, *won),
    }
}

fn draw_boot(canvas: &mut impl Canvas) {
    let (w, h) = canvas.size();
    canvas.clear(WHITE);

    let (cx, cy) = (w / 2, h / 2 - h / 10);
    let r = h / 5;
    for dy in -r..=r {
        let half = r - dy.abs();
        canvas.fill_rect(cx - half, cy + dy, half * 2 + 1, 1, ORANGE);
    }

    text_centered(canvas, cy + r + 4, "RUSTSTATION", BLACK);
}

fn draw_menu(canvas: &mut impl Canvas, config: &GameConfig, frames: u32) {
    let (_, h) = canvas.size();
    canvas.clear(BLACK);
    grid_lines(canvas, config.cell_px, 0, DARK_GRAY);

    text_centered(canvas, h / 4, "METAL SNAKE", NEON_GREEN);

    if (frames / config.fps) % 2 == 0 {
        text_centered(canvas, h * 3 / 4, "PRESS START [ENTER]", WHITE);
    }
}

fn draw_round(canvas: &mut impl Canvas, config: &GameConfig, round: &Round) {
    canvas.clear(PS1_BG);
    // Wobble the grid a pixel every other frame
    grid_lines(canvas, config.cell_px, (round.frames % 2) as i32, PLAYFIELD_LINE);

    draw_food(canvas, config.cell_px, &round.food);

    for (i, &(x, y)) in round.snake.body().iter().enumerate() {
        // Head glows, the body fades out towards the tail
        let color = if i == 0 {
            NEON_GREEN
        } else {
            Rgb(0, 255usize.saturating_sub(i * 5).max(100) as u8, 50)
        };
        voxel(canvas, config.cell_px, x * config.cell_px, y * config.cell_px, color);
    }

    let c = config.cell_px as f32;
    for p in round.particles.iter() {
        let size = (c * 0.75 * p.life).round() as i32;
        if size > 0 {
            canvas.fill_rect((p.x * c) as i32, (p.y * c) as i32, size, size, p.color);
        }
    }

    canvas.text(1, 0, &format!("SCORE: {}", round.snake.score()), WHITE);
}

fn draw_food(canvas: &mut impl Canvas, cell_px: i32, food: &Food) {
    let bob = food.pulse.sin().round() as i32;
    let color = if (food.pulse * 5.0) as i32 % 2 == 0 { BLOOD_RED } else { GOLD };
    voxel(canvas, cell_px, food.cell.0 * cell_px, food.cell.1 * cell_px - bob, color);
}

fn draw_game_over(canvas: &mut impl Canvas, score: u32, won: bool) {
    let (_, h) = canvas.size();
    canvas.clear(DEATH_BG);

    let title = if won { "YOU WIN" } else { "YOU DIED" };
    text_centered(canvas, h / 2 - 8, title, WHITE);
    text_centered(canvas, h / 2 + 2, &format!("FINAL SCORE: {}", score), GOLD);
    text_centered(canvas, h / 2 + 10, "PRESS 'R' TO RESTART", WHITE);
}

/// A cell-sized block with a darker one-pixel lip underneath.
fn voxel(canvas: &mut impl Canvas, size: i32, x: i32, y: i32, color: Rgb) {
    canvas.fill_rect(x, y, size, size, color);
    canvas.fill_rect(x, y + size, size, 1, color.shade(50));
    if size > 2 {
        canvas.fill_rect(x, y, size, 1, color.halved());
    }
}

fn grid_lines(canvas: &mut impl Canvas, step: i32, offset: i32, color: Rgb) {
    let (w, h) = canvas.size();
    for x in (0..w).step_by(step as usize) {
        canvas.line((x + offset, 0), (x, h - 1), color);
    }
    for y in (0..h).step_by(step as usize) {
        canvas.line((0, y + offset), (w - 1, y), color);
    }
}

fn text_centered(canvas: &mut impl Canvas, y: i32, text: &str, color: Rgb) {
    let (w, _) = canvas.size();
    let x = (w - text.chars().count() as i32) / 2;
    canvas.text(x.max(0), y, text, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use crate::canvas::PixelCanvas;
    use crate::input::Action;
    use rand::{rngs::StdRng, SeedableRng};

    fn render(game: &SnakeGame) -> (PixelCanvas, Vec<String>) {
        let (w, h) = game.config().canvas_size();
        let mut canvas = PixelCanvas::new(w, h);
        draw(&mut canvas, game);

        let (cols, _) = canvas.cell_size();
        let rows = canvas
            .compose()
            .chunks(cols as usize)
            .map(|row| row.iter().map(|c| c.ch).collect::<String>())
            .collect();
        (canvas, rows)
    }

    fn shows(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    fn new_game() -> SnakeGame {
        SnakeGame::new(GameConfig::default(), Box::new(NullSink), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_boot_screen() {
        let (canvas, rows) = render(&new_game());
        assert!(shows(&rows, "RUSTSTATION"));
        assert_eq!(canvas.get(0, 0), Some(WHITE));
        assert_eq!(canvas.get(30, 13), Some(ORANGE));
    }

    #[test]
    fn test_menu_prompt_blinks() {
        let mut game = new_game();
        game.handle_action(Action::Unbound);

        let (_, rows) = render(&game);
        assert!(shows(&rows, "METAL SNAKE"));
        assert!(shows(&rows, "PRESS START [ENTER]"));

        for _ in 0..30 {
            game.update();
        }
        let (_, rows) = render(&game);
        assert!(shows(&rows, "METAL SNAKE"));
        assert!(!shows(&rows, "PRESS START"));
    }

    #[test]
    fn test_playfield_shows_snake_and_score() {
        let mut game = new_game();
        game.handle_action(Action::Unbound);
        game.handle_action(Action::Confirm);

        let (canvas, rows) = render(&game);
        assert!(shows(&rows, "SCORE: 0"));
        // Head at cell (10, 7), 3px cells; sample below the highlight row
        assert_eq!(canvas.get(31, 22), Some(NEON_GREEN));
    }

    #[test]
    fn test_game_over_screen() {
        let mut game = new_game();
        game.handle_action(Action::Unbound);
        game.handle_action(Action::Confirm);
        for _ in 0..30 {
            game.update();
        }

        let (canvas, rows) = render(&game);
        assert!(matches!(game.state(), GameState::GameOver { won: false, .. }));
        assert!(shows(&rows, "YOU DIED"));
        assert!(shows(&rows, "FINAL SCORE"));
        assert!(shows(&rows, "PRESS 'R' TO RESTART"));
        assert_eq!(canvas.get(0, 44), Some(DEATH_BG));
    }

    #[test]
    fn test_voxel_has_darker_lip() {
        let mut canvas = PixelCanvas::new(6, 6);
        voxel(&mut canvas, 3, 0, 0, Rgb(100, 200, 100));

        assert_eq!(canvas.get(1, 0), Some(Rgb(50, 100, 50)));
        assert_eq!(canvas.get(1, 1), Some(Rgb(100, 200, 100)));
        assert_eq!(canvas.get(1, 3), Some(Rgb(50, 150, 50)));
        assert_eq!(canvas.get(1, 4), Some(Rgb::default()));
    }
}
