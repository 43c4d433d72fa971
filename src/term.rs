use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::canvas::{Rgb, TermCell};

/// Owns the terminal while the game runs and paints frames onto it.
pub struct TermManager {
    stdout: Stdout,
    true_color: bool,
    /// What is currently on screen, to skip unchanged cells
    screen: Vec<TermCell>,
    screen_cols: u16,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager {
            stdout: stdout(),
            true_color: supports_true_color(),
            screen: vec![],
            screen_cols: 0,
            active: false,
        }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        self.active = true;
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Failed to hide cursor")?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        Ok(())
    }

    /// Drains pending key events without blocking.
    pub fn read_key_events_queue(&mut self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) => events.push(ev),
                Event::Resize(..) => self.clear()?,
                _ => {}
            }
        }

        Ok(events)
    }

    /// Paints `cells` (row-major, `cols` wide), touching only cells that
    /// changed since the last frame. Anything past the terminal edge is cut.
    pub fn present(&mut self, cells: &[TermCell], cols: u16) -> Result<()> {
        if self.screen_cols != cols || self.screen.len() != cells.len() {
            self.screen = vec![TermCell { ch: '\0', ..TermCell::default() }; cells.len()];
            self.screen_cols = cols;
        }

        let (term_w, term_h) = terminal::size()?;
        let mut last: Option<(Rgb, Rgb)> = None;

        for (i, cell) in cells.iter().enumerate() {
            let (x, y) = ((i % cols as usize) as u16, (i / cols as usize) as u16);
            if x >= term_w || y >= term_h || self.screen[i] == *cell {
                continue;
            }

            queue!(self.stdout, cursor::MoveTo(x, y))?;
            if last != Some((cell.fg, cell.bg)) {
                let (fg, bg) = (self.color(cell.fg), self.color(cell.bg));
                queue!(self.stdout, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                last = Some((cell.fg, cell.bg));
            }
            queue!(self.stdout, Print(cell.ch))?;
            self.screen[i] = *cell;
        }

        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
            .context("Error clearing")?;
        // Forget what was drawn so the next frame repaints everything
        self.screen.clear();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    fn color(&self, rgb: Rgb) -> Color {
        if self.true_color {
            Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
        } else {
            Color::AnsiValue(ansi256(rgb))
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn supports_true_color() -> bool {
    std::env::var("COLORTERM")
        .map(|v| v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit"))
        .unwrap_or(false)
}

/// Nearest entry in the 6x6x6 colour cube of the 256-colour palette.
fn ansi256(rgb: Rgb) -> u8 {
    fn level(c: u8) -> u8 {
        match c {
            0..=47 => 0,
            48..=114 => 1,
            _ => (c - 35) / 40,
        }
    }
    16 + 36 * level(rgb.0) + 6 * level(rgb.1) + level(rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi256_corners() {
        assert_eq!(ansi256(Rgb(0, 0, 0)), 16);
        assert_eq!(ansi256(Rgb(255, 255, 255)), 231);
        assert_eq!(ansi256(Rgb(255, 0, 0)), 196);
        assert_eq!(ansi256(Rgb(0, 255, 100)), 16 + 30 + 1);
    }

    #[test]
    fn test_color_follows_terminal_depth() {
        // Never set up, so dropping it leaves the terminal alone
        let mut term = TermManager::new();

        term.true_color = false;
        assert_eq!(term.color(Rgb(255, 0, 0)), Color::AnsiValue(196));

        term.true_color = true;
        assert_eq!(term.color(Rgb(12, 34, 56)), Color::Rgb { r: 12, g: 34, b: 56 });
    }
}
