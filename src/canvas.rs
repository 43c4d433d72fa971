//! Low-resolution drawing surface.
//!
//! Pixels are packed two per terminal cell (upper half block), so a canvas
//! `w` pixels wide and `h` tall occupies `w` columns and `ceil(h / 2)` rows.
//! Text is not rasterized; it is laid over the pixels as terminal glyphs,
//! one column per character.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Darkens each channel by `amount`, clamping at black.
    pub fn shade(self, amount: u8) -> Rgb {
        Rgb(
            self.0.saturating_sub(amount),
            self.1.saturating_sub(amount),
            self.2.saturating_sub(amount),
        )
    }

    pub fn halved(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

pub trait Canvas {
    /// Size in pixels.
    fn size(&self) -> (i32, i32);
    /// Fills every pixel and drops all text.
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb);
    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb);
    /// Writes `text` starting at pixel column `x` on the cell row holding
    /// pixel row `y`.
    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb);
}

/// What one terminal cell should show.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TermCell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for TermCell {
    fn default() -> Self {
        TermCell { ch: ' ', fg: Rgb::default(), bg: Rgb::default() }
    }
}

struct Glyph {
    col: i32,
    row: i32,
    ch: char,
    color: Rgb,
}

pub struct PixelCanvas {
    width: i32,
    height: i32,
    pixels: Vec<Rgb>,
    glyphs: Vec<Glyph>,
}

impl PixelCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        PixelCanvas {
            width,
            height,
            pixels: vec![Rgb::default(); (width * height) as usize],
            glyphs: vec![],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Terminal grid size as (columns, rows).
    pub fn cell_size(&self) -> (u16, u16) {
        (self.width as u16, ((self.height + 1) / 2) as u16)
    }

    /// Flattens pixels and text into terminal cells, row by row.
    pub fn compose(&self) -> Vec<TermCell> {
        let (cols, rows) = self.cell_size();
        let (cols, rows) = (cols as i32, rows as i32);
        let mut cells = Vec::with_capacity((cols * rows) as usize);

        for row in 0..rows {
            for col in 0..cols {
                let top = self.get(col, row * 2).unwrap_or_default();
                let bottom = self.get(col, row * 2 + 1).unwrap_or(top);

                let cell = if top == bottom {
                    TermCell { ch: ' ', fg: top, bg: top }
                } else {
                    TermCell { ch: '\u{2580}', fg: top, bg: bottom }
                };
                cells.push(cell);
            }
        }

        // Later text wins over earlier text
        for g in &self.glyphs {
            if g.col >= 0 && g.col < cols && g.row >= 0 && g.row < rows {
                let cell = &mut cells[(g.row * cols + g.col) as usize];
                let bg = if cell.ch == ' ' { cell.bg } else { cell.fg };
                *cell = TermCell { ch: g.ch, fg: g.color, bg };
            }
        }

        cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.iter_mut().for_each(|p| *p = color);
        self.glyphs.clear();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        for py in y.max(0)..(y + h).min(self.height) {
            for px in x.max(0)..(x + w).min(self.width) {
                self.set(px, py, color);
            }
        }
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        // Bresenham
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x, y, color);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        let row = y.div_euclid(2);
        for (i, ch) in text.chars().enumerate() {
            self.glyphs.push(Glyph { col: x + i as i32, row, ch, color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);
    const BLUE: Rgb = Rgb(0, 0, 255);
    const WHITE: Rgb = Rgb(255, 255, 255);

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(-2, 2, 4, 10, RED);

        assert_eq!(canvas.get(0, 2), Some(RED));
        assert_eq!(canvas.get(1, 3), Some(RED));
        assert_eq!(canvas.get(2, 2), Some(Rgb::default()));
        assert_eq!(canvas.get(0, 1), Some(Rgb::default()));
        assert_eq!(canvas.get(0, 4), None);
    }

    #[test]
    fn test_line_hits_both_ends() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.line((1, 1), (6, 3), BLUE);

        assert_eq!(canvas.get(1, 1), Some(BLUE));
        assert_eq!(canvas.get(6, 3), Some(BLUE));
        let lit = (0..8).flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.get(x, y) == Some(BLUE))
            .count();
        assert_eq!(lit, 6);
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = PixelCanvas::new(3, 5);
        canvas.line((1, 4), (1, 0), RED);
        for y in 0..5 {
            assert_eq!(canvas.get(1, y), Some(RED));
        }
    }

    #[test]
    fn test_compose_packs_two_rows_per_cell() {
        let mut canvas = PixelCanvas::new(2, 3);
        canvas.clear(BLUE);
        canvas.set(0, 0, RED);

        assert_eq!(canvas.cell_size(), (2, 2));
        let cells = canvas.compose();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], TermCell { ch: '\u{2580}', fg: RED, bg: BLUE });
        assert_eq!(cells[1], TermCell { ch: ' ', fg: BLUE, bg: BLUE });
        // Odd height: the last row has only a top pixel
        assert_eq!(cells[2].bg, BLUE);
    }

    #[test]
    fn test_text_overlays_cells() {
        let mut canvas = PixelCanvas::new(6, 4);
        canvas.clear(BLUE);
        canvas.text(1, 3, "HI", WHITE);

        let cells = canvas.compose();
        assert_eq!(cells[6 + 1], TermCell { ch: 'H', fg: WHITE, bg: BLUE });
        assert_eq!(cells[6 + 2].ch, 'I');
        assert_eq!(cells[6 + 3].ch, ' ');

        canvas.clear(BLUE);
        assert!(canvas.compose().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn test_shade() {
        assert_eq!(Rgb(100, 20, 60).shade(50), Rgb(50, 0, 10));
        assert_eq!(Rgb(100, 20, 60).halved(), Rgb(50, 10, 30));
    }
}
