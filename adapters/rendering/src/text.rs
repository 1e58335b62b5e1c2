use std::fmt;

use danger_noodle_core::GridSize;

use crate::{Color, Palette, RenderSink};

/// Character grid that renders frames as plain text.
///
/// Each cell remembers the colour it was last filled or cleared with, which
/// is mapped to a glyph when the canvas is displayed. The background shows
/// as `.`. Borders have no textual form.
#[derive(Clone, Debug)]
pub struct TextCanvas {
    width: u32,
    height: u32,
    cells: Vec<Color>,
    glyphs: Vec<(Color, char)>,
}

impl TextCanvas {
    const UNKNOWN: char = '?';

    /// Creates a canvas covering `grid` filled with the palette background,
    /// with glyphs derived from `palette`.
    #[must_use]
    pub fn new(grid: GridSize, palette: &Palette) -> Self {
        let capacity = grid.width() as usize * grid.height() as usize;
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: vec![palette.background; capacity],
            glyphs: vec![
                (palette.snake_hit, 'x'),
                (palette.snake_fill, 'o'),
                (palette.apple_fill, '@'),
                (palette.background, '.'),
            ],
        }
    }

    /// Glyph currently shown at the provided cell, if it lies on the canvas.
    #[must_use]
    pub fn glyph_at(&self, x: u32, y: u32) -> Option<char> {
        self.index(x, y).map(|index| self.glyph(self.cells[index]))
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    fn glyph(&self, color: Color) -> char {
        self.glyphs
            .iter()
            .find(|(candidate, _)| *candidate == color)
            .map_or(Self::UNKNOWN, |(_, glyph)| *glyph)
    }
}

impl RenderSink for TextCanvas {
    fn clear(&mut self, background: Color) {
        self.cells.fill(background);
    }

    fn draw_cell_fill(&mut self, x: u32, y: u32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = color;
        }
    }

    fn draw_cell_border(&mut self, _x: u32, _y: u32, _color: Color) {}
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }

        for (row, cells) in self.cells.chunks(self.width as usize).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", self.glyph(*cell))?;
            }
        }
        Ok(())
    }
}
