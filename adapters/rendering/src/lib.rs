#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Danger Noodle adapters.
//!
//! The engine never owns pixels. It paints each frame through a
//! [`RenderSink`], choosing colours from a [`Palette`] according to the
//! snake's alive or death state.

mod text;

pub use self::text::TextCanvas;

use danger_noodle_core::{DeathCause, GridPosition, SnakeSnapshot};
use serde::Deserialize;
use std::{error::Error, fmt};

/// Opaque RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `#rrggbb` hex string.
    pub fn from_hex(value: &str) -> Result<Self, RenderingError> {
        let invalid = || RenderingError::InvalidColor {
            value: value.to_owned(),
        };

        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = RenderingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Colours used for every entity and state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Color of empty cells.
    pub background: Color,
    /// Fill of living snake segments.
    pub snake_fill: Color,
    /// Outline drawn around snake segments.
    pub snake_border: Color,
    /// Fill marking the segments involved in a fatal collision.
    pub snake_hit: Color,
    /// Fill of the apple.
    pub apple_fill: Color,
    /// Outline drawn around the apple.
    pub apple_border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0x00, 0x00, 0x00),
            snake_fill: Color::from_rgb_u8(0x00, 0xff, 0x00),
            snake_border: Color::from_rgb_u8(0x00, 0x00, 0x00),
            snake_hit: Color::from_rgb_u8(0x00, 0x00, 0xff),
            apple_fill: Color::from_rgb_u8(0xff, 0x00, 0x00),
            apple_border: Color::from_rgb_u8(0x00, 0x00, 0x00),
        }
    }
}

/// Drawing surface the engine paints frames onto.
pub trait RenderSink {
    /// Wipes the whole surface with the background colour.
    fn clear(&mut self, background: Color);

    /// Fills the interior of a cell.
    fn draw_cell_fill(&mut self, x: u32, y: u32, color: Color);

    /// Draws the outline of a cell.
    fn draw_cell_border(&mut self, x: u32, y: u32, color: Color);
}

/// Sink that discards every drawing call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl RenderSink for Headless {
    fn clear(&mut self, _background: Color) {}

    fn draw_cell_fill(&mut self, _x: u32, _y: u32, _color: Color) {}

    fn draw_cell_border(&mut self, _x: u32, _y: u32, _color: Color) {}
}

/// Paints the apple and then the snake.
///
/// The apple goes first so a snake segment sharing its cell stays visible.
pub fn paint_frame<S>(
    sink: &mut S,
    apple: Option<GridPosition>,
    snake: Option<&SnakeSnapshot>,
    palette: &Palette,
) where
    S: RenderSink + ?Sized,
{
    if let Some(apple) = apple {
        draw_cell(sink, apple, palette.apple_border, palette.apple_fill);
    }

    if let Some(snake) = snake {
        paint_snake(sink, snake, palette);
    }
}

fn paint_snake<S>(sink: &mut S, snake: &SnakeSnapshot, palette: &Palette)
where
    S: RenderSink + ?Sized,
{
    let border = palette.snake_border;
    match snake.death {
        None => {
            for segment in &snake.body {
                draw_cell(sink, *segment, border, palette.snake_fill);
            }
        }
        Some(DeathCause::SelfCollision) => {
            for segment in snake.body.iter().skip(1) {
                draw_cell(sink, *segment, border, palette.snake_fill);
            }
            if let Some(head) = snake.head() {
                draw_cell(sink, head, border, palette.snake_hit);
            }
        }
        Some(DeathCause::WallCollision) => {
            // The head sits beyond the wall, so only the body is drawn.
            for segment in snake.body.iter().skip(1) {
                draw_cell(sink, *segment, border, palette.snake_hit);
            }
        }
    }
}

fn draw_cell<S>(sink: &mut S, cell: GridPosition, border: Color, fill: Color)
where
    S: RenderSink + ?Sized,
{
    sink.draw_cell_border(cell.x(), cell.y(), border);
    sink.draw_cell_fill(cell.x(), cell.y(), fill);
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Colours must be written as `#rrggbb`.
    InvalidColor {
        /// Text that failed to parse.
        value: String,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { value } => {
                write!(f, "colors must be written as #rrggbb (received `{value}`)")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use danger_noodle_core::Direction;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Call {
        Clear(Color),
        Fill(u32, u32, Color),
        Border(u32, u32, Color),
    }

    impl RenderSink for Recorder {
        fn clear(&mut self, background: Color) {
            self.calls.push(Call::Clear(background));
        }

        fn draw_cell_fill(&mut self, x: u32, y: u32, color: Color) {
            self.calls.push(Call::Fill(x, y, color));
        }

        fn draw_cell_border(&mut self, x: u32, y: u32, color: Color) {
            self.calls.push(Call::Border(x, y, color));
        }
    }

    fn snake(cells: &[(u32, u32)], death: Option<DeathCause>) -> SnakeSnapshot {
        let body: Vec<_> = cells
            .iter()
            .map(|&(x, y)| GridPosition::new(x, y))
            .collect();
        SnakeSnapshot {
            unwrapped_head: body[0].to_ivec2(),
            body,
            heading: Direction::Right,
            direction_locked: false,
            death,
        }
    }

    fn fills(recorder: &Recorder) -> Vec<(u32, u32, Color)> {
        recorder
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Fill(x, y, color) => Some((*x, *y, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn hex_colors_parse_and_print() {
        let color = Color::from_hex("#1a2B3c").expect("valid hex");
        assert_eq!(color, Color::from_rgb_u8(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_string(), "#1a2b3c");
    }

    #[test]
    fn malformed_hex_colors_are_rejected() {
        for value in ["00ff00", "#00ff0", "#00ff00aa", "#gg0000", "#ééé"] {
            assert_eq!(
                Color::from_hex(value),
                Err(RenderingError::InvalidColor {
                    value: value.to_owned()
                }),
                "{value}"
            );
        }
    }

    #[test]
    fn every_cell_gets_border_then_fill() {
        let palette = Palette::default();
        let mut recorder = Recorder::default();
        paint_frame(
            &mut recorder,
            Some(GridPosition::new(1, 1)),
            None,
            &palette,
        );

        assert_eq!(
            recorder.calls,
            [
                Call::Border(1, 1, palette.apple_border),
                Call::Fill(1, 1, palette.apple_fill)
            ]
        );
    }

    #[test]
    fn apple_is_painted_before_the_snake() {
        let palette = Palette::default();
        let mut recorder = Recorder::default();
        let alive = snake(&[(2, 1), (1, 1)], None);
        paint_frame(
            &mut recorder,
            Some(GridPosition::new(5, 5)),
            Some(&alive),
            &palette,
        );

        assert_eq!(
            fills(&recorder),
            [
                (5, 5, palette.apple_fill),
                (2, 1, palette.snake_fill),
                (1, 1, palette.snake_fill)
            ]
        );
    }

    #[test]
    fn body_hit_marks_only_the_head() {
        let palette = Palette::default();
        let mut recorder = Recorder::default();
        let dead = snake(&[(2, 1), (3, 1), (2, 1)], Some(DeathCause::SelfCollision));
        paint_frame(&mut recorder, None, Some(&dead), &palette);

        assert_eq!(
            fills(&recorder),
            [
                (3, 1, palette.snake_fill),
                (2, 1, palette.snake_fill),
                (2, 1, palette.snake_hit)
            ]
        );
    }

    #[test]
    fn wall_hit_marks_the_body_and_skips_the_head() {
        let palette = Palette::default();
        let mut recorder = Recorder::default();
        let dead = snake(&[(0, 4), (9, 4), (8, 4)], Some(DeathCause::WallCollision));
        paint_frame(&mut recorder, None, Some(&dead), &palette);

        assert_eq!(
            fills(&recorder),
            [(9, 4, palette.snake_hit), (8, 4, palette.snake_hit)]
        );
        assert!(!recorder
            .calls
            .iter()
            .any(|call| matches!(call, Call::Clear(_))));
    }

    #[test]
    fn headless_sink_accepts_everything() {
        let mut sink = Headless;
        let alive = snake(&[(0, 0)], None);
        sink.clear(Palette::default().background);
        paint_frame(&mut sink, Some(GridPosition::new(1, 0)), Some(&alive), &Palette::default());
    }
}
