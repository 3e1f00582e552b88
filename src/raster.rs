use crate::config::PlotConfig;
use crate::errors::PlotError;
use crate::mapper::{Point, Viewport};
use crate::plot::{assemble, DrawingPrimitive};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const CURVE: char = '*';

/// Character grid where one cell stands for one pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    cells: Vec<String>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Raster {
            width,
            height,
            cells: vec![" ".to_string(); width * height],
        }
    }

    pub fn render(primitives: &[DrawingPrimitive], width: usize, height: usize) -> Self {
        let mut raster = Raster::new(width, height);
        for primitive in primitives {
            match primitive {
                DrawingPrimitive::Line(a, b) => raster.draw_line(*a, *b, None),
                DrawingPrimitive::Polyline(points) => {
                    if let [only] = points.as_slice() {
                        raster.put(cell(only.x), cell(only.y), CURVE);
                    }
                    for pair in points.windows(2) {
                        raster.draw_line(pair[0], pair[1], Some(CURVE));
                    }
                }
                DrawingPrimitive::Text(anchor, text) => raster.write_text(*anchor, text),
            }
        }
        raster
    }

    /// Plots `expression` straight onto a `width` x `height` character grid.
    pub fn from_expression(
        expression: &str,
        x_min: f64,
        x_max: f64,
        width: usize,
        height: usize,
        config: &PlotConfig,
    ) -> Result<Self, PlotError> {
        let viewport = Viewport::new(width as u32, height as u32);
        let primitives = assemble(expression, x_min, x_max, viewport, config)?;
        Ok(Raster::render(&primitives, width, height))
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&str> {
        if column < self.width && row < self.height {
            Some(&self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// Rows with trailing blanks removed.
    pub fn lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.concat().trim_end().to_string())
            .collect()
    }

    fn put(&mut self, column: i64, row: i64, glyph: char) {
        if column < 0 || row < 0 || column as usize >= self.width || row as usize >= self.height {
            return;
        }
        let slot = &mut self.cells[row as usize * self.width + column as usize];
        let merged = match (slot.as_str(), glyph) {
            ("-", '|') | ("|", '-') | ("+", '-') | ("+", '|') | (_, '+') => '+',
            _ => glyph,
        };
        *slot = merged.to_string();
    }

    /// Bresenham walk between two pixel positions.
    fn draw_line(&mut self, a: Point, b: Point, glyph: Option<char>) {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return;
        }
        let (mut x0, mut y0) = (clip(cell(a.x)), clip(cell(a.y)));
        let (x1, y1) = (clip(cell(b.x)), clip(cell(b.y)));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let glyph = glyph.unwrap_or(if dx == 0 && dy == 0 {
            '+'
        } else if dx >= -dy {
            '-'
        } else {
            '|'
        });

        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, glyph);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn write_text(&mut self, anchor: Point, text: &str) {
        if !(anchor.x.is_finite() && anchor.y.is_finite()) {
            return;
        }
        let row = cell(anchor.y);
        let mut column = cell(anchor.x);
        if row < 0 || row as usize >= self.height {
            return;
        }

        for grapheme in text.graphemes(true) {
            let width = grapheme.width() as i64;
            if width == 0 {
                continue;
            }
            if column >= 0 && (column + width) as usize <= self.width {
                let start = row as usize * self.width + column as usize;
                self.cells[start] = grapheme.to_string();
                // Wide graphemes cover the following cells.
                for offset in 1..width as usize {
                    self.cells[start + offset] = String::new();
                }
            }
            column += width;
        }
    }
}

impl fmt::Display for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

fn cell(v: f64) -> i64 {
    v.floor() as i64
}

// Keeps far-off extrapolated axes from making the walk huge.
fn clip(v: i64) -> i64 {
    v.clamp(-1_000_000, 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> DrawingPrimitive {
        DrawingPrimitive::Line(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn axes_cross() {
        let raster = Raster::render(&[line(0.0, 2.0, 5.0, 2.0), line(2.0, 0.0, 2.0, 5.0)], 5, 4);
        assert_eq!(raster.lines(), ["  |", "  |", "--+--", "  |"]);
    }

    #[test]
    fn zero_length_ticks_mark_the_axis() {
        let raster = Raster::render(&[line(0.0, 0.0, 4.0, 0.0), line(2.0, 0.0, 2.0, 0.0)], 4, 1);
        assert_eq!(raster.lines(), ["--+-"]);
    }

    #[test]
    fn polyline_and_gap() {
        let primitives = [
            DrawingPrimitive::Polyline(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]),
            DrawingPrimitive::Polyline(vec![Point::new(4.5, 1.2)]),
        ];
        let raster = Raster::render(&primitives, 6, 2);
        assert_eq!(raster.lines(), ["***", "    *"]);
        assert_eq!(raster.cell(3, 0), Some(" "));
        assert_eq!(raster.cell(6, 0), None);
    }

    #[test]
    fn text_is_clipped() {
        let primitives = [
            DrawingPrimitive::Text(Point::new(1.0, 0.0), "-10".to_string()),
            DrawingPrimitive::Text(Point::new(3.0, 1.0), "12345".to_string()),
            DrawingPrimitive::Text(Point::new(0.0, 5.0), "gone".to_string()),
        ];
        let raster = Raster::render(&primitives, 6, 2);
        assert_eq!(raster.to_string(), " -10\n   123");
    }

    #[test]
    fn wide_graphemes_take_two_cells() {
        let primitives = [DrawingPrimitive::Text(Point::new(0.0, 0.0), "日x".to_string())];
        let raster = Raster::render(&primitives, 4, 1);
        assert_eq!(raster.lines(), ["日x"]);
        assert_eq!(raster.cell(1, 0), Some(""));
        assert_eq!(raster.cell(2, 0), Some("x"));
    }

    #[test]
    fn off_screen_lines_are_ignored() {
        let raster = Raster::render(&[line(-50.0, 1.0, -10.0, 1.0), line(0.0, f64::NAN, 3.0, 0.0)], 3, 2);
        assert_eq!(raster.lines(), ["", ""]);
    }
}
