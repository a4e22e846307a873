use crate::canvas::Canvas;
use crate::colour::{colours, Colour};
use crate::font::{Styled, TextMetrics};

/// How a block of lines is painted: colour, spacing between lines, tracking between
/// characters, and an optional stroke to fake a bold weight
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub colour: Colour,
    pub line_spacing: i32,
    pub letter_spacing: i32,
    pub stroke_width: i32,
    pub stroke_colour: Colour,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            colour: colours::BLACK,
            line_spacing: 0,
            letter_spacing: 0,
            stroke_width: 0,
            stroke_colour: colours::BLACK,
        }
    }
}

impl TextStyle {
    /// Wrap `face` so it measures text the way this style paints it
    pub fn metrics<F: TextMetrics>(&self, face: F) -> Styled<F> {
        Styled::new(face, self.letter_spacing.max(0), self.stroke_width.max(0))
    }
}

/// Draws already-wrapped `lines` left-aligned, top to bottom, starting at `origin`.
///
/// Each line is placed so that its ink, stroke included, starts exactly at the pen
/// position, and the pen then advances by the line's measured height (as measured by
/// [TextStyle::metrics], so strokes and tracking count) plus the style's line spacing
/// between lines. Returns the total height drawn, which equals
/// [`text_height`](crate::layout::text_height) over the same styled metrics, and no
/// ink falls below `origin.1` plus that height.
pub fn draw_lines<F, C, S>(
    canvas: &mut C,
    face: &F,
    lines: &[S],
    origin: (i32, i32),
    style: &TextStyle,
) -> i32
where
    F: TextMetrics,
    C: Canvas<F> + ?Sized,
    S: AsRef<str>,
{
    let metrics = style.metrics(face);
    let (x, mut y) = origin;

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if i > 0 {
            y += style.line_spacing;
        }
        let ink = metrics.text_box(line);
        // glyph origins sit on the ascender line, ink starts `ink.top` below it
        draw_line(canvas, face, (x - ink.left, y - ink.top), line, style);
        y += ink.height();
    }

    y - origin.1
}

fn draw_line<F, C>(canvas: &mut C, face: &F, position: (i32, i32), line: &str, style: &TextStyle)
where
    F: TextMetrics,
    C: Canvas<F> + ?Sized,
{
    let (mut x, y) = position;

    if style.letter_spacing <= 0 {
        paint(canvas, face, (x, y), line, style);
        return;
    }

    let mut buf = [0u8; 4];
    for ch in line.chars() {
        if !ch.is_whitespace() {
            paint(canvas, face, (x, y), ch.encode_utf8(&mut buf), style);
            x += face.advance(ch) + style.letter_spacing;
        } else {
            x += face.advance(ch);
        }
    }
}

fn paint<F, C>(canvas: &mut C, face: &F, position: (i32, i32), text: &str, style: &TextStyle)
where
    C: Canvas<F> + ?Sized,
{
    if style.stroke_width > 0 {
        canvas.draw_text_outline(face, position, text, style.stroke_width, style.stroke_colour);
    }
    canvas.draw_text(face, position, text, style.colour);
}
