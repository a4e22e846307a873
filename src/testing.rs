//! Deterministic stand-ins for the font backend and the image surface, so layout and
//! rendering can be tested without font files, plus one bundled font for the tests
//! that do need real glyphs.

use std::cell::Cell;

use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::font::{Font, FontRegistry, FontRole, TextBox, TextMetrics};
use crate::zone::Zone;
use crate::RenderError;

/// DejaVu Sans, for tests that need real glyph outlines and metrics
pub fn dejavu_sans() -> Font {
    Font::load(include_bytes!("../assets/DejaVuSans.ttf").to_vec()).expect("bundled font parses")
}

/// A monospace face: every character advances `size * 3 / 5` pixels and every
/// non-blank line is exactly `size` pixels tall
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonoFace {
    pub size: u32,
}

impl MonoFace {
    pub fn new(size: u32) -> MonoFace {
        MonoFace { size }
    }
}

impl TextMetrics for MonoFace {
    fn text_box(&self, text: &str) -> TextBox {
        if text.trim().is_empty() {
            return TextBox::default();
        }
        TextBox {
            left: 0,
            top: 0,
            right: text.chars().count() as i32 * self.advance('m'),
            bottom: self.size as i32,
        }
    }

    fn advance(&self, _ch: char) -> i32 {
        (self.size * 3 / 5) as i32
    }
}

/// Registry of [MonoFace]s. Can be told to fail for one role, and counts how many faces
/// it has handed out
#[derive(Debug, Default)]
pub struct MonoRegistry {
    pub failing: Option<FontRole>,
    pub bold: Option<FontRole>,
    pub faces_created: Cell<usize>,
}

impl MonoRegistry {
    pub fn failing(role: FontRole) -> MonoRegistry {
        MonoRegistry {
            failing: Some(role),
            ..Default::default()
        }
    }
}

impl FontRegistry for MonoRegistry {
    type Face = MonoFace;

    fn face(&self, role: FontRole, size: u32) -> Result<MonoFace, RenderError> {
        if self.failing == Some(role) {
            return Err(RenderError::FontRaster);
        }
        self.faces_created.set(self.faces_created.get() + 1);
        Ok(MonoFace::new(size))
    }

    fn emulates_bold(&self, role: FontRole) -> bool {
        self.bold == Some(role)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Text {
        text: String,
        position: (i32, i32),
        fill: Colour,
    },
    Outline {
        text: String,
        position: (i32, i32),
        width: i32,
    },
    Panel {
        rect: Zone,
        fill: Option<Colour>,
    },
}

/// Records what would have been painted
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl<F> Canvas<F> for RecordingCanvas {
    fn draw_text(&mut self, _face: &F, position: (i32, i32), text: &str, fill: Colour) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            position,
            fill,
        });
    }

    fn draw_text_outline(
        &mut self,
        _face: &F,
        position: (i32, i32),
        text: &str,
        width: i32,
        _colour: Colour,
    ) {
        self.calls.push(DrawCall::Outline {
            text: text.to_string(),
            position,
            width,
        });
    }

    fn rounded_rect(
        &mut self,
        rect: Zone,
        _radius: i32,
        fill: Option<Colour>,
        _outline: Option<(Colour, i32)>,
    ) {
        self.calls.push(DrawCall::Panel { rect, fill });
    }
}
