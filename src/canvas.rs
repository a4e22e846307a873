use image::{Rgba, RgbaImage};

use crate::colour::Colour;
use crate::font::ScaledFont;
use crate::zone::Zone;

/// A surface that text and panels are painted onto, in zone order, top to bottom.
/// `F` is the face type the canvas knows how to rasterise
pub trait Canvas<F> {
    /// Paint `text` with the left end of its ascender line at `position`
    fn draw_text(&mut self, face: &F, position: (i32, i32), text: &str, fill: Colour);

    /// Paint a ring of `width` pixels around the glyphs of `text`, to go underneath a
    /// [Canvas::draw_text] of the same text at the same position
    fn draw_text_outline(
        &mut self,
        face: &F,
        position: (i32, i32),
        text: &str,
        width: i32,
        colour: Colour,
    );

    /// Paint a rectangle with rounded corners, optionally filled and optionally outlined
    /// with `(colour, width)`
    fn rounded_rect(
        &mut self,
        rect: Zone,
        radius: i32,
        fill: Option<Colour>,
        outline: Option<(Colour, i32)>,
    );
}

/// A canvas backed by an RGBA image buffer, usually the menu template
pub struct RgbaCanvas {
    pub image: RgbaImage,
}

impl RgbaCanvas {
    pub fn new(image: RgbaImage) -> RgbaCanvas {
        RgbaCanvas { image }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Alpha-blend `colour` onto the pixel at `(x, y)` with the given coverage; pixels
    /// outside the image are ignored
    fn blend(&mut self, x: i32, y: i32, colour: Colour, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let inv = 1.0 - coverage;
        let Rgba([r, g, b, _]) = *dst;
        *dst = Rgba([
            (colour.r as f32 * coverage + r as f32 * inv).round() as u8,
            (colour.g as f32 * coverage + g as f32 * inv).round() as u8,
            (colour.b as f32 * coverage + b as f32 * inv).round() as u8,
            255,
        ]);
    }
}

impl Canvas<ScaledFont> for RgbaCanvas {
    fn draw_text(&mut self, face: &ScaledFont, position: (i32, i32), text: &str, fill: Colour) {
        for glyph in face.glyphs(text, position) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    self.blend(gx as i32 + bb.min.x, gy as i32 + bb.min.y, fill, v);
                });
            }
        }
    }

    fn draw_text_outline(
        &mut self,
        face: &ScaledFont,
        position: (i32, i32),
        text: &str,
        width: i32,
        colour: Colour,
    ) {
        if width <= 0 {
            return;
        }
        // every offset inside a disc of the stroke radius
        for dy in -width..=width {
            for dx in -width..=width {
                if (dx, dy) != (0, 0) && dx * dx + dy * dy <= width * width {
                    self.draw_text(face, (position.0 + dx, position.1 + dy), text, colour);
                }
            }
        }
    }

    fn rounded_rect(
        &mut self,
        rect: Zone,
        radius: i32,
        fill: Option<Colour>,
        outline: Option<(Colour, i32)>,
    ) {
        let (w, h) = (rect.width, rect.max_height);
        if w <= 0 || h <= 0 {
            return;
        }
        let radius = radius.clamp(0, w.min(h) / 2);
        let border = outline.map(|(_, width)| width.max(0)).unwrap_or(0);
        let inner_radius = (radius - border).max(0);

        for y in 0..h {
            for x in 0..w {
                if !rounded_rect_contains(x, y, w, h, radius) {
                    continue;
                }
                let in_border = border > 0
                    && !(x >= border
                        && y >= border
                        && rounded_rect_contains(
                            x - border,
                            y - border,
                            w - 2 * border,
                            h - 2 * border,
                            inner_radius,
                        ));
                let colour = match (in_border, outline, fill) {
                    (true, Some((colour, _)), _) => colour,
                    (false, _, Some(colour)) => colour,
                    _ => continue,
                };
                self.blend(rect.x + x, rect.y + y, colour, 1.0);
            }
        }
    }
}

/// Whether `(x, y)`, relative to the top-left corner, lies inside a `w` × `h` rectangle
/// whose corners are rounded with radius `r`
fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    if r <= 0 || (x >= r && x < w - r) || (y >= r && y < h - r) {
        return true;
    }
    let cx = if x < r { r - 1 } else { w - r };
    let cy = if y < r { r - 1 } else { h - r };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}
