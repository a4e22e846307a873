use std::path::Path;

use owned_ttf_parser::Face;
use rusttype::{point, PositionedGlyph, Scale};

use crate::settings::FontsSettings;
use crate::RenderError;

/// A parsed font object. Fonts can be TTF or OTF fonts; the face is parsed once for
/// its metadata and metrics, then the bytes are handed to the rasteriser.
///
/// Fonts are not sized. Ask for a [ScaledFont] with [Font::at_size] to measure and
/// draw text
pub struct Font {
    family: Option<String>,
    weight: u16,
    /// Ascender to descender, in ems
    em_height: f32,
    raster: rusttype::Font<'static>,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        let (family, weight, em_height) = {
            let face = Face::parse(&bytes, 0)?;
            let extent = face.ascender() as f32 - face.descender() as f32;
            (
                family_name(&face),
                face.weight().to_number(),
                extent / face.units_per_em() as f32,
            )
        };
        let raster = rusttype::Font::try_from_vec(bytes).ok_or(RenderError::FontRaster)?;

        Ok(Font {
            family,
            weight,
            em_height,
            raster,
        })
    }

    /// Load a font file from disk. A missing file is reported as
    /// [RenderError::ResourceMissing] rather than a bare I/O error
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Font, RenderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RenderError::ResourceMissing {
                what: "font",
                path: path.to_owned(),
            });
        }

        Font::load(std::fs::read(path)?)
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Obtain the weight of the font. Numerical values generally map as follows:
    ///
    /// * 100: Thin (Hairline)
    /// * 400: Normal
    /// * 700: Bold
    /// * 900: Black (Heavy)
    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// Whether the face is already semi-bold or heavier, so that bold does not need
    /// to be emulated with a stroke
    pub fn is_bold(&self) -> bool {
        self.weight() >= 600
    }

    /// Size the font so that one em is `size` pixels, the same convention the template
    /// settings use
    pub fn at_size(&self, size: u32) -> ScaledFont {
        ScaledFont {
            font: self.raster.clone(),
            scale: Scale::uniform(size as f32 * self.em_height),
        }
    }
}

fn family_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
        .and_then(|name| name.to_string())
}

/// A font at one pixel size. Cheap to clone; the solver creates one per candidate size
/// and drops it as soon as the candidate is judged
#[derive(Clone)]
pub struct ScaledFont {
    font: rusttype::Font<'static>,
    scale: Scale,
}

impl ScaledFont {
    /// Position the glyphs of `text` with the ascender line at `origin`
    pub(crate) fn glyphs(&self, text: &str, origin: (i32, i32)) -> Vec<PositionedGlyph<'static>> {
        let ascent = self.font.v_metrics(self.scale).ascent;
        self.font
            .layout(text, self.scale, point(origin.0 as f32, origin.1 as f32 + ascent))
            .collect()
    }
}

/// The pixel bounds of drawn text, relative to the drawing origin (the left end of the
/// ascender line). `top` is usually positive: ink starts below the ascender
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    fn union(self, other: TextBox) -> TextBox {
        TextBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    fn grow(self, by: i32) -> TextBox {
        TextBox {
            left: self.left - by,
            top: self.top - by,
            right: self.right + by,
            bottom: self.bottom + by,
        }
    }
}

/// Measures text for one font at one size. This is the only primitive layout uses, so
/// every width and height the wrapper, the height calculator, the solver and the
/// drawer see comes from the same place
pub trait TextMetrics {
    /// Pixel bounding box of `text` drawn at the origin. Empty or blank text yields an
    /// empty box
    fn text_box(&self, text: &str) -> TextBox;

    /// Horizontal advance of a single character, rounded to whole pixels
    fn advance(&self, ch: char) -> i32;

    fn text_width(&self, text: &str) -> i32 {
        self.text_box(text).width()
    }

    fn line_height(&self, text: &str) -> i32 {
        self.text_box(text).height()
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn text_box(&self, text: &str) -> TextBox {
        (**self).text_box(text)
    }

    fn advance(&self, ch: char) -> i32 {
        (**self).advance(ch)
    }
}

impl TextMetrics for ScaledFont {
    fn text_box(&self, text: &str) -> TextBox {
        self.glyphs(text, (0, 0))
            .iter()
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .map(|bb| TextBox {
                left: bb.min.x,
                top: bb.min.y,
                right: bb.max.x,
                bottom: bb.max.y,
            })
            .reduce(TextBox::union)
            .unwrap_or_default()
    }

    fn advance(&self, ch: char) -> i32 {
        self.font
            .glyph(ch)
            .scaled(self.scale)
            .h_metrics()
            .advance_width
            .round() as i32
    }
}

/// Measures text the way [`draw_lines`](crate::layout::draw_lines) paints it: letter
/// spacing widens the box after every non-blank character but the last, and a stroke
/// grows it by the stroke width on every side
#[derive(Debug, Clone, Copy)]
pub struct Styled<F> {
    pub face: F,
    pub letter_spacing: i32,
    pub stroke_width: i32,
}

impl<F: TextMetrics> Styled<F> {
    pub fn new(face: F, letter_spacing: i32, stroke_width: i32) -> Styled<F> {
        Styled {
            face,
            letter_spacing,
            stroke_width,
        }
    }
}

impl<F: TextMetrics> TextMetrics for Styled<F> {
    fn text_box(&self, text: &str) -> TextBox {
        let mut bbox = self.face.text_box(text);
        if bbox.is_empty() {
            return bbox;
        }

        if self.letter_spacing > 0 {
            let gaps = text
                .chars()
                .rev()
                .skip(1)
                .filter(|ch| !ch.is_whitespace())
                .count() as i32;
            bbox.right += gaps * self.letter_spacing;
        }

        bbox.grow(self.stroke_width.max(0))
    }

    fn advance(&self, ch: char) -> i32 {
        if self.letter_spacing > 0 && !ch.is_whitespace() {
            self.face.advance(ch) + self.letter_spacing
        } else {
            self.face.advance(ch)
        }
    }
}

/// Which of the template's two typefaces a piece of text is set in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontRole {
    Title,
    Description,
}

/// Hands out sized faces to the solver, the drawer and the zone renderer. A registry is
/// built for one render and passed down explicitly
pub trait FontRegistry {
    type Face: TextMetrics;

    fn face(&self, role: FontRole, size: u32) -> Result<Self::Face, RenderError>;

    /// Whether bold was asked for in a role whose face is not bold, in which case the
    /// renderer strokes the glyphs instead
    fn emulates_bold(&self, _role: FontRole) -> bool {
        false
    }
}

/// The fonts of one render, loaded from the paths in [FontsSettings]
pub struct FontSet {
    title: Font,
    description: Font,
    title_bold: bool,
    description_bold: bool,
}

impl FontSet {
    pub fn new(title: Font, description: Font) -> FontSet {
        FontSet {
            title,
            description,
            title_bold: false,
            description_bold: false,
        }
    }

    /// Request bold for a role; it is emulated when the face itself is lighter
    pub fn with_bold(mut self, role: FontRole, bold: bool) -> FontSet {
        match role {
            FontRole::Title => self.title_bold = bold,
            FontRole::Description => self.description_bold = bold,
        }
        self
    }

    pub fn load(settings: &FontsSettings) -> Result<FontSet, RenderError> {
        let title = Font::from_path(&settings.title.file)?;
        let description = Font::from_path(&settings.description.file)?;
        log::debug!(
            "loaded fonts: title {:?} (weight {}), description {:?} (weight {})",
            title.family(),
            title.weight(),
            description.family(),
            description.weight()
        );

        Ok(FontSet::new(title, description)
            .with_bold(FontRole::Title, settings.title.bold)
            .with_bold(FontRole::Description, settings.description.bold))
    }

    pub fn font(&self, role: FontRole) -> &Font {
        match role {
            FontRole::Title => &self.title,
            FontRole::Description => &self.description,
        }
    }
}

impl FontRegistry for FontSet {
    type Face = ScaledFont;

    fn face(&self, role: FontRole, size: u32) -> Result<ScaledFont, RenderError> {
        Ok(self.font(role).at_size(size))
    }

    fn emulates_bold(&self, role: FontRole) -> bool {
        let requested = match role {
            FontRole::Title => self.title_bold,
            FontRole::Description => self.description_bold,
        };
        requested && !self.font(role).is_bold()
    }
}
