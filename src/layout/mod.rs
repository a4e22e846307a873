//! Text layout: wrapping, measuring, fitting and drawing text inside zones.
//!
//! All measurements go through [`TextMetrics`](crate::TextMetrics), so wrapping,
//! block heights, the fit search and drawing agree on every pixel.
//!
//! - [`wrap_text`](crate::layout::wrap_text) - greedy word wrap, long words are never broken
//! - [`text_height`](crate::layout::text_height) - height of a wrapped block with line spacing
//! - [`fit::solve`](crate::layout::fit::solve) - largest font sizes at which a list of
//!   title/description blocks stacks inside a zone
//! - [`draw_lines`](crate::layout::draw_lines) - paint wrapped lines, with optional letter
//!   spacing and stroke
//!
//! # Example
//!
//! ```no_run
//! use menu_render::layout::{self, fit::FitSettings, TextStyle};
//! use menu_render::{Font, FontRole, FontSet, RgbaCanvas, TextBlock, Zone};
//!
//! let regular = Font::from_path("fonts/Inter-Regular.ttf").expect("can load font");
//! let bold = Font::from_path("fonts/Inter-Bold.ttf").expect("can load font");
//! let fonts = FontSet::new(bold, regular);
//!
//! let zone = Zone::new(40, 120, 400, 300);
//! let blocks = vec![TextBlock::new("БОРЩ", "говядина, свёкла, сметана")];
//! let settings = FitSettings::default();
//! let fitted = layout::fit::solve(&fonts, &blocks, &zone, &settings).expect("faces load");
//!
//! let mut canvas = RgbaCanvas::new(image::RgbaImage::new(800, 600));
//! let title = fonts.font(FontRole::Title).at_size(fitted.title_size);
//! let area = settings.content_area(&zone);
//! layout::draw_lines(&mut canvas, &title, &fitted.blocks[0].title_lines, (area.x, area.y), &settings.title);
//! ```

mod draw;
pub mod fit;
mod margins;
mod text;

pub use draw::*;
pub use margins::*;
pub use text::*;
