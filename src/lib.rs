mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// Utility functions and structures to wrap, fit and draw text inside zones
pub mod layout;

mod menu;
pub use menu::*;

mod renderer;
pub use renderer::*;

pub mod settings;

mod zone;
pub use zone::*;

#[cfg(test)]
mod testing;

/// Re-export the image crate, mostly for working with [RenderOutput::image]
pub use image;
