use std::path::PathBuf;

use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the template or encode the output
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The settings file is not valid TOML for [crate::settings::Settings]
    Config(#[from] toml::de::Error),

    /// A file the render depends on (template, font, settings) does not exist
    #[error("{what} not found: {}", .path.display())]
    ResourceMissing { what: &'static str, path: PathBuf },

    /// The font parsed but could not be handed to the rasteriser
    #[error("font could not be prepared for rasterisation")]
    FontRaster,

    #[error("invalid colour `{0}`, expected #RRGGBB")]
    InvalidColour(String),
}
