//! Template settings: fonts, spacing, panel colours and zone geometry, read from TOML.
//!
//! Every section has defaults, so a settings file only needs what differs, which in
//! practice is the template path, font files and zones.


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::colour::{colours, Colour};
use crate::font::{FontRegistry, FontRole};
use crate::layout::fit::{FitSettings, SearchStrategy, MIN_FONT_SIZE};
use crate::layout::TextStyle;
use crate::menu::Weekday;
use crate::zone::Zone;
use crate::RenderError;

/// Top-level settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background image the menu is drawn onto
    pub template: PathBuf,
    pub fonts: FontsSettings,
    pub layout: LayoutSettings,
    pub date_block: DateBlockSettings,
    pub warning: WarningSettings,
    pub zones: ZoneSettings,
}

/// Title and description fonts. A `[fonts.title]` table that is present replaces the
/// whole title default, so missing keys in it take [FontSettings]' field defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsSettings {
    pub title: FontSettings,
    pub description: FontSettings,
}

impl Default for FontsSettings {
    fn default() -> Self {
        Self {
            title: FontSettings {
                size: 20,
                uppercase: true,
                bold: true,
                ..FontSettings::default()
            },
            description: FontSettings {
                size: 16,
                ..FontSettings::default()
            },
        }
    }
}

/// One typeface and how text set in it is styled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub file: PathBuf,
    /// Base size in pixels per em; the fit search scales from here
    pub size: u32,
    pub uppercase: bool,
    /// Bold is emulated with a 1px stroke when the face is lighter than semi-bold
    pub bold: bool,
    /// Overrides the stroke chosen by `bold`
    pub stroke_width: Option<i32>,
    pub letter_spacing: i32,
    pub colour: Colour,
    pub stroke_colour: Colour,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            size: 16,
            uppercase: false,
            bold: false,
            stroke_width: None,
            letter_spacing: 0,
            colour: colours::BLACK,
            stroke_colour: colours::BLACK,
        }
    }
}

/// Spacing and fit parameters for dish zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub line_spacing: i32,
    #[serde(alias = "dish_spacing")]
    pub between_dishes_spacing: i32,
    /// Between a dish's title and its description
    pub title_gap: i32,
    pub padding: i32,
    pub safety_margin: i32,
    pub max_scale: u32,
    pub min_font_size: u32,
    pub search: SearchStrategy,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            line_spacing: 4,
            between_dishes_spacing: 10,
            title_gap: 1,
            padding: 2,
            safety_margin: 5,
            max_scale: 4,
            min_font_size: MIN_FONT_SIZE,
            search: SearchStrategy::Linear,
        }
    }
}

/// The outlined box holding the week's date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DateBlockSettings {
    pub border_colour: Colour,
    pub text_colour: Colour,
    pub border_radius: i32,
    pub border_width: i32,
}

impl Default for DateBlockSettings {
    fn default() -> Self {
        Self {
            border_colour: colours::ORANGE,
            text_colour: colours::BLACK,
            border_radius: 8,
            border_width: 2,
        }
    }
}

/// The notice panel drawn on days without lunches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningSettings {
    pub background: Colour,
    pub border_colour: Colour,
    pub text_colour: Colour,
    pub border_radius: i32,
    pub border_width: i32,
    /// Notice text size relative to the base title size
    pub font_size_multiplier: f32,
    pub line_spacing: i32,
    pub padding: i32,
    pub lines: Vec<String>,
    /// Prefixed to the date in the optional first line, e.g. `ДО 12.01.26`
    pub until_prefix: String,
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            background: colours::PEACH,
            border_colour: colours::BRICK,
            text_colour: colours::BRICK,
            border_radius: 18,
            border_width: 3,
            font_size_multiplier: 1.2,
            line_spacing: 8,
            padding: 20,
            lines: vec!["БИЗНЕС ЛАНЧЕЙ".to_owned(), "НЕ БУДЕТ".to_owned()],
            until_prefix: "ДО".to_owned(),
        }
    }
}

impl WarningSettings {
    /// The notice text, with the "until" line first when a date is known
    pub fn notice_lines(&self, until: Option<&str>) -> Vec<String> {
        until
            .map(|date| format!("{} {date}", self.until_prefix))
            .into_iter()
            .chain(self.lines.iter().cloned())
            .collect()
    }
}

/// Where things go on the template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    pub days: BTreeMap<Weekday, Zone>,
    pub date_block: Option<Zone>,
}

impl Settings {
    /// Read settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, RenderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RenderError::ResourceMissing {
                what: "settings",
                path: path.to_owned(),
            });
        }
        Settings::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml_str(toml: &str) -> Result<Settings, RenderError> {
        Ok(toml::from_str(toml)?)
    }

    /// Stroke for a role: the explicit setting, or 1px when the registry has to fake bold
    pub fn stroke_width<R: FontRegistry>(&self, registry: &R, role: FontRole) -> i32 {
        self.font(role)
            .stroke_width
            .unwrap_or_else(|| i32::from(registry.emulates_bold(role)))
    }

    pub fn font(&self, role: FontRole) -> &FontSettings {
        match role {
            FontRole::Title => &self.fonts.title,
            FontRole::Description => &self.fonts.description,
        }
    }

    pub fn text_style<R: FontRegistry>(&self, registry: &R, role: FontRole) -> TextStyle {
        let font = self.font(role);
        TextStyle {
            colour: font.colour,
            line_spacing: self.layout.line_spacing,
            letter_spacing: font.letter_spacing,
            stroke_width: self.stroke_width(registry, role),
            stroke_colour: font.stroke_colour,
        }
    }

    /// Solver parameters for dish zones
    pub fn fit_settings<R: FontRegistry>(&self, registry: &R) -> FitSettings {
        FitSettings {
            base_title_size: self.fonts.title.size,
            base_description_size: self.fonts.description.size,
            title: self.text_style(registry, FontRole::Title),
            description: self.text_style(registry, FontRole::Description),
            title_gap: self.layout.title_gap,
            block_spacing: self.layout.between_dishes_spacing,
            padding: self.layout.padding,
            safety_margin: self.layout.safety_margin,
            max_scale: self.layout.max_scale,
            min_size: self.layout.min_font_size,
            search: self.layout.search,
        }
    }

    /// Pixel size of the notice text, truncated
    pub fn warning_font_size(&self) -> u32 {
        (self.fonts.title.size as f32 * self.warning.font_size_multiplier) as u32
    }
}
