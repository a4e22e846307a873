//! Chooses the largest font size at which a stack of title/description blocks fits in
//! a zone.
//!
//! Candidate title sizes run from `max_scale × base_title_size` down to the minimum
//! size; the description size follows the configured title/description ratio. The
//! first (largest) candidate whose stacked height stays within the zone's budget wins.
//! The winner is then measured again the way it will actually be drawn (with strokes),
//! and shrunk in a few proportional steps if that comes out taller than the budget.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::font::{FontRegistry, FontRole, TextMetrics};
use crate::layout::{text_height, wrap_text, Margins, TextStyle};
use crate::menu::TextBlock;
use crate::zone::Zone;
use crate::RenderError;

/// Smallest font size the solver will ever choose, for titles and descriptions alike
pub const MIN_FONT_SIZE: u32 = 8;

/// Upper bound on corrective shrink steps after the search
pub const MAX_CORRECTIONS: usize = 10;

const CORRECTION_FACTOR: f32 = 0.95;

/// How the candidate range is walked. Both return the largest fitting size; bisection
/// needs fewer measurements but assumes fit only gets easier as sizes shrink
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    Linear,
    Bisect,
}

/// Everything the solver needs besides the blocks and the zone
#[derive(Debug, Clone, PartialEq)]
pub struct FitSettings {
    pub base_title_size: u32,
    pub base_description_size: u32,
    pub title: TextStyle,
    pub description: TextStyle,
    /// Gap between a block's title and its description
    pub title_gap: i32,
    /// Gap between consecutive blocks, not applied after the last one
    pub block_spacing: i32,
    /// Applied on every side of the zone
    pub padding: i32,
    /// Kept free at the bottom of the zone to absorb measurement/draw differences
    pub safety_margin: i32,
    /// The largest candidate title size is `max_scale × base_title_size`
    pub max_scale: u32,
    pub min_size: u32,
    pub search: SearchStrategy,
}

impl Default for FitSettings {
    fn default() -> Self {
        FitSettings {
            base_title_size: 20,
            base_description_size: 16,
            title: TextStyle::default(),
            description: TextStyle::default(),
            title_gap: 1,
            block_spacing: 10,
            padding: 2,
            safety_margin: 5,
            max_scale: 4,
            min_size: MIN_FONT_SIZE,
            search: SearchStrategy::Linear,
        }
    }
}

impl FitSettings {
    pub fn max_size(&self) -> u32 {
        (self.base_title_size * self.max_scale).max(self.min_size)
    }

    /// Description size that goes with a title size: the base ratio applied with
    /// truncating integer arithmetic, never below the minimum
    pub fn description_size_for(&self, title_size: u32) -> u32 {
        let scaled = if self.base_title_size == 0 {
            self.base_description_size
        } else {
            title_size * self.base_description_size / self.base_title_size
        };
        scaled.max(self.min_size)
    }

    /// The content area of `zone` once padding is removed
    pub fn content_area(&self, zone: &Zone) -> Zone {
        zone.inset(&Margins::all(self.padding))
    }

    /// Height the stacked blocks may take up in `zone`
    pub fn height_budget(&self, zone: &Zone) -> i32 {
        self.content_area(zone).max_height - self.safety_margin
    }
}

/// One block, wrapped at the chosen sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub title_lines: Vec<String>,
    pub description_lines: Vec<String>,
    pub title_height: i32,
    pub description_height: i32,
}

/// The solver's answer for one zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub title_size: u32,
    pub description_size: u32,
    pub blocks: Vec<BlockLayout>,
    /// Stacked height of all blocks as they will be drawn
    pub total_height: i32,
    /// Whether `total_height` is within the zone's budget. `false` means the text will
    /// spill over the zone: even the smallest size, or every correction, was too big
    pub fits: bool,
    /// Corrective shrink steps taken after the search
    pub corrections: usize,
}

/// Which faces a measurement is made with
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pass {
    /// Plain faces with tracking, as the search has always measured
    Search,
    /// Exactly as drawn, strokes included
    Draw,
}

/// Finds the largest font sizes at which `blocks` stack inside `zone`.
///
/// An empty block list trivially fits at the largest candidate. If no candidate fits,
/// the minimum size is used and the result reports `fits: false`. Errors only come from
/// the registry failing to produce a face.
pub fn solve<R: FontRegistry>(
    registry: &R,
    blocks: &[TextBlock],
    zone: &Zone,
    settings: &FitSettings,
) -> Result<LayoutResult, RenderError> {
    let max_size = settings.max_size();
    if blocks.is_empty() {
        return Ok(LayoutResult {
            title_size: max_size,
            description_size: settings.description_size_for(max_size),
            blocks: Vec::new(),
            total_height: 0,
            fits: true,
            corrections: 0,
        });
    }

    let area = settings.content_area(zone);
    let budget = settings.height_budget(zone);

    let found = match settings.search {
        SearchStrategy::Linear => search_linear(registry, blocks, area.width, budget, settings)?,
        SearchStrategy::Bisect => search_bisect(registry, blocks, area.width, budget, settings)?,
    };
    let mut title_size = match found {
        Some(size) => {
            debug!("largest fitting title size is {size} (budget {budget}px)");
            size
        }
        None => {
            warn!(
                "{} blocks do not fit in {}x{} even at {}px, text will overflow",
                blocks.len(),
                zone.width,
                zone.max_height,
                settings.min_size
            );
            settings.min_size
        }
    };
    let mut description_size = settings.description_size_for(title_size);

    let mut layout = lay_out(
        registry,
        blocks,
        area.width,
        title_size,
        description_size,
        settings,
        Pass::Draw,
    )?;

    let mut corrections = 0;
    while layout.total_height > budget && corrections < MAX_CORRECTIONS {
        let Some((title, description)) = shrink_sizes(
            title_size,
            description_size,
            layout.total_height,
            budget,
            settings.min_size,
        ) else {
            break;
        };
        debug!(
            "drawn height {} exceeds budget {budget}, shrinking to {title}/{description}",
            layout.total_height
        );
        title_size = title;
        description_size = description;
        layout = lay_out(
            registry,
            blocks,
            area.width,
            title_size,
            description_size,
            settings,
            Pass::Draw,
        )?;
        corrections += 1;
    }

    layout.fits = layout.total_height <= budget;
    layout.corrections = corrections;
    if !layout.fits && found.is_some() {
        warn!(
            "still {}px over budget after {corrections} corrections, drawing at {title_size}/{description_size}",
            layout.total_height - budget
        );
    }

    Ok(layout)
}

/// One corrective step: scale both sizes by `budget / total × 0.95`, flooring and
/// clamping to `min_size`. Returns `None` when the sizes cannot get any smaller.
pub fn shrink_sizes(
    title_size: u32,
    description_size: u32,
    total_height: i32,
    budget: i32,
    min_size: u32,
) -> Option<(u32, u32)> {
    if total_height <= 0 {
        return None;
    }
    let ratio = budget.max(0) as f32 / total_height as f32 * CORRECTION_FACTOR;
    let scale = |size: u32| ((size as f32 * ratio).floor() as u32).max(min_size);

    let next = (scale(title_size), scale(description_size));
    if next.0 >= title_size && next.1 >= description_size {
        None
    } else {
        Some((next.0.min(title_size), next.1.min(description_size)))
    }
}

fn search_linear<R: FontRegistry>(
    registry: &R,
    blocks: &[TextBlock],
    width: i32,
    budget: i32,
    settings: &FitSettings,
) -> Result<Option<u32>, RenderError> {
    for size in (settings.min_size..=settings.max_size()).rev() {
        if fits_at(registry, blocks, width, budget, size, settings)? {
            return Ok(Some(size));
        }
    }
    Ok(None)
}

fn search_bisect<R: FontRegistry>(
    registry: &R,
    blocks: &[TextBlock],
    width: i32,
    budget: i32,
    settings: &FitSettings,
) -> Result<Option<u32>, RenderError> {
    let (mut lo, mut hi) = (settings.min_size, settings.max_size());
    if !fits_at(registry, blocks, width, budget, lo, settings)? {
        return Ok(None);
    }
    // invariant: `lo` fits, everything above `hi` does not
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if fits_at(registry, blocks, width, budget, mid, settings)? {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(Some(lo))
}

/// Whether every block fits at `title_size`, giving up as soon as the running height
/// passes the budget
fn fits_at<R: FontRegistry>(
    registry: &R,
    blocks: &[TextBlock],
    width: i32,
    budget: i32,
    title_size: u32,
    settings: &FitSettings,
) -> Result<bool, RenderError> {
    let faces = Faces::new(registry, title_size, settings, Pass::Search)?;
    let mut total = 0;
    for (i, block) in blocks.iter().enumerate() {
        total += faces.lay_out_block(block, width, settings).height(settings);
        if i + 1 < blocks.len() {
            total += settings.block_spacing;
        }
        if total > budget {
            return Ok(false);
        }
    }
    Ok(true)
}

fn lay_out<R: FontRegistry>(
    registry: &R,
    blocks: &[TextBlock],
    width: i32,
    title_size: u32,
    description_size: u32,
    settings: &FitSettings,
    pass: Pass,
) -> Result<LayoutResult, RenderError> {
    let faces = Faces::with_sizes(registry, title_size, description_size, settings, pass)?;
    let blocks: Vec<BlockLayout> = blocks
        .iter()
        .map(|block| faces.lay_out_block(block, width, settings))
        .collect();
    let total_height = stacked_height(&blocks, settings);

    Ok(LayoutResult {
        title_size,
        description_size,
        blocks,
        total_height,
        fits: true,
        corrections: 0,
    })
}

/// Height of blocks stacked with the configured spacing between them
pub fn stacked_height(blocks: &[BlockLayout], settings: &FitSettings) -> i32 {
    let spacing = settings.block_spacing * (blocks.len() as i32 - 1).max(0);
    blocks.iter().map(|b| b.height(settings)).sum::<i32>() + spacing
}

impl BlockLayout {
    /// Title, gap and description; the spacing to the next block is not included
    pub fn height(&self, settings: &FitSettings) -> i32 {
        self.title_height + settings.title_gap + self.description_height
    }
}

/// The title and description faces for one candidate, dropped once it is judged
struct Faces<F> {
    title: F,
    description: F,
    title_style: TextStyle,
    description_style: TextStyle,
}

impl<F: TextMetrics> Faces<F> {
    fn new<R>(registry: &R, title_size: u32, settings: &FitSettings, pass: Pass) -> Result<Self, RenderError>
    where
        R: FontRegistry<Face = F>,
    {
        let description_size = settings.description_size_for(title_size);
        Faces::with_sizes(registry, title_size, description_size, settings, pass)
    }

    fn with_sizes<R>(
        registry: &R,
        title_size: u32,
        description_size: u32,
        settings: &FitSettings,
        pass: Pass,
    ) -> Result<Self, RenderError>
    where
        R: FontRegistry<Face = F>,
    {
        let (mut title_style, mut description_style) = (settings.title, settings.description);
        if pass == Pass::Search {
            title_style.stroke_width = 0;
            description_style.stroke_width = 0;
        }

        Ok(Faces {
            title: registry.face(FontRole::Title, title_size)?,
            description: registry.face(FontRole::Description, description_size)?,
            title_style,
            description_style,
        })
    }

    fn lay_out_block(&self, block: &TextBlock, width: i32, settings: &FitSettings) -> BlockLayout {
        let title = self.title_style.metrics(&self.title);
        let description = self.description_style.metrics(&self.description);

        let title_lines = wrap_text(&block.title, &title, width);
        let description_lines = wrap_text(&block.description, &description, width);
        let title_height = text_height(&title_lines, &title, settings.title.line_spacing);
        let description_height =
            text_height(&description_lines, &description, settings.description.line_spacing);

        BlockLayout {
            title_lines,
            description_lines,
            title_height,
            description_height,
        }
    }
}
