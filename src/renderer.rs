use std::path::Path;

use derive_more::Display;
use image::{ImageFormat, RgbaImage};
use log::{debug, error};

use crate::canvas::{Canvas, RgbaCanvas};
use crate::font::{FontRegistry, FontRole, FontSet, TextMetrics};
use crate::layout::{self, fit, Margins, TextStyle};
use crate::menu::{DayMenu, TextBlock, WeekMenu, Weekday};
use crate::settings::Settings;
use crate::zone::Zone;
use crate::RenderError;

/// Identifies a zone in a [ZoneReport]
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZoneId {
    #[display("date block")]
    DateRange,
    #[display("{_0}")]
    Day(Weekday),
}

/// What happened to one zone during a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneOutcome {
    /// No data for the zone, or no zone for the data
    Skipped,
    /// The date range was drawn
    DateRange,
    /// The "no lunches" notice was drawn
    Notice,
    /// Dishes were fitted and drawn. `fits` is false when the text spills out of the zone
    Fitted {
        title_size: u32,
        description_size: u32,
        fits: bool,
    },
    /// Drawing this zone failed; the rest of the image was still rendered
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReport {
    pub zone: ZoneId,
    pub outcome: ZoneOutcome,
}

/// A finished menu image plus what happened in each zone
pub struct RenderOutput {
    pub image: RgbaImage,
    pub zones: Vec<ZoneReport>,
}

impl RenderOutput {
    /// Write the image as PNG, creating the parent directory if needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Zones whose text did not fit or which failed to draw
    pub fn problems(&self) -> impl Iterator<Item = &ZoneReport> {
        self.zones.iter().filter(|report| {
            matches!(
                report.outcome,
                ZoneOutcome::Failed(_) | ZoneOutcome::Fitted { fits: false, .. }
            )
        })
    }
}

/// Draws a [WeekMenu] onto the template described by [Settings]
pub struct MenuRenderer {
    settings: Settings,
}

impl MenuRenderer {
    pub fn new(settings: Settings) -> MenuRenderer {
        MenuRenderer { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load the template and fonts, then draw every zone. A missing template or font
    /// fails the whole render; anything that goes wrong inside a zone is only reported
    /// in [RenderOutput::zones]
    pub fn render(&self, menu: &WeekMenu) -> Result<RenderOutput, RenderError> {
        let template = &self.settings.template;
        if !template.is_file() {
            return Err(RenderError::ResourceMissing {
                what: "template",
                path: template.clone(),
            });
        }
        let background = image::open(template)?.to_rgba8();
        let fonts = FontSet::load(&self.settings.fonts)?;

        let mut canvas = RgbaCanvas::new(background);
        let zones = self.render_onto(&mut canvas, &fonts, menu);

        Ok(RenderOutput {
            image: canvas.into_image(),
            zones,
        })
    }

    /// Draw the date block then each weekday, in order, onto `canvas`
    pub fn render_onto<R, C>(&self, canvas: &mut C, registry: &R, menu: &WeekMenu) -> Vec<ZoneReport>
    where
        R: FontRegistry,
        C: Canvas<R::Face>,
    {
        let mut reports = Vec::with_capacity(Weekday::ALL.len() + 1);

        if let Some(range) = &menu.date_range {
            let outcome = match &self.settings.zones.date_block {
                Some(zone) => self.draw_date_block(canvas, registry, range, zone),
                None => Ok(ZoneOutcome::Skipped),
            };
            reports.push(report(ZoneId::DateRange, outcome));
        }

        for day in Weekday::ALL {
            let outcome = match (self.settings.zones.days.get(&day), menu.day(day)) {
                (Some(zone), Some(DayMenu::Unavailable { until })) => {
                    self.draw_notice(canvas, registry, until.as_deref(), zone)
                }
                (Some(zone), Some(DayMenu::Normal(dishes))) if !dishes.is_empty() => {
                    self.draw_dishes(canvas, registry, dishes, zone)
                }
                _ => Ok(ZoneOutcome::Skipped),
            };
            reports.push(report(ZoneId::Day(day), outcome));
        }

        reports
    }

    fn draw_dishes<R, C>(
        &self,
        canvas: &mut C,
        registry: &R,
        dishes: &[TextBlock],
        zone: &Zone,
    ) -> Result<ZoneOutcome, RenderError>
    where
        R: FontRegistry,
        C: Canvas<R::Face>,
    {
        let dishes: Vec<TextBlock> = dishes
            .iter()
            .map(|dish| TextBlock {
                title: self.format_title(&dish.title),
                description: dish.description.clone(),
            })
            .collect();

        let settings = self.settings.fit_settings(registry);
        let fitted = fit::solve(registry, &dishes, zone, &settings)?;

        let title = registry.face(FontRole::Title, fitted.title_size)?;
        let description = registry.face(FontRole::Description, fitted.description_size)?;
        let area = settings.content_area(zone);

        let mut y = area.y;
        for (i, block) in fitted.blocks.iter().enumerate() {
            if i > 0 {
                y += settings.block_spacing;
            }
            y += layout::draw_lines(canvas, &title, &block.title_lines, (area.x, y), &settings.title);
            y += settings.title_gap;
            y += layout::draw_lines(
                canvas,
                &description,
                &block.description_lines,
                (area.x, y),
                &settings.description,
            );
        }

        Ok(ZoneOutcome::Fitted {
            title_size: fitted.title_size,
            description_size: fitted.description_size,
            fits: fitted.fits,
        })
    }

    fn draw_notice<R, C>(
        &self,
        canvas: &mut C,
        registry: &R,
        until: Option<&str>,
        zone: &Zone,
    ) -> Result<ZoneOutcome, RenderError>
    where
        R: FontRegistry,
        C: Canvas<R::Face>,
    {
        let warning = &self.settings.warning;
        let face = registry.face(FontRole::Title, self.settings.warning_font_size())?;
        let lines = warning.notice_lines(until);

        let text_width = lines.iter().map(|l| face.text_width(l)).max().unwrap_or(0);
        let text_height = layout::text_height(&lines, &face, warning.line_spacing);
        let padding = Margins::all(warning.padding);

        let panel_width = (text_width + padding.horizontal()).min(zone.width);
        let panel_height = (text_height + padding.vertical()).min(zone.max_height);
        let (panel_x, panel_y) = zone.centre(panel_width, panel_height);
        let panel = Zone::new(panel_x, panel_y, panel_width, panel_height);

        canvas.rounded_rect(
            panel,
            warning.border_radius,
            Some(warning.background),
            Some((warning.border_colour, warning.border_width)),
        );

        let style = TextStyle {
            colour: warning.text_colour,
            ..Default::default()
        };
        let mut y = panel.y + padding.top;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                y += warning.line_spacing;
            }
            let x = panel.x + (panel.width - face.text_width(line)).div_euclid(2);
            y += layout::draw_lines(canvas, &face, &[line], (x, y), &style);
        }

        Ok(ZoneOutcome::Notice)
    }

    fn draw_date_block<R, C>(
        &self,
        canvas: &mut C,
        registry: &R,
        range: &str,
        zone: &Zone,
    ) -> Result<ZoneOutcome, RenderError>
    where
        R: FontRegistry,
        C: Canvas<R::Face>,
    {
        let date = &self.settings.date_block;
        let face = registry.face(FontRole::Title, self.settings.fonts.title.size)?;

        canvas.rounded_rect(
            *zone,
            date.border_radius,
            None,
            Some((date.border_colour, date.border_width)),
        );

        // draw_lines puts the ink's top-left corner at the origin
        let text = face.text_box(range);
        let style = TextStyle {
            colour: date.text_colour,
            ..Default::default()
        };
        let origin = zone.centre(text.width(), text.height());
        layout::draw_lines(canvas, &face, &[range], origin, &style);

        Ok(ZoneOutcome::DateRange)
    }

    fn format_title(&self, title: &str) -> String {
        if self.settings.fonts.title.uppercase {
            title.to_uppercase()
        } else {
            title.to_string()
        }
    }
}

fn report(zone: ZoneId, outcome: Result<ZoneOutcome, RenderError>) -> ZoneReport {
    let outcome = outcome.unwrap_or_else(|err| {
        error!("failed to draw {zone}: {err}");
        ZoneOutcome::Failed(err.to_string())
    });
    debug!("{zone}: {outcome:?}");
    ZoneReport { zone, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::testing::{dejavu_sans, DrawCall, MonoRegistry, RecordingCanvas};

    fn settings() -> Settings {
        let mut settings = Settings::default();
        for (i, day) in Weekday::ALL.into_iter().enumerate() {
            settings
                .zones
                .days
                .insert(day, Zone::new(0, i as i32 * 320, 400, 300));
        }
        settings.zones.date_block = Some(Zone::new(500, 0, 200, 50));
        settings
    }

    fn dishes() -> Vec<TextBlock> {
        vec![
            TextBlock::new("борщ", "говядина, свёкла"),
            TextBlock::new("плов", "рис, курица, морковь"),
        ]
    }

    #[test]
    fn renders_every_zone_in_order() {
        let menu = WeekMenu::new()
            .with_date_range("15.12–19.12")
            .with_dishes(Weekday::Monday, dishes())
            .with_unavailable(Weekday::Wednesday, Some("12.01.26".into()));
        let mut canvas = RecordingCanvas::default();
        let reports = MenuRenderer::new(settings()).render_onto(
            &mut canvas,
            &MonoRegistry::default(),
            &menu,
        );

        let zones: Vec<ZoneId> = reports.iter().map(|r| r.zone).collect();
        assert_eq!(
            zones,
            [
                ZoneId::DateRange,
                ZoneId::Day(Weekday::Monday),
                ZoneId::Day(Weekday::Tuesday),
                ZoneId::Day(Weekday::Wednesday),
                ZoneId::Day(Weekday::Thursday),
                ZoneId::Day(Weekday::Friday),
            ]
        );
        assert_eq!(reports[0].outcome, ZoneOutcome::DateRange);
        assert!(matches!(reports[1].outcome, ZoneOutcome::Fitted { fits: true, .. }));
        assert_eq!(reports[2].outcome, ZoneOutcome::Skipped);
        assert_eq!(reports[3].outcome, ZoneOutcome::Notice);
        assert_eq!(reports[4].outcome, ZoneOutcome::Skipped);

        let texts = canvas.texts();
        assert_eq!(texts[0], "15.12–19.12");
        assert!(texts.contains(&"БОРЩ"));
        assert!(texts.contains(&"ПЛОВ"));
        assert!(texts.contains(&"ДО 12.01.26"));
        assert!(texts.contains(&"НЕ БУДЕТ"));
    }

    #[test]
    fn dishes_are_stacked_inside_the_padded_zone() {
        let menu = WeekMenu::new().with_dishes(Weekday::Monday, dishes());
        let mut canvas = RecordingCanvas::default();
        let renderer = MenuRenderer::new(settings());
        renderer.render_onto(&mut canvas, &MonoRegistry::default(), &menu);

        let positions: Vec<(i32, i32)> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        let budget_bottom = 2 + 300 - 4 - 5;
        assert!(positions.iter().all(|&(x, y)| x == 2 && (2..budget_bottom).contains(&y)));
        assert!(positions.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn days_without_zones_or_data_are_skipped() {
        let mut settings = settings();
        settings.zones.days.remove(&Weekday::Tuesday);
        settings.zones.date_block = None;
        let menu = WeekMenu::new()
            .with_date_range("15.12–19.12")
            .with_dishes(Weekday::Tuesday, dishes())
            .with_dishes(Weekday::Thursday, Vec::new());
        let mut canvas = RecordingCanvas::default();
        let reports =
            MenuRenderer::new(settings).render_onto(&mut canvas, &MonoRegistry::default(), &menu);

        assert!(reports.iter().all(|r| r.outcome == ZoneOutcome::Skipped));
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn a_failing_zone_does_not_stop_the_others() {
        let menu = WeekMenu::new()
            .with_dishes(Weekday::Monday, dishes())
            .with_unavailable(Weekday::Tuesday, None);
        let mut canvas = RecordingCanvas::default();
        let reports = MenuRenderer::new(settings()).render_onto(
            &mut canvas,
            &MonoRegistry::failing(FontRole::Description),
            &menu,
        );

        assert!(matches!(reports[0].outcome, ZoneOutcome::Failed(_)));
        assert_eq!(reports[1].outcome, ZoneOutcome::Notice);
        assert_eq!(canvas.texts(), ["БИЗНЕС ЛАНЧЕЙ", "НЕ БУДЕТ"]);
    }

    #[test]
    fn notice_panel_is_centred_in_the_zone() {
        let menu = WeekMenu::new().with_unavailable(Weekday::Monday, None);
        let mut canvas = RecordingCanvas::default();
        MenuRenderer::new(settings()).render_onto(&mut canvas, &MonoRegistry::default(), &menu);

        // 24px notice text: widest line is 13 chars * 14px, two 24px lines + 8px spacing
        let (width, height) = (13 * 14 + 40, 24 * 2 + 8 + 40);
        assert_eq!(
            canvas.calls[0],
            DrawCall::Panel {
                rect: Zone::new((400 - width) / 2, (300 - height) / 2, width, height),
                fill: Some(colours::PEACH),
            }
        );
    }

    #[test]
    fn bold_titles_get_a_stroke() {
        let registry = MonoRegistry {
            bold: Some(FontRole::Title),
            ..Default::default()
        };
        let menu = WeekMenu::new().with_dishes(Weekday::Monday, dishes());
        let mut canvas = RecordingCanvas::default();
        MenuRenderer::new(settings()).render_onto(&mut canvas, &registry, &menu);

        let outlined: Vec<&str> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Outline { text, width: 1, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(outlined, ["БОРЩ", "ПЛОВ"]);
    }

    #[test]
    fn missing_template_fails_the_render() {
        let mut settings = settings();
        settings.template = "no/such/template.png".into();
        let err = MenuRenderer::new(settings)
            .render(&WeekMenu::new())
            .err()
            .expect("template is missing");
        assert_eq!(err.to_string(), "template not found: no/such/template.png");
    }

    fn dejavu_fonts() -> FontSet {
        FontSet::new(dejavu_sans(), dejavu_sans()).with_bold(FontRole::Title, true)
    }

    #[test]
    fn fitted_text_stays_inside_its_zone() {
        let fonts = dejavu_fonts();
        let white = colours::WHITE.to_rgba();
        let mut fitted = 0;

        for height in [60, 100, 150, 200, 299] {
            let zone = Zone::new(0, 20, 400, height);
            let mut settings = Settings::default();
            settings.zones.days.insert(Weekday::Monday, zone);
            let menu = WeekMenu::new().with_dishes(Weekday::Monday, dishes());

            let mut canvas =
                RgbaCanvas::new(RgbaImage::from_pixel(400, (height + 60) as u32, white));
            let reports = MenuRenderer::new(settings).render_onto(&mut canvas, &fonts, &menu);
            let fits = match &reports[0].outcome {
                ZoneOutcome::Fitted { fits, .. } => *fits,
                other => panic!("zone was not fitted: {other:?}"),
            };
            if !fits {
                continue;
            }
            fitted += 1;

            let image = canvas.into_image();
            let stray = image.enumerate_pixels().find(|&(x, y, p)| {
                let (x, y) = (x as i32, y as i32);
                *p != white && (x >= zone.width || y < zone.y || y >= zone.bottom())
            });
            assert_eq!(stray.map(|(x, y, _)| (x, y)), None, "ink outside {zone:?}");
        }
        assert!(fitted > 0);
    }

    #[test]
    fn date_range_ink_is_centred_in_its_box() {
        let fonts = dejavu_fonts();
        let mut settings = settings();
        let zone = Zone::new(500, 10, 240, 60);
        settings.zones.date_block = Some(zone);
        let menu = WeekMenu::new().with_date_range("15.12–19.12");

        let mut canvas = RecordingCanvas::default();
        MenuRenderer::new(settings).render_onto(&mut canvas, &fonts, &menu);

        let face = fonts.face(FontRole::Title, 20).unwrap();
        let ink = face.text_box("15.12–19.12");
        let (x, y) = zone.centre(ink.width(), ink.height());
        assert_eq!(
            canvas.calls[1],
            DrawCall::Text {
                text: "15.12–19.12".into(),
                position: (x - ink.left, y - ink.top),
                fill: colours::BLACK,
            }
        );
    }
}
