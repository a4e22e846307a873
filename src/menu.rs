use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The weekdays a menu template has zones for, in drawing order
#[derive(
    Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    #[display("ПН")]
    #[serde(rename = "ПН", alias = "mon")]
    Monday,
    #[display("ВТ")]
    #[serde(rename = "ВТ", alias = "tue")]
    Tuesday,
    #[display("СР")]
    #[serde(rename = "СР", alias = "wed")]
    Wednesday,
    #[display("ЧТ")]
    #[serde(rename = "ЧТ", alias = "thu")]
    Thursday,
    #[display("ПТ")]
    #[serde(rename = "ПТ", alias = "fri")]
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];
}

/// A dish: a title and a description, laid out and drawn together
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub title: String,
    pub description: String,
}

impl TextBlock {
    pub fn new<T: Into<String>, D: Into<String>>(title: T, description: D) -> TextBlock {
        TextBlock {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What is served on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMenu {
    /// No lunches that day, optionally until a given date (kept as written, e.g. `12.01.26`)
    Unavailable { until: Option<String> },
    Normal(Vec<TextBlock>),
}

/// A week's menu. Days missing from `days` are left blank on the image
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekMenu {
    pub days: BTreeMap<Weekday, DayMenu>,
    /// Shown in the date block, e.g. `15.12–19.12`
    pub date_range: Option<String>,
}

impl WeekMenu {
    pub fn new() -> WeekMenu {
        WeekMenu::default()
    }

    pub fn with_date_range<S: Into<String>>(mut self, range: S) -> WeekMenu {
        self.date_range = Some(range.into());
        self
    }

    pub fn with_dishes(mut self, day: Weekday, dishes: Vec<TextBlock>) -> WeekMenu {
        self.days.insert(day, DayMenu::Normal(dishes));
        self
    }

    pub fn with_unavailable(mut self, day: Weekday, until: Option<String>) -> WeekMenu {
        self.days.insert(day, DayMenu::Unavailable { until });
        self
    }

    pub fn day(&self, day: Weekday) -> Option<&DayMenu> {
        self.days.get(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_display_as_template_labels() {
        let labels: Vec<String> = Weekday::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(labels, ["ПН", "ВТ", "СР", "ЧТ", "ПТ"]);
    }

    #[test]
    fn days_are_kept_in_week_order() {
        let menu = WeekMenu::new()
            .with_unavailable(Weekday::Friday, Some("12.01.26".into()))
            .with_dishes(Weekday::Monday, vec![TextBlock::new("БОРЩ", "свёкла")]);
        let order: Vec<Weekday> = menu.days.keys().copied().collect();
        assert_eq!(order, [Weekday::Monday, Weekday::Friday]);
        assert_eq!(menu.day(Weekday::Tuesday), None);
    }
}
