//! Weekly promotion schedule.
//!
//! # Responsibility
//! - Hold the board's day-based business rules as data: daily specials,
//!   pizza promo days and localized day names.
//! - Answer layout questions for a resolved day.
//!
//! # Invariants
//! - A day with no entry in `daily_specials` uses the weekend layout.
//! - Defaults mirror the shipped boards; config files may replace any field.

use crate::model::daypart::DayOfWeek;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bilingual description of one daily special.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpecial {
    pub name_en: String,
    pub name_fr: String,
    pub image: String,
}

impl DailySpecial {
    fn new(name_en: &str, name_fr: &str, image: &str) -> Self {
        Self {
            name_en: name_en.to_string(),
            name_fr: name_fr.to_string(),
            image: image.to_string(),
        }
    }
}

/// Layout variant the specials screen should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialsLayout {
    /// One featured special for today.
    Featured,
    /// No special today; show the whole week.
    WeekOverview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromoSchedule {
    pub daily_specials: BTreeMap<DayOfWeek, DailySpecial>,
    pub pizza_promo_days: Vec<DayOfWeek>,
    pub day_names_fr: BTreeMap<DayOfWeek, String>,
}

impl Default for PromoSchedule {
    fn default() -> Self {
        let daily_specials = BTreeMap::from([
            (
                DayOfWeek::Monday,
                DailySpecial::new(
                    "Hamburger Platter",
                    "Assiette hamburger",
                    "/images/hamburger-platter.png",
                ),
            ),
            (
                DayOfWeek::Tuesday,
                DailySpecial::new(
                    "Smoked Meat Platter",
                    "Assiette sandwich à la viande fumée",
                    "/images/smoked-meat-platter.png",
                ),
            ),
            (
                DayOfWeek::Wednesday,
                DailySpecial::new(
                    "8 Chicken Wings Platter",
                    "Assiette 8 ailes de poulet",
                    "/images/chicken-wings-platter.png",
                ),
            ),
            (
                DayOfWeek::Thursday,
                DailySpecial::new(
                    "Chicken Finger Platter",
                    "Assiette doigts de poulet",
                    "/images/chicken-finger-platter.png",
                ),
            ),
            (
                DayOfWeek::Friday,
                DailySpecial::new("Fish & Chips", "Fish & Chips", "/images/fish-and-chips.png"),
            ),
        ]);

        let day_names_fr = [
            (DayOfWeek::Monday, "Lundi"),
            (DayOfWeek::Tuesday, "Mardi"),
            (DayOfWeek::Wednesday, "Mercredi"),
            (DayOfWeek::Thursday, "Jeudi"),
            (DayOfWeek::Friday, "Vendredi"),
            (DayOfWeek::Saturday, "Samedi"),
            (DayOfWeek::Sunday, "Dimanche"),
        ]
        .into_iter()
        .map(|(day, name)| (day, name.to_string()))
        .collect();

        Self {
            daily_specials,
            pizza_promo_days: vec![
                DayOfWeek::Wednesday,
                DayOfWeek::Thursday,
                DayOfWeek::Friday,
            ],
            day_names_fr,
        }
    }
}

impl PromoSchedule {
    pub fn special_for(&self, day: DayOfWeek) -> Option<&DailySpecial> {
        self.daily_specials.get(&day)
    }

    pub fn is_pizza_promo_day(&self, day: DayOfWeek) -> bool {
        self.pizza_promo_days.contains(&day)
    }

    pub fn layout_for(&self, day: DayOfWeek) -> SpecialsLayout {
        if self.special_for(day).is_some() {
            SpecialsLayout::Featured
        } else {
            SpecialsLayout::WeekOverview
        }
    }

    /// French display name, falling back to the canonical English name.
    pub fn day_name_fr(&self, day: DayOfWeek) -> &str {
        self.day_names_fr
            .get(&day)
            .map(String::as_str)
            .unwrap_or_else(|| day.as_str())
    }
}
