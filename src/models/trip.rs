use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TOTAL_DAYS: u32 = 7;
/// Longest trip that can be generated. Every day costs one generation call.
pub const MAX_TOTAL_DAYS: u32 = 60;
pub const DEFAULT_TRAVELER_COUNT: u32 = 2;
pub const DEFAULT_DESTINATIONS: [&str; 2] = ["Istanbul", "Cappadocia"];
pub const DEFAULT_INTERESTS: [&str; 2] = ["history", "culture"];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourStyle {
    /// Seat-in-coach, shared with other travelers
    #[serde(rename = "SIC")]
    Sic,
    #[default]
    #[serde(rename = "Private")]
    Private,
}

impl TourStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourStyle::Sic => "SIC",
            TourStyle::Private => "Private",
        }
    }
}

impl fmt::Display for TourStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trip request as it arrives over the wire. Every field is optional.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TripRequest {
    #[serde(rename = "days")]
    pub total_days: Option<u32>,
    #[serde(rename = "cities")]
    pub destinations: Option<Vec<String>>,
    #[serde(rename = "tour_type")]
    pub tour_style: Option<TourStyle>,
    #[serde(rename = "pax")]
    pub traveler_count: Option<u32>,
    pub interests: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
}

/// Fully populated trip parameters. Only built through [`TripRequest::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct TripParameters {
    pub total_days: u32,
    pub destinations: Vec<String>,
    pub tour_style: TourStyle,
    pub traveler_count: u32,
    pub interests: Vec<String>,
    pub start_date: NaiveDate,
}

impl TripRequest {
    /// Trip length above [`MAX_TOTAL_DAYS`], if any was requested.
    pub fn exceeds_max_days(&self) -> bool {
        self.total_days.is_some_and(|days| days > MAX_TOTAL_DAYS)
    }

    /// Fill every missing field with its default. Zero counts and empty
    /// destination lists count as missing; repeated destinations collapse
    /// onto their first position so each destination's days stay contiguous.
    /// Trip length is capped at [`MAX_TOTAL_DAYS`].
    pub fn resolve(self, today: NaiveDate) -> TripParameters {
        let destinations = self
            .destinations
            .map(|names| {
                let mut unique: Vec<String> = Vec::with_capacity(names.len());
                for name in names {
                    let name = name.trim().to_string();
                    if !name.is_empty() && !unique.contains(&name) {
                        unique.push(name);
                    }
                }
                unique
            })
            .filter(|names| !names.is_empty())
            .unwrap_or_else(|| DEFAULT_DESTINATIONS.iter().map(|s| s.to_string()).collect());

        let mut total_days = self
            .total_days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_TOTAL_DAYS);
        if total_days > MAX_TOTAL_DAYS {
            warn!("{} days requested, capping at {}", total_days, MAX_TOTAL_DAYS);
            total_days = MAX_TOTAL_DAYS;
        }

        TripParameters {
            total_days,
            destinations,
            tour_style: self.tour_style.unwrap_or_default(),
            traveler_count: self
                .traveler_count
                .filter(|count| *count > 0)
                .unwrap_or(DEFAULT_TRAVELER_COUNT),
            interests: self
                .interests
                .unwrap_or_else(|| DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()),
            start_date: self.start_date.unwrap_or(today),
        }
    }
}
