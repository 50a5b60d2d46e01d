use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::generation::GenerationOutcome;
use super::trip::TourStyle;

/// One day of the generated itinerary. Field order matches the wire format.
#[derive(Debug, Serialize, Clone)]
pub struct DayPlan {
    #[serde(rename = "day")]
    pub day_index: u32,
    #[serde(rename = "date")]
    pub date: NaiveDate,
    #[serde(rename = "city")]
    pub destination: String,
    pub description: GenerationOutcome,
    pub activities: Vec<String>,
    pub meals: Vec<String>,
    #[serde(rename = "accommodation")]
    pub lodging: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ItineraryResult {
    pub title: GenerationOutcome,
    #[serde(rename = "tour_type")]
    pub tour_style: TourStyle,
    #[serde(rename = "duration")]
    pub total_days: u32,
    #[serde(rename = "cities")]
    pub destinations: Vec<String>,
    #[serde(rename = "pax")]
    pub traveler_count: u32,
    #[serde(rename = "itinerary")]
    pub days: Vec<DayPlan>,
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "learned_from")]
    pub reference_itineraries_consulted: usize,
}

impl ItineraryResult {
    /// Number of generation calls that fell back to an error text.
    pub fn degraded_count(&self) -> usize {
        let title = usize::from(self.title.is_degraded());
        title + self.days.iter().filter(|d| d.description.is_degraded()).count()
    }
}
