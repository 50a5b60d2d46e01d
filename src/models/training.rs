use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::trip::TourStyle;

/// A previously authored itinerary kept as a writing-style reference.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TrainingItinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub tour_type: TourStyle,
    pub days: u32,
    #[serde(default)]
    pub cities: String,
    pub content: String,
    pub created_at: Option<DateTime>,
}

/// Body of a create request. Validation happens in [`NewTrainingItinerary::validate`].
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NewTrainingItinerary {
    pub title: Option<String>,
    pub tour_type: Option<TourStyle>,
    pub days: Option<u32>,
    pub cities: Option<String>,
    pub content: Option<String>,
}

impl NewTrainingItinerary {
    /// Turn the request into a storable document, or `None` when a required
    /// field is missing or blank.
    pub fn validate(self) -> Option<TrainingItinerary> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let tour_type = self.tour_type?;
        let days = self.days.filter(|d| *d > 0)?;
        let content = self.content.filter(|c| !c.trim().is_empty())?;

        Some(TrainingItinerary {
            id: None,
            title: title.trim().to_string(),
            tour_type,
            days,
            cities: self.cities.unwrap_or_default(),
            content,
            created_at: None,
        })
    }
}

/// The part of a training itinerary the generator consults.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceItinerary {
    pub title: Option<String>,
    pub content: String,
}

impl From<TrainingItinerary> for ReferenceItinerary {
    fn from(itinerary: TrainingItinerary) -> Self {
        Self {
            title: Some(itinerary.title).filter(|t| !t.is_empty()),
            content: itinerary.content,
        }
    }
}
