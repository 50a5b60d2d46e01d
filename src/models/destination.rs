use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DestinationProfile {
    pub name: String,
    pub description: String,
    /// Ordered by importance; prompts and day plans take from the front.
    pub highlights: Vec<String>,
    pub typical_stay_length: u32,
}

impl DestinationProfile {
    pub fn new(name: &str, description: &str, highlights: &[&str], typical_stay_length: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            highlights: highlights.iter().map(|h| h.to_string()).collect(),
            typical_stay_length: typical_stay_length.max(1),
        }
    }
}
